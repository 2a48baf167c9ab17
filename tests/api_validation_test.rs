// ==========================================
// 输入校验测试 (API 层)
// ==========================================
// 畸形清单必须在进入引擎层之前被拒绝
// ==========================================

#[path = "helpers/test_data_builder.rs"]
mod test_data_builder;

use smart_feed::api::error::ApiError;
use smart_feed::api::validator::StreamValidator;
use smart_feed::config::SystemConfig;
use smart_feed::{OptimizeApi, MAX_STREAMS};
use test_data_builder::{resin, stream};

fn assert_invalid(streams: &[smart_feed::WasteStream]) {
    assert!(matches!(
        StreamValidator::validate(streams),
        Err(ApiError::InvalidInput(_))
    ));
}

#[test]
fn test_valid_streams_pass() {
    let streams = vec![resin(), test_data_builder::afff()];
    assert!(StreamValidator::validate(&streams).is_ok());
}

#[test]
fn test_empty_list_rejected() {
    assert_invalid(&[]);
}

#[test]
fn test_too_many_streams_rejected() {
    let streams: Vec<_> = (0..=MAX_STREAMS)
        .map(|i| stream(&format!("S{}", i), 100.0, 0.0, 7.0, 0.0, 0.0, 0.0))
        .collect();
    assert_eq!(streams.len(), MAX_STREAMS + 1);
    assert_invalid(&streams);
}

#[test]
fn test_max_streams_exactly_is_allowed() {
    let streams: Vec<_> = (0..MAX_STREAMS)
        .map(|i| stream(&format!("S{}", i), 100.0, 0.0, 7.0, 0.0, 0.0, 0.0))
        .collect();
    assert!(StreamValidator::validate(&streams).is_ok());
}

#[test]
fn test_blank_stream_id_rejected() {
    assert_invalid(&[stream("   ", 100.0, 0.0, 7.0, 0.0, 0.0, 0.0)]);
}

#[test]
fn test_duplicate_stream_id_rejected() {
    assert_invalid(&[
        stream("A", 100.0, 0.0, 7.0, 0.0, 0.0, 0.0),
        stream("A", 50.0, 0.0, 7.0, 0.0, 0.0, 0.0),
    ]);
}

#[test]
fn test_nonpositive_quantity_rejected() {
    assert_invalid(&[stream("A", 0.0, 0.0, 7.0, 0.0, 0.0, 0.0)]);
    assert_invalid(&[stream("A", -5.0, 0.0, 7.0, 0.0, 0.0, 0.0)]);
}

#[test]
fn test_negative_btu_rejected() {
    assert_invalid(&[stream("A", 100.0, -1.0, 7.0, 0.0, 0.0, 0.0)]);
}

#[test]
fn test_ph_out_of_range_rejected() {
    assert_invalid(&[stream("A", 100.0, 0.0, -0.1, 0.0, 0.0, 0.0)]);
    assert_invalid(&[stream("A", 100.0, 0.0, 14.1, 0.0, 0.0, 0.0)]);
}

#[test]
fn test_negative_f_ppm_rejected() {
    assert_invalid(&[stream("A", 100.0, 0.0, 7.0, -1.0, 0.0, 0.0)]);
}

#[test]
fn test_solid_pct_out_of_range_rejected() {
    assert_invalid(&[stream("A", 100.0, 0.0, 7.0, 0.0, 100.5, 0.0)]);
    assert_invalid(&[stream("A", 100.0, 0.0, 7.0, 0.0, -0.5, 0.0)]);
}

#[test]
fn test_negative_salt_ppm_rejected() {
    assert_invalid(&[stream("A", 100.0, 0.0, 7.0, 0.0, 0.0, -1.0)]);
}

#[test]
fn test_optimize_api_rejects_invalid_input() {
    // 校验失败走 ApiError::InvalidInput, 引擎层不应被触达
    let cfg = SystemConfig::default();
    let result = OptimizeApi::run(&[], &cfg);
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));

    let dup = vec![resin(), resin()];
    assert!(matches!(
        OptimizeApi::run(&dup, &cfg),
        Err(ApiError::InvalidInput(_))
    ));
}
