// ==========================================
// Smart-Feed 多相喂料优化系统 - 输入校验器
// ==========================================
// 职责: 在进入引擎层之前拒绝畸形的废料清单
// 红线: 引擎层契约假定输入已通过校验 (InvalidInput 不属于优化器契约)
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::stream::WasteStream;
use crate::MAX_STREAMS;
use std::collections::HashSet;

// ==========================================
// StreamValidator - 废料清单校验器
// ==========================================
pub struct StreamValidator;

impl StreamValidator {
    /// 校验废料清单
    ///
    /// 规则:
    /// - 1 ≤ 流数量 ≤ MAX_STREAMS
    /// - stream_id 非空且唯一
    /// - quantity_l > 0
    /// - pH ∈ [0, 14], solid_pct ∈ [0, 100]
    /// - btu_per_lb / f_ppm / salt_ppm 非负
    pub fn validate(streams: &[WasteStream]) -> ApiResult<()> {
        if streams.is_empty() {
            return Err(ApiError::InvalidInput("至少需要 1 条废料流".to_string()));
        }
        if streams.len() > MAX_STREAMS {
            return Err(ApiError::InvalidInput(format!(
                "最多支持 {} 条废料流, 当前 {} 条",
                MAX_STREAMS,
                streams.len()
            )));
        }

        let mut seen = HashSet::new();
        for s in streams {
            if s.stream_id.trim().is_empty() {
                return Err(ApiError::InvalidInput("stream_id 不能为空".to_string()));
            }
            if !seen.insert(s.stream_id.as_str()) {
                return Err(ApiError::InvalidInput(format!(
                    "重复的 stream_id: {}",
                    s.stream_id
                )));
            }

            if !(s.quantity_l > 0.0) {
                return Err(ApiError::InvalidInput(format!(
                    "{}: quantity_l 必须 > 0",
                    s.stream_id
                )));
            }
            if s.btu_per_lb < 0.0 {
                return Err(ApiError::InvalidInput(format!(
                    "{}: btu_per_lb 不能为负",
                    s.stream_id
                )));
            }
            if !(0.0..=14.0).contains(&s.ph) {
                return Err(ApiError::InvalidInput(format!(
                    "{}: pH 必须在 0-14 之间",
                    s.stream_id
                )));
            }
            if s.f_ppm < 0.0 {
                return Err(ApiError::InvalidInput(format!(
                    "{}: f_ppm 不能为负",
                    s.stream_id
                )));
            }
            if !(0.0..=100.0).contains(&s.solid_pct) {
                return Err(ApiError::InvalidInput(format!(
                    "{}: solid_pct 必须在 0-100 之间",
                    s.stream_id
                )));
            }
            if s.salt_ppm < 0.0 {
                return Err(ApiError::InvalidInput(format!(
                    "{}: salt_ppm 不能为负",
                    s.stream_id
                )));
            }
        }

        Ok(())
    }
}
