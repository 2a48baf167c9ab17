#![allow(dead_code)]
// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================
// 固定场景: Resin (solo 经济) + AFFF (solo 极不经济, 需大量柴油)
//           + Caustic (与酸性流化学互补)
// ==========================================

use smart_feed::config::SystemConfig;
use smart_feed::domain::stream::WasteStream;
use smart_feed::engine::gatekeeper::GatekeeperOracle;
use smart_feed::engine::search::{PhaseScheduler, SearchOutcome};
use smart_feed::engine::templates::TemplateBuilder;
use std::collections::BTreeMap;

/// 树脂: 高热值、强酸、全固体
pub fn resin() -> WasteStream {
    WasteStream {
        stream_id: "Resin".to_string(),
        quantity_l: 200.0,
        btu_per_lb: 12500.0,
        ph: 3.0,
        f_ppm: 15000.0,
        solid_pct: 100.0,
        salt_ppm: 500.0,
        moisture_pct: 0.0,
    }
}

/// AFFF 泡沫液: 近乎纯水, solo 需要大量柴油补热
pub fn afff() -> WasteStream {
    WasteStream {
        stream_id: "AFFF".to_string(),
        quantity_l: 500.0,
        btu_per_lb: 1.0,
        ph: 7.5,
        f_ppm: 5000.0,
        solid_pct: 0.5,
        salt_ppm: 200.0,
        moisture_pct: 99.5,
    }
}

/// 碱液: 强碱、高盐, 与酸性流互补
pub fn caustic() -> WasteStream {
    WasteStream {
        stream_id: "Caustic".to_string(),
        quantity_l: 300.0,
        btu_per_lb: 0.0,
        ph: 13.5,
        f_ppm: 0.0,
        solid_pct: 0.0,
        salt_ppm: 8000.0,
        moisture_pct: 65.0,
    }
}

/// 自定义废料流
pub fn stream(
    id: &str,
    quantity_l: f64,
    btu_per_lb: f64,
    ph: f64,
    f_ppm: f64,
    solid_pct: f64,
    salt_ppm: f64,
) -> WasteStream {
    WasteStream {
        stream_id: id.to_string(),
        quantity_l,
        btu_per_lb,
        ph,
        f_ppm,
        solid_pct,
        salt_ppm,
        moisture_pct: 0.0,
    }
}

/// 直接走引擎层的完整搜索: 预言机 → 模板 → 递归搜索
pub fn solve(streams: &[WasteStream], cfg: &SystemConfig) -> SearchOutcome {
    let oracle = GatekeeperOracle::new(cfg.clone());
    let templates = TemplateBuilder::build(streams, &oracle, cfg);
    let inventory: BTreeMap<String, f64> = streams
        .iter()
        .map(|s| (s.stream_id.clone(), s.quantity_l))
        .collect();
    PhaseScheduler::new(&templates, cfg)
        .solve(&inventory)
        .expect("搜索不应触发致命错误")
}
