// ==========================================
// Smart-Feed 多相喂料优化系统 - 废料流领域模型
// ==========================================
// 用途: 导入层写入, 引擎层只读
// 属性使用原始废料值, 非预处理后的值
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// WasteStream - 废料流主数据
// ==========================================
// 所有字段由用户提供, 无默认值
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WasteStream {
    // ===== 主键 =====
    pub stream_id: String, // 唯一标识, 如 "Resin-001", "AFFF-003"

    // ===== 库存 =====
    pub quantity_l: f64, // 总量 (升)

    // ===== 化学属性（仅由成本预言机消费）=====
    pub btu_per_lb: f64,   // 热值 (BTU/lb), 原始值
    pub ph: f64,           // pH 值
    pub f_ppm: f64,        // 氟浓度 (ppm)
    pub solid_pct: f64,    // 固体含量 (%), 原始值
    pub salt_ppm: f64,     // 盐浓度 (ppm)
    pub moisture_pct: f64, // 水分 (%), 仅展示, 不参与计算
}
