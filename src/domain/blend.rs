// ==========================================
// Smart-Feed 多相喂料优化系统 - 混合属性值对象
// ==========================================
// 用途: 混合后的废料属性（中间计算结果）
// 产出: engine::blending::calc_blend_properties
// ==========================================

use serde::{Deserialize, Serialize};

/// 混合后的废料属性
///
/// BTU / F ppm / Solid% / Salt ppm 为体积加权线性平均,
/// pH 为 [H⁺] 浓度法混合后转回。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendProperties {
    pub btu_per_lb: f64, // 热值 (BTU/lb)
    pub ph: f64,         // pH 值
    pub f_ppm: f64,      // 氟浓度 (ppm)
    pub solid_pct: f64,  // 固体含量 (%)
    pub salt_ppm: f64,   // 盐浓度 (ppm)
}
