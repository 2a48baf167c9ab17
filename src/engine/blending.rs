// ==========================================
// Smart-Feed 多相喂料优化系统 - 混合属性计算
// ==========================================
// 职责: 按配比计算混合后的废料属性
// - 线性混合: BTU / F ppm / Solid% / Salt ppm
// - pH 混合: [H⁺] 浓度法（化学上正确）
// 红线: 纯函数, 无状态、无副作用、无 I/O
// ==========================================

use crate::domain::blend::BlendProperties;
use crate::domain::stream::WasteStream;

/// 体积加权线性平均, 用于 BTU / F ppm / Solid% / Salt ppm
///
/// P_blend = Σ(P_i × ratio_i) / Σ(ratio_i)
pub fn blend_linear(values: &[f64], ratios: &[u32]) -> f64 {
    let total: u32 = ratios.iter().sum();
    if total == 0 {
        return 0.0;
    }
    values
        .iter()
        .zip(ratios)
        .map(|(v, &r)| v * f64::from(r))
        .sum::<f64>()
        / f64::from(total)
}

/// 化学上正确的 pH 混合:
/// 1. pH → [H⁺] = 10^(-pH)
/// 2. [H⁺] 体积加权平均
/// 3. [H⁺]_blend → pH = -log10([H⁺]_blend)
///
/// 注: 忽略缓冲容量; 对强酸/强碱废料结果合理。
pub fn blend_ph(ph_values: &[f64], ratios: &[u32]) -> f64 {
    let total: u32 = ratios.iter().sum();
    if total == 0 {
        return 7.0;
    }

    let h_concentration = ph_values
        .iter()
        .zip(ratios)
        .map(|(ph, &r)| 10f64.powf(-ph) * f64::from(r))
        .sum::<f64>()
        / f64::from(total);

    if h_concentration <= 0.0 {
        return 14.0; // 极端碱性
    }
    -h_concentration.log10()
}

/// 计算一组废料流在给定配比下的混合属性
///
/// BTU / F ppm / Solid% / Salt: 线性加权平均
/// pH: [H⁺] 浓度混合法
pub fn calc_blend_properties(streams: &[&WasteStream], ratios: &[u32]) -> BlendProperties {
    debug_assert_eq!(streams.len(), ratios.len());

    let collect = |f: fn(&WasteStream) -> f64| streams.iter().map(|s| f(s)).collect::<Vec<_>>();

    BlendProperties {
        btu_per_lb: blend_linear(&collect(|s| s.btu_per_lb), ratios),
        ph: blend_ph(&collect(|s| s.ph), ratios),
        f_ppm: blend_linear(&collect(|s| s.f_ppm), ratios),
        solid_pct: blend_linear(&collect(|s| s.solid_pct), ratios),
        salt_ppm: blend_linear(&collect(|s| s.salt_ppm), ratios),
    }
}
