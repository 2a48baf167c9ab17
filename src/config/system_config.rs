// ==========================================
// Smart-Feed 多相喂料优化系统 - 系统配置
// ==========================================
// 所有参数均有基于 AxNano 运行数据的默认值,
// 用户可根据具体设备和运行条件调整。
// 分为五组:
// 1. 反应器参数
// 2. 反应器边界条件
// 3. 化学常数（拟合值）
// 4. 单位成本
// 5. 搜索参数
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// SystemConfig - 系统配置（全量, 含默认值）
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // ===== 1. 反应器参数 =====
    /// 总进料容量 (L/min), 含废料+所有外部输入
    /// 观测范围: 9.4–11.4 L/min
    pub f_total: f64,
    /// 系统功率 (kW), 观测范围: 376–400 kW
    pub p_system: f64,

    // ===== 2. 反应器边界条件 =====
    /// 目标热值 (BTU/lb)
    pub btu_target: f64,
    /// 最大固体含量 (%), 超过则无法泵送
    pub solid_max_pct: f64,
    /// 最低 pH（待工程确认）
    pub ph_min: f64,
    /// 最高 pH（待工程确认）
    pub ph_max: f64,
    /// 最大盐浓度 (ppm), 超过则堵塞风险
    pub salt_max_ppm: f64,
    /// 柴油热值 (BTU/lb)
    pub btu_diesel: f64,
    /// 热效率因子（已从运行数据验证）
    pub eta: f64,

    // ===== 3. 化学常数（拟合值, 可调节）=====
    /// F ppm → 酸当量转换系数 (meq / (L·ppm))
    /// 默认值基于化学计量: 1 ppm F⁻ = 1mg/L, MW=19 → ~0.053 mmol/L
    pub k_f_to_acid: f64,
    /// pH 碱性贡献系数 (meq / (L·pH_unit))
    /// 当 blend pH > 7 时, (pH - 7) × k_ph_to_base = 碱当量 (meq/L)
    /// 此为线性近似, 需从运行数据校准
    pub k_ph_to_base: f64,
    /// 中和 1 meq 酸需要的 35% NaOH 体积 (L_NaOH / meq)
    /// 理论推导: 35% NaOH → 12075 meq/L → 1/12075 ≈ 8.28e-5
    pub k_acid_to_naoh_vol: f64,

    // ===== 4. 单位成本 =====
    pub cost_diesel_per_l: f64,        // $/L
    pub cost_naoh_per_l: f64,          // $/L (35% NaOH 溶液)
    pub cost_water_per_l: f64,         // $/L (DI 水)
    pub cost_electricity_per_kwh: f64, // $/kWh
    pub cost_labor_per_hr: f64,        // $/hr

    // ===== 5. 搜索参数 =====
    /// 配比总和上限 (= f_total 取整)
    pub ratio_sum_max: u32,
    /// 最低可行吞吐量 (L/min)
    pub w_min: f64,
    /// 每个子集保留的模板数量上限 (quota K)
    pub max_templates_per_subset: usize,
    /// 库存耗尽判定阈值 (L): 剩余量 ≤ 此值视为已耗尽
    pub depletion_epsilon_l: f64,
    /// Memo 键量化粒度 (L): 剩余量按此粒度取整后作为缓存键
    pub memo_granularity_l: f64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // 反应器参数
            f_total: 11.0,
            p_system: 400.0,
            // 边界条件
            btu_target: 2200.0,
            solid_max_pct: 15.0,
            ph_min: 6.0,
            ph_max: 9.0,
            salt_max_ppm: 5000.0,
            btu_diesel: 18300.0,
            eta: 0.89,
            // 化学常数
            k_f_to_acid: 0.053,
            k_ph_to_base: 50.0,
            k_acid_to_naoh_vol: 8.28e-5,
            // 单位成本
            cost_diesel_per_l: 1.00,
            cost_naoh_per_l: 1.51,
            cost_water_per_l: 0.00199,
            cost_electricity_per_kwh: 0.12,
            cost_labor_per_hr: 100.0,
            // 搜索参数
            ratio_sum_max: 11,
            w_min: 0.5,
            max_templates_per_subset: 30,
            depletion_epsilon_l: 0.5,
            memo_granularity_l: 1.0,
        }
    }
}

// ==========================================
// ConfigOverrides - 配置覆盖（全部可选）
// ==========================================
// 来源: JSON 清单 "config" 段 / CLI 参数
// 未设置的字段保持原值, 不产生行为漂移
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOverrides {
    pub f_total: Option<f64>,
    pub p_system: Option<f64>,
    pub btu_target: Option<f64>,
    pub solid_max_pct: Option<f64>,
    pub ph_min: Option<f64>,
    pub ph_max: Option<f64>,
    pub salt_max_ppm: Option<f64>,
    pub btu_diesel: Option<f64>,
    pub eta: Option<f64>,
    pub k_f_to_acid: Option<f64>,
    pub k_ph_to_base: Option<f64>,
    pub k_acid_to_naoh_vol: Option<f64>,
    pub cost_diesel_per_l: Option<f64>,
    pub cost_naoh_per_l: Option<f64>,
    pub cost_water_per_l: Option<f64>,
    pub cost_electricity_per_kwh: Option<f64>,
    pub cost_labor_per_hr: Option<f64>,
    pub ratio_sum_max: Option<u32>,
    pub w_min: Option<f64>,
    pub max_templates_per_subset: Option<usize>,
    pub depletion_epsilon_l: Option<f64>,
    pub memo_granularity_l: Option<f64>,
}

impl ConfigOverrides {
    /// 是否未设置任何覆盖
    pub fn is_empty(&self) -> bool {
        serde_json::to_value(self)
            .map(|v| {
                v.as_object()
                    .map(|obj| obj.values().all(|x| x.is_null()))
                    .unwrap_or(true)
            })
            .unwrap_or(true)
    }

    /// 将覆盖应用到配置上（仅已设置的字段）
    pub fn apply_to(&self, cfg: &mut SystemConfig) {
        if let Some(v) = self.f_total {
            cfg.f_total = v;
        }
        if let Some(v) = self.p_system {
            cfg.p_system = v;
        }
        if let Some(v) = self.btu_target {
            cfg.btu_target = v;
        }
        if let Some(v) = self.solid_max_pct {
            cfg.solid_max_pct = v;
        }
        if let Some(v) = self.ph_min {
            cfg.ph_min = v;
        }
        if let Some(v) = self.ph_max {
            cfg.ph_max = v;
        }
        if let Some(v) = self.salt_max_ppm {
            cfg.salt_max_ppm = v;
        }
        if let Some(v) = self.btu_diesel {
            cfg.btu_diesel = v;
        }
        if let Some(v) = self.eta {
            cfg.eta = v;
        }
        if let Some(v) = self.k_f_to_acid {
            cfg.k_f_to_acid = v;
        }
        if let Some(v) = self.k_ph_to_base {
            cfg.k_ph_to_base = v;
        }
        if let Some(v) = self.k_acid_to_naoh_vol {
            cfg.k_acid_to_naoh_vol = v;
        }
        if let Some(v) = self.cost_diesel_per_l {
            cfg.cost_diesel_per_l = v;
        }
        if let Some(v) = self.cost_naoh_per_l {
            cfg.cost_naoh_per_l = v;
        }
        if let Some(v) = self.cost_water_per_l {
            cfg.cost_water_per_l = v;
        }
        if let Some(v) = self.cost_electricity_per_kwh {
            cfg.cost_electricity_per_kwh = v;
        }
        if let Some(v) = self.cost_labor_per_hr {
            cfg.cost_labor_per_hr = v;
        }
        if let Some(v) = self.ratio_sum_max {
            cfg.ratio_sum_max = v;
        }
        if let Some(v) = self.w_min {
            cfg.w_min = v;
        }
        if let Some(v) = self.max_templates_per_subset {
            cfg.max_templates_per_subset = v;
        }
        if let Some(v) = self.depletion_epsilon_l {
            cfg.depletion_epsilon_l = v;
        }
        if let Some(v) = self.memo_granularity_l {
            cfg.memo_granularity_l = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_operating_data() {
        let cfg = SystemConfig::default();
        assert_eq!(cfg.f_total, 11.0);
        assert_eq!(cfg.ratio_sum_max, 11);
        assert_eq!(cfg.max_templates_per_subset, 30);
        assert_eq!(cfg.depletion_epsilon_l, 0.5);
        assert_eq!(cfg.memo_granularity_l, 1.0);
    }

    #[test]
    fn test_overrides_apply_only_set_fields() {
        let mut cfg = SystemConfig::default();
        let overrides = ConfigOverrides {
            f_total: Some(10.5),
            eta: Some(0.85),
            ..Default::default()
        };
        overrides.apply_to(&mut cfg);
        assert_eq!(cfg.f_total, 10.5);
        assert_eq!(cfg.eta, 0.85);
        // 未覆盖字段保持默认
        assert_eq!(cfg.p_system, 400.0);
    }

    #[test]
    fn test_overrides_is_empty() {
        assert!(ConfigOverrides::default().is_empty());
        let o = ConfigOverrides {
            w_min: Some(0.6),
            ..Default::default()
        };
        assert!(!o.is_empty());
    }
}
