// ==========================================
// Smart-Feed 多相喂料优化系统 - Gatekeeper 成本预言机
// ==========================================
// 职责: 对候选混合给出可行性与成本率
// 计算每单位废料的外部输入率 (r_water, r_diesel, r_naoh),
// 由同步方程推导吞吐量 W, 并给出 5 项 $/min 成本率。
// ★ 计算顺序至关重要: r_water → BTU_eff → r_diesel → r_naoh
//   这保证了一步求解, 无循环依赖。
// ==========================================
// 红线: 预言机必须是确定性纯函数 —— memo 正确性依赖于此。
// 搜索引擎只通过 BlendCostOracle trait 访问本模块。
// ==========================================

use crate::config::SystemConfig;
use crate::domain::blend::BlendProperties;
use crate::domain::stream::WasteStream;
use crate::engine::blending::calc_blend_properties;
use serde::{Deserialize, Serialize};

// ==========================================
// 预言机输出结构
// ==========================================

/// 外部输入率 (L 外部输入 / L 废料)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExternalInputRates {
    pub r_water: f64,
    pub r_diesel: f64,
    pub r_naoh: f64,
}

impl ExternalInputRates {
    /// 总外部输入率
    pub fn r_ext(&self) -> f64 {
        self.r_water + self.r_diesel + self.r_naoh
    }
}

/// 分项成本率 ($/min), 装配阶段按运行时间放大为分项成本
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostRates {
    pub diesel_per_min: f64,
    pub naoh_per_min: f64,
    pub water_per_min: f64,
    pub electricity_per_min: f64,
    pub labor_per_min: f64,
}

impl CostRates {
    /// 合计成本率 ($/min)
    pub fn total_per_min(&self) -> f64 {
        self.diesel_per_min
            + self.naoh_per_min
            + self.water_per_min
            + self.electricity_per_min
            + self.labor_per_min
    }
}

/// 预言机对一个 (子集, 配比) 的完整评估结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendOutcome {
    /// 混合后属性（供报告展示）
    pub blend: BlendProperties,
    /// 外部输入率
    pub rates: ExternalInputRates,
    /// 废料吞吐量 W (L/min), 可行时恒 > 0
    pub throughput_l_min: f64,
    /// 分项成本率 ($/min)
    pub cost_rates: CostRates,
}

// ==========================================
// BlendCostOracle - 成本预言机接口
// ==========================================

/// 混合成本预言机
///
/// 契约:
/// - 确定性纯函数: 相同输入必须返回相同输出（memo 正确性前提）
/// - 返回 None 表示该混合不可行（Infeasible, 一等业务结果）
/// - 返回 Some 时保证 throughput_l_min > 0（调度器不会除零）
pub trait BlendCostOracle {
    /// 评估一个 (流子集, 配比向量)
    ///
    /// # 参数
    /// - streams: 参与流, 与 ratios 一一对应（顺序有意义）
    /// - ratios: 配比向量
    fn evaluate(&self, streams: &[&WasteStream], ratios: &[u32]) -> Option<BlendOutcome>;
}

// ==========================================
// GatekeeperOracle - 默认实现（AxNano 化学模型）
// ==========================================
pub struct GatekeeperOracle {
    cfg: SystemConfig,
}

impl GatekeeperOracle {
    pub fn new(cfg: SystemConfig) -> Self {
        Self { cfg }
    }

    /// Step A: 计算水需求率（独立, 最先计算）
    ///
    /// 驱动因素:
    /// - Solid% > solid_max → 需要加水稀释固体
    /// - Salt ppm > salt_max → 需要加水稀释盐
    ///
    /// 取 max(r_solid, r_salt): 为较紧约束加的水自动满足较松约束。
    /// 证明: 若 r_solid ≥ r_salt, 则 salt_after = salt/(1+r_solid)
    ///       ≤ salt/(1+r_salt) = salt_max ✓ 反向对称。
    pub fn calc_r_water(&self, blend: &BlendProperties) -> f64 {
        let r_solid = (blend.solid_pct / self.cfg.solid_max_pct - 1.0).max(0.0);
        let r_salt = (blend.salt_ppm / self.cfg.salt_max_ppm - 1.0).max(0.0);
        r_solid.max(r_salt)
    }

    /// Step B: 计算柴油需求率（依赖 r_water）
    ///
    /// 所有加水（无论来自 Solid% 还是 Salt）都稀释 BTU:
    /// BTU_eff = BTU_blend / (1 + r_water)
    pub fn calc_r_diesel(&self, blend: &BlendProperties, r_water: f64) -> f64 {
        let btu_eff = blend.btu_per_lb / (1.0 + r_water);
        ((self.cfg.btu_target - btu_eff) / (self.cfg.btu_diesel * self.cfg.eta)).max(0.0)
    }

    /// Step C: 计算 NaOH 需求率（独立于 r_water 和 r_diesel）
    ///
    /// 化学直觉模型:
    /// - 酸负荷: F ppm → HF (在 SCWO 条件下)
    /// - 碱负荷: 碱性废料 (pH > 7) 的内部碱贡献
    /// - NaOH 填补净酸缺口
    pub fn calc_r_naoh(&self, blend: &BlendProperties) -> f64 {
        // 酸负荷 (meq/L waste)
        let acid_load = blend.f_ppm * self.cfg.k_f_to_acid;
        // 碱负荷 (meq/L waste) — 仅当 blend pH > 7 时有内部碱贡献
        let base_load = (blend.ph - 7.0).max(0.0) * self.cfg.k_ph_to_base;
        // 净酸缺口
        let net_acid = (acid_load - base_load).max(0.0);
        net_acid * self.cfg.k_acid_to_naoh_vol
    }

    /// 严格按顺序计算三项外部输入率: r_water → r_diesel → r_naoh
    pub fn external_input_rates(&self, blend: &BlendProperties) -> ExternalInputRates {
        let r_water = self.calc_r_water(blend);
        let r_diesel = self.calc_r_diesel(blend, r_water);
        let r_naoh = self.calc_r_naoh(blend);
        ExternalInputRates {
            r_water,
            r_diesel,
            r_naoh,
        }
    }

    /// 同步方程求解: W = F_total / (1 + r_ext)
    ///
    /// 无循环依赖, 一步求解; f_total > 0 时恒有 W > 0。
    pub fn calc_throughput(&self, rates: &ExternalInputRates) -> f64 {
        self.cfg.f_total / (1.0 + rates.r_ext())
    }

    /// 由外部输入率和吞吐量推导 5 项 $/min 成本率
    ///
    /// 材料项: W (L/min) × 需求率 × 单价 ($/L)
    /// 固定项: 电力 + 人工, 按小时价折算到分钟
    fn cost_rates(&self, rates: &ExternalInputRates, throughput: f64) -> CostRates {
        CostRates {
            diesel_per_min: throughput * rates.r_diesel * self.cfg.cost_diesel_per_l,
            naoh_per_min: throughput * rates.r_naoh * self.cfg.cost_naoh_per_l,
            water_per_min: throughput * rates.r_water * self.cfg.cost_water_per_l,
            electricity_per_min: self.cfg.p_system * self.cfg.cost_electricity_per_kwh / 60.0,
            labor_per_min: self.cfg.cost_labor_per_hr / 60.0,
        }
    }

    /// 无可行性检查的完整评估, 供 Baseline 使用
    ///
    /// 不设 pH / W_min 下限 —— 让极不经济的 solo 流体现天文数字成本,
    /// 以展示混合优化的价值。
    pub fn evaluate_unchecked(&self, streams: &[&WasteStream], ratios: &[u32]) -> BlendOutcome {
        let blend = calc_blend_properties(streams, ratios);
        let rates = self.external_input_rates(&blend);
        let throughput = self.calc_throughput(&rates);
        let cost_rates = self.cost_rates(&rates, throughput);
        BlendOutcome {
            blend,
            rates,
            throughput_l_min: throughput,
            cost_rates,
        }
    }
}

impl BlendCostOracle for GatekeeperOracle {
    /// 完整评估一个候选混合: 混合 → Gatekeeper → 吞吐量 → 成本率
    ///
    /// 不可行条件:
    /// - blend pH > ph_max（pH 下限待工程确认, 暂不做硬约束）
    /// - W < w_min（吞吐量过低）
    fn evaluate(&self, streams: &[&WasteStream], ratios: &[u32]) -> Option<BlendOutcome> {
        let outcome = self.evaluate_unchecked(streams, ratios);

        if outcome.blend.ph > self.cfg.ph_max {
            return None;
        }
        if outcome.throughput_l_min < self.cfg.w_min {
            return None;
        }

        Some(outcome)
    }
}
