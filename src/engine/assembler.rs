// ==========================================
// Smart-Feed 多相喂料优化系统 - 计划装配器
// ==========================================
// 职责: 将搜索胜出的 (模板, 批次数) 序列反规范化为
//       绝对消耗量、运行时间与分项成本
// 红线: 汇总成本必须与搜索报告的最优成本在浮点容差内一致 ——
//       这是强制核对, 不是独立计算
// ==========================================

use crate::domain::phase::{CostBreakdown, PhaseResult, Schedule};
use crate::engine::error::EngineError;
use crate::engine::search::PhaseDraft;

/// 成本核对相对容差
const COST_RECONCILE_REL_TOL: f64 = 1e-6;

// ==========================================
// ScheduleAssembler - 计划装配引擎
// ==========================================
pub struct ScheduleAssembler;

impl ScheduleAssembler {
    /// 装配完整计划
    ///
    /// 对每个 (模板, 批次数):
    ///   Q_phase     = sum_ratios × num_batches
    ///   runtime_min = Q_phase / W
    ///   分项成本    = 预言机成本率分量 × runtime_min
    ///
    /// # 参数
    /// - drafts: 搜索胜出的草案序列（执行顺序）
    /// - search_cost: 根节点报告的最优总成本
    ///
    /// # 返回
    /// - Ok(Schedule): 装配并通过成本核对
    /// - Err(EngineError::CostReconciliation): 汇总与搜索结果不一致
    pub fn assemble(drafts: &[PhaseDraft], search_cost: f64) -> Result<Schedule, EngineError> {
        let mut phases = Vec::with_capacity(drafts.len());
        let mut total_cost = 0.0;
        let mut total_runtime_min = 0.0;

        for draft in drafts {
            let tmpl = &draft.template;
            let q_phase_l = f64::from(tmpl.sum_ratios) * draft.num_batches;
            let runtime_min = q_phase_l / tmpl.outcome.throughput_l_min;

            let rates = &tmpl.outcome.cost_rates;
            let costs = CostBreakdown {
                diesel: rates.diesel_per_min * runtime_min,
                naoh: rates.naoh_per_min * runtime_min,
                water: rates.water_per_min * runtime_min,
                electricity: rates.electricity_per_min * runtime_min,
                labor: rates.labor_per_min * runtime_min,
                total: rates.total_per_min() * runtime_min,
            };

            total_cost += costs.total;
            total_runtime_min += runtime_min;

            phases.push(PhaseResult {
                streams: tmpl
                    .stream_ids
                    .iter()
                    .cloned()
                    .zip(tmpl.ratios.iter().copied())
                    .collect(),
                blend: tmpl.outcome.blend.clone(),
                r_water: tmpl.outcome.rates.r_water,
                r_diesel: tmpl.outcome.rates.r_diesel,
                r_naoh: tmpl.outcome.rates.r_naoh,
                r_ext: tmpl.outcome.rates.r_ext(),
                throughput_l_min: tmpl.outcome.throughput_l_min,
                num_batches: draft.num_batches,
                q_phase_l,
                runtime_min,
                costs,
            });
        }

        // 强制核对: 装配合计 = 搜索最优成本（相对容差内）
        let scale = search_cost.abs().max(1.0);
        if (total_cost - search_cost).abs() > COST_RECONCILE_REL_TOL * scale {
            return Err(EngineError::CostReconciliation {
                search_cost,
                assembled_cost: total_cost,
            });
        }

        Ok(Schedule {
            phases,
            total_cost,
            total_runtime_min,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::blend::BlendProperties;
    use crate::engine::gatekeeper::{BlendOutcome, CostRates, ExternalInputRates};
    use crate::engine::templates::PhaseTemplate;

    fn draft(rate_per_min: f64, num_batches: f64) -> PhaseDraft {
        let outcome = BlendOutcome {
            blend: BlendProperties {
                btu_per_lb: 2200.0,
                ph: 7.0,
                f_ppm: 0.0,
                solid_pct: 0.0,
                salt_ppm: 0.0,
            },
            rates: ExternalInputRates {
                r_water: 0.0,
                r_diesel: 0.0,
                r_naoh: 0.0,
            },
            throughput_l_min: 2.0,
            cost_rates: CostRates {
                diesel_per_min: 0.0,
                naoh_per_min: 0.0,
                water_per_min: 0.0,
                electricity_per_min: 0.0,
                labor_per_min: rate_per_min,
            },
        };
        PhaseDraft {
            template: PhaseTemplate {
                stream_ids: vec!["A".to_string()],
                ratios: vec![1],
                sum_ratios: 1,
                cost_per_batch: 1.0 / 2.0 * rate_per_min,
                outcome,
            },
            num_batches,
        }
    }

    #[test]
    fn test_assemble_denormalizes_quantities() {
        // 100 批 × 1 L = 100 L, W=2 → 50 min, rate 6 $/min → 300 $
        let d = draft(6.0, 100.0);
        let schedule = ScheduleAssembler::assemble(&[d], 300.0).unwrap();
        assert_eq!(schedule.phases.len(), 1);
        assert!((schedule.phases[0].q_phase_l - 100.0).abs() < 1e-9);
        assert!((schedule.phases[0].runtime_min - 50.0).abs() < 1e-9);
        assert!((schedule.total_cost - 300.0).abs() < 1e-9);
        assert!((schedule.total_runtime_hr() - 50.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_assemble_rejects_mismatched_total() {
        let d = draft(6.0, 100.0);
        let result = ScheduleAssembler::assemble(&[d], 999.0);
        assert!(matches!(
            result,
            Err(EngineError::CostReconciliation { .. })
        ));
    }
}
