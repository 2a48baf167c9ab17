// ==========================================
// Smart-Feed 多相喂料优化系统 - Baseline 成本计算
// ==========================================
// 职责: 每条废料单独处理（不混合）的总成本, 作为优化结果的对照基准
// 即使某条流 solo 极不经济 (W 接近 0), 仍计算天文数字成本,
// 以展示混合优化的价值 —— 故不设 W_min 下限。
// ==========================================

use crate::domain::phase::{CostBreakdown, PhaseResult, Schedule};
use crate::domain::stream::WasteStream;
use crate::engine::gatekeeper::GatekeeperOracle;

// ==========================================
// BaselineCalculator - 基准计算引擎
// ==========================================
pub struct BaselineCalculator;

impl BaselineCalculator {
    /// Baseline: 每条废料单独处理
    ///
    /// 对每条流独立运行 Gatekeeper + 同步方程,
    /// 单流的"混合"属性即其自身属性。
    pub fn calc(streams: &[WasteStream], oracle: &GatekeeperOracle) -> Schedule {
        let mut phases = Vec::with_capacity(streams.len());
        let mut total_cost = 0.0;
        let mut total_runtime_min = 0.0;

        for stream in streams {
            let outcome = oracle.evaluate_unchecked(&[stream], &[1]);
            let throughput = outcome.throughput_l_min;

            let runtime_min = if throughput > 0.0 {
                stream.quantity_l / throughput
            } else {
                f64::INFINITY
            };

            let rates = &outcome.cost_rates;
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
                streams: vec![(stream.stream_id.clone(), 1)],
                blend: outcome.blend.clone(),
                r_water: outcome.rates.r_water,
                r_diesel: outcome.rates.r_diesel,
                r_naoh: outcome.rates.r_naoh,
                r_ext: outcome.rates.r_ext(),
                throughput_l_min: throughput,
                num_batches: stream.quantity_l,
                q_phase_l: stream.quantity_l,
                runtime_min,
                costs,
            });
        }

        Schedule {
            phases,
            total_cost,
            total_runtime_min,
        }
    }
}
