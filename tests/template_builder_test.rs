// ==========================================
// 模板预计算引擎测试
// ==========================================
// 通过脚本化预言机验证:
// - 每个 (子集, 配比) 恰好评估一次
// - 配额 K 裁剪且保留的正是最便宜的 K 个
// - 无可行模板的子集不进入索引
// ==========================================

#[path = "helpers/test_data_builder.rs"]
mod test_data_builder;

use smart_feed::config::SystemConfig;
use smart_feed::domain::blend::BlendProperties;
use smart_feed::domain::stream::WasteStream;
use smart_feed::engine::gatekeeper::{
    BlendCostOracle, BlendOutcome, CostRates, ExternalInputRates,
};
use smart_feed::engine::ratios::RatioEnumerator;
use smart_feed::engine::templates::TemplateBuilder;
use std::cell::Cell;

// ==========================================
// 脚本化预言机
// ==========================================

/// 确定性脚本预言机: 成本只依赖配比, 便于验证排序/配额;
/// 含 "Bad" 流的组合一律不可行。
struct ScriptedOracle {
    calls: Cell<usize>,
}

impl ScriptedOracle {
    fn new() -> Self {
        Self {
            calls: Cell::new(0),
        }
    }
}

impl BlendCostOracle for ScriptedOracle {
    fn evaluate(&self, streams: &[&WasteStream], ratios: &[u32]) -> Option<BlendOutcome> {
        self.calls.set(self.calls.get() + 1);

        if streams.iter().any(|s| s.stream_id == "Bad") {
            return None;
        }

        // 成本率随配比变化, 保证同一子集内排序有区分度
        let sum: u32 = ratios.iter().sum();
        let rate = 1.0 + f64::from(sum) + 0.1 * f64::from(ratios[0]);

        Some(BlendOutcome {
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
            throughput_l_min: 1.0,
            cost_rates: CostRates {
                diesel_per_min: 0.0,
                naoh_per_min: 0.0,
                water_per_min: 0.0,
                electricity_per_min: 0.0,
                labor_per_min: rate,
            },
        })
    }
}

fn three_streams() -> Vec<WasteStream> {
    vec![
        test_data_builder::stream("A", 100.0, 0.0, 7.0, 0.0, 0.0, 0.0),
        test_data_builder::stream("B", 100.0, 0.0, 7.0, 0.0, 0.0, 0.0),
        test_data_builder::stream("C", 100.0, 0.0, 7.0, 0.0, 0.0, 0.0),
    ]
}

#[test]
fn test_oracle_invoked_exactly_once_per_subset_ratio_pair() {
    let streams = three_streams();
    let cfg = SystemConfig::default();
    let oracle = ScriptedOracle::new();

    let index = TemplateBuilder::build(&streams, &oracle, &cfg);

    // 期望调用数: Σ_{非空子集} |ratios(|subset|)|
    let r1 = RatioEnumerator::generate(1, cfg.ratio_sum_max).len();
    let r2 = RatioEnumerator::generate(2, cfg.ratio_sum_max).len();
    let r3 = RatioEnumerator::generate(3, cfg.ratio_sum_max).len();
    let expected = 3 * r1 + 3 * r2 + r3;

    assert_eq!(oracle.calls.get(), expected);
    assert_eq!(index.stats.evaluated, expected);
}

#[test]
fn test_quota_keeps_exactly_the_cheapest_k() {
    let streams = three_streams();
    let mut cfg_small = SystemConfig::default();
    cfg_small.max_templates_per_subset = 5;
    let mut cfg_full = SystemConfig::default();
    cfg_full.max_templates_per_subset = usize::MAX;

    let small = TemplateBuilder::build(&streams, &ScriptedOracle::new(), &cfg_small);
    let full = TemplateBuilder::build(&streams, &ScriptedOracle::new(), &cfg_full);

    for (subset, kept) in &small.by_subset {
        assert!(kept.len() <= 5, "子集 {:?} 超过配额", subset);

        // 保留的必须正是全量排序后的前 K 个
        let all = &full.by_subset[subset];
        for (i, t) in kept.iter().enumerate() {
            assert_eq!(t.ratios, all[i].ratios, "子集 {:?} 第 {} 个模板不符", subset, i);
            assert_eq!(t.cost_per_batch, all[i].cost_per_batch);
        }

        // 升序不变式
        for pair in kept.windows(2) {
            assert!(pair[0].cost_per_batch <= pair[1].cost_per_batch);
        }
    }
}

#[test]
fn test_infeasible_subsets_are_omitted() {
    let streams = vec![
        test_data_builder::stream("A", 100.0, 0.0, 7.0, 0.0, 0.0, 0.0),
        test_data_builder::stream("Bad", 100.0, 0.0, 7.0, 0.0, 0.0, 0.0),
    ];
    let cfg = SystemConfig::default();
    let index = TemplateBuilder::build(&streams, &ScriptedOracle::new(), &cfg);

    // 仅 {A} 有可行模板; {Bad} 与 {A,Bad} 均被丢弃
    assert_eq!(index.by_subset.len(), 1);
    assert!(index.by_subset.contains_key(&vec!["A".to_string()]));
    assert!(index.stats.pruned_infeasible > 0);
}

#[test]
fn test_cost_per_batch_formula() {
    // cost_per_batch = sum_ratios / W × 成本率
    let streams = vec![test_data_builder::stream("A", 100.0, 0.0, 7.0, 0.0, 0.0, 0.0)];
    let cfg = SystemConfig::default();
    let index = TemplateBuilder::build(&streams, &ScriptedOracle::new(), &cfg);

    let solo = &index.by_subset[&vec!["A".to_string()]][0];
    // ratios = [1]: rate = 1 + 1 + 0.1, W = 1
    assert!((solo.cost_per_batch - 2.1).abs() < 1e-12);
}
