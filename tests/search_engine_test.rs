// ==========================================
// 递归搜索引擎集成测试（真实化学预言机）
// ==========================================
// 验证搜索级性质:
// - 幂等性: 相同输入 → 逐位相同的结果
// - 支配性: 联合优化不劣于各流独立优化之和
// - 单调性: 抬高柴油单价不会降低最优成本
// - 不可行输入 → best_cost = +∞ (非错误)
// ==========================================

#[path = "helpers/test_data_builder.rs"]
mod test_data_builder;

use smart_feed::config::SystemConfig;
use test_data_builder::{afff, caustic, resin, solve, stream};

#[test]
fn test_solve_is_idempotent() {
    let streams = vec![resin(), afff(), caustic()];
    let cfg = SystemConfig::default();

    let first = solve(&streams, &cfg);
    let second = solve(&streams, &cfg);

    // 预言机纯函数 + 候选确定性排序 → 结果必须逐位一致
    assert_eq!(first.best_cost, second.best_cost);
    assert_eq!(first.drafts.len(), second.drafts.len());
    for (a, b) in first.drafts.iter().zip(&second.drafts) {
        assert_eq!(a.template.stream_ids, b.template.stream_ids);
        assert_eq!(a.template.ratios, b.template.ratios);
        assert_eq!(a.num_batches, b.num_batches);
    }
}

#[test]
fn test_joint_optimization_dominates_separate_runs() {
    let cfg = SystemConfig::default();

    // 联合搜索的候选集包含"各自 solo"计划, 故联合最优 ≤ 独立最优之和;
    // Resin (高热值) 与 AFFF (近纯水) 互补, 此处应严格更优
    let joint = solve(&[resin(), afff()], &cfg);
    let solo_resin = solve(&[resin()], &cfg);
    let solo_afff = solve(&[afff()], &cfg);

    assert!(joint.is_feasible());
    assert!(solo_resin.is_feasible());
    assert!(solo_afff.is_feasible());
    assert!(joint.best_cost < solo_resin.best_cost + solo_afff.best_cost);
}

#[test]
fn test_best_cost_monotonic_in_diesel_price() {
    // 配额放开到不裁剪, 保证两次搜索面对相同的模板空间
    let mut cfg_base = SystemConfig::default();
    cfg_base.max_templates_per_subset = 10_000;
    let mut cfg_double = cfg_base.clone();
    cfg_double.cost_diesel_per_l = 2.0;

    let streams = vec![resin(), afff()];
    let base = solve(&streams, &cfg_base);
    let double = solve(&streams, &cfg_double);

    assert!(base.is_feasible());
    assert!(double.is_feasible());
    // 两条流的任何混合 BTU_eff 均低于目标值, 每个 phase 都烧柴油,
    // 因此涨价必然严格抬高最优成本
    assert!(double.best_cost > base.best_cost);
}

#[test]
fn test_infeasible_inventory_yields_infinite_cost() {
    // 纯碱液: solo pH 13.5 > 9, 无任何可行模板 → 死端
    let outcome = solve(&[caustic()], &SystemConfig::default());

    assert!(!outcome.is_feasible());
    assert!(outcome.best_cost.is_infinite());
    assert!(outcome.drafts.is_empty());
    assert_eq!(outcome.stats.templates_kept, 0);
}

#[test]
fn test_solo_infeasible_stream_rescued_by_blending() {
    // 碱液 solo 不可行, 但与 AFFF 混合后 pH 回到上限内
    let streams = vec![afff(), caustic()];
    let outcome = solve(&streams, &SystemConfig::default());

    assert!(outcome.is_feasible());
    // 碱液只能通过混合 phase 消耗
    let caustic_in_blend = outcome.drafts.iter().any(|d| {
        d.template.stream_ids.len() > 1
            && d.template.stream_ids.iter().any(|sid| sid == "Caustic")
    });
    assert!(caustic_in_blend, "碱液必须出现在混合 phase 中");
}

#[test]
fn test_each_draft_depletes_at_least_one_stream() {
    let streams = vec![resin(), afff(), caustic()];
    let cfg = SystemConfig::default();
    let outcome = solve(&streams, &cfg);
    assert!(outcome.is_feasible());

    // num_batches = min(剩余量/配比) → 每个 phase 耗尽最稀缺的参与流,
    // 因此 phase 数不会超过流数
    assert!(outcome.drafts.len() <= streams.len());
    for d in &outcome.drafts {
        assert!(d.num_batches > 0.0);
    }
}

#[test]
fn test_tight_quota_never_beats_loose_quota() {
    // 配额是纯剪枝: K 小的搜索空间是 K 大的子集
    let streams = vec![resin(), afff(), caustic()];
    let mut cfg_tight = SystemConfig::default();
    cfg_tight.max_templates_per_subset = 3;
    let mut cfg_loose = SystemConfig::default();
    cfg_loose.max_templates_per_subset = 10_000;

    let tight = solve(&streams, &cfg_tight);
    let loose = solve(&streams, &cfg_loose);

    assert!(loose.best_cost <= tight.best_cost);
}

#[test]
fn test_stats_are_populated() {
    let outcome = solve(&[resin(), afff()], &SystemConfig::default());
    assert!(outcome.stats.evaluated > 0);
    assert!(outcome.stats.templates_kept > 0);
    assert!(outcome.stats.nodes_expanded >= 1);
}

#[test]
fn test_identical_chemistry_streams_share_subproblems() {
    // 三条同质流: 不同耗尽顺序到达相同残余库存 → memo 必有命中
    // (两条流时每个子状态只会被到达一次, 三条起才有重叠子问题)
    let streams = vec![
        stream("A", 100.0, 5000.0, 7.0, 0.0, 0.0, 0.0),
        stream("B", 100.0, 5000.0, 7.0, 0.0, 0.0, 0.0),
        stream("C", 100.0, 5000.0, 7.0, 0.0, 0.0, 0.0),
    ];
    let outcome = solve(&streams, &SystemConfig::default());
    assert!(outcome.is_feasible());
    assert!(outcome.stats.memo_hits > 0, "重叠子问题应产生 memo 命中");
}
