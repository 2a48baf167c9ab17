// ==========================================
// Smart-Feed 多相喂料优化系统 - 输出报告
// ==========================================
// 职责: 格式化输出最优计划、成本对比、搜索统计
// 红线: 只做渲染, 不做任何计算; 渲染为 String 由调用方输出
// ==========================================

use crate::api::optimize_api::OptimizationOutcome;
use crate::config::SystemConfig;
use crate::domain::phase::{PhaseResult, Schedule};
use crate::domain::stream::WasteStream;
use std::fmt::Write;

const WIDTH: usize = 72;

fn fmt_cost(val: f64) -> String {
    if !val.is_finite() {
        return "$∞".to_string();
    }
    if val >= 1_000_000.0 {
        format!("${:.0}", val)
    } else {
        format!("${:.2}", val)
    }
}

fn fmt_time(minutes: f64) -> String {
    if !minutes.is_finite() {
        return "∞".to_string();
    }
    if minutes >= 60.0 {
        format!("{:.1} hr", minutes / 60.0)
    } else {
        format!("{:.1} min", minutes)
    }
}

fn fmt_rate(val: f64) -> String {
    if val < 0.001 {
        "0".to_string()
    } else {
        format!("{:.4}", val)
    }
}

fn push_header(out: &mut String, title: &str) {
    let sep = "═".repeat(WIDTH);
    let _ = writeln!(out, "\n{}\n  {}\n{}", sep, title, sep);
}

fn push_phase(out: &mut String, label: &str, phase: &PhaseResult) {
    let ratio_desc = phase
        .streams
        .iter()
        .map(|(sid, r)| format!("{}:{}", sid, r))
        .collect::<Vec<_>>()
        .join(" + ");
    let _ = writeln!(out, "\n  {} [{}]", label, ratio_desc);
    let _ = writeln!(
        out,
        "    W = {:.2} L/min | Q = {:.1} L | Runtime = {} | r_ext = {:.3}",
        phase.throughput_l_min,
        phase.q_phase_l,
        fmt_time(phase.runtime_min),
        phase.r_ext
    );
    let _ = writeln!(
        out,
        "    r_water={}  r_diesel={}  r_naoh={}",
        fmt_rate(phase.r_water),
        fmt_rate(phase.r_diesel),
        fmt_rate(phase.r_naoh)
    );
    let _ = writeln!(
        out,
        "    成本: {}  (柴油={}  NaOH={}  水={}  电={}  人工={})",
        fmt_cost(phase.costs.total),
        fmt_cost(phase.costs.diesel),
        fmt_cost(phase.costs.naoh),
        fmt_cost(phase.costs.water),
        fmt_cost(phase.costs.electricity),
        fmt_cost(phase.costs.labor)
    );
}

fn push_schedule_summary(out: &mut String, label: &str, schedule: &Schedule) {
    let _ = writeln!(out, "\n  ── {} 汇总 ──", label);
    let _ = writeln!(out, "  总成本:   {}", fmt_cost(schedule.total_cost));
    let _ = writeln!(out, "  总运行:   {}", fmt_time(schedule.total_runtime_min));
}

/// 渲染完整优化报告
///
/// # 参数
/// - streams: 用户输入的废料清单
/// - cfg: 本次运行的系统配置
/// - outcome: 优化结果
pub fn full_report(
    streams: &[WasteStream],
    cfg: &SystemConfig,
    outcome: &OptimizationOutcome,
) -> String {
    let mut out = String::new();

    // ── 运行标识 ──
    push_header(&mut out, "Smart-Feed 喂料优化报告");
    let _ = writeln!(out, "  运行标识: {}", outcome.run_id);
    let _ = writeln!(
        out,
        "  生成时间: {}",
        outcome.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    // ── 废料清单 ──
    push_header(&mut out, "废料清单 (用户输入)");
    let _ = writeln!(
        out,
        "  {:<12} {:>9} {:>9} {:>6} {:>9} {:>7} {:>9}",
        "ID", "数量(L)", "BTU/lb", "pH", "F ppm", "Solid%", "Salt ppm"
    );
    for s in streams {
        let _ = writeln!(
            out,
            "  {:<12} {:>9.1} {:>9.0} {:>6.1} {:>9.0} {:>7.1} {:>9.0}",
            s.stream_id, s.quantity_l, s.btu_per_lb, s.ph, s.f_ppm, s.solid_pct, s.salt_ppm
        );
    }
    let total_qty: f64 = streams.iter().map(|s| s.quantity_l).sum();
    let _ = writeln!(
        out,
        "\n  总库存: {:.1} L | 废料种类: {}",
        total_qty,
        streams.len()
    );

    // ── 系统配置 ──
    push_header(&mut out, "系统配置 (可调节参数)");
    let _ = writeln!(
        out,
        "  反应器: F_total={:.1} L/min, P_system={:.0} kW, η={:.2}",
        cfg.f_total, cfg.p_system, cfg.eta
    );
    let _ = writeln!(
        out,
        "  边界:   BTU_target={:.0}, Solid_max={:.0}%, pH≤{:.0}, Salt_max={:.0} ppm",
        cfg.btu_target, cfg.solid_max_pct, cfg.ph_max, cfg.salt_max_ppm
    );
    let _ = writeln!(
        out,
        "  搜索:   ratio_sum≤{}, W_min={:.2} L/min, quota K={}, ε={:.2} L, memo粒度={:.2} L",
        cfg.ratio_sum_max,
        cfg.w_min,
        cfg.max_templates_per_subset,
        cfg.depletion_epsilon_l,
        cfg.memo_granularity_l
    );

    // ── Baseline ──
    push_header(&mut out, "BASELINE — 单独处理 (无混合)");
    for phase in &outcome.baseline.phases {
        let sid = phase
            .streams
            .first()
            .map(|(s, _)| s.as_str())
            .unwrap_or("?");
        push_phase(&mut out, &format!("Stream: {}", sid), phase);
    }
    push_schedule_summary(&mut out, "Baseline", &outcome.baseline);

    // ── 最优计划 ──
    match &outcome.optimized {
        Some(schedule) => {
            push_header(&mut out, "最优喂料计划 (混合优化)");
            for (i, phase) in schedule.phases.iter().enumerate() {
                push_phase(&mut out, &format!("Phase {}", i + 1), phase);
            }
            push_schedule_summary(&mut out, "最优计划", schedule);

            push_header(&mut out, "成本对比");
            let _ = writeln!(
                out,
                "  Baseline: {}  →  优化后: {}  (节省 {:.1}%)",
                fmt_cost(outcome.baseline.total_cost),
                fmt_cost(schedule.total_cost),
                outcome.savings_pct
            );
        }
        None => {
            push_header(&mut out, "结果: INFEASIBLE");
            let _ = writeln!(out, "  搜索完成, 但不存在可行的完全耗尽方案。");
            let _ = writeln!(out, "  建议: 放宽 W_min / pH 上限, 或调整废料组合。");
        }
    }

    // ── 搜索统计 ──
    push_header(&mut out, "搜索统计");
    let s = &outcome.stats;
    let _ = writeln!(out, "  预言机评估:   {}", s.evaluated);
    let _ = writeln!(out, "  不可行组合:   {}", s.pruned_infeasible);
    let _ = writeln!(out, "  保留模板:     {}", s.templates_kept);
    let _ = writeln!(out, "  展开节点:     {}", s.nodes_expanded);
    let _ = writeln!(out, "  B&B 剪枝:     {}", s.pruned_bound);
    let _ = writeln!(out, "  memo 命中:    {}", s.memo_hits);

    out
}
