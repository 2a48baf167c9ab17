// ==========================================
// Smart-Feed 多相喂料优化系统 - 优化流程编排
// ==========================================
// 职责: 一键运行完整优化流程
// 流程: 校验 → Baseline → 模板预计算 → 递归搜索 → 计划装配
// ==========================================

use crate::api::error::ApiResult;
use crate::api::validator::StreamValidator;
use crate::config::SystemConfig;
use crate::domain::phase::Schedule;
use crate::domain::stream::WasteStream;
use crate::engine::assembler::ScheduleAssembler;
use crate::engine::baseline::BaselineCalculator;
use crate::engine::gatekeeper::GatekeeperOracle;
use crate::engine::search::{PhaseScheduler, SearchStats};
use crate::engine::templates::TemplateBuilder;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use uuid::Uuid;

// ==========================================
// OptimizationOutcome - 优化结果
// ==========================================
#[derive(Debug, Serialize)]
pub struct OptimizationOutcome {
    /// 本次优化运行标识
    pub run_id: Uuid,
    /// 结果生成时间
    pub generated_at: DateTime<Utc>,
    /// Baseline: 每条流单独处理的对照基准
    pub baseline: Schedule,
    /// 最优计划; None 表示不存在可行的完全耗尽方案 (Infeasible)
    pub optimized: Option<Schedule>,
    /// 搜索统计
    pub stats: SearchStats,
    /// 相对 Baseline 的成本节省 (%)
    pub savings_pct: f64,
}

// ==========================================
// OptimizeApi - 优化业务接口
// ==========================================
pub struct OptimizeApi;

impl OptimizeApi {
    /// 运行完整优化流程
    ///
    /// # 参数
    /// - streams: 用户提供的废料清单
    /// - cfg: 系统配置（已合并覆盖）
    ///
    /// # 返回
    /// - Ok(OptimizationOutcome): optimized 为 None 表示 Infeasible
    /// - Err(ApiError): 输入校验失败或引擎致命错误
    pub fn run(streams: &[WasteStream], cfg: &SystemConfig) -> ApiResult<OptimizationOutcome> {
        Self::run_with_cancel(streams, cfg, None)
    }

    /// 运行完整优化流程, 可挂接协作式取消标志
    pub fn run_with_cancel(
        streams: &[WasteStream],
        cfg: &SystemConfig,
        cancel_flag: Option<Arc<AtomicBool>>,
    ) -> ApiResult<OptimizationOutcome> {
        let run_id = Uuid::new_v4();
        tracing::info!(%run_id, streams = streams.len(), "开始优化");

        // Step 1: 输入校验
        StreamValidator::validate(streams)?;

        let oracle = GatekeeperOracle::new(cfg.clone());

        // Step 2: Baseline（每条流单独处理）
        let baseline = BaselineCalculator::calc(streams, &oracle);
        tracing::info!(baseline_cost = baseline.total_cost, "Baseline 计算完成");

        // Step 3: 模板预计算（预言机对每个 (子集, 配比) 恰好评估一次）
        let templates = TemplateBuilder::build(streams, &oracle, cfg);
        tracing::info!(
            evaluated = templates.stats.evaluated,
            infeasible = templates.stats.pruned_infeasible,
            kept = templates.stats.templates_kept,
            "模板预计算完成"
        );

        // Step 4: 递归搜索（memo 缓存仅属于本次调用）
        let inventory: BTreeMap<String, f64> = streams
            .iter()
            .map(|s| (s.stream_id.clone(), s.quantity_l))
            .collect();

        let mut scheduler = PhaseScheduler::new(&templates, cfg);
        if let Some(flag) = cancel_flag {
            scheduler = scheduler.with_cancel_flag(flag);
        }
        let outcome = scheduler.solve(&inventory)?;
        tracing::info!(
            best_cost = outcome.best_cost,
            nodes = outcome.stats.nodes_expanded,
            memo_hits = outcome.stats.memo_hits,
            pruned = outcome.stats.pruned_bound,
            "搜索完成"
        );

        // Step 5: 计划装配 + 强制成本核对
        let optimized = if outcome.is_feasible() {
            Some(ScheduleAssembler::assemble(&outcome.drafts, outcome.best_cost)?)
        } else {
            tracing::warn!("不存在可行的完全耗尽方案 (Infeasible)");
            None
        };

        let savings_pct = match &optimized {
            Some(schedule) if baseline.total_cost > 0.0 && baseline.total_cost.is_finite() => {
                (1.0 - schedule.total_cost / baseline.total_cost) * 100.0
            }
            _ => 0.0,
        };

        Ok(OptimizationOutcome {
            run_id,
            generated_at: Utc::now(),
            baseline,
            optimized,
            stats: outcome.stats,
            savings_pct,
        })
    }
}
