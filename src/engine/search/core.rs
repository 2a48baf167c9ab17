// ==========================================
// Smart-Feed 多相喂料优化系统 - 递归搜索核心
// ==========================================
// 正确性要点:
// - search_node 返回"子问题成本"(当前库存到耗尽的最低成本),
//   与已累计成本无关 —— 这是 memo 可复用的前提;
// - B&B 剪枝条件 candidate_cost ≥ best_sub_cost 纯局部,
//   成本恒非负, 候选已升序, 故首个超限即可 break;
// - memo 缓存仅属于本次 solve 调用, solve 消耗 self,
//   不同流集合/预言机/配置之间不可能复用。
// ==========================================

use crate::config::SystemConfig;
use crate::engine::error::EngineError;
use crate::engine::templates::{PhaseTemplate, TemplateIndex};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 库存状态: 流 ID → 剩余量 (L), BTreeMap 保证键序稳定
pub type Inventory = BTreeMap<String, f64>;

/// Memo 键: (流 ID, 量化后剩余量) 的有序序列
type MemoKey = Vec<(String, i64)>;

// ==========================================
// 搜索输出结构
// ==========================================

/// 选中的 (模板, 批次数) 对 —— 装配前的中间形态
#[derive(Debug, Clone)]
pub struct PhaseDraft {
    pub template: PhaseTemplate,
    pub num_batches: f64,
}

/// 搜索统计
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SearchStats {
    /// 预言机评估次数（模板预计算阶段）
    pub evaluated: usize,
    /// 不可行组合数（模板预计算阶段）
    pub pruned_infeasible: usize,
    /// 配额裁剪后保留的模板数
    pub templates_kept: usize,
    /// 展开的搜索节点数
    pub nodes_expanded: usize,
    /// B&B 剪掉的候选数
    pub pruned_bound: usize,
    /// memo 命中次数
    pub memo_hits: usize,
}

/// 搜索结果
///
/// best_cost = +∞ 表示不存在可行的完全耗尽方案（一等业务结果）
#[derive(Debug)]
pub struct SearchOutcome {
    pub best_cost: f64,
    pub drafts: Vec<PhaseDraft>,
    pub stats: SearchStats,
}

impl SearchOutcome {
    /// 是否找到可行方案
    pub fn is_feasible(&self) -> bool {
        self.best_cost.is_finite()
    }
}

// ==========================================
// PhaseScheduler - 递归搜索引擎
// ==========================================
pub struct PhaseScheduler<'a> {
    templates: &'a TemplateIndex,
    cfg: &'a SystemConfig,
    /// 递归深度上限 = 流数量 N（防御性边界, 非正常终止路径）
    depth_limit: usize,
    /// 子问题最优解缓存, 生命周期 = 单次 solve
    memo: HashMap<MemoKey, (f64, Vec<PhaseDraft>)>,
    stats: SearchStats,
    /// 协作式取消标志（可选）
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl<'a> PhaseScheduler<'a> {
    /// 构造搜索引擎
    ///
    /// # 参数
    /// - templates: 预计算的模板索引
    /// - cfg: 搜索参数 (depletion_epsilon_l / memo_granularity_l)
    pub fn new(templates: &'a TemplateIndex, cfg: &'a SystemConfig) -> Self {
        Self {
            templates,
            cfg,
            depth_limit: 0,
            memo: HashMap::new(),
            stats: SearchStats {
                evaluated: templates.stats.evaluated,
                pruned_infeasible: templates.stats.pruned_infeasible,
                templates_kept: templates.stats.templates_kept,
                ..SearchStats::default()
            },
            cancel_flag: None,
        }
    }

    /// 挂接协作式取消标志: 每次进入递归节点时检查一次
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel_flag = Some(flag);
        self
    }

    /// 搜索最优喂料计划
    ///
    /// 消耗 self: memo 缓存随 solve 一起销毁,
    /// 杜绝跨流集合/预言机/配置的缓存污染。
    ///
    /// # 返回
    /// - Ok(SearchOutcome): best_cost 为有限值或 +∞ (无可行方案)
    /// - Err(EngineError): 深度越界 / 被取消
    pub fn solve(mut self, inventory: &Inventory) -> Result<SearchOutcome, EngineError> {
        self.depth_limit = inventory.len();
        let (best_cost, drafts) = self.search_node(inventory, 0)?;
        Ok(SearchOutcome {
            best_cost,
            drafts,
            stats: self.stats,
        })
    }

    /// 递归核心 —— 返回子问题最优 (成本, 草案序列)
    ///
    /// # 参数
    /// - inv: 当前库存
    /// - depth: 已应用的 phase 数量
    fn search_node(
        &mut self,
        inv: &Inventory,
        depth: usize,
    ) -> Result<(f64, Vec<PhaseDraft>), EngineError> {
        // 协作式取消检查（防御病态输入击穿剪枝）
        if let Some(flag) = &self.cancel_flag {
            if flag.load(Ordering::Relaxed) {
                return Err(EngineError::Cancelled);
            }
        }

        // 剩余量 ≤ epsilon 的流视为已耗尽（吸收浮点残渣）
        let epsilon = self.cfg.depletion_epsilon_l;
        let active: BTreeMap<&str, f64> = inv
            .iter()
            .filter(|(_, &qty)| qty > epsilon)
            .map(|(sid, &qty)| (sid.as_str(), qty))
            .collect();

        // 终止: 所有库存耗尽
        if active.is_empty() {
            return Ok((0.0, Vec::new()));
        }

        // BOUND 3: 每个 phase 必然耗尽至少一条流, 深度不可能超过 N
        if depth > self.depth_limit {
            return Err(EngineError::InternalBoundExceeded {
                depth,
                limit: self.depth_limit,
            });
        }

        // Memo 查询: 库存按粒度量化后作为键
        let memo_key = self.canonical_key(&active);
        if let Some(cached) = self.memo.get(&memo_key) {
            self.stats.memo_hits += 1;
            return Ok(cached.clone());
        }

        self.stats.nodes_expanded += 1;

        // ── 收集候选: (成本, 模板, 批次数) ──
        // num_batches = min(剩余量_i / 配比_i): 最稀缺的参与流决定批次上限
        let templates = self.templates;
        let mut candidates: Vec<(f64, &PhaseTemplate, f64)> = Vec::new();
        for (subset_ids, subset_templates) in &templates.by_subset {
            // 子集内任一流已耗尽则整个子集不可用
            if !subset_ids.iter().all(|sid| active.contains_key(sid.as_str())) {
                continue;
            }
            for tmpl in subset_templates {
                let num_batches = tmpl
                    .stream_ids
                    .iter()
                    .zip(&tmpl.ratios)
                    .map(|(sid, &ratio)| active[sid.as_str()] / f64::from(ratio))
                    .fold(f64::INFINITY, f64::min);
                let cost = num_batches * tmpl.cost_per_batch;
                candidates.push((cost, tmpl, num_batches));
            }
        }

        // ── 按成本升序, 同成本按 (子集, 配比) 字典序 —— 确定性次序 ──
        candidates.sort_by(|a, b| {
            a.0.total_cmp(&b.0)
                .then_with(|| a.1.stream_ids.cmp(&b.1.stream_ids))
                .then_with(|| a.1.ratios.cmp(&b.1.ratios))
        });

        let mut best_sub_cost = f64::INFINITY;
        let mut best: Option<(PhaseDraft, Vec<PhaseDraft>)> = None;

        for (i, &(cost, tmpl, num_batches)) in candidates.iter().enumerate() {
            // PRUNE 2: 候选已升序, 残余成本恒 ≥ 0, 首个超限即可 break
            if cost >= best_sub_cost {
                self.stats.pruned_bound += candidates.len() - i;
                break;
            }

            // 扣减库存（耗尽至负的浮点残渣钳到 0）
            let mut new_inv = inv.clone();
            for (sid, &ratio) in tmpl.stream_ids.iter().zip(&tmpl.ratios) {
                let remaining = (active[sid.as_str()] - f64::from(ratio) * num_batches).max(0.0);
                new_inv.insert(sid.clone(), remaining);
            }

            // 递归: 剩余库存的子问题最优成本
            let (residual_cost, residual_drafts) = self.search_node(&new_inv, depth + 1)?;

            let total = cost + residual_cost;
            if total < best_sub_cost {
                best_sub_cost = total;
                best = Some((
                    PhaseDraft {
                        template: tmpl.clone(),
                        num_batches,
                    },
                    residual_drafts,
                ));
            }
        }

        // 死端节点 (有库存但无可用模板/无可行分支) 返回 +∞,
        // 父节点永远不会选中它 —— 不可行在此是一等返回值
        let result = match best {
            Some((head, rest)) => {
                let mut drafts = Vec::with_capacity(1 + rest.len());
                drafts.push(head);
                drafts.extend(rest);
                (best_sub_cost, drafts)
            }
            None => (f64::INFINITY, Vec::new()),
        };

        self.memo.insert(memo_key, result.clone());
        Ok(result)
    }

    /// 库存规范化: 剩余量按 memo_granularity_l 取整
    ///
    /// 粒度换取搜索空间大小（粒度以下的残量最坏情况可能
    /// 额外引入一个未计费的 phase, 故作为显式配置暴露）。
    fn canonical_key(&self, active: &BTreeMap<&str, f64>) -> MemoKey {
        let granularity = self.cfg.memo_granularity_l;
        active
            .iter()
            .map(|(sid, &qty)| (sid.to_string(), (qty / granularity).round() as i64))
            .collect()
    }
}
