// ==========================================
// Smart-Feed 多相喂料优化系统 - 递归搜索引擎
// ==========================================
// 职责: 枚举所有可行的多相喂料计划, 返回最低成本方案
// ==========================================
// 搜索策略:
//   Bound 1: ratio sum ≤ ratio_sum_max (配比枚举阶段)
//   Bound 2: GCD = 1 去重 (配比枚举阶段)
//   Bound 3: depth ≤ N —— 越界视为致命断言, 不静默返回错误答案
//   Prune 1: 预言机不可行 → 模板预计算阶段一次性过滤
//   Prune 2: 候选按成本升序, candidate_cost ≥ best_sub_cost 即 break
//   Memo:    子问题最优解缓存（返回值与调用路径无关）
// ==========================================

mod core;


pub use core::{PhaseDraft, PhaseScheduler, SearchOutcome, SearchStats};
