// ==========================================
// Smart-Feed 多相喂料优化系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 注意: "无可行解" 不是错误 —— 搜索以 +∞ 成本作为一等返回值表达,
//       此处仅定义表示逻辑/数值缺陷或外部取消的致命条件。
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 递归深度超过流数量上限。
    /// 正确输入下每个 phase 必然使至少一条流耗尽, 深度不可能超过 N;
    /// 触发此错误说明存在逻辑或数值精度缺陷, 应视为致命断言。
    #[error("内部深度越界: depth={depth}, 上限={limit}（每个 phase 应至少耗尽一条流）")]
    InternalBoundExceeded { depth: usize, limit: usize },

    /// 装配核对失败: 装配后的总成本与搜索报告的最优成本不一致
    #[error("成本核对失败: 搜索报告={search_cost:.6}, 装配合计={assembled_cost:.6}")]
    CostReconciliation {
        search_cost: f64,
        assembled_cost: f64,
    },

    /// 协作式取消: 调用方在搜索过程中置位了取消标志
    #[error("搜索已被调用方取消")]
    Cancelled,
}
