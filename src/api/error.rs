// ==========================================
// Smart-Feed 多相喂料优化系统 - API 层错误类型
// ==========================================
// 职责: 定义 API 层错误类型, 所有错误信息必须包含显式原因
// 注意: "无可行解" 是一等业务结果 (OptimizationOutcome.optimized=None),
//       不出现在本错误类型中。
// ==========================================

use crate::engine::error::EngineError;
use crate::importer::error::ImportError;
use thiserror::Error;

/// API 层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== 输入校验错误 =====
    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ===== 引擎错误（逻辑/数值缺陷或外部取消）=====
    #[error("引擎错误: {0}")]
    Engine(#[from] EngineError),

    // ===== 导入错误 =====
    #[error("清单导入失败: {0}")]
    Import(#[from] ImportError),
}

/// API 层 Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
