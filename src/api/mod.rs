// ==========================================
// Smart-Feed 多相喂料优化系统 - API 层
// ==========================================
// 职责: 业务接口（输入校验 + 优化流程编排）
// 红线: 引擎层错误在此转换为面向用户的错误消息
// ==========================================

pub mod error;
pub mod optimize_api;
pub mod validator;

pub use error::{ApiError, ApiResult};
pub use optimize_api::{OptimizationOutcome, OptimizeApi};
