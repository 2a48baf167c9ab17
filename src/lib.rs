// ==========================================
// Smart-Feed 多相喂料优化系统 - 核心库
// ==========================================
// 依据: Smart-Feed Algorithm v9 算法说明
// 系统定位: 决策支持系统 (SCWO 反应器喂料计划)
// 核心: 配比枚举 → 模板预计算 → 递归分支限界搜索 → 计划装配
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 系统配置
pub mod config;

// 引擎层 - 优化算法
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// API 层 - 业务接口
pub mod api;

// 报告层 - 文本报告
pub mod reporter;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use api::optimize_api::{OptimizationOutcome, OptimizeApi};
pub use config::{ConfigOverrides, SystemConfig};
pub use domain::blend::BlendProperties;
pub use domain::phase::{CostBreakdown, PhaseResult, Schedule};
pub use domain::stream::WasteStream;
pub use engine::gatekeeper::{BlendCostOracle, BlendOutcome, GatekeeperOracle};

/// 系统版本号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 支持的废料流数量上限
pub const MAX_STREAMS: usize = 5;
