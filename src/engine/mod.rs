// ==========================================
// Smart-Feed 多相喂料优化系统 - 引擎层
// ==========================================
// 职责: 优化算法（配比枚举/模板预计算/递归搜索/计划装配）
// 红线: 无 I/O, 无全局状态; memo 缓存仅属于单次搜索调用
// ==========================================

pub mod assembler;
pub mod baseline;
pub mod blending;
pub mod error;
pub mod gatekeeper;
pub mod ratios;
pub mod search;
pub mod templates;

pub use assembler::ScheduleAssembler;
pub use baseline::BaselineCalculator;
pub use error::EngineError;
pub use gatekeeper::{BlendCostOracle, BlendOutcome, CostRates, ExternalInputRates, GatekeeperOracle};
pub use ratios::RatioEnumerator;
pub use search::{PhaseDraft, PhaseScheduler, SearchOutcome, SearchStats};
pub use templates::{PhaseTemplate, TemplateBuilder, TemplateIndex};
