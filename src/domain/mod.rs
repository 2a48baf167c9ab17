// ==========================================
// Smart-Feed 多相喂料优化系统 - 领域层
// ==========================================
// 职责: 领域实体与值对象定义
// 红线: 领域类型不依赖引擎层/导入层
// ==========================================

pub mod blend;
pub mod phase;
pub mod stream;

pub use blend::BlendProperties;
pub use phase::{CostBreakdown, PhaseResult, Schedule};
pub use stream::WasteStream;
