// ==========================================
// Smart-Feed 多相喂料优化系统 - 配置层
// ==========================================
// 职责: 系统配置与覆盖合并
// 优先级: CLI > JSON 清单 > 默认值
// ==========================================

pub mod system_config;

pub use system_config::{ConfigOverrides, SystemConfig};
