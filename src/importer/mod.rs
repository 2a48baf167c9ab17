// ==========================================
// Smart-Feed 多相喂料优化系统 - 导入层
// ==========================================
// 职责: 废料清单文件解析 (JSON / CSV)
// 红线: 引擎层不做任何文件 I/O, 清单解析全部在本层完成
// ==========================================

pub mod error;
pub mod manifest;

pub use error::ImportError;
pub use manifest::{load_manifest, ManifestData};
