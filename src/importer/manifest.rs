// ==========================================
// Smart-Feed 多相喂料优化系统 - 废料清单解析
// ==========================================
// 职责: 按扩展名分发解析 JSON / CSV 废料清单
// JSON 格式:
// {
//   "streams": [ { "stream_id": "Resin", "quantity_l": 200, ... }, ... ],
//   "config": { "f_total": 10.5, "eta": 0.85 }   // 可选, 只列出要修改的参数
// }
// CSV 格式: 表头 + 每行一条废料流 (不含配置覆盖)
// ==========================================

use crate::config::ConfigOverrides;
use crate::domain::stream::WasteStream;
use crate::importer::error::ImportError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// 清单解析结果
#[derive(Debug)]
pub struct ManifestData {
    pub streams: Vec<WasteStream>,
    /// JSON 清单可携带配置覆盖; CSV 清单无此段
    pub config: Option<ConfigOverrides>,
}

/// JSON 清单结构
#[derive(Debug, Deserialize)]
struct JsonManifest {
    streams: Vec<WasteStream>,
    #[serde(default)]
    config: Option<ConfigOverrides>,
}

/// 加载废料清单文件, 按扩展名分发
///
/// # 参数
/// - path: 清单文件路径 (.json / .csv)
///
/// # 返回
/// - Ok(ManifestData): 解析成功（至少包含一条流）
/// - Err(ImportError): 文件不存在 / 格式不支持 / 解析失败
pub fn load_manifest(path: &Path) -> Result<ManifestData, ImportError> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let data = match extension.as_str() {
        "json" => load_json(path)?,
        "csv" => load_csv(path)?,
        _ => return Err(ImportError::UnsupportedFormat(path.display().to_string())),
    };

    if data.streams.is_empty() {
        return Err(ImportError::EmptyManifest);
    }

    tracing::info!(
        path = %path.display(),
        streams = data.streams.len(),
        has_config = data.config.is_some(),
        "废料清单加载完成"
    );

    Ok(data)
}

/// 解析 JSON 清单 (streams + 可选配置覆盖)
fn load_json(path: &Path) -> Result<ManifestData, ImportError> {
    let content =
        fs::read_to_string(path).map_err(|e| ImportError::FileReadError(e.to_string()))?;

    let manifest: JsonManifest =
        serde_json::from_str(&content).map_err(|e| ImportError::JsonParseError(e.to_string()))?;

    Ok(ManifestData {
        streams: manifest.streams,
        config: manifest.config,
    })
}

/// 解析 CSV 清单 (仅废料流, 表头列名与字段名一致)
fn load_csv(path: &Path) -> Result<ManifestData, ImportError> {
    let mut reader =
        csv::Reader::from_path(path).map_err(|e| ImportError::CsvParseError(e.to_string()))?;

    let mut streams = Vec::new();
    for (i, record) in reader.deserialize::<WasteStream>().enumerate() {
        // 行号: 表头占第 1 行
        let stream = record.map_err(|e| ImportError::CsvParseError(format!(
            "行 {}: {}",
            i + 2,
            e
        )))?;
        streams.push(stream);
    }

    Ok(ManifestData {
        streams,
        config: None,
    })
}
