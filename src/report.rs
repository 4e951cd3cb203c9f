//! Atomic emission of the normalized dataset and its aggregate summary.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pipeline::NormalizedRecord;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("WriteFailed: {0}")]
    WriteFailed(String),
    #[error("SerializeFailed: {0}")]
    SerializeFailed(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmitPaths {
    pub data_path: String,
    pub summary_path: String,
}

/// Write `<stem>.normalized.json` and `<stem>.summary.json` into `outdir`,
/// each via a temp file and rename. The summary gains a
/// `dataset_fingerprint` field: the SHA-256 of the normalized JSON, stable
/// across identical runs.
pub fn emit_dataset(
    records: &[NormalizedRecord],
    summary: &serde_json::Value,
    outdir: &str,
    stem: &str,
) -> Result<EmitPaths, EmitError> {
    std::fs::create_dir_all(outdir).map_err(|e| EmitError::WriteFailed(e.to_string()))?;

    let data_bytes =
        serde_json::to_vec_pretty(records).map_err(|e| EmitError::SerializeFailed(e.to_string()))?;
    let fingerprint = sha256_hex(&data_bytes);

    let mut summary_full = summary.as_object().cloned().unwrap_or_default();
    summary_full.insert("dataset_fingerprint".to_string(), serde_json::json!(fingerprint));
    let summary_bytes = serde_json::to_vec_pretty(&serde_json::Value::Object(summary_full))
        .map_err(|e| EmitError::SerializeFailed(e.to_string()))?;

    let data_path = Path::new(outdir).join(format!("{}.normalized.json", stem));
    let summary_path = Path::new(outdir).join(format!("{}.summary.json", stem));

    // Write temp files then rename.
    let pid = std::process::id();
    let data_tmp = data_path.with_extension(format!("json.tmp.{}", pid));
    let summary_tmp = summary_path.with_extension(format!("json.tmp.{}", pid));

    std::fs::write(&data_tmp, &data_bytes).map_err(|e| EmitError::WriteFailed(e.to_string()))?;
    std::fs::write(&summary_tmp, &summary_bytes)
        .map_err(|e| EmitError::WriteFailed(e.to_string()))?;

    std::fs::rename(&data_tmp, &data_path).map_err(|e| EmitError::WriteFailed(e.to_string()))?;
    std::fs::rename(&summary_tmp, &summary_path)
        .map_err(|e| EmitError::WriteFailed(e.to_string()))?;

    Ok(EmitPaths {
        data_path: data_path.to_string_lossy().to_string(),
        summary_path: summary_path.to_string_lossy().to_string(),
    })
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let out = hasher.finalize();
    out.iter().map(|b| format!("{:02x}", b)).collect()
}
