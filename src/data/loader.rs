use super::models::{PlayerRecord, PrecomputedResponse};
use crate::error::AppError;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// A candidate pool as read from disk, plus whatever scope the file declared.
#[derive(Debug, Default)]
pub struct CandidatePool {
    pub records: Vec<PlayerRecord>,
    pub state: Option<String>,
    pub months_back: Option<u32>,
}

pub fn load_pool(path: &Path) -> Result<CandidatePool, AppError> {
    let content = fs::read_to_string(path).map_err(|e| {
        AppError::IoError(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let pool = parse_pool(&content)?;
    debug!(
        path = %path.display(),
        records = pool.records.len(),
        "loaded candidate pool"
    );
    Ok(pool)
}

/// Accepts either a bare array of records or the `{"results": [...]}` envelope.
pub fn parse_pool(content: &str) -> Result<CandidatePool, AppError> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| AppError::JsonError(format!("Failed to parse pool: {}", e)))?;

    match value {
        Value::Array(_) => {
            let records: Vec<PlayerRecord> = serde_json::from_value(value)
                .map_err(|e| AppError::InvalidPool(format!("bad player record: {}", e)))?;
            Ok(CandidatePool {
                records,
                ..Default::default()
            })
        }
        Value::Object(_) => {
            if !matches!(value.get("results"), Some(Value::Array(_))) {
                return Err(AppError::InvalidPool(
                    "response missing list field 'results'".to_string(),
                ));
            }
            let envelope: PrecomputedResponse = serde_json::from_value(value)
                .map_err(|e| AppError::InvalidPool(format!("bad player record: {}", e)))?;
            Ok(CandidatePool {
                records: envelope.results,
                state: envelope.state.map(|s| s.to_uppercase()),
                months_back: envelope.months_back,
            })
        }
        _ => Err(AppError::InvalidPool(
            "expected a JSON array or an object with 'results'".to_string(),
        )),
    }
}
