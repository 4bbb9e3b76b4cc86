//! Convenience translation queries
//!
//! Thin compositions of the core query protocol: look up an expression id
//! in the source language variety, then fetch its translations sorted by
//! translation quality.

use serde_json::{json, Value};
use tracing::debug;

use crate::core::client::PanlexClient;
use crate::core::errors::{PanlexError, Result};
use crate::core::models::Params;

fn object_params(value: Value) -> Params {
    match value {
        Value::Object(map) => map,
        _ => Params::new(),
    }
}

impl PanlexClient {
    /// Get translations of `expr` from `from_uid` into `to_uid`, best
    /// quality first.
    ///
    /// `distance` is the translation distance (1 or 2); `limit` caps the
    /// number of translations returned. Language varieties are PanLex UID
    /// codes (e.g. `eng-000` for English). An expression unknown in the
    /// source variety is a service-style error with code 0.
    pub async fn get_translations(
        &self,
        expr: &str,
        from_uid: &str,
        to_uid: &str,
        distance: u8,
        limit: Option<usize>,
    ) -> Result<Vec<Value>> {
        let lookup = object_params(json!({
            "uid": from_uid,
            "txt": expr,
        }));
        let found = self.query_all("/expr", &lookup, None).await?;

        let expr_id = found
            .result
            .first()
            .ok_or_else(|| PanlexError::Api {
                code: 0,
                message: format!("{}: not a valid expression in {}", expr, from_uid),
            })?
            .get("id")
            .and_then(Value::as_i64)
            .ok_or_else(|| PanlexError::InvalidResponse {
                message: "expression record has no id".to_string(),
            })?;
        debug!(expr, from_uid, expr_id, "resolved expression");

        let translations = object_params(json!({
            "trans_expr": expr_id,
            "uid": to_uid,
            "include": "trans_quality",
            "trans_distance": distance,
            "sort": "trans_quality desc",
        }));
        let aggregated = self.query_all("/expr", &translations, limit).await?;
        Ok(aggregated.result)
    }

    /// Best-quality translation of `expr` from `from_uid` into `to_uid`,
    /// or `None` when the target variety has no translation for it.
    pub async fn translate(
        &self,
        expr: &str,
        from_uid: &str,
        to_uid: &str,
    ) -> Result<Option<String>> {
        let translations = self
            .get_translations(expr, from_uid, to_uid, 1, Some(1))
            .await?;
        Ok(translations
            .first()
            .and_then(|record| record.get("txt"))
            .and_then(Value::as_str)
            .map(str::to_string))
    }
}
