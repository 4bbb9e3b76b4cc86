//! Chunked normalization queries
//!
//! `/norm/expr/<langvar>` and `/norm/definition/<langvar>` accept at most
//! `max_array_size` items per request. Larger inputs are split into
//! fixed-stride chunks, one request per chunk, and the per-chunk `norm`
//! maps merged into a single mapping.

use serde_json::{json, Map, Value};
use tracing::debug;

use crate::core::client::PanlexClient;
use crate::core::errors::{PanlexError, Result};
use crate::core::models::{PageResponse, Params};

impl PanlexClient {
    /// Normalize an arbitrarily long `txt` array against `endpoint`.
    ///
    /// `cache: 0` is forced onto every chunk request since each chunk is a
    /// distinct, non-repeatable query. No chunk ever exceeds the service
    /// ceiling; an input of length M issues exactly `ceil(M / C)` requests
    /// and an empty input issues none. Any chunk failure aborts the whole
    /// call with no partial mapping returned.
    pub async fn query_norm(&self, endpoint: &str, params: &Params) -> Result<PageResponse> {
        let mut base = params.clone();
        base.insert("cache".to_string(), json!(0));

        let txt = base
            .get("txt")
            .and_then(Value::as_array)
            .cloned()
            .ok_or_else(|| PanlexError::MissingField {
                field: "txt".to_string(),
            })?;

        if txt.is_empty() {
            return Ok(PageResponse {
                norm: Some(Map::new()),
                ..Default::default()
            });
        }

        let chunk_size = self.config().max_array_size;
        let mut aggregate: Option<PageResponse> = None;

        for chunk in txt.chunks(chunk_size) {
            let mut chunk_params = base.clone();
            chunk_params.insert("txt".to_string(), Value::Array(chunk.to_vec()));

            let page = self.query(endpoint, &chunk_params).await?;
            match aggregate.as_mut() {
                Some(acc) => acc.merge_page(page),
                None => aggregate = Some(page),
            }
        }

        let aggregate = aggregate.unwrap_or_default();
        debug!(
            endpoint,
            items = txt.len(),
            chunks = txt.len().div_ceil(chunk_size),
            keys = aggregate.norm.as_ref().map(Map::len).unwrap_or(0),
            "normalization complete"
        );
        Ok(aggregate)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    // chunk arithmetic sanity: ceil(M / C) chunks, none above the ceiling
    #[test]
    fn test_chunk_split_is_fixed_stride() {
        let items: Vec<_> = (0..25).map(|i| json!(i)).collect();
        let chunks: Vec<_> = items.chunks(10).collect();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 10);
        assert_eq!(chunks[1].len(), 10);
        assert_eq!(chunks[2].len(), 5);
        assert!(chunks.iter().all(|c| c.len() <= 10));
    }

    #[test]
    fn test_exact_multiple_has_no_empty_tail() {
        let items: Vec<_> = (0..20).map(|i| json!(i)).collect();
        assert_eq!(items.chunks(10).count(), 2);
    }
}
