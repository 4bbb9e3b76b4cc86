//! Core data models for PanLex queries

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request parameter mapping, serialized as the JSON request body.
///
/// Values may be strings, integers, booleans, or arrays, matching what the
/// API accepts. Query functions copy this map before adjusting `offset` or
/// `limit`, so a caller can reuse one map across invocations.
pub type Params = Map<String, Value>;

/// One page of results from the API, and also the shape of an aggregate
/// stitched together from several pages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageResponse {
    /// Result records, in service order
    #[serde(default)]
    pub result: Vec<Value>,
    /// Number of records in this page (summed across pages in an aggregate)
    #[serde(rename = "resultNum", default)]
    pub result_num: i64,
    /// The service's per-request result cap, informational
    #[serde(rename = "resultMax", default)]
    pub result_max: i64,
    /// Normalization mapping, present on `/norm` endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub norm: Option<Map<String, Value>>,
    /// Any other endpoint-specific fields, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PageResponse {
    /// Check this page's pagination accounting.
    ///
    /// Returns a description of the violation, if any: a negative
    /// `resultNum`, a `resultNum` that disagrees with `result.len()`, or a
    /// nonzero `resultNum` above `resultMax`. Catching these here keeps
    /// the aggregation loop from spinning forever on a broken service.
    pub fn paging_violation(&self) -> Option<String> {
        if self.result_num < 0 {
            return Some(format!("resultNum is negative: {}", self.result_num));
        }
        if self.result_num != self.result.len() as i64 {
            return Some(format!(
                "resultNum {} does not match result length {}",
                self.result_num,
                self.result.len()
            ));
        }
        if self.result_num > 0 && self.result_num > self.result_max {
            return Some(format!(
                "resultNum {} exceeds resultMax {}",
                self.result_num, self.result_max
            ));
        }
        None
    }

    /// Whether the service signaled this as the final page
    pub fn is_last_page(&self) -> bool {
        self.result.is_empty() || self.result_num < self.result_max
    }

    /// Fold a later page into this aggregate: `result` is appended in
    /// order, `resultNum` summed, `norm` merged key-wise. Other fields keep
    /// the first page's values.
    pub fn merge_page(&mut self, page: PageResponse) {
        self.result.extend(page.result);
        self.result_num += page.result_num;
        if let Some(norm) = page.norm {
            self.norm.get_or_insert_with(Map::new).extend(norm);
        }
    }

    /// Drop records past `limit`, adjusting `resultNum` to match
    pub fn truncate(&mut self, limit: usize) {
        if self.result.len() > limit {
            self.result.truncate(limit);
            self.result_num = limit as i64;
        }
    }
}

/// Error body returned by the service with a 409 status
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceErrorBody {
    /// Service-defined error code
    pub code: i64,
    /// Human-readable message
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(value: Value) -> PageResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_deserialize_page_with_extra_fields() {
        let p = page(json!({
            "result": [{"id": 42, "txt": "tree"}],
            "resultNum": 1,
            "resultMax": 2000,
            "request": {"uid": "eng-000"}
        }));
        assert_eq!(p.result_num, 1);
        assert_eq!(p.result_max, 2000);
        assert!(p.norm.is_none());
        assert!(p.extra.contains_key("request"));
    }

    #[test]
    fn test_deserialize_norm_page_without_result() {
        let p = page(json!({"norm": {"tree": {"score": 50}}}));
        assert_eq!(p.result_num, 0);
        assert!(p.result.is_empty());
        assert_eq!(p.norm.unwrap().len(), 1);
    }

    #[test]
    fn test_merge_preserves_order_and_sums_counts() {
        let mut acc = page(json!({
            "result": [{"id": 1}, {"id": 2}],
            "resultNum": 2,
            "resultMax": 2
        }));
        acc.merge_page(page(json!({
            "result": [{"id": 3}],
            "resultNum": 1,
            "resultMax": 2
        })));
        assert_eq!(acc.result_num, 3);
        let ids: Vec<i64> = acc.result.iter().map(|r| r["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_merge_unions_norm_maps() {
        let mut acc = page(json!({"norm": {"a": 1}}));
        acc.merge_page(page(json!({"norm": {"b": 2}})));
        let norm = acc.norm.unwrap();
        assert_eq!(norm.len(), 2);
        assert_eq!(norm["a"], json!(1));
        assert_eq!(norm["b"], json!(2));
    }

    #[test]
    fn test_paging_violations() {
        let p = page(json!({"result": [], "resultNum": -1, "resultMax": 2000}));
        assert!(p.paging_violation().unwrap().contains("negative"));

        let p = page(json!({"result": [{"id": 1}], "resultNum": 2, "resultMax": 2000}));
        assert!(p.paging_violation().unwrap().contains("does not match"));

        let p = page(json!({
            "result": [{"id": 1}, {"id": 2}, {"id": 3}],
            "resultNum": 3,
            "resultMax": 2
        }));
        assert!(p.paging_violation().unwrap().contains("exceeds resultMax"));

        let p = page(json!({"result": [{"id": 1}], "resultNum": 1, "resultMax": 2000}));
        assert!(p.paging_violation().is_none());
    }

    #[test]
    fn test_last_page_detection() {
        let p = page(json!({"result": [{"id": 1}], "resultNum": 1, "resultMax": 2000}));
        assert!(p.is_last_page());

        let full: Vec<Value> = (0..3).map(|i| json!({"id": i})).collect();
        let p = page(json!({"result": full, "resultNum": 3, "resultMax": 3}));
        assert!(!p.is_last_page());

        // empty page terminates even when resultMax is 0
        let p = page(json!({"result": [], "resultNum": 0, "resultMax": 0}));
        assert!(p.is_last_page());
    }

    #[test]
    fn test_truncate() {
        let mut p = page(json!({
            "result": [{"id": 1}, {"id": 2}, {"id": 3}],
            "resultNum": 3,
            "resultMax": 2000
        }));
        p.truncate(2);
        assert_eq!(p.result.len(), 2);
        assert_eq!(p.result_num, 2);

        p.truncate(5); // no-op past the end
        assert_eq!(p.result.len(), 2);
    }
}
