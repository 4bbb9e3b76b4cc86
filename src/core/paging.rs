//! Paged query aggregation
//!
//! PanLex caps every response at `resultMax` records (2000 at time of
//! writing). The functions here reissue the same logical query with an
//! advancing offset and stitch the pages back together, either eagerly
//! into one [`PageResponse`] or lazily through [`PagedQuery`].

use std::collections::VecDeque;

use serde_json::{json, Value};
use tracing::debug;

use crate::core::client::PanlexClient;
use crate::core::errors::Result;
use crate::core::models::{PageResponse, Params};

/// Seed `offset`/`limit` in a private copy of the caller's params.
///
/// Returns the starting offset and the effective limit: the explicit
/// argument wins, otherwise a `limit` key already in the params is
/// honored.
fn seed_paging(params: &mut Params, limit: Option<usize>) -> (i64, Option<usize>) {
    let offset = match params.get("offset").and_then(Value::as_i64) {
        Some(offset) => offset,
        None => {
            params.insert("offset".to_string(), json!(0));
            0
        }
    };

    let remaining = limit.or_else(|| {
        params
            .get("limit")
            .and_then(Value::as_u64)
            .map(|l| l as usize)
    });
    if let Some(r) = remaining {
        params.insert("limit".to_string(), json!(r));
    }

    (offset, remaining)
}

impl PanlexClient {
    /// Fetch every page of a query and return the stitched aggregate.
    ///
    /// The caller's params are never mutated. The offset advances by the
    /// number of records each page actually returned, and a page short of
    /// `resultMax` ends the loop. With a `limit`, fetching stops once that
    /// many records have accumulated and the final page's contribution is
    /// trimmed so the aggregate never exceeds it. Any transport error
    /// aborts the whole call; partial pages are discarded.
    pub async fn query_all(
        &self,
        endpoint: &str,
        params: &Params,
        limit: Option<usize>,
    ) -> Result<PageResponse> {
        let mut params = params.clone();
        let (mut offset, mut remaining) = seed_paging(&mut params, limit);

        let mut aggregate: Option<PageResponse> = None;
        let mut pages = 0u32;

        while remaining != Some(0) {
            let mut page = self.query(endpoint, &params).await?;
            pages += 1;

            let fetched = page.result_num;
            let last = page.is_last_page();

            if let Some(r) = remaining {
                page.truncate(r);
            }
            match aggregate.as_mut() {
                Some(acc) => acc.merge_page(page),
                None => aggregate = Some(page),
            }

            if let Some(r) = &mut remaining {
                *r = r.saturating_sub(fetched as usize);
                if *r == 0 {
                    break;
                }
                params.insert("limit".to_string(), json!(*r));
            }
            if last {
                break;
            }

            offset += fetched;
            params.insert("offset".to_string(), json!(offset));
        }

        debug!(endpoint, pages, "aggregation complete");
        Ok(aggregate.unwrap_or_default())
    }

    /// Lazy counterpart of [`query_all`](Self::query_all): records are
    /// pulled page by page as the consumer advances. Restart by calling
    /// again; a `PagedQuery` is not resumable mid-stream.
    pub fn query_iter<'a>(
        &'a self,
        endpoint: &str,
        params: &Params,
        limit: Option<usize>,
    ) -> PagedQuery<'a> {
        let mut params = params.clone();
        let (offset, remaining) = seed_paging(&mut params, limit);

        PagedQuery {
            client: self,
            endpoint: endpoint.to_string(),
            params,
            buffer: VecDeque::new(),
            offset,
            remaining,
            done: remaining == Some(0),
        }
    }
}

/// Explicit iterator over the records of a paged query.
///
/// The next network call happens only when the consumer asks for a record
/// past the current page's end; dropping the iterator (or simply not
/// calling [`next`](Self::next) again) halts further calls.
#[derive(Debug)]
pub struct PagedQuery<'a> {
    client: &'a PanlexClient,
    endpoint: String,
    params: Params,
    buffer: VecDeque<Value>,
    offset: i64,
    remaining: Option<usize>,
    done: bool,
}

impl PagedQuery<'_> {
    /// Advance to the next record, fetching the next page if the current
    /// one is exhausted. `Ok(None)` once the result set ends.
    pub async fn next(&mut self) -> Result<Option<Value>> {
        loop {
            if let Some(record) = self.buffer.pop_front() {
                return Ok(Some(record));
            }
            if self.done {
                return Ok(None);
            }
            self.fetch_page().await?;
        }
    }

    /// Whether the stream has ended without another fetch being possible
    pub fn is_exhausted(&self) -> bool {
        self.done && self.buffer.is_empty()
    }

    /// Drain the rest of the stream into a vector
    pub async fn collect_remaining(&mut self) -> Result<Vec<Value>> {
        let mut records = Vec::new();
        while let Some(record) = self.next().await? {
            records.push(record);
        }
        Ok(records)
    }

    async fn fetch_page(&mut self) -> Result<()> {
        let page = self.client.query(&self.endpoint, &self.params).await?;

        let fetched = page.result_num;
        if page.is_last_page() {
            self.done = true;
        }

        let mut records = page.result;
        if let Some(r) = &mut self.remaining {
            if records.len() > *r {
                records.truncate(*r);
            }
            *r = r.saturating_sub(fetched as usize);
            if *r == 0 {
                self.done = true;
            } else {
                self.params.insert("limit".to_string(), json!(*r));
            }
        }
        self.buffer.extend(records);

        if !self.done {
            self.offset += fetched;
            self.params.insert("offset".to_string(), json!(self.offset));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_paging_defaults_offset() {
        let mut params = Params::new();
        let (offset, remaining) = seed_paging(&mut params, None);
        assert_eq!(offset, 0);
        assert_eq!(remaining, None);
        assert_eq!(params["offset"], json!(0));
    }

    #[test]
    fn test_seed_paging_keeps_caller_offset() {
        let mut params = Params::new();
        params.insert("offset".to_string(), json!(40));
        let (offset, _) = seed_paging(&mut params, None);
        assert_eq!(offset, 40);
        assert_eq!(params["offset"], json!(40));
    }

    #[test]
    fn test_seed_paging_explicit_limit_wins() {
        let mut params = Params::new();
        params.insert("limit".to_string(), json!(100));
        let (_, remaining) = seed_paging(&mut params, Some(5));
        assert_eq!(remaining, Some(5));
        assert_eq!(params["limit"], json!(5));
    }

    #[test]
    fn test_seed_paging_reads_limit_from_params() {
        let mut params = Params::new();
        params.insert("limit".to_string(), json!(7));
        let (_, remaining) = seed_paging(&mut params, None);
        assert_eq!(remaining, Some(7));
    }
}
