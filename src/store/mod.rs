//! Query store client.
//!
//! The agent persists each executed SQL query and its rows under the
//! correlation id it was invoked with; this client reads them back.

use serde::Deserialize;
use tracing::{debug, error};

use crate::config::GamesightConfig;
use crate::error::{GamesightError, Result};
use crate::http::{bearer_headers, shared_client};
use crate::types::QueryResult;

/// Client for the persisted answer-cache table.
pub struct QueryStoreClient {
    base_url: String,
    table: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    items: Vec<StoredItem>,
}

/// One stored record: the SQL text plus a JSON-encoded result document.
#[derive(Debug, Deserialize)]
struct StoredItem {
    query: String,
    data: String,
}

impl QueryStoreClient {
    pub fn new(config: &GamesightConfig) -> Result<Self> {
        Ok(Self {
            base_url: config.store_base_url()?.to_string(),
            table: config.answers_table()?.to_string(),
            api_key: config.api_key()?.to_string(),
        })
    }

    /// Strongly-consistent point lookup by correlation id.
    ///
    /// An absent key or an empty item list is a valid result, not an
    /// error. Transport and auth failures surface as [`GamesightError::Lookup`].
    pub async fn fetch_results(&self, query_id: &str) -> Result<Vec<QueryResult>> {
        let url = format!("{}/tables/{}/query", self.base_url, self.table);
        let body = serde_json::json!({
            "id": query_id,
            "consistentRead": true,
        });

        debug!(table = %self.table, query_id, "query store lookup");

        let response = shared_client()
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "query store unreachable");
                GamesightError::Lookup(e.to_string())
            })?;

        let status = response.status().as_u16();
        if status != 200 {
            let body_text = response.text().await.unwrap_or_default();
            error!(status, "query store lookup rejected");
            return Err(GamesightError::Lookup(format!(
                "status {status}: {body_text}"
            )));
        }

        let lookup: LookupResponse = response.json().await.map_err(|e| {
            error!(error = %e, "query store response unreadable");
            GamesightError::Lookup(e.to_string())
        })?;

        let mut results = Vec::with_capacity(lookup.items.len());
        for item in lookup.items {
            // `data` is itself a JSON document; its `result` field holds the rows.
            let document: serde_json::Value = serde_json::from_str(&item.data).map_err(|e| {
                error!(error = %e, "stored result document is not valid JSON");
                GamesightError::Serialization(e)
            })?;
            let rows = document
                .get("result")
                .and_then(|v| v.as_array())
                .cloned()
                .unwrap_or_default();
            results.push(QueryResult {
                query: item.query,
                rows,
            });
        }

        Ok(results)
    }
}
