// Hosted tabular store client (PostgREST-style REST API)
use crate::application::reading_store::{ReadingPage, ReadingStore};
use crate::domain::temperature::{StoredReading, TemperatureReading};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct RestReadingStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    table: String,
}

#[derive(Debug, Serialize)]
struct InsertRow<'a> {
    sensor: &'a str,
    value: f64,
}

#[derive(Debug, Deserialize)]
struct FetchedRow {
    sensor: String,
    value: f64,
    created_at: String,
}

impl RestReadingStore {
    pub fn new(client: reqwest::Client, base_url: String, api_key: String, table: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            table,
        }
    }

    fn rows_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn page_url(&self, offset: usize, limit: usize) -> String {
        format!(
            "{}?select={}&order={}&offset={}&limit={}",
            self.rows_url(),
            urlencoding::encode("sensor,value,created_at"),
            urlencoding::encode("created_at.desc"),
            offset,
            limit
        )
    }
}

/// Total row count from a `Content-Range` header such as `0-19/57`.
fn parse_total(content_range: &str) -> Option<usize> {
    content_range.rsplit('/').next()?.trim().parse().ok()
}

#[async_trait]
impl ReadingStore for RestReadingStore {
    async fn insert(&self, reading: &TemperatureReading) -> Result<()> {
        let response = self
            .client
            .post(self.rows_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(&[InsertRow {
                sensor: &reading.sensor,
                value: reading.value,
            }])
            .send()
            .await
            .context("failed to send insert to the reading store")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("reading store insert failed with status {}: {}", status, body);
        }

        Ok(())
    }

    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<ReadingPage> {
        let response = self
            .client
            .get(self.page_url(offset, limit))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "count=exact")
            .send()
            .await
            .context("failed to query the reading store")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("reading store query failed with status {}: {}", status, body);
        }

        let total = response
            .headers()
            .get(reqwest::header::CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_total);

        let rows: Vec<FetchedRow> = response
            .json()
            .await
            .context("failed to parse reading store response")?;

        // without an exact count fall back to what this page proves exists
        let total = total.unwrap_or(offset + rows.len());

        Ok(ReadingPage {
            rows: rows
                .into_iter()
                .map(|r| StoredReading {
                    sensor: r.sensor,
                    value: r.value,
                    created_at: r.created_at,
                })
                .collect(),
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RestReadingStore {
        RestReadingStore::new(
            reqwest::Client::new(),
            "https://example.supabase.co/".to_string(),
            "anon-key".to_string(),
            "data".to_string(),
        )
    }

    #[test]
    fn test_page_url_follows_the_range_convention() {
        let url = store().page_url(40, 20);
        assert!(url.starts_with("https://example.supabase.co/rest/v1/data?"));
        assert!(url.contains("order=created_at.desc"));
        assert!(url.contains("offset=40"));
        assert!(url.contains("limit=20"));
    }

    #[test]
    fn test_parse_total() {
        assert_eq!(parse_total("0-19/57"), Some(57));
        assert_eq!(parse_total("*/0"), Some(0));
        assert_eq!(parse_total("0-19/*"), None);
        assert_eq!(parse_total("garbage"), None);
    }
}
