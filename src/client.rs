//! タイムラインサーバーのHTTPクライアント

use std::time::Duration;

use photo_timeline_common::{
    event_path, stack_path, EventDateSet, EventDetail, PaginationCursor, ARCHIVE_DATES_PATH,
};

use crate::config::Config;
use crate::error::{Result, TimelineError};

pub struct TimelineClient {
    http: reqwest::Client,
    base_url: String,
}

impl TimelineClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            base_url: config.server_url(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_text(&self, path: &str, accept: &str) -> Result<String> {
        let url = self.url(path);
        log::debug!("GET {}", url);

        let resp = self
            .http
            .get(&url)
            .header(reqwest::header::ACCEPT, accept)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            log::warn!("GET {} -> {}", url, status);
            return Err(TimelineError::Status(status.as_u16()));
        }
        Ok(resp.text().await?)
    }

    pub async fn fetch_archive_dates(&self) -> Result<EventDateSet> {
        let body = self.get_text(ARCHIVE_DATES_PATH, "application/json").await?;
        Ok(EventDateSet::from_json(&body)?)
    }

    pub async fn fetch_archive_page(&self, cursor: &PaginationCursor) -> Result<String> {
        self.get_text(&cursor.request_path(), "text/html").await
    }

    pub async fn fetch_event_detail(&self, event_id: &str) -> Result<EventDetail> {
        let body = self.get_text(&event_path(event_id), "application/json").await?;
        Ok(EventDetail::from_json(&body)?)
    }

    pub async fn fetch_stack(&self, stack_id: &str) -> Result<String> {
        self.get_text(&stack_path(stack_id), "text/html").await
    }
}
