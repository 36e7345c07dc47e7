use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;

use crate::app_config::TitleConfig;
use crate::providers::{TitleResolver, placeholder_title};
use crate::video_id::VideoId;

// @module: Best-effort video title lookup

// @const: page title with the site suffix stripped
static PAGE_TITLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<title>(.*?) - YouTube</title>").unwrap()
});

/// Title resolver that scrapes the watch page `<title>` element.
///
/// Lookup is best-effort by contract: any failure (network, non-success
/// status, missing title element, timeout) produces the deterministic
/// `Video_<id>` placeholder, never an error. The rest of the pipeline is
/// insulated from this collaborator's unreliability.
#[derive(Debug)]
pub struct PageTitleResolver {
    client: Client,
    endpoint: String,
}

impl PageTitleResolver {
    /// Create a resolver with its own client and the configured timeout
    pub fn new(config: &TitleConfig) -> Self {
        PageTitleResolver {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: config.endpoint.clone(),
        }
    }

    async fn lookup(&self, id: &VideoId) -> Option<String> {
        let page_url = format!("{}/watch?v={}", self.endpoint.trim_end_matches('/'), id);
        let response = self.client.get(&page_url).send().await.ok()?;
        if !response.status().is_success() {
            return None;
        }

        let html = response.text().await.ok()?;
        let raw_title = PAGE_TITLE_REGEX
            .captures(&html)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())?;

        Some(html_escape::decode_html_entities(raw_title).to_string())
    }
}

#[async_trait]
impl TitleResolver for PageTitleResolver {
    async fn resolve(&self, id: &VideoId) -> String {
        match self.lookup(id).await {
            Some(title) => title,
            None => {
                debug!("Title lookup failed for {}, using placeholder", id);
                placeholder_title(id)
            }
        }
    }
}
