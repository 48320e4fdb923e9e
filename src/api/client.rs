// src/api/client.rs
//! HTTP client for the Notion API.
//!
//! A thin wrapper around reqwest that handles authentication, and the
//! [`NotionContent`] interpreter built on it. Each request is retried on
//! transient failures before its error is classified for the converter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Response};

use super::pagination::fetch_all_pages;
use super::parser;
use crate::algebras::{FetchError, NotionContent};
use crate::constants::{
    NOTION_API_INITIAL_BACKOFF_MS, NOTION_API_MAX_ATTEMPTS, NOTION_API_MAX_BACKOFF_MS,
    NOTION_API_TIMEOUT_SECS,
};
use crate::error::AppError;
use crate::error_recovery::retry_with_backoff;
use crate::model::{Block, PageMetadata};
use crate::types::{ApiKey, NotionId, PageId};

const NOTION_VERSION: &str = "2022-06-28";
const API_BASE_URL: &str = "https://api.notion.com/v1";

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .timeout(Duration::from_secs(NOTION_API_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a GET request to the specified endpoint (path without base URL).
    pub async fn get(&self, endpoint: &str) -> Result<Response, AppError> {
        self.get_with_query(endpoint, &[]).await
    }

    /// Makes a GET request with query parameters.
    pub async fn get_with_query(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Response, AppError> {
        let url = format!("{}/{}", API_BASE_URL, endpoint);
        log::debug!("GET {}", url);

        let response = self.client.get(url).query(query).send().await?;
        log::debug!("{} -> {}", endpoint, response.status());

        Ok(response)
    }

    async fn fetch_children_page(
        &self,
        endpoint: &str,
        page_size: u32,
        cursor: Option<String>,
    ) -> Result<super::responses::PaginatedResponse<Block>, AppError> {
        let mut query = vec![("page_size", page_size.to_string())];
        if let Some(cursor) = cursor {
            query.push(("start_cursor", cursor));
        }

        let query = query.as_slice();
        retry_with_backoff(
            move || async move {
                let response = self.get_with_query(endpoint, query).await?;
                let result = extract_response_text(response).await?;
                parser::parse_blocks_pagination(result)
            },
            NOTION_API_MAX_ATTEMPTS,
            Duration::from_millis(NOTION_API_INITIAL_BACKOFF_MS),
            Duration::from_millis(NOTION_API_MAX_BACKOFF_MS),
        )
        .await
    }
}

#[async_trait]
impl NotionContent for NotionHttpClient {
    async fn list_children(&self, parent: &NotionId) -> Result<Vec<Block>, FetchError> {
        let endpoint = format!("blocks/{}/children", parent.to_hyphenated());
        let endpoint = endpoint.as_str();

        let result = fetch_all_pages(
            move |page_size, cursor| self.fetch_children_page(endpoint, page_size, cursor),
            None,
        )
        .await
        .map_err(|e| {
            log::warn!("Listing children of {} failed: {}", parent, e);
            FetchError::from(e)
        })?;

        log::debug!(
            "Fetched {} children of {} in {} page(s)",
            result.items.len(),
            parent,
            result.pages_fetched
        );
        Ok(result.items)
    }

    async fn page_metadata(&self, page: &PageId) -> Result<PageMetadata, FetchError> {
        let endpoint = format!("pages/{}", page.to_dashed());
        let endpoint = endpoint.as_str();

        retry_with_backoff(
            move || async move {
                let response = self.get(endpoint).await?;
                let result = extract_response_text(response).await?;
                parser::parse_page_metadata(result)
            },
            NOTION_API_MAX_ATTEMPTS,
            Duration::from_millis(NOTION_API_INITIAL_BACKOFF_MS),
            Duration::from_millis(NOTION_API_MAX_BACKOFF_MS),
        )
        .await
        .map_err(|e| {
            log::warn!("Retrieving page {} failed: {}", page, e);
            FetchError::from(e)
        })
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text along with status and URL metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
