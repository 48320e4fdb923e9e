// src/api/parser.rs
//! Response parsing for the Notion API.
//!
//! Success bodies decode into the wire types in [`super::responses`]; error
//! bodies decode with notion-client's error object. Anything that decodes
//! as neither is reported with the HTTP status alone.

use super::client::ApiResponse;
use super::responses::{
    NotionError, PaginatedResponse, RetrieveBlockChildrenResponse, ToDomain, WirePage,
};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionClientError, NotionErrorCode};
use crate::model::{Block, PageMetadata};
use reqwest::StatusCode;

/// Parse any Notion API response into `T`, or into the error it carries.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_success_body(&result.data, &result.url)
    } else {
        parse_error_body(&result.data, result.status, &result.url)
    }
}

fn parse_success_body<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);

        NotionClientError::Deserialization {
            source: e,
            body: preview(body),
        }
        .into()
    })
}

fn parse_error_body<T>(body: &str, status: StatusCode, url: &str) -> Result<T, AppError> {
    if let Ok(notion_error) = serde_json::from_str::<NotionError>(body) {
        log::debug!(
            "Notion API error from {}: {} {}",
            url,
            notion_error.code,
            notion_error.message
        );
        return Err(NotionClientError::NotionApi {
            status: notion_error.status,
            code: notion_error.code,
            message: notion_error.message,
            request_id: notion_error.request_id,
        }
        .into());
    }

    // Gateways in front of the API answer with HTML or nothing at all.
    Err(AppError::NotionService {
        code: NotionErrorCode::from_http_status(status.as_u16()),
        message: format!("HTTP {} from {}", status, url),
        status,
    })
}

fn preview(body: &str) -> String {
    match body.char_indices().nth(ERROR_BODY_PREVIEW_LENGTH) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

/// Parse a page object into the metadata the converter needs.
pub fn parse_page_metadata(result: ApiResponse<String>) -> Result<PageMetadata, AppError> {
    let page: WirePage = parse_api_response(result)?;
    page.to_domain()
}

/// Parse one page of `GET /blocks/{id}/children`.
pub fn parse_blocks_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Block>, AppError> {
    let response: RetrieveBlockChildrenResponse = parse_api_response(result)?;
    let object = response.object.clone();
    let next_cursor = response.next_cursor.clone();
    let has_more = response.has_more;

    Ok(PaginatedResponse {
        object,
        results: response.into_domain_blocks()?,
        next_cursor,
        has_more,
    })
}
