// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role. Reading these constants should tell you how the converter
//! behaves: how deep it descends, how fast it walks a page, which markup it
//! emits when something cannot be shown.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100. We use the maximum to minimize
/// round-trips while walking a page.
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// Attempts made for a single request before a transient failure is reported.
pub const NOTION_API_MAX_ATTEMPTS: u32 = 3;

/// First backoff delay after a transient failure, in milliseconds.
pub const NOTION_API_INITIAL_BACKOFF_MS: u64 = 500;

/// Upper bound on the backoff delay, in milliseconds.
pub const NOTION_API_MAX_BACKOFF_MS: u64 = 8_000;

/// Per-request timeout for the HTTP client, in seconds.
pub const NOTION_API_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Conversion boundaries
// ---------------------------------------------------------------------------

/// Deepest recursion level the converter renders. Level 1 is the page itself.
///
/// Blocks nested deeper than this are dropped without an error.
pub const MAX_NESTING_LEVEL: usize = 3;

/// Delay before each block dispatch, keeping the walk under the API rate limit.
pub const DEFAULT_PACING_MS: u64 = 334;

/// Pause between consecutive image downloads, in milliseconds.
pub const IMAGE_DOWNLOAD_PACING_MS: u64 = 100;

/// Prefix for deep links into the Notion web app.
pub const NOTION_HOST: &str = "https://notion.so";

// ---------------------------------------------------------------------------
// Fallback markup
// ---------------------------------------------------------------------------

/// Icon used for pages without metadata.
pub const PAGE_FALLBACK_ICON: &str = r"\faFileTextO";

/// Title used for pages whose metadata could not be read.
pub const PAGE_FALLBACK_TITLE: &str = "Untitled";

/// Title used for pages the integration is not allowed to read.
pub const PAGE_DENIED_TITLE: &str = r"\notRendered{Page not accessible by the integration}";

/// Code point rendered for callouts whose emoji icon is empty.
pub const CALLOUT_FALLBACK_EMOJI: &str = "1f4a1";

// ---------------------------------------------------------------------------
// String capacity hints (performance, not correctness)
// ---------------------------------------------------------------------------

/// Estimated characters per block, used to pre-allocate output strings.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 256;

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;
