//! Picker-specific data types

use std::fmt;
use std::time::Duration;
use serde::{Serialize, Deserialize};
use url::Url;
use uuid::Uuid;

use crate::error::{PickerError, PickerResult};

/// Default number of products requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Default minimum spacing between two dispatched searches
pub const DEFAULT_THROTTLE_INTERVAL: Duration = Duration::from_millis(500);

/// Default provider request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default cap on product rows in the form
pub const DEFAULT_MAX_ROWS: usize = 4;

/// Rows from the end of the visible list at which the next page is pulled
pub const DEFAULT_SCROLL_THRESHOLD: usize = 5;

/// Controller and form configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerConfig {
    pub page_size: u32,
    pub throttle_interval: Duration,
    pub request_timeout: Duration,
    pub max_rows: usize,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            throttle_interval: DEFAULT_THROTTLE_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

impl PickerConfig {
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_throttle_interval(mut self, interval: Duration) -> Self {
        self.throttle_interval = interval;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    pub fn validate(&self) -> PickerResult<()> {
        if self.page_size == 0 {
            return Err(invalid("page_size", self.page_size));
        }
        if self.max_rows == 0 {
            return Err(invalid("max_rows", self.max_rows));
        }
        if self.throttle_interval.is_zero() {
            return Err(invalid("throttle_interval", format!("{:?}", self.throttle_interval)));
        }
        if self.request_timeout.is_zero() {
            return Err(invalid("request_timeout", format!("{:?}", self.request_timeout)));
        }
        Ok(())
    }
}

fn invalid(field: &str, value: impl ToString) -> PickerError {
    PickerError::InvalidConfig {
        field: field.to_string(),
        value: value.to_string(),
    }
}

/// How page requests are spelled on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum QueryStyle {
    /// `?q=<text>&limit=<size>&skip=<offset>`
    #[default]
    Offset,
    /// `?search=<text>&page=<1-based page>&limit=<size>`
    Page,
}

/// Remote catalog location and credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEndpoint {
    pub base_url: Url,
    pub api_key: Option<String>,
    pub query_style: QueryStyle,
}

impl CatalogEndpoint {
    pub fn parse(base_url: &str) -> PickerResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| invalid("catalog_url", format!("{base_url} ({e})")))?;
        Ok(Self {
            base_url,
            api_key: None,
            query_style: QueryStyle::default(),
        })
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|key| !key.is_empty());
        self
    }

    pub fn with_query_style(mut self, query_style: QueryStyle) -> Self {
        self.query_style = query_style;
        self
    }
}

/// Result of `set_search_text`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDispatch {
    /// A page-0 request went out under a new epoch
    Dispatched { epoch: u64 },
    /// Dropped by the throttle; nothing was sent
    Throttled,
}

/// Result of `load_next_page` and `retry`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDispatch {
    Dispatched { epoch: u64, page: u32 },
    /// Another request is still pending
    InFlight,
    /// The last page came back short
    Exhausted,
    /// Nothing to retry
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductToggle {
    Selected,
    Deselected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantToggle {
    Selected,
    Deselected,
    /// Product not selected, or the variant is not one of its variants
    Ignored,
}

/// What happened to one provider response
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseOutcome {
    Applied { page: u32, added: usize },
    Failed(PickerError),
    /// Belonged to a superseded epoch and was dropped
    Stale,
}

/// Coarse picker state for the shell to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickerStatus {
    Idle,
    Loading,
    Ready,
    /// The search succeeded and matched nothing
    NoResults,
    Exhausted,
    Failed,
}

/// Identifier of one product row in the form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowId(Uuid);

impl RowId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RowId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
