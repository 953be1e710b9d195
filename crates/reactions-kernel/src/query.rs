//! Pagination envelope for read-only queries.
//!
//! A page token is the raw store key of the first entry of the next page, encoded as URL-safe
//! base64. Callers treat it as opaque.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use crate::config::KeeperConfig;
use crate::validate::ValidationError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Resume token from a previous [`PageResponse::next_key`]; takes precedence over `offset`.
    pub key: Option<String>,
    pub offset: u64,
    /// Zero selects the configured default.
    pub limit: u64,
    /// Only honored for offset-based requests.
    pub count_total: bool,
    pub reverse: bool,
}

impl PageRequest {
    pub fn with_limit(limit: u64) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    pub fn after(key: impl Into<String>, limit: u64) -> Self {
        Self {
            key: Some(key.into()),
            limit,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResponse {
    pub next_key: Option<String>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: PageResponse,
}

pub(crate) fn encode_page_key(key: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(key)
}

pub(crate) fn decode_page_key(token: &str) -> Result<Vec<u8>, ValidationError> {
    URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|err| ValidationError::PageKey(err.to_string()))
}

/// Slice `entries` (ascending key order, already filtered) into one page.
pub(crate) fn paginate<T>(
    mut entries: Vec<(Vec<u8>, T)>,
    request: &PageRequest,
    config: &KeeperConfig,
) -> Result<Page<T>, ValidationError> {
    if request.reverse {
        entries.reverse();
    }
    let limit = usize::try_from(config.page_limit(request.limit)).unwrap_or(usize::MAX);

    let (start, total) = match &request.key {
        Some(token) => {
            let key = decode_page_key(token)?;
            let start = entries
                .iter()
                .position(|(k, _)| {
                    if request.reverse {
                        k.as_slice() <= key.as_slice()
                    } else {
                        k.as_slice() >= key.as_slice()
                    }
                })
                .unwrap_or(entries.len());
            (start, None)
        }
        None => {
            let total = request.count_total.then_some(entries.len() as u64);
            let start = usize::try_from(request.offset)
                .unwrap_or(usize::MAX)
                .min(entries.len());
            (start, total)
        }
    };

    let mut rest = entries.into_iter().skip(start);
    let items: Vec<T> = rest.by_ref().take(limit).map(|(_, item)| item).collect();
    let next_key = rest.next().map(|(key, _)| encode_page_key(&key));

    Ok(Page {
        items,
        page: PageResponse { next_key, total },
    })
}
