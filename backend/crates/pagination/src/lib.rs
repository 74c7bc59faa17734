//! Page/limit pagination primitives shared by backend list endpoints.
//!
//! A [`PageRequest`] is a validated `(page, limit)` pair selecting the slice
//! `skip = (page - 1) * limit, take = limit` of a collection. List endpoints
//! wrap the selected slice and the collection total in a [`PageEnvelope`].
//!
//! Raw query text is parsed with [`parse_param`]: absent or non-numeric text
//! falls back to the caller's default, while numeric but non-positive values
//! are preserved so [`PageRequest::new`] can reject them.

use serde::Serialize;

/// Default page number applied when a request does not name one.
pub const DEFAULT_PAGE: i64 = 1;

/// Default page size applied when a request does not name one.
pub const DEFAULT_LIMIT: i64 = 10;

/// Rejection raised when a page or limit is below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("page and limit must both be at least 1 (got page {page}, limit {limit})")]
pub struct OutOfRangeError {
    /// Requested page number.
    pub page: i64,
    /// Requested page size.
    pub limit: i64,
}

/// Validated pagination parameters.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// assert_eq!(PageRequest::new(2, 5).map(PageRequest::skip), Ok(5));
/// assert!(PageRequest::new(0, 10).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl PageRequest {
    /// Validate a `(page, limit)` pair, rejecting values below 1.
    ///
    /// # Errors
    /// Returns [`OutOfRangeError`] when either component is below 1.
    pub const fn new(page: i64, limit: i64) -> Result<Self, OutOfRangeError> {
        if page < 1 || limit < 1 {
            return Err(OutOfRangeError { page, limit });
        }
        #[expect(clippy::cast_sign_loss, reason = "both components checked >= 1 above")]
        Ok(Self {
            page: page as u64,
            limit: limit as u64,
        })
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(self) -> u64 {
        self.page
    }

    /// Maximum number of items in the page.
    #[must_use]
    pub const fn limit(self) -> u64 {
        self.limit
    }

    /// Number of items to skip before the page starts.
    #[must_use]
    pub const fn skip(self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

/// Parse one pagination query component from raw text.
///
/// Absent or non-numeric text yields `default`; numeric text is returned as
/// given, including non-positive values, so that range validation stays with
/// [`PageRequest::new`].
#[must_use]
pub fn parse_param(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|text| text.trim().parse::<i64>().ok())
        .unwrap_or(default)
}

/// One page of a collection together with the collection total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    /// The selected slice, at most `limit` entries.
    pub items: Vec<T>,
    /// Total number of entries in the collection.
    pub total: u64,
    /// One-based page number that produced this slice.
    pub page: u64,
    /// Page size used for the selection.
    pub limit: u64,
}

impl<T> PageEnvelope<T> {
    /// Wrap a page of items with the request that selected it.
    #[must_use]
    pub const fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page(),
            limit: request.limit(),
        }
    }

    /// Convert the item type while keeping the envelope metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageEnvelope<U> {
        PageEnvelope {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
        }
    }
}
