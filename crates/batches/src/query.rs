//! List query parameters derived from navigable URL state.
//!
//! Parsing never fails: anything malformed or out of range resolves to the
//! default for that parameter.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use stockbatch_core::{DomainError, ValueObject};

pub const PAGE_PARAM: &str = "page";
pub const LIMIT_PARAM: &str = "limit";
pub const SORT_PARAM: &str = "sort";

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 20;

/// Creation-date ordering of the batch list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest first.
    Asc,
    /// Newest first.
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Lenient parse: anything other than `asc`/`desc` is the default.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

impl core::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(DomainError::validation(format!("unknown sort order: {other}"))),
        }
    }
}

/// Validated pagination + sort parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryState {
    pub page: u32,
    pub limit: u32,
    pub sort: SortOrder,
}

impl ValueObject for QueryState {}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort: SortOrder::default(),
        }
    }
}

impl QueryState {
    /// Derive a query from URL query pairs. The first occurrence of a key wins.
    pub fn from_params<'a, I>(params: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut page = None;
        let mut limit = None;
        let mut sort = None;

        for (key, value) in params {
            let slot = match key {
                PAGE_PARAM => &mut page,
                LIMIT_PARAM => &mut limit,
                SORT_PARAM => &mut sort,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }

        Self {
            page: positive_or(page, DEFAULT_PAGE),
            limit: positive_or(limit, DEFAULT_LIMIT),
            sort: SortOrder::parse_or_default(sort),
        }
    }

    /// Query pairs in request order (`page`, `limit`, `sort`).
    pub fn to_pairs(&self) -> [(&'static str, String); 3] {
        [
            (PAGE_PARAM, self.page.to_string()),
            (LIMIT_PARAM, self.limit.to_string()),
            (SORT_PARAM, self.sort.as_str().to_string()),
        ]
    }

    /// `page=<n>&limit=<n>&sort=<asc|desc>`
    pub fn query_string(&self) -> String {
        format!("page={}&limit={}&sort={}", self.page, self.limit, self.sort)
    }
}

/// Leading integer of `raw`: optional whitespace, an optional sign, then the
/// longest run of ASCII digits. Trailing text is ignored (`"3px"` is 3,
/// `"7.5"` is 7). `None` when no digit follows. Saturates at the `i64` bounds.
pub fn leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for d in digits.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        let d = i64::from(d - b'0');
        value = value.saturating_mul(10);
        value = if negative {
            value.saturating_sub(d)
        } else {
            value.saturating_add(d)
        };
    }
    seen.then_some(value)
}

/// Leading-integer parse; no digits or a value below 1 yields `default`.
/// Values beyond `u32` saturate at `u32::MAX`.
fn positive_or(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(leading_int)
        .filter(|v| *v >= 1)
        .map(|v| u32::try_from(v).unwrap_or(u32::MAX))
        .unwrap_or(default)
}
