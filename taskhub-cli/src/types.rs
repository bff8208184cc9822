//! Common types used across CLI modules

use chrono::{DateTime, NaiveDate, Utc};
use clap::Args;
use taskhub_core::dto::{PageRequest, SortOrder};
use taskhub_store::RefreshPolicy;

/// Length of a full server-generated id (a 12-byte ObjectId in hex)
const FULL_ID_LEN: usize = 24;

/// Identifier that can be either a full id or an unambiguous prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdOrPrefix {
    /// Full id
    Full(String),
    /// Prefix that should uniquely identify a cached record
    Prefix(String),
}

impl IdOrPrefix {
    /// Parse a string into an IdOrPrefix
    ///
    /// 24 hex digits are a full id, passed through as typed; anything else is a prefix
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.len() == FULL_ID_LEN && input.chars().all(|c| c.is_ascii_hexdigit()) {
            IdOrPrefix::Full(input.to_string())
        } else {
            IdOrPrefix::Prefix(input.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            IdOrPrefix::Full(id) | IdOrPrefix::Prefix(id) => id,
        }
    }
}

impl std::fmt::Display for IdOrPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a read may use the network
#[derive(Args, Debug, Clone, Default)]
pub struct FetchArgs {
    /// Always ask the server, even when the cached copy is fresh
    #[arg(long, conflicts_with = "cached")]
    pub refresh: bool,

    /// Only show what is cached
    #[arg(long)]
    pub cached: bool,
}

impl FetchArgs {
    pub fn policy(&self) -> RefreshPolicy {
        if self.cached {
            RefreshPolicy::CacheOnly
        } else if self.refresh {
            RefreshPolicy::NetworkFirst
        } else {
            RefreshPolicy::CacheFirst
        }
    }
}

/// Paging and sorting flags shared by list commands
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Items per page
    #[arg(long)]
    pub limit: Option<u32>,

    /// Free-text search
    #[arg(short, long)]
    pub search: Option<String>,

    /// Field to sort by (e.g. createdAt, name)
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    #[command(flatten)]
    pub fetch: FetchArgs,
}

impl ListArgs {
    pub fn request(&self, default_limit: u32) -> PageRequest {
        let mut request = PageRequest::new(self.page, self.limit.unwrap_or(default_limit));
        if let Some(search) = &self.search {
            request = request.with_search(search.clone());
        }
        if let Some(sort) = &self.sort {
            let order = if self.desc { SortOrder::Desc } else { SortOrder::Asc };
            request = request.sorted_by(sort.clone(), order);
        }
        request
    }
}

/// Parse a due date given as `YYYY-MM-DD` (end of that day, UTC) or RFC 3339
pub fn parse_due(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(at) = DateTime::parse_from_rfc3339(s) {
        return Ok(at.with_timezone(&Utc));
    }

    let day = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid date `{}`, expected YYYY-MM-DD", s))?;
    day.and_hms_opt(23, 59, 59)
        .map(|at| at.and_utc())
        .ok_or_else(|| format!("invalid date `{}`", s))
}
