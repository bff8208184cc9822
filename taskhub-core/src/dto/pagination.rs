//! Pagination bookkeeping
//!
//! A [`PageRequest`] describes which slice of a remote collection to fetch,
//! [`PaginationMeta`] describes where the returned slice sits in the whole
//! collection. The cache key of a request covers everything that shapes the
//! result except the page number, which is stored alongside it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order '{}'", other)),
        }
    }
}

/// Request for one page of a remote collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: SortOrder,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search: None,
            sort_by: None,
            sort_order: SortOrder::Asc,
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            ..Self::default()
        }
    }

    /// Set the search term; blank terms clear the search
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        let trimmed = search.trim();
        self.search = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    pub fn sorted_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(field.into());
        self.sort_order = order;
        self
    }

    /// The same query one page further
    pub fn next_page(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.page == 0 {
            return Err(ValidationError::new("page", "must be at least 1"));
        }
        if self.limit == 0 || self.limit > MAX_LIMIT {
            return Err(ValidationError::new(
                "limit",
                format!("must be between 1 and {}", MAX_LIMIT),
            ));
        }
        Ok(())
    }

    /// Query parameters sent to the backend
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        query.extend(self.shape());
        query
    }

    /// Cache key for this request combined with extra filters
    ///
    /// The page number is excluded so that all pages of one query share a key.
    pub fn cache_key(&self, filters: &[(&'static str, String)]) -> String {
        let mut parts: Vec<(&'static str, String)> = vec![("limit", self.limit.to_string())];
        parts.extend(self.shape());
        parts.extend(filters.iter().cloned());
        parts.sort_by(|a, b| a.0.cmp(b.0));

        // JSON keeps values containing `&` or `=` from colliding with other filters
        let pairs: Vec<serde_json::Value> = parts
            .into_iter()
            .map(|(k, v)| serde_json::Value::from(vec![k.to_string(), v]))
            .collect();
        serde_json::Value::Array(pairs).to_string()
    }

    fn shape(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            query.push(("search", search.to_string()));
        }
        if let Some(sort_by) = &self.sort_by {
            query.push(("sortBy", sort_by.clone()));
            query.push(("sortOrder", self.sort_order.as_str().to_string()));
        }
        query
    }
}

/// Position of a page within the whole collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u32,
    pub limit: u32,
    #[serde(alias = "totalItems", alias = "totalCount")]
    pub total: u64,
    pub total_pages: u32,
    #[serde(alias = "hasNext")]
    pub has_next_page: bool,
    #[serde(alias = "hasPrev", alias = "hasPreviousPage")]
    pub has_prev_page: bool,
}

impl PaginationMeta {
    /// Derive the bookkeeping for `page` of a collection with `total` items
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total.div_ceil(u64::from(limit)).min(u64::from(u32::MAX)) as u32
        };

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        }
    }

    /// Metadata for a collection with nothing in it
    pub fn empty(request: &PageRequest) -> Self {
        Self::new(request.page, request.limit, 0)
    }
}

/// One page of records with its bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, meta: PaginationMeta) -> Self {
        Self { items, meta }
    }

    pub fn empty(request: &PageRequest) -> Self {
        Self {
            items: Vec::new(),
            meta: PaginationMeta::empty(request),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_derivation() {
        let meta = PaginationMeta::new(1, 10, 42);
        assert_eq!(meta.total_pages, 5);
        assert!(meta.has_next_page);
        assert!(!meta.has_prev_page);

        let last = PaginationMeta::new(5, 10, 42);
        assert!(!last.has_next_page);
        assert!(last.has_prev_page);

        let exact = PaginationMeta::new(2, 10, 20);
        assert_eq!(exact.total_pages, 2);
        assert!(!exact.has_next_page);
    }

    #[test]
    fn test_meta_empty_collection() {
        let meta = PaginationMeta::new(1, 10, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next_page);
        assert!(!meta.has_prev_page);
    }

    #[test]
    fn test_meta_accepts_backend_aliases() {
        let json = r#"{"page":2,"limit":5,"totalItems":11,"totalPages":3,"hasNext":true,"hasPrev":true}"#;
        let meta: PaginationMeta = serde_json::from_str(json).unwrap();
        assert_eq!(meta, PaginationMeta::new(2, 5, 11));
    }

    #[test]
    fn test_validate() {
        assert!(PageRequest::default().validate().is_ok());
        assert!(PageRequest::new(0, 10).validate().is_err());
        assert!(PageRequest::new(1, 0).validate().is_err());
        assert!(PageRequest::new(1, MAX_LIMIT + 1).validate().is_err());
        assert!(PageRequest::new(1, MAX_LIMIT).validate().is_ok());
    }

    #[test]
    fn test_query_omits_absent_values() {
        let query = PageRequest::new(2, 20).to_query();
        assert_eq!(
            query,
            vec![("page", "2".to_string()), ("limit", "20".to_string())]
        );

        let query = PageRequest::default()
            .with_search("  design ")
            .sorted_by("name", SortOrder::Desc)
            .to_query();
        assert!(query.contains(&("search", "design".to_string())));
        assert!(query.contains(&("sortBy", "name".to_string())));
        assert!(query.contains(&("sortOrder", "desc".to_string())));
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let req = PageRequest::default().with_search("   ");
        assert_eq!(req.search, None);
        assert_eq!(req.cache_key(&[]), PageRequest::default().cache_key(&[]));
    }

    #[test]
    fn test_cache_key_ignores_page_but_not_shape() {
        let first = PageRequest::new(1, 10).with_search("ops");
        let second = first.next_page();
        assert_eq!(first.cache_key(&[]), second.cache_key(&[]));

        let other_search = PageRequest::new(1, 10).with_search("hr");
        assert_ne!(first.cache_key(&[]), other_search.cache_key(&[]));

        let other_limit = PageRequest::new(1, 20).with_search("ops");
        assert_ne!(first.cache_key(&[]), other_limit.cache_key(&[]));
    }

    #[test]
    fn test_cache_key_is_order_independent_for_filters() {
        let req = PageRequest::default();
        let a = req.cache_key(&[("status", "pending".into()), ("priority", "high".into())]);
        let b = req.cache_key(&[("priority", "high".into()), ("status", "pending".into())]);
        assert_eq!(a, b);
        assert!(a.contains(r#"["status","pending"]"#));
    }

    #[test]
    fn test_cache_key_search_cannot_mimic_filters() {
        let crafted = PageRequest::default().with_search("x&status=pending");
        let filtered = PageRequest::default().with_search("x");
        assert_ne!(
            crafted.cache_key(&[]),
            filtered.cache_key(&[("status", "pending".into())])
        );
    }

    #[test]
    fn test_page_map_keeps_meta() {
        let page = Page::new(vec![1, 2, 3], PaginationMeta::new(1, 3, 9));
        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.items, vec![10, 20, 30]);
        assert_eq!(mapped.meta.total_pages, 3);
        assert_eq!(mapped.len(), 3);
    }
}
