use http::{HeaderMap, StatusCode};

/// Header carrying the unpaged row count of a list query.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Decoded backend response. `body` is `None` when the backend sent nothing.
#[derive(Debug, Clone)]
pub struct EntityResponse<T> {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Option<T>,
}

impl<T> EntityResponse<T> {
    /// 200 response with no headers.
    pub fn ok(body: Option<T>) -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body,
        }
    }

    pub fn into_body(self) -> Option<T> {
        self.body
    }

    pub fn total_count(&self) -> Option<u64> {
        self.headers
            .get(TOTAL_COUNT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
    }
}

/// Paging and sorting for list queries. Unset parts are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryRequest {
    pub page: Option<u32>,
    pub size: Option<u32>,
    /// `property,direction` entries, e.g. `name,asc`.
    pub sort: Vec<String>,
}

impl QueryRequest {
    pub fn paged(page: u32, size: u32) -> Self {
        Self {
            page: Some(page),
            size: Some(size),
            sort: Vec::new(),
        }
    }

    pub fn sorted_by(mut self, sort: impl Into<String>) -> Self {
        self.sort.push(sort.into());
        self
    }

    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2 + self.sort.len());
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size", size.to_string()));
        }
        for sort in &self.sort {
            pairs.push(("sort", sort.clone()));
        }
        pairs
    }
}
