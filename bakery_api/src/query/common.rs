//! Shared query infrastructure: the [`Query`] trait and [`QueryCommon`] fields.

use url::Url;

/// Trait implemented by all query builders. Provides URL serialization and
/// shared builder methods for pagination.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Sets the page number (1-indexed). Values below 1 are raised to 1.
    fn with_page(mut self, page: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().page = page.max(1);
        self
    }

    /// Sets the number of results per page.
    fn with_limit(mut self, limit: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().limit = Some(limit);
        self
    }
}

/// Fields shared by all query types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryCommon {
    /// Page number (1-indexed). Defaults to 1.
    pub page: i64,
    /// Results per page. `None` uses the API default.
    pub limit: Option<i64>,
}

impl Default for QueryCommon {
    fn default() -> QueryCommon {
        QueryCommon {
            page: 1,
            limit: None,
        }
    }
}

impl QueryCommon {
    /// Appends `page` and, when set, `limit`.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("page", &self.page.to_string());
        if let Some(limit) = self.limit {
            url.query_pairs_mut()
                .append_pair("limit", &limit.to_string());
        };
        url
    }
}
