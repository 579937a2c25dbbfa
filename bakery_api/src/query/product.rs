use url::Url;

use crate::types::CategoryID;

use super::{common::QueryCommon, Query};

/// Query for `GET /products`.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProductQuery {
    pub common: QueryCommon,
    pub category_id: Option<CategoryID>,
}

impl Query for ProductQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(category_id) = self.category_id.filter(|id| *id > 0) {
            url.query_pairs_mut()
                .append_pair("category_id", &category_id.to_string());
        };
        url
    }
}

impl ProductQuery {
    pub fn with_category_id(mut self, category_id: CategoryID) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Sets or clears the category filter. Ids of 0 or below are never sent.
    pub fn with_category(mut self, category_id: Option<CategoryID>) -> Self {
        self.category_id = category_id;
        self
    }

    pub fn page(&self) -> i64 {
        self.common.page
    }

    pub fn limit(&self) -> Option<i64> {
        self.common.limit
    }
}
