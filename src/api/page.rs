//! Paged List Source
//!
//! HTTP implementation of the pagination data source.

use std::future::Future;

use leptos_pagination::{encode_query, PageEnvelope, PageQuery, PageResult, PageSource};
use serde::de::DeserializeOwned;

use super::get_json;
use crate::error::ApiError;

/// Fetches `{ content, page }` documents with a plain GET
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpPageSource;

/// List URL with the paging parameters appended
pub fn page_request_url(url: &str, query: &PageQuery) -> String {
    let params = query.request_params();
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", url, separator, encode_query(&params))
}

impl<T> PageSource<T> for HttpPageSource
where
    T: DeserializeOwned + 'static,
{
    type Error = ApiError;

    fn fetch_page(
        &self,
        url: &str,
        query: &PageQuery,
    ) -> impl Future<Output = Result<PageResult<T>, ApiError>> + 'static + use<T> {
        let request_url = page_request_url(url, query);
        async move {
            let envelope: PageEnvelope<T> = get_json(&request_url).await?;
            Ok(PageResult::from(envelope))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos_pagination::RouteQuery;

    #[test]
    fn test_page_request_url() {
        let query = PageQuery::new(RouteQuery { page: 2, size: 10 }, None, None);
        assert_eq!(
            page_request_url("/api/v1/demo/launch", &query),
            "/api/v1/demo/launch?page.page=2&page.size=10"
        );
    }

    #[test]
    fn test_page_request_url_with_filter_and_existing_query() {
        let query = PageQuery::new(
            RouteQuery::default(),
            Some("api tests".into()),
            Some("number,DESC".into()),
        );
        assert_eq!(
            page_request_url("/api/v1/demo/launch?mode=DEFAULT", &query),
            "/api/v1/demo/launch?mode=DEFAULT&page.page=1&page.size=20&filter.cnt.name=api%20tests&page.sort=number%2CDESC"
        );
    }
}
