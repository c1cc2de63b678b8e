//! Page Query Mapping
//!
//! Pure conversions between address-bar query strings and typed paging state.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const PAGE_KEY: &str = "page.page";
pub const SIZE_KEY: &str = "page.size";
pub const FILTER_KEY: &str = "filter.cnt.name";
pub const SORTING_KEY: &str = "page.sort";

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// RFC 3986 unreserved characters stay as-is
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Paging state that lives in the address bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteQuery {
    pub page: u32,
    pub size: u32,
}

impl Default for RouteQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl RouteQuery {
    /// Read page/size out of a query lookup. Missing, unparseable or zero
    /// values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            page: parse_positive(lookup(PAGE_KEY)).unwrap_or(DEFAULT_PAGE),
            size: parse_positive(lookup(SIZE_KEY)).unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    /// Move to another page, keeping the size
    pub fn with_page(self, page: u32) -> Self {
        self.merge(Some(page), None)
    }

    /// Change page size. Always restarts from the first page.
    pub fn with_size(self, size: u32) -> Self {
        self.merge(Some(DEFAULT_PAGE), Some(size))
    }

    // A zero request keeps the current value
    fn merge(self, page: Option<u32>, size: Option<u32>) -> Self {
        Self {
            page: page.filter(|p| *p > 0).unwrap_or(self.page),
            size: size.filter(|s| *s > 0).unwrap_or(self.size),
        }
    }

    pub fn to_params(self) -> [(&'static str, String); 2] {
        [
            (PAGE_KEY, self.page.to_string()),
            (SIZE_KEY, self.size.to_string()),
        ]
    }
}

fn parse_positive(raw: Option<String>) -> Option<u32> {
    raw?.trim().parse::<u32>().ok().filter(|v| *v > 0)
}

/// Everything a single list request depends on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub size: u32,
    pub filter: Option<String>,
    pub sorting: Option<String>,
}

impl PageQuery {
    pub fn new(route: RouteQuery, filter: Option<String>, sorting: Option<String>) -> Self {
        Self {
            page: route.page,
            size: route.size,
            filter,
            sorting,
        }
    }

    /// Request parameters. Absent filter/sort are left out entirely.
    pub fn request_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            (PAGE_KEY, self.page.to_string()),
            (SIZE_KEY, self.size.to_string()),
        ];
        if let Some(filter) = &self.filter {
            params.push((FILTER_KEY, filter.clone()));
        }
        if let Some(sorting) = &self.sorting {
            params.push((SORTING_KEY, sorting.clone()));
        }
        params
    }
}

/// Identity of a fetch: data source plus its query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchKey {
    pub url: String,
    pub query: PageQuery,
}

/// Shallow inequality against the previous key
pub fn needs_fetch(previous: Option<&FetchKey>, next: &FetchKey) -> bool {
    previous != Some(next)
}

pub fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, QUERY_COMPONENT).to_string()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// Encode `key=value` pairs joined with `&` (no leading `?`)
pub fn encode_query(params: &[(&str, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Overwrite `updates` in an existing search string, keeping unrelated
/// parameters in their original order and encoding.
pub fn merge_query(search: &str, updates: &[(&str, String)]) -> String {
    let search = search.strip_prefix('?').unwrap_or(search);
    let mut pairs: Vec<String> = search
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| {
            let raw_key = pair.split('=').next().unwrap_or_default();
            let key = decode_component(raw_key);
            !updates.iter().any(|(update_key, _)| *update_key == key)
        })
        .map(str::to_string)
        .collect();

    let encoded = encode_query(updates);
    if !encoded.is_empty() {
        pairs.push(encoded);
    }
    pairs.join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_route_query_defaults() {
        let route = RouteQuery::from_lookup(lookup(&[]));
        assert_eq!(route, RouteQuery { page: 1, size: 20 });
    }

    #[test]
    fn test_route_query_parses_values() {
        let route = RouteQuery::from_lookup(lookup(&[("page.page", "3"), ("page.size", "50")]));
        assert_eq!(route, RouteQuery { page: 3, size: 50 });
    }

    #[test]
    fn test_route_query_rejects_garbage() {
        let route = RouteQuery::from_lookup(lookup(&[("page.page", "abc"), ("page.size", "0")]));
        assert_eq!(route, RouteQuery::default());
    }

    #[test]
    fn test_size_change_resets_page() {
        let route = RouteQuery { page: 7, size: 20 };
        assert_eq!(route.with_size(50), RouteQuery { page: 1, size: 50 });
        // Even when the current page would still be valid
        let route = RouteQuery { page: 1, size: 10 };
        assert_eq!(route.with_size(10).page, 1);
        let route = RouteQuery { page: 2, size: 10 };
        assert_eq!(route.with_size(5).page, 1);
    }

    #[test]
    fn test_page_change_keeps_size() {
        let route = RouteQuery { page: 1, size: 50 };
        assert_eq!(route.with_page(4), RouteQuery { page: 4, size: 50 });
    }

    #[test]
    fn test_zero_requests_keep_current() {
        let route = RouteQuery { page: 3, size: 50 };
        assert_eq!(route.with_page(0), route);
        assert_eq!(route.with_size(0), RouteQuery { page: 1, size: 50 });
    }

    #[test]
    fn test_request_params_skip_absent() {
        let query = PageQuery::new(RouteQuery { page: 2, size: 10 }, None, None);
        assert_eq!(
            query.request_params(),
            vec![("page.page", "2".to_string()), ("page.size", "10".to_string())]
        );

        let query = PageQuery::new(
            RouteQuery::default(),
            Some("smoke".into()),
            Some("start_time,DESC".into()),
        );
        let params = query.request_params();
        assert_eq!(params.len(), 4);
        assert_eq!(params[2], ("filter.cnt.name", "smoke".to_string()));
        assert_eq!(params[3], ("page.sort", "start_time,DESC".to_string()));
    }

    #[test]
    fn test_needs_fetch_once_per_distinct_key() {
        let key = |page: u32, filter: Option<&str>| FetchKey {
            url: "/api/v1/demo/launch".into(),
            query: PageQuery::new(RouteQuery { page, size: 20 }, filter.map(String::from), None),
        };

        let sequence = [
            key(1, None),
            key(1, None),
            key(2, None),
            key(2, None),
            key(2, Some("x")),
            key(1, Some("x")),
        ];

        let mut previous: Option<FetchKey> = None;
        let mut fetches = 0;
        for next in sequence {
            if needs_fetch(previous.as_ref(), &next) {
                fetches += 1;
            }
            previous = Some(next);
        }
        assert_eq!(fetches, 4);
    }

    #[test]
    fn test_needs_fetch_on_url_change() {
        let query = PageQuery::new(RouteQuery::default(), None, None);
        let a = FetchKey { url: "/a".into(), query: query.clone() };
        let b = FetchKey { url: "/b".into(), query };
        assert!(needs_fetch(None, &a));
        assert!(!needs_fetch(Some(&a), &a.clone()));
        assert!(needs_fetch(Some(&a), &b));
    }

    #[test]
    fn test_encode_query() {
        let encoded = encode_query(&[
            ("filter.cnt.name", "my launch".to_string()),
            ("page.sort", "name,ASC".to_string()),
        ]);
        assert_eq!(encoded, "filter.cnt.name=my%20launch&page.sort=name%2CASC");
    }

    #[test]
    fn test_merge_query_keeps_unrelated() {
        let merged = merge_query(
            "?tab=all&page.page=3&page.size=20",
            &RouteQuery { page: 1, size: 50 }.to_params(),
        );
        assert_eq!(merged, "tab=all&page.page=1&page.size=50");
    }

    #[test]
    fn test_merge_query_matches_encoded_keys() {
        let merged = merge_query("page%2Epage=9&q=a+b", &[("page.page", "2".to_string())]);
        assert_eq!(merged, "q=a+b&page.page=2");
    }

    #[test]
    fn test_merge_query_empty_search() {
        assert_eq!(merge_query("", &[("page.page", "1".to_string())]), "page.page=1");
        assert_eq!(merge_query("?", &[]), "");
    }
}
