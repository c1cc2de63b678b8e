//! Router Binding
//!
//! Address bar is the single source of truth for page/size. State is read
//! through a pure mapping and written back by navigating.

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate, use_query_map};
use leptos_router::NavigateOptions;

use crate::query::{merge_query, RouteQuery};

type Navigator = Box<dyn Fn(&str)>;

#[derive(Clone, Copy)]
pub struct RouterBinding {
    route: Memo<RouteQuery>,
    pathname: Signal<String>,
    search: Signal<String>,
    navigate: StoredValue<Navigator, LocalStorage>,
}

impl RouterBinding {
    /// Must be called inside a `<Router>`
    pub fn from_router() -> Self {
        let query = use_query_map();
        let route = Memo::new(move |_| query.with(|q| RouteQuery::from_lookup(|key| q.get(key))));

        let location = use_location();
        let navigate = use_navigate();
        Self::from_parts(
            route,
            location.pathname.into(),
            location.search.into(),
            move |target| navigate(target, NavigateOptions::default()),
        )
    }

    /// Bind to an arbitrary location source, e.g. a nested router or a test
    pub fn from_parts(
        route: Memo<RouteQuery>,
        pathname: Signal<String>,
        search: Signal<String>,
        navigate: impl Fn(&str) + 'static,
    ) -> Self {
        let navigator: Navigator = Box::new(navigate);
        Self {
            route,
            pathname,
            search,
            navigate: StoredValue::new_local(navigator),
        }
    }

    pub fn route(&self) -> Memo<RouteQuery> {
        self.route
    }

    /// Serialize `next` into the URL, keeping unrelated query parameters
    pub fn update_pagination(&self, next: RouteQuery) {
        let search = self.search.get_untracked();
        let pathname = self.pathname.get_untracked();
        let target = format!("{}?{}", pathname, merge_query(&search, &next.to_params()));
        log::debug!("[Pagination] navigate to {}", target);
        self.navigate.with_value(|go| go(&target));
    }
}
