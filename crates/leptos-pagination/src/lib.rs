//! Leptos Pagination
//!
//! Fetches one page of a remote list and hands paging state to a view.
//! Page/size live in the address bar; filter and sort come from the caller.
//!
//! ```ignore
//! let pagination = use_pagination(HttpPageSource, url, filter, sorting);
//! view! { <LaunchTable props=pagination.props() /> }
//! ```

mod binding;
mod query;
mod result;

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;

pub use binding::RouterBinding;
pub use query::{
    encode_component, encode_query, merge_query, needs_fetch, FetchKey, PageQuery, RouteQuery,
    DEFAULT_PAGE, DEFAULT_PAGE_SIZE, FILTER_KEY, PAGE_KEY, SIZE_KEY, SORTING_KEY,
};
pub use result::{PageEnvelope, PageInfo, PageResult};

/// Data source seam. Implemented by the app's HTTP layer.
pub trait PageSource<T>: Send + Sync + 'static {
    type Error: std::fmt::Display + 'static;

    fn fetch_page(
        &self,
        url: &str,
        query: &PageQuery,
    ) -> impl Future<Output = Result<PageResult<T>, Self::Error>> + 'static + use<Self, T>;
}

/// What the wrapped view receives
pub struct PaginationProps<T: Send + Sync + 'static> {
    pub data: Memo<Vec<T>>,
    pub active_page: Signal<u32>,
    pub item_count: Signal<u64>,
    pub page_count: Signal<u32>,
    pub page_size: Signal<u32>,
    pub on_change_page: Callback<u32>,
    pub on_change_page_size: Callback<u32>,
    pub fetch_data: Callback<()>,
}

impl<T: Send + Sync + 'static> Clone for PaginationProps<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for PaginationProps<T> {}

/// Pagination controller handle (cheap to copy)
pub struct Pagination<T: Send + Sync + 'static, S: Send + Sync + 'static> {
    source: StoredValue<S>,
    state: RwSignal<PageResult<T>>,
    key: Memo<FetchKey>,
    binding: RouterBinding,
}

impl<T: Send + Sync + 'static, S: Send + Sync + 'static> Clone for Pagination<T, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static, S: Send + Sync + 'static> Copy for Pagination<T, S> {}

/// Create a pagination controller bound to the current route.
///
/// A fetch runs on mount and once for every distinct
/// (url, page, size, filter, sort) tuple after that. Responses are applied
/// in arrival order; the last one to resolve wins.
pub fn use_pagination<T, S>(
    source: S,
    url: Signal<String>,
    filter: Signal<Option<String>>,
    sorting: Signal<Option<String>>,
) -> Pagination<T, S>
where
    T: Clone + PartialEq + Send + Sync + 'static,
    S: PageSource<T>,
{
    use_pagination_with(RouterBinding::from_router(), source, url, filter, sorting)
}

/// Same as [`use_pagination`], reading and writing page/size through `binding`
pub fn use_pagination_with<T, S>(
    binding: RouterBinding,
    source: S,
    url: Signal<String>,
    filter: Signal<Option<String>>,
    sorting: Signal<Option<String>>,
) -> Pagination<T, S>
where
    T: Clone + PartialEq + Send + Sync + 'static,
    S: PageSource<T>,
{
    let route = binding.route();

    let key = Memo::new(move |_| FetchKey {
        url: url.get(),
        query: PageQuery::new(route.get(), filter.get(), sorting.get()),
    });

    let pagination = Pagination {
        source: StoredValue::new(source),
        state: RwSignal::new(PageResult::default()),
        key,
        binding,
    };

    Effect::new(move |previous: Option<FetchKey>| {
        let next = key.get();
        if needs_fetch(previous.as_ref(), &next) {
            let fetch_key = next.clone();
            spawn_local(async move {
                if let Err(e) = pagination.fetch(fetch_key.clone()).await {
                    log::warn!("[Pagination] fetch {} failed: {}", fetch_key.url, e);
                }
            });
        }
        next
    });

    pagination
}

impl<T, S> Pagination<T, S>
where
    T: Clone + PartialEq + Send + Sync + 'static,
    S: PageSource<T>,
{
    /// Fetch one page and replace the current state. Errors go to the caller.
    pub async fn fetch(self, key: FetchKey) -> Result<(), S::Error> {
        let Some(request) = self
            .source
            .try_with_value(|source| source.fetch_page(&key.url, &key.query))
        else {
            return Ok(());
        };

        let result = request.await?;
        log::debug!(
            "[Pagination] {} page {}: {} of {} items",
            key.url,
            key.query.page,
            result.items.len(),
            result.total_elements
        );
        let _ = self.state.try_set(result);
        Ok(())
    }

    /// Refetch with the current parameters
    pub async fn fetch_data(self) -> Result<(), S::Error> {
        let key = self.key.get_untracked();
        self.fetch(key).await
    }

    /// Request another page. Only the URL changes; the fetch follows from it.
    pub fn change_page(self, page: u32) {
        let current = self.binding.route().get_untracked();
        self.binding.update_pagination(current.with_page(page));
    }

    /// Request another page size. Always goes back to page 1.
    pub fn change_page_size(self, size: u32) {
        let current = self.binding.route().get_untracked();
        self.binding.update_pagination(current.with_size(size));
    }

    pub fn route(self) -> Memo<RouteQuery> {
        self.binding.route()
    }

    pub fn state(self) -> ReadSignal<PageResult<T>> {
        self.state.read_only()
    }

    pub fn props(self) -> PaginationProps<T> {
        let state = self.state;
        let route = self.binding.route();
        PaginationProps {
            data: Memo::new(move |_| state.with(|s| s.items.clone())),
            active_page: Signal::derive(move || route.get().page),
            item_count: Signal::derive(move || state.with(|s| s.total_elements)),
            page_count: Signal::derive(move || state.with(|s| s.total_pages)),
            page_size: Signal::derive(move || route.get().size),
            on_change_page: Callback::new(move |page| self.change_page(page)),
            on_change_page_size: Callback::new(move |size| self.change_page_size(size)),
            fetch_data: Callback::new(move |_| {
                spawn_local(async move {
                    if let Err(e) = self.fetch_data().await {
                        log::warn!("[Pagination] refetch failed: {}", e);
                    }
                });
            }),
        }
    }
}
