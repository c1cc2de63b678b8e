//! Pagination Bar Component
//!
//! Page buttons and page-size selector for a paginated view.

use leptos::prelude::*;

pub const PAGE_SIZES: &[u32] = &[10, 20, 50, 100];

/// Pages shown around the active one
const PAGE_SPAN: u32 = 2;

/// Window of page numbers to render, clamped to `1..=page_count`
pub fn page_window(active: u32, page_count: u32, span: u32) -> Vec<u32> {
    if page_count == 0 {
        return Vec::new();
    }
    let active = active.clamp(1, page_count);
    let first = active.saturating_sub(span).max(1);
    let last = (active + span).min(page_count);
    (first..=last).collect()
}

#[component]
pub fn PaginationBar(
    #[prop(into)] active_page: Signal<u32>,
    #[prop(into)] page_count: Signal<u32>,
    #[prop(into)] page_size: Signal<u32>,
    #[prop(into)] item_count: Signal<u64>,
    on_change_page: Callback<u32>,
    on_change_page_size: Callback<u32>,
) -> impl IntoView {
    let pages = move || page_window(active_page.get(), page_count.get(), PAGE_SPAN);
    let at_start = move || active_page.get() <= 1;
    let at_end = move || active_page.get() >= page_count.get();

    view! {
        <div class="pagination-bar">
            <span class="item-count">{move || format!("{} items", item_count.get())}</span>

            <div class="page-buttons">
                <button
                    class="page-btn"
                    disabled=at_start
                    on:click=move |_| on_change_page.run(active_page.get_untracked().saturating_sub(1))
                >
                    "‹"
                </button>
                <For
                    each=pages
                    key=|page| *page
                    children=move |page| {
                        view! {
                            <button
                                class="page-btn"
                                class:active=move || active_page.get() == page
                                on:click=move |_| on_change_page.run(page)
                            >
                                {page}
                            </button>
                        }
                    }
                />
                <button
                    class="page-btn"
                    disabled=at_end
                    on:click=move |_| on_change_page.run(active_page.get_untracked() + 1)
                >
                    "›"
                </button>
            </div>

            <select
                class="page-size"
                prop:value=move || page_size.get().to_string()
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                        on_change_page_size.run(size);
                    }
                }
            >
                {PAGE_SIZES.iter().map(|size| {
                    view! { <option value=size.to_string()>{*size}</option> }
                }).collect_view()}
            </select>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_window() {
        assert_eq!(page_window(1, 10, 2), vec![1, 2, 3]);
        assert_eq!(page_window(5, 10, 2), vec![3, 4, 5, 6, 7]);
        assert_eq!(page_window(10, 10, 2), vec![8, 9, 10]);
        assert_eq!(page_window(1, 1, 2), vec![1]);
    }

    #[test]
    fn test_page_window_clamps() {
        assert!(page_window(1, 0, 2).is_empty());
        assert_eq!(page_window(40, 3, 2), vec![1, 2, 3]);
    }
}
