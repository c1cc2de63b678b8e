//! Launches Page
//!
//! Paginated launch list of the user's default project.

use leptos::prelude::*;
use leptos_pagination::use_pagination;

use crate::api::HttpPageSource;
use crate::components::LaunchTable;
use crate::context::use_app_context;
use crate::models::{Launch, UserProfileStoreFields};
use crate::store::UserStateStoreFields;

/// Sort expressions offered in the toolbar (`field,DIRECTION`)
const SORT_OPTIONS: &[(&str, &str)] = &[
    ("", "Default"),
    ("startTime,DESC", "Newest first"),
    ("startTime,ASC", "Oldest first"),
    ("name,ASC", "Name"),
];

/// Empty input means "no filter"
fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[component]
pub fn LaunchesPage() -> impl IntoView {
    let user = use_app_context().user;
    let project = move || {
        user.profile()
            .default_project()
            .get()
            .filter(|p| !p.is_empty())
    };

    view! {
        <Show
            when=move || project().is_some()
            fallback=|| view! { <div class="loading">"Loading..."</div> }
        >
            <LaunchList project=Signal::derive(move || project().unwrap_or_default()) />
        </Show>
    }
}

#[component]
fn LaunchList(project: Signal<String>) -> impl IntoView {
    let ctx = use_app_context();
    let (filter_text, set_filter_text) = signal(String::new());
    let (sorting, set_sorting) = signal(String::new());

    let url = Signal::derive(move || {
        let project = project.get();
        ctx.with_config(|config| config.api_url(&format!("{}/launch", project)))
    });
    let filter = Signal::derive(move || non_empty(filter_text.get()));
    let sorting_expr = Signal::derive(move || non_empty(sorting.get()));

    let pagination = use_pagination::<Launch, _>(HttpPageSource, url, filter, sorting_expr);

    view! {
        <div class="launches-page">
            <div class="launches-toolbar">
                <input
                    type="search"
                    placeholder="Filter by name..."
                    prop:value=move || filter_text.get()
                    on:change=move |ev| set_filter_text.set(event_target_value(&ev))
                />
                <select on:change=move |ev| set_sorting.set(event_target_value(&ev))>
                    {SORT_OPTIONS.iter().map(|(value, label)| {
                        view! { <option value=*value>{*label}</option> }
                    }).collect_view()}
                </select>
            </div>

            <LaunchTable props=pagination.props() />
        </div>
    }
}
