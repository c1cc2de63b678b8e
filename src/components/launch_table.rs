//! Launch Table Component
//!
//! Presentational list of launches. Receives everything from the
//! pagination controller and never fetches on its own.

use leptos::prelude::*;
use leptos_pagination::PaginationProps;

use crate::components::PaginationBar;
use crate::models::Launch;

#[component]
pub fn LaunchTable(props: PaginationProps<Launch>) -> impl IntoView {
    let data = props.data;

    view! {
        <div class="launch-table">
            <div class="launch-table-toolbar">
                <button class="refresh-btn" on:click=move |_| props.fetch_data.run(())>"Refresh"</button>
            </div>

            <table>
                <thead>
                    <tr>
                        <th>"#"</th>
                        <th>"Name"</th>
                        <th>"Status"</th>
                        <th>"Owner"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || data.get()
                        key=|launch| launch.id
                        children=move |launch| {
                            view! {
                                <tr>
                                    <td>{launch.number}</td>
                                    <td title=launch.description.clone().unwrap_or_default()>{launch.name}</td>
                                    <td class="launch-status">{launch.status.to_lowercase()}</td>
                                    <td>{launch.owner.unwrap_or_default()}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <Show when=move || data.with(|d| d.is_empty())>
                <p class="empty">"No launches"</p>
            </Show>

            <PaginationBar
                active_page=props.active_page
                page_count=props.page_count
                page_size=props.page_size
                item_count=props.item_count
                on_change_page=props.on_change_page
                on_change_page_size=props.on_change_page_size
            />
        </div>
    }
}
