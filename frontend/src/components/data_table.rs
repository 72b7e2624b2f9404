//! 通用表格组件
//!
//! 只负责渲染：排序、过滤、分页的计算都在共享层的 `TableView` 中完成，
//! 用户操作通过回调交还给页面。

use leptos::prelude::*;
use schooladmin_shared::FieldDescriptor;
use schooladmin_shared::table::{SortDirection, SortSpec, TableView};

/// 行操作按钮（编辑、删除、班主任等）
#[derive(Clone, Copy)]
pub struct RowAction {
    pub label: &'static str,
    pub class: &'static str,
    /// 参数为记录在数据集中的下标
    pub on_click: Callback<usize>,
}

fn sort_marker(sort: Option<SortSpec>, key: &str) -> &'static str {
    match sort {
        Some(spec) if spec.key == key => match spec.direction {
            SortDirection::Ascending => " ▲",
            SortDirection::Descending => " ▼",
        },
        _ => "",
    }
}

#[component]
pub fn DataTable(
    fields: &'static [FieldDescriptor],
    #[prop(into)] view: Signal<TableView>,
    #[prop(into)] sort: Signal<Option<SortSpec>>,
    #[prop(into)] filter: Signal<String>,
    on_sort: Callback<&'static str>,
    on_filter: Callback<String>,
    on_page: Callback<usize>,
    #[prop(optional)] actions: Vec<RowAction>,
    #[prop(optional)] children: Option<Children>,
    #[prop(into, optional)] loading: Signal<bool>,
) -> impl IntoView {
    let has_actions = !actions.is_empty();
    let actions = StoredValue::new(actions);
    let column_count = (fields.len() + usize::from(has_actions)).to_string();

    view! {
        <div class="space-y-4">
            <div class="flex flex-wrap items-center justify-between gap-4">
                <input
                    type="text"
                    placeholder="Search..."
                    class="input input-bordered w-full md:w-1/3"
                    prop:value=move || filter.get()
                    on:input=move |ev| on_filter.run(event_target_value(&ev))
                />
                <div class="flex flex-wrap items-center gap-2">
                    {children.map(|children| children())}
                </div>
            </div>

            <div class="overflow-x-auto w-full">
                <table class="table table-zebra w-full">
                    <thead>
                        <tr>
                            {fields
                                .iter()
                                .map(|field| {
                                    let key = field.key;
                                    view! {
                                        <th
                                            class="cursor-pointer select-none"
                                            on:click=move |_| on_sort.run(key)
                                        >
                                            {field.label}
                                            {move || sort_marker(sort.get(), key)}
                                        </th>
                                    }
                                })
                                .collect_view()}
                            <Show when=move || has_actions>
                                <th>"Actions"</th>
                            </Show>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || view.with(|v| v.rows.is_empty())>
                            <tr>
                                <td colspan=column_count.clone() class="text-center py-8 text-base-content/50">
                                    {move || if loading.get() {
                                        view! { <span class="loading loading-spinner loading-md"></span> " Loading..." }.into_any()
                                    } else {
                                        "No records found.".into_any()
                                    }}
                                </td>
                            </tr>
                        </Show>
                        <For
                            each=move || view.get().rows
                            key=|row| (row.index, row.cells.clone())
                            children=move |row| {
                                let index = row.index;
                                view! {
                                    <tr class="hover">
                                        {row
                                            .cells
                                            .into_iter()
                                            .map(|cell| view! { <td>{cell}</td> })
                                            .collect_view()}
                                        <Show when=move || has_actions>
                                            <td class="flex gap-2">
                                                {actions
                                                    .get_value()
                                                    .into_iter()
                                                    .map(|action| {
                                                        view! {
                                                            <button
                                                                class=action.class
                                                                on:click=move |_| action.on_click.run(index)
                                                            >
                                                                {action.label}
                                                            </button>
                                                        }
                                                    })
                                                    .collect_view()}
                                            </td>
                                        </Show>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>

            <div class="flex items-center justify-between">
                <button
                    class="btn btn-sm"
                    disabled=move || view.with(|v| !v.has_prev())
                    on:click=move |_| {
                        if let Some(page) = view.with_untracked(TableView::prev_page) {
                            on_page.run(page);
                        }
                    }
                >
                    "Previous"
                </button>
                <span class="text-sm">{move || view.with(TableView::page_label)}</span>
                <button
                    class="btn btn-sm"
                    disabled=move || view.with(|v| !v.has_next())
                    on:click=move |_| {
                        if let Some(page) = view.with_untracked(TableView::next_page) {
                            on_page.run(page);
                        }
                    }
                >
                    "Next"
                </button>
            </div>
        </div>
    }
}
