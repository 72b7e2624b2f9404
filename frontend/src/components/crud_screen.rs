//! 通用 CRUD 页面
//!
//! 由 `EntitySpec` 参数化：表格、分页、增改对话框、删除以及
//! 学生列表的班级筛选都在这里接线，业务状态由共享层的 `CrudScreen` 持有。

use crate::api::{use_api, use_config};
use crate::components::class_teacher_dialog::ClassTeacherDialog;
use crate::components::data_table::{DataTable, RowAction};
use crate::components::entity_modal::EntityModal;
use crate::components::toast::{Toast, notice_signal};
use leptos::prelude::*;
use leptos::task::spawn_local;
use schooladmin_shared::entities::EntitySpec;
use schooladmin_shared::field::value_text;
use schooladmin_shared::lifecycle::ViewLifetime;
use schooladmin_shared::protocol::ApiRequest;
use schooladmin_shared::school::CLASS_NAMES;
use schooladmin_shared::screen::{CrudScreen, LoadOutcome, PendingLoad};
use schooladmin_shared::{ApiResult, Notice};

/// 写操作的种类，决定结果交给哪个 `finish_*`
#[derive(Clone, Copy, PartialEq, Eq)]
enum Mutation {
    Submit,
    Delete,
}

#[component]
pub fn CrudScreenPage(spec: EntitySpec) -> impl IntoView {
    let api = use_api();
    let config = use_config();

    let lifetime = ViewLifetime::new();
    on_cleanup({
        let lifetime = lifetime.clone();
        move || lifetime.end()
    });

    let screen = RwSignal::new(CrudScreen::new(spec, config.page_size));
    let notice = notice_signal();
    let busy = RwSignal::new(false);
    let class_teacher_target = RwSignal::new(Option::<String>::None);

    // --- 列表加载：结果只在票据仍为最新且页面仍挂载时生效 ---
    let load = Callback::new({
        let api = api.clone();
        let lifetime = lifetime.clone();
        move |pending: ApiResult<PendingLoad>| {
            let PendingLoad { ticket, request } = match pending {
                Ok(pending) => pending,
                Err(e) => {
                    notice.set(Some(Notice::error(e.message)));
                    return;
                }
            };
            let api = api.clone();
            let token = lifetime.token();
            spawn_local(async move {
                let result = api.fetch_page(&request).await;
                token.run(|| match screen.try_update(|s| s.finish_load(ticket, result)) {
                    Some(LoadOutcome::Failed(e)) => {
                        log_error!("[{}] Load failed: {}", spec.name, e);
                        notice.set(Some(Notice::error(e.message)));
                    }
                    Some(LoadOutcome::Stale) => {
                        log_info!("[{}] Dropped stale page {}", spec.name, ticket.page());
                    }
                    _ => {}
                });
            });
        }
    });

    let reload = move || {
        if let Some(pending) = screen.try_update(|s| s.begin_reload()) {
            load.run(pending);
        }
    };

    // --- 写操作：成功后关闭对话框并重新加载当前页 ---
    let mutate = Callback::new({
        let api = api.clone();
        let lifetime = lifetime.clone();
        move |(request, kind): (ApiResult<ApiRequest>, Mutation)| {
            let request = match request {
                Ok(request) => request,
                Err(e) => {
                    notice.set(Some(Notice::error(e.message)));
                    return;
                }
            };
            busy.set(true);
            let api = api.clone();
            let token = lifetime.token();
            spawn_local(async move {
                let result = api.send(&request).await;
                token.run(|| {
                    busy.set(false);
                    let shown = screen.try_update(|s| match kind {
                        Mutation::Submit => s.finish_submit(result),
                        Mutation::Delete => s.finish_delete(result),
                    });
                    if let Some(shown) = shown {
                        let succeeded = !shown.is_error();
                        notice.set(Some(shown));
                        if succeeded {
                            reload();
                        }
                    }
                });
            });
        }
    });

    // 首次加载
    if let Some(pending) = screen.try_update(|s| s.begin_load(0)) {
        load.run(pending);
    }

    // --- 表格回调 ---
    let on_sort = Callback::new(move |key: &'static str| screen.update(|s| s.toggle_sort(key)));
    let on_filter = Callback::new(move |text: String| screen.update(|s| s.set_filter(text)));
    let on_page = Callback::new(move |page: usize| {
        if let Some(Some(pending)) = screen.try_update(|s| s.change_page(page)) {
            load.run(pending);
        }
    });

    let mut actions = Vec::new();
    if spec.is_editable() {
        actions.push(RowAction {
            label: "Edit",
            class: "btn btn-sm btn-info",
            on_click: Callback::new(move |index: usize| {
                screen.update(|s| {
                    s.open_edit(index);
                });
            }),
        });
    }
    if spec.is_deletable() {
        actions.push(RowAction {
            label: "Delete",
            class: "btn btn-sm btn-error",
            on_click: Callback::new(move |index: usize| {
                let request = screen.with_untracked(|s| s.delete_request(index));
                mutate.run((request, Mutation::Delete));
            }),
        });
    }
    if spec.class_teacher_action {
        actions.push(RowAction {
            label: "Class Teacher",
            class: "btn btn-sm btn-secondary",
            on_click: Callback::new(move |index: usize| {
                let reg_no = screen.with_untracked(|s| {
                    s.records()
                        .get(index)
                        .and_then(|r| r.get("regNo"))
                        .map(value_text)
                });
                class_teacher_target.set(reg_no.filter(|r| !r.is_empty()));
            }),
        });
    }

    // --- 对话框回调 ---
    let on_input = Callback::new(move |(key, text): (&'static str, String)| {
        screen.update(|s| {
            s.modal_mut().update_field(key, text);
        });
    });
    let on_submit = Callback::new(move |_: ()| {
        let request = screen.with_untracked(|s| s.submit_request());
        mutate.run((request, Mutation::Submit));
    });
    let on_cancel = Callback::new(move |_: ()| screen.update(|s| s.close_modal()));
    let on_modal_delete = Callback::new(move |_: ()| {
        let request = screen.with_untracked(|s| s.modal_delete_request());
        mutate.run((request, Mutation::Delete));
    });
    let on_class_teacher_done = Callback::new(move |shown: Notice| {
        let succeeded = !shown.is_error();
        notice.set(Some(shown));
        if succeeded {
            reload();
        }
    });

    let on_class_change = move |ev: leptos::ev::Event| {
        let class = event_target_value(&ev);
        if screen.try_update(|s| s.set_class(&class)).unwrap_or(false) {
            reload();
        }
    };
    let on_section_change = move |ev: leptos::ev::Event| {
        let section = event_target_value(&ev);
        if screen.try_update(|s| s.set_section(&section)).unwrap_or(false) {
            reload();
        }
    };

    view! {
        <div class="space-y-6">
            <Toast notice=notice />

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <div class="flex items-center justify-between">
                        <h2 class="card-title text-2xl">{spec.name}</h2>
                        <button
                            class="btn btn-ghost btn-sm"
                            disabled=move || screen.with(CrudScreen::is_loading)
                            on:click=move |_| reload()
                        >
                            "Refresh"
                        </button>
                    </div>

                    <DataTable
                        fields=spec.fields
                        view=Signal::derive(move || screen.with(CrudScreen::view))
                        sort=Signal::derive(move || screen.with(|s| s.table().sort()))
                        filter=Signal::derive(move || screen.with(|s| s.table().filter().to_string()))
                        on_sort=on_sort
                        on_filter=on_filter
                        on_page=on_page
                        actions=actions
                        loading=Signal::derive(move || screen.with(CrudScreen::is_loading))
                    >
                        <Show when=move || spec.scoped>
                            <select
                                class="select select-bordered select-sm"
                                prop:value=move || screen.with(|s| s.scope().class_name().to_string())
                                on:change=on_class_change
                            >
                                {CLASS_NAMES
                                    .iter()
                                    .map(|name| view! { <option value=*name>"Class " {*name}</option> })
                                    .collect_view()}
                            </select>
                            <select
                                class="select select-bordered select-sm"
                                prop:value=move || screen.with(|s| s.scope().section().to_string())
                                on:change=on_section_change
                            >
                                {move || {
                                    screen
                                        .with(|s| s.scope().sections())
                                        .iter()
                                        .map(|section| view! { <option value=*section>"Section " {*section}</option> })
                                        .collect_view()
                                }}
                            </select>
                        </Show>
                        <Show when=move || spec.is_creatable()>
                            <button
                                class="btn btn-primary btn-sm"
                                on:click=move |_| screen.update(|s| {
                                    s.open_add();
                                })
                            >
                                "Add " {spec.singular}
                            </button>
                        </Show>
                    </DataTable>
                </div>
            </div>

            <EntityModal
                fields=spec.fields
                state=Signal::derive(move || screen.with(|s| s.modal().clone()))
                busy=busy
                deletable=spec.is_deletable()
                on_input=on_input
                on_submit=on_submit
                on_cancel=on_cancel
                on_delete=on_modal_delete
            />

            <Show when=move || spec.class_teacher_action>
                <ClassTeacherDialog reg_no=class_teacher_target on_done=on_class_teacher_done />
            </Show>
        </div>
    }
}
