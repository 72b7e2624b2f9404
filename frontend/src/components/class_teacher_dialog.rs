//! 班主任分配/撤销对话框
//!
//! 打开时先查询教师当前是否担任班主任（404 表示未担任），
//! 再显示分配表单或撤销确认。

use crate::api::use_api;
use leptos::prelude::*;
use leptos::task::spawn_local;
use schooladmin_shared::Notice;
use schooladmin_shared::entities::{
    ClassTeacherStatus, assign_class_teacher_request, class_details_request,
    remove_class_teacher_request,
};
use schooladmin_shared::lifecycle::ViewLifetime;
use schooladmin_shared::protocol::response_message;
use schooladmin_shared::school::{CLASS_NAMES, ClassScope};

#[component]
pub fn ClassTeacherDialog(
    /// 目标教师的 regNo；`None` 表示对话框关闭
    reg_no: RwSignal<Option<String>>,
    /// 操作结束（成功或失败）时回调，成功后调用方负责刷新列表
    on_done: Callback<Notice>,
) -> impl IntoView {
    let api = use_api();
    let lifetime = ViewLifetime::new();
    on_cleanup({
        let lifetime = lifetime.clone();
        move || lifetime.end()
    });

    let status = RwSignal::new(Option::<ClassTeacherStatus>::None);
    let scope = RwSignal::new(ClassScope::default());
    let busy = RwSignal::new(false);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    // 打开时查询当前状态
    Effect::new({
        let api = api.clone();
        let lifetime = lifetime.clone();
        move |_| {
            status.set(None);
            let Some(target) = reg_no.get() else {
                return;
            };
            scope.set(ClassScope::default());
            let api = api.clone();
            let token = lifetime.token();
            spawn_local(async move {
                let result = api.send(&class_details_request(&target)).await;
                token.run(|| {
                    // 期间切换了教师则丢弃结果
                    if reg_no.get_untracked().as_deref() != Some(target.as_str()) {
                        return;
                    }
                    match ClassTeacherStatus::from_lookup(result) {
                        Ok(found) => status.set(Some(found)),
                        Err(e) => {
                            log_error!("[ClassTeacher] Lookup for {} failed: {}", target, e);
                            reg_no.set(None);
                            on_done.run(Notice::error(e.message));
                        }
                    }
                });
            });
        }
    });

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if reg_no.with(Option::is_some) {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(target) = reg_no.get_untracked() else {
            return;
        };
        let (request, fallback) = match status.get_untracked() {
            Some(ClassTeacherStatus::Unassigned) => (
                assign_class_teacher_request(&target, &scope.get_untracked()),
                "Class teacher assigned.",
            ),
            Some(ClassTeacherStatus::Assigned(_)) => (
                remove_class_teacher_request(&target),
                "Class teacher removed.",
            ),
            None => return,
        };

        busy.set(true);
        let api = api.clone();
        let token = lifetime.token();
        spawn_local(async move {
            let result = api.send(&request).await;
            token.run(|| {
                busy.set(false);
                match result {
                    Ok(value) => {
                        reg_no.set(None);
                        on_done.run(Notice::success(
                            response_message(&value).unwrap_or_else(|| fallback.to_string()),
                        ));
                    }
                    Err(e) => on_done.run(Notice::error(e.message)),
                }
            });
        });
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| reg_no.set(None)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">"Class Teacher"</h3>
                <p class="py-2 text-base-content/70">
                    "Employee ID: " {move || reg_no.get().unwrap_or_default()}
                </p>

                <form on:submit=on_submit class="space-y-4">
                    {move || match status.get() {
                        None => view! {
                            <div class="flex justify-center py-6">
                                <span class="loading loading-spinner loading-md"></span>
                            </div>
                        }
                        .into_any(),
                        Some(ClassTeacherStatus::Unassigned) => view! {
                            <div class="grid grid-cols-2 gap-4">
                                <div class="form-control">
                                    <label for="ct_class" class="label">
                                        <span class="label-text">"Class"</span>
                                    </label>
                                    <select
                                        id="ct_class"
                                        class="select select-bordered w-full"
                                        prop:value=move || scope.with(|s| s.class_name().to_string())
                                        on:change=move |ev| {
                                            let class = event_target_value(&ev);
                                            scope.update(|s| s.set_class(&class));
                                        }
                                    >
                                        {CLASS_NAMES
                                            .iter()
                                            .map(|name| view! { <option value=*name>{*name}</option> })
                                            .collect_view()}
                                    </select>
                                </div>
                                <div class="form-control">
                                    <label for="ct_section" class="label">
                                        <span class="label-text">"Section"</span>
                                    </label>
                                    <select
                                        id="ct_section"
                                        class="select select-bordered w-full"
                                        prop:value=move || scope.with(|s| s.section().to_string())
                                        on:change=move |ev| {
                                            let section = event_target_value(&ev);
                                            scope.update(|s| {
                                                s.set_section(&section);
                                            });
                                        }
                                    >
                                        {move || {
                                            scope
                                                .with(|s| s.sections())
                                                .iter()
                                                .map(|section| view! { <option value=*section>{*section}</option> })
                                                .collect_view()
                                        }}
                                    </select>
                                </div>
                            </div>
                        }
                        .into_any(),
                        Some(assigned @ ClassTeacherStatus::Assigned(_)) => view! {
                            <div role="alert" class="alert">
                                <span>
                                    "Currently class teacher of "
                                    {assigned.summary().unwrap_or_default()}
                                    "."
                                </span>
                            </div>
                        }
                        .into_any(),
                    }}

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| reg_no.set(None)>
                            "Cancel"
                        </button>
                        <button
                            type="submit"
                            class=move || {
                                if status.with(|s| matches!(s, Some(ClassTeacherStatus::Assigned(_)))) {
                                    "btn btn-error"
                                } else {
                                    "btn btn-primary"
                                }
                            }
                            disabled=move || busy.get() || status.with(Option::is_none)
                        >
                            {move || match status.get() {
                                Some(ClassTeacherStatus::Assigned(_)) => "Remove",
                                _ => "Assign",
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </dialog>
    }
}
