//! 通用增改对话框
//!
//! 按字段描述渲染输入框；草稿保存在 `ModalState` 中，组件本身不持有表单数据。

use leptos::prelude::*;
use schooladmin_shared::FieldDescriptor;
use schooladmin_shared::form::ModalState;

#[component]
pub fn EntityModal(
    fields: &'static [FieldDescriptor],
    #[prop(into)] state: Signal<ModalState>,
    #[prop(into)] busy: Signal<bool>,
    /// 编辑模式下是否提供删除按钮
    deletable: bool,
    on_input: Callback<(&'static str, String)>,
    on_submit: Callback<()>,
    on_cancel: Callback<()>,
    on_delete: Callback<()>,
) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if state.with(ModalState::is_visible) {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let on_form_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        on_submit.run(());
    };

    let show_delete = move || deletable && state.with(|s| s.mode().allows_delete());

    view! {
        // Esc 关闭对话框等同于取消
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| {
            if state.with_untracked(ModalState::is_visible) {
                on_cancel.run(());
            }
        }>
            <div class="modal-box max-w-2xl">
                <h3 class="font-bold text-lg">{move || state.with(|s| s.title().to_string())}</h3>

                <form on:submit=on_form_submit class="space-y-4 mt-4">
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        {fields
                            .iter()
                            .map(|field| {
                                let key = field.key;
                                let input_type = if key == "password" { "password" } else { "text" };
                                view! {
                                    <div class="form-control">
                                        <label for=key class="label">
                                            <span class="label-text">{field.label}</span>
                                        </label>
                                        <input
                                            id=key
                                            type=input_type
                                            class="input input-bordered w-full"
                                            disabled=field.disabled
                                            prop:value=move || state.with(|s| s.field_text(key))
                                            on:input=move |ev| on_input.run((key, event_target_value(&ev)))
                                        />
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>

                    <div class="modal-action">
                        <Show when=show_delete>
                            <button
                                type="button"
                                class="btn btn-error mr-auto"
                                disabled=move || busy.get()
                                on:click=move |_| on_delete.run(())
                            >
                                "Delete"
                            </button>
                        </Show>
                        <button
                            type="button"
                            class="btn btn-ghost"
                            on:click=move |_| on_cancel.run(())
                        >
                            "Cancel"
                        </button>
                        <button type="submit" class="btn btn-primary" disabled=move || busy.get()>
                            {move || if busy.get() {
                                view! { <span class="loading loading-spinner"></span> }.into_any()
                            } else {
                                ().into_any()
                            }}
                            {move || state.with(|s| s.mode().submit_label())}
                        </button>
                    </div>
                </form>
            </div>
        </dialog>
    }
}
