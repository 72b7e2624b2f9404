use leptos::prelude::*;
use schooladmin_shared::Notice;
use schooladmin_shared::notice::DISMISS_AFTER;

/// 通知信号；每条通知显示 3 秒后自动清除
pub fn notice_signal() -> RwSignal<Option<Notice>> {
    let notice = RwSignal::new(Option::<Notice>::None);

    Effect::new(move |_| {
        if let Some(shown) = notice.get() {
            set_timeout(move || dismiss_if_unchanged(notice, &shown), DISMISS_AFTER);
        }
    });

    notice
}

/// 定时器到期时清除通知
///
/// 页面可能已经卸载（信号已释放），只能使用 `try_*` 访问。
/// 期间出现了新通知则保留新通知。
fn dismiss_if_unchanged(notice: RwSignal<Option<Notice>>, shown: &Notice) {
    if notice.try_get_untracked().flatten().as_ref() == Some(shown) {
        notice.try_set(None);
    }
}

#[component]
pub fn Toast(notice: RwSignal<Option<Notice>>) -> impl IntoView {
    view! {
        <Show when=move || notice.with(|n| n.is_some())>
            <div class="toast toast-top toast-end z-50">
                <div class=move || {
                    if notice.with(|n| n.as_ref().is_some_and(Notice::is_error)) {
                        "alert alert-error shadow-lg"
                    } else {
                        "alert alert-success shadow-lg"
                    }
                }>
                    <span>{move || notice.with(|n| n.as_ref().map(|n| n.message.clone()))}</span>
                    <button class="btn btn-ghost btn-xs" on:click=move |_| notice.set(None)>
                        "✕"
                    </button>
                </div>
            </div>
        </Show>
    }
}
