use crate::api::use_api;
use crate::auth::{login, use_auth};
use leptos::prelude::*;
use leptos::task::spawn_local;
use schooladmin_shared::ApiErrorKind;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();

    let (reg_no, set_reg_no) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let reg = reg_no.get().trim().to_string();
        let pass = password.get();
        if reg.is_empty() || pass.is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        // 成功后由路由服务监听会话变化，自动离开登录页
        let api = api.clone();
        spawn_local(async move {
            if let Err(e) = login(&auth, &api, reg, pass).await {
                log_error!("[Auth] Login failed: {}", e);
                let message = match e.kind {
                    ApiErrorKind::Unauthorized | ApiErrorKind::Rejected => e.message,
                    _ => "Login failed. Please try again.".to_string(),
                };
                set_error_msg.set(Some(message));
                set_is_submitting.set(false);
            }
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"School Admin"</h1>
                    <p class="text-base-content/70">"Sign in with your registration number"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.with(Option::is_some)>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="reg_no">
                                <span class="label-text">"Registration No"</span>
                            </label>
                            <input
                                id="reg_no"
                                type="text"
                                autocomplete="username"
                                on:input=move |ev| set_reg_no.set(event_target_value(&ev))
                                prop:value=reg_no
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                autocomplete="current-password"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Sign in".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
