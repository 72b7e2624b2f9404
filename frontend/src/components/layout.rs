//! 控制台布局：顶栏（当前角色、注销）+ 按角色生成的侧边菜单 + 内容区

use crate::api::{use_api, use_config};
use crate::auth::{logout, use_auth};
use crate::components::toast::{Toast, notice_signal};
use crate::web::router::{Link, redirect_external, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use schooladmin_shared::nav::session_menu;
use schooladmin_shared::{AppRoute, Notice};

#[component]
pub fn DashboardLayout(children: Children) -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let config = use_config();
    let router = use_router();

    let notice = notice_signal();
    let (logging_out, set_logging_out) = signal(false);

    let role_label = move || {
        auth.session
            .with(|s| s.get_role().map(|r| r.to_string()))
            .unwrap_or_else(|| "Guest".to_string())
    };

    let on_logout = move |_| {
        set_logging_out.set(true);
        let api = api.clone();
        let redirect = config.logout_redirect.clone();
        spawn_local(async move {
            match logout(&auth, &api).await {
                Ok(()) => match redirect {
                    Some(url) => redirect_external(&url),
                    None => router.navigate_to_route(AppRoute::auth_failure_redirect()),
                },
                Err(e) => {
                    notice.set(Some(Notice::error(format!("Logout failed: {}", e.message))));
                    set_logging_out.set(false);
                }
            }
        });
    };

    let menu = move || auth.session.with(session_menu);

    view! {
        <div class="min-h-screen bg-base-200 font-sans">
            <Toast notice=notice />

            <div class="navbar bg-base-100 shadow-xl px-4">
                <div class="flex-1 gap-2">
                    <span class="text-xl font-bold">"School Admin"</span>
                    <span class="badge badge-neutral">{role_label}</span>
                </div>
                <div class="flex-none">
                    <button
                        class="btn btn-outline btn-error btn-sm"
                        disabled=move || logging_out.get()
                        on:click=on_logout
                    >
                        {move || if logging_out.get() { "Logging out..." } else { "Logout" }}
                    </button>
                </div>
            </div>

            <div class="flex flex-col md:flex-row gap-6 p-4 md:p-8 max-w-7xl mx-auto">
                <aside class="md:w-56 shrink-0">
                    <ul class="menu bg-base-100 rounded-box shadow-xl w-full">
                        <For
                            each=menu
                            key=|item| item.route
                            children=move |item| {
                                let route = item.route;
                                let class = Signal::derive(move || {
                                    if router.current_route().get() == route {
                                        "active".to_string()
                                    } else {
                                        String::new()
                                    }
                                });
                                view! {
                                    <li>
                                        <Link to=route class=class>
                                            {item.title}
                                        </Link>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </aside>
                <main class="flex-1 min-w-0">{children()}</main>
            </div>
        </div>
    }
}
