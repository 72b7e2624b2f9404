use crate::auth::use_auth;
use crate::web::router::Link;
use leptos::prelude::*;
use schooladmin_shared::AppRoute;
use schooladmin_shared::nav::session_menu;

/// 面板首页：欢迎信息与当前角色可进入的模块入口
#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();

    let shortcuts = move || {
        auth.session.with(|s| {
            session_menu(s)
                .into_iter()
                .filter(|item| item.route != AppRoute::Dashboard)
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="space-y-6">
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h2 class="card-title text-2xl">"Welcome"</h2>
                    <p class="text-base-content/70">
                        "Signed in as "
                        <span class="font-semibold">
                            {move || auth.role().map(|r| r.to_string()).unwrap_or_default()}
                        </span>
                    </p>
                </div>
            </div>

            <Show
                when=move || !shortcuts().is_empty()
                fallback=|| view! {
                    <div class="alert">
                        <span>"No management modules are available for your role."</span>
                    </div>
                }
            >
                <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                    <For
                        each=shortcuts
                        key=|item| item.route
                        children=|item| view! {
                            <div class="card bg-base-100 shadow">
                                <div class="card-body">
                                    <h3 class="card-title">{item.title}</h3>
                                    <div class="card-actions justify-end">
                                        <Link to=item.route class={"btn btn-primary btn-sm".to_string()}>
                                            "Open"
                                        </Link>
                                    </div>
                                </div>
                            </div>
                        }
                    />
                </div>
            </Show>
        </div>
    }
}
