use crate::web::router::use_router;
use leptos::prelude::*;
use schooladmin_shared::AppRoute;

#[component]
pub fn UnauthorizedPage() -> impl IntoView {
    let router = use_router();

    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="text-center space-y-4">
                <h1 class="text-6xl font-bold text-error">"403"</h1>
                <p class="text-xl">"You do not have permission to view this page."</p>
                <button
                    class="btn btn-primary"
                    on:click=move |_| router.navigate_to_route(AppRoute::auth_success_redirect())
                >
                    "Back to Dashboard"
                </button>
            </div>
        </div>
    }
}
