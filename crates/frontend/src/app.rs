use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::toast::ToastService;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // App-wide services: navigation state, toasts, modal stack.
    provide_context(AppGlobalContext::new());
    provide_context(ToastService::new());
    provide_context(ModalStackService::new());

    view! {
        <AuthProvider>
            <AppRoutes />
        </AuthProvider>
    }
}
