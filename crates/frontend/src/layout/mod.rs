pub mod global_context;
pub mod navigation;
pub mod top_navbar;

use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::layout::navigation::render_page;
use crate::layout::top_navbar::TopNavbar;
use crate::shared::modal_stack::ModalHost;
use crate::shared::toast::ToastHost;

/// Application shell: top navigation bar over the active page, with the
/// toast and modal hosts mounted once at the root.
///
/// ```text
/// +------------------------------------------+
/// |                TopNavbar                  |
/// +------------------------------------------+
/// |                Content                    |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    view! {
        <div class="app-layout">
            <TopNavbar />
            <main class="app-main">
                {move || render_page(ctx.active.get())}
            </main>
            <ModalHost />
            <ToastHost />
        </div>
    }
}
