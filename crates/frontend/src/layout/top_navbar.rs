use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::layout::navigation::{menu_groups, PageKey};
use crate::shared::icons::icon;
use crate::shared::modal_stack::use_modal_stack;
use crate::system::auth::context::{do_logout, use_auth};
use crate::system::users::ui::change_password::ChangePasswordModal;
use crate::system::users::ui::profile::ProfileModal;

#[component]
pub fn TopNavbar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let (auth_state, set_auth_state) = use_auth();
    let modal_stack = use_modal_stack();

    let (open_group, set_open_group) = signal(Option::<&'static str>::None);
    let (user_menu_open, set_user_menu_open) = signal(false);

    let activate = move |key: PageKey| {
        ctx.activate(key);
        set_open_group.set(None);
        set_user_menu_open.set(false);
    };

    let open_profile = move || {
        set_user_menu_open.set(false);
        modal_stack.push(move |handle| {
            let on_close = std::rc::Rc::new({
                let handle = handle.clone();
                move |_| handle.close()
            });
            view! { <ProfileModal on_close=on_close /> }.into_any()
        });
    };

    let open_change_password = move || {
        set_user_menu_open.set(false);
        modal_stack.push(move |handle| {
            let on_close = std::rc::Rc::new({
                let handle = handle.clone();
                move |_| handle.close()
            });
            view! { <ChangePasswordModal on_close=on_close /> }.into_any()
        });
    };

    view! {
        <header class="navbar">
            <div class="navbar__brand" on:click=move |_| activate(PageKey::Dashboard)>
                {"📦 Kho hàng"}
            </div>

            <nav class="navbar__menu">
                <button
                    class="navbar__item"
                    class:navbar__item--active=move || ctx.active.get() == PageKey::Dashboard
                    on:click=move |_| activate(PageKey::Dashboard)
                >
                    {icon(PageKey::Dashboard.icon_name())}
                    {PageKey::Dashboard.label()}
                </button>

                {move || {
                    let is_admin = auth_state.get().is_admin();
                    menu_groups()
                        .into_iter()
                        .filter(|group| !group.admin_only || is_admin)
                        .map(|group| {
                            let group_id = group.id;
                            let items = group.items.clone();
                            let is_open = move || open_group.get() == Some(group_id);
                            let group_active = {
                                let items = items.clone();
                                move || items.contains(&ctx.active.get())
                            };
                            view! {
                                <div class="navbar__group">
                                    <button
                                        class="navbar__item"
                                        class:navbar__item--active=group_active
                                        on:click=move |_| {
                                            set_open_group.update(|g| {
                                                *g = if *g == Some(group_id) { None } else { Some(group_id) };
                                            });
                                        }
                                    >
                                        {group.label}
                                    </button>
                                    <Show when=is_open>
                                        {
                                            let items = items.clone();
                                            move || items
                                                .iter()
                                                .copied()
                                                .filter(|key| !key.admin_only() || auth_state.get().is_admin())
                                                .map(|key| {
                                                    view! {
                                                        <button
                                                            class="navbar__dropdown-item"
                                                            on:click=move |_| activate(key)
                                                        >
                                                            {icon(key.icon_name())}
                                                            {key.label()}
                                                        </button>
                                                    }
                                                })
                                                .collect_view()
                                                .into_any()
                                        }
                                    </Show>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </nav>

            <div class="navbar__user">
                <button
                    class="navbar__item"
                    on:click=move |_| set_user_menu_open.update(|v| *v = !*v)
                >
                    {icon("users")}
                    {move || auth_state.get().display_name()}
                </button>
                <Show when=move || user_menu_open.get()>
                    <div class="navbar__dropdown">
                        <button class="navbar__dropdown-item" on:click=move |_| open_profile()>
                            {"Thông tin cá nhân"}
                        </button>
                        <button class="navbar__dropdown-item" on:click=move |_| open_change_password()>
                            {"Đổi mật khẩu"}
                        </button>
                        <button
                            class="navbar__dropdown-item"
                            on:click=move |_| do_logout(set_auth_state)
                        >
                            {icon("logout")}
                            {"Đăng xuất"}
                        </button>
                    </div>
                </Show>
            </div>
        </header>
    }
}
