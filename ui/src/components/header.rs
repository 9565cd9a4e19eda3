use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::Route;
use crate::hooks::use_logout;
use crate::state::{AuthState, State};

#[function_component]
pub fn Header() -> Html {
    let (state, _) = use_store::<State>();
    let logout = use_logout();

    let nav_link = "text-sm font-medium text-neutral-600 \
                    dark:text-neutral-400 hover:text-neutral-900 \
                    dark:hover:text-neutral-100";

    let on_logout = Callback::from(move |_: MouseEvent| logout.emit(()));

    html! {
        <header class="border-b border-neutral-200 dark:border-neutral-700">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-4 \
                        flex items-center justify-between">
                <div class="flex items-center gap-6">
                    <Link<Route>
                        to={Route::Home}
                        classes="text-lg font-bold text-neutral-900 \
                                 dark:text-neutral-100"
                    >
                        {"KarirKit"}
                    </Link<Route>>
                    if state.is_authenticated() {
                        <Link<Route> to={Route::Documents} classes={nav_link}>
                            {"Documents"}
                        </Link<Route>>
                    }
                    if state.is_admin() {
                        <Link<Route> to={Route::BlogPosts} classes={nav_link}>
                            {"Blog"}
                        </Link<Route>>
                        <Link<Route> to={Route::Jobs} classes={nav_link}>
                            {"Jobs"}
                        </Link<Route>>
                    }
                </div>
                <div class="flex items-center gap-4">
                    {match &state.auth_state {
                        AuthState::LoggedIn(profile) => html! {
                            <>
                                <span class="text-sm text-neutral-600 \
                                             dark:text-neutral-400">
                                    {&profile.username}
                                </span>
                                <button
                                    onclick={on_logout}
                                    class={nav_link}
                                >
                                    {"Sign out"}
                                </button>
                            </>
                        },
                        AuthState::LoggedOut => html! {
                            <Link<Route> to={Route::Login} classes={nav_link}>
                                {"Sign in"}
                            </Link<Route>>
                        },
                        AuthState::Unknown => html! {},
                    }}
                </div>
            </div>
        </header>
    }
}
