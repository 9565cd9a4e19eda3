use payloads::requests::LoginCredentials;
use payloads::responses;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::Route;
use crate::get_api_client;
use crate::hooks::use_mutation;
use crate::state::{AuthState, State};

#[derive(Default, Clone, PartialEq)]
struct LoginForm {
    email: String,
    password: String,
}

#[function_component]
pub fn LoginPage() -> Html {
    let navigator = use_navigator().unwrap();
    let form = use_state(LoginForm::default);
    let (_, dispatch) = use_store::<State>();

    let on_success = {
        let navigator = navigator.clone();
        Callback::from(move |profile: responses::UserProfile| {
            dispatch.reduce_mut(|state| {
                state.auth_state = AuthState::LoggedIn(profile);
            });
            navigator.push(&Route::Home);
        })
    };

    let login = use_mutation(
        "sign in",
        |credentials: LoginCredentials| async move {
            get_api_client().login(&credentials).await
        },
        on_success,
        Callback::noop(),
    );

    let on_email_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut form_data = (*form).clone();
            form_data.email = input.value();
            form.set(form_data);
        })
    };

    let on_password_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut form_data = (*form).clone();
            form_data.password = input.value();
            form.set(form_data);
        })
    };

    let on_submit = {
        let form = form.clone();
        let run = login.run.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form_data = (*form).clone();
            run.emit(LoginCredentials {
                email: form_data.email,
                password: form_data.password,
            });
        })
    };

    let email_error = login.field_error("email");
    let password_error = login.field_error("password");

    let input_class = "mt-1 appearance-none relative block w-full px-3 py-2 \
                       border border-neutral-300 dark:border-neutral-600 \
                       placeholder-neutral-500 dark:placeholder-neutral-400 \
                       text-neutral-900 dark:text-white bg-white \
                       dark:bg-neutral-700 rounded-md focus:outline-none \
                       focus:ring-blue-500 focus:border-blue-500 sm:text-sm";

    html! {
        <main class="min-h-screen flex items-center justify-center \
                     bg-neutral-50 dark:bg-neutral-900 py-12 px-4 \
                     sm:px-6 lg:px-8">
            <div class="max-w-md w-full space-y-8">
                <h2 class="mt-6 text-center text-3xl font-extrabold \
                           text-neutral-900 dark:text-white">
                    {"Sign in to KarirKit"}
                </h2>
                <form class="mt-8 space-y-6" onsubmit={on_submit}>
                    <div class="space-y-4">
                        <div>
                            <label
                                for="email"
                                class="block text-sm font-medium \
                                       text-neutral-700 dark:text-neutral-300"
                            >
                                {"Email address"}
                            </label>
                            <input
                                id="email"
                                name="email"
                                type="email"
                                required=true
                                class={input_class}
                                placeholder="Email address"
                                value={form.email.clone()}
                                onchange={on_email_change}
                                disabled={login.is_pending}
                            />
                            if let Some(error) = email_error {
                                <p class="mt-1 text-sm text-red-600 \
                                          dark:text-red-400">
                                    {error}
                                </p>
                            }
                        </div>
                        <div>
                            <label
                                for="password"
                                class="block text-sm font-medium \
                                       text-neutral-700 dark:text-neutral-300"
                            >
                                {"Password"}
                            </label>
                            <input
                                id="password"
                                name="password"
                                type="password"
                                required=true
                                class={input_class}
                                placeholder="Password"
                                value={form.password.clone()}
                                onchange={on_password_change}
                                disabled={login.is_pending}
                            />
                            if let Some(error) = password_error {
                                <p class="mt-1 text-sm text-red-600 \
                                          dark:text-red-400">
                                    {error}
                                </p>
                            }
                        </div>
                    </div>

                    <button
                        type="submit"
                        class="group relative w-full flex justify-center \
                               py-2 px-4 border border-transparent text-sm \
                               font-medium rounded-md text-white bg-blue-600 \
                               hover:bg-blue-700 focus:outline-none \
                               focus:ring-2 focus:ring-offset-2 \
                               focus:ring-blue-500 disabled:opacity-50 \
                               disabled:cursor-not-allowed"
                        disabled={login.is_pending}
                    >
                        {if login.is_pending { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </main>
    }
}
