use payloads::APIClient;
use yew::prelude::*;
use yew_router::prelude::*;

pub mod access;
pub mod components;
pub mod contexts;
pub mod hooks;
pub mod list;
mod logs;
pub mod pages;
pub mod state;
pub mod utils;

use components::{Header, ToastContainer};
use contexts::toast::ToastProvider;
use hooks::use_authentication;
use pages::{
    BlogPostsPage, DocumentsPage, HomePage, JobsPage, LoginPage,
    NotFoundPage,
};

// Global API client - configurable via environment or same-origin fallback
pub fn get_api_client() -> APIClient {
    // Try environment variable first (set at build time)
    let address = option_env!("BACKEND_URL")
        .map(|url| url.to_string())
        .unwrap_or_else(|| {
            // Fallback to same origin (current setup)
            let window = web_sys::window().unwrap();
            let location = window.location();
            location.origin().unwrap()
        });

    APIClient {
        address,
        inner_client: reqwest::Client::new(),
    }
}

#[derive(Debug, Clone, Copy, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/documents")]
    Documents,
    #[at("/admin/blog-posts")]
    BlogPosts,
    #[at("/admin/jobs")]
    Jobs,
    #[not_found]
    #[at("/404")]
    NotFound,
}

#[function_component]
pub fn App() -> Html {
    use_effect_with((), |_| {
        logs::init_logging();
    });

    html! {
        <ToastProvider>
            <BrowserRouter>
                <AppShell />
            </BrowserRouter>
        </ToastProvider>
    }
}

#[function_component]
fn AppShell() -> Html {
    use_authentication();

    html! {
        <div class="min-h-screen bg-white dark:bg-neutral-900 \
                    text-neutral-900 dark:text-neutral-100 \
                    transition-colors">
            <Header />
            <Switch<Route> render={switch} />
            <ToastContainer />
        </div>
    }
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <HomePage /> },
        Route::Login => html! { <LoginPage /> },
        Route::Documents => html! { <DocumentsPage /> },
        Route::BlogPosts => html! { <BlogPostsPage /> },
        Route::Jobs => html! { <JobsPage /> },
        Route::NotFound => html! { <NotFoundPage /> },
    }
}
