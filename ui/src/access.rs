//! Capability-gated routing: a pure decision function plus the thin
//! component that renders its outcome.

use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::state::{AuthState, State};
use crate::Route;

/// What a view requires of the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Public,
    Authenticated,
    Admin,
}

/// The resolved outcome for a view, independent of any rendering
/// technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(Route),
    /// Session state is still being determined; show a loading
    /// affordance rather than flashing a redirect.
    Loading,
}

pub fn resolve_access(auth: &AuthState, required: Capability) -> Access {
    match (required, auth) {
        (Capability::Public, _) => Access::Allow,
        (_, AuthState::Unknown) => Access::Loading,
        (_, AuthState::LoggedOut) => Access::Redirect(Route::Login),
        (Capability::Authenticated, AuthState::LoggedIn(_)) => Access::Allow,
        (Capability::Admin, AuthState::LoggedIn(profile)) => {
            if profile.is_admin {
                Access::Allow
            } else {
                Access::Redirect(Route::Home)
            }
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct GuardProps {
    pub capability: Capability,
    pub children: Children,
}

/// Renders its children only when [`resolve_access`] allows it.
#[function_component]
pub fn Guard(props: &GuardProps) -> Html {
    let (state, _) = use_store::<State>();

    match resolve_access(&state.auth_state, props.capability) {
        Access::Allow => html! { <>{props.children.clone()}</> },
        Access::Loading => html! {
            <div class="text-center py-12">
                <div class="inline-block animate-spin rounded-full h-8 w-8 \
                            border-2 border-neutral-900 dark:border-neutral-100 \
                            border-t-transparent dark:border-t-transparent">
                </div>
            </div>
        },
        Access::Redirect(to) => html! { <Redirect<Route> to={to} /> },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payloads::UserId;
    use payloads::responses::UserProfile;
    use uuid::Uuid;

    fn profile(is_admin: bool) -> UserProfile {
        UserProfile {
            user_id: UserId(Uuid::from_u128(1)),
            username: "eka".to_string(),
            email: "eka@example.com".to_string(),
            is_admin,
        }
    }

    #[test]
    fn public_views_are_always_allowed() {
        for auth in [
            AuthState::Unknown,
            AuthState::LoggedOut,
            AuthState::LoggedIn(profile(false)),
        ] {
            assert_eq!(
                resolve_access(&auth, Capability::Public),
                Access::Allow
            );
        }
    }

    #[test]
    fn unknown_session_resolves_to_loading_not_redirect() {
        assert_eq!(
            resolve_access(&AuthState::Unknown, Capability::Authenticated),
            Access::Loading
        );
        assert_eq!(
            resolve_access(&AuthState::Unknown, Capability::Admin),
            Access::Loading
        );
    }

    #[test]
    fn logged_out_redirects_to_login() {
        assert_eq!(
            resolve_access(&AuthState::LoggedOut, Capability::Authenticated),
            Access::Redirect(Route::Login)
        );
    }

    #[test]
    fn admin_views_require_the_admin_flag() {
        assert_eq!(
            resolve_access(
                &AuthState::LoggedIn(profile(true)),
                Capability::Admin
            ),
            Access::Allow
        );
        assert_eq!(
            resolve_access(
                &AuthState::LoggedIn(profile(false)),
                Capability::Admin
            ),
            Access::Redirect(Route::Home)
        );
    }
}
