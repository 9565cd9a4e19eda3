use payloads::ApiError;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::get_api_client;
use crate::state::{AuthState, State};

/// Resolve the session once at app start. Until the check completes the
/// auth state stays `Unknown`, which guarded views present as loading.
#[hook]
pub fn use_authentication() {
    let (_, dispatch) = use_store::<State>();

    use_effect_with((), move |_| {
        yew::platform::spawn_local(async move {
            let client = get_api_client();
            match client.current_user().await {
                Ok(profile) => {
                    dispatch.reduce_mut(|state| {
                        state.auth_state = AuthState::LoggedIn(profile);
                    });
                }
                Err(ApiError::Auth(_)) => {
                    dispatch.reduce_mut(|state| {
                        state.auth_state = AuthState::LoggedOut;
                    });
                }
                Err(err) => {
                    tracing::warn!("session check failed: {err}");
                    dispatch.reduce_mut(|state| {
                        state.auth_state = AuthState::LoggedOut;
                    });
                }
            }
        });
    });
}

/// Logout callback: ends the backend session and evicts all cached
/// user state.
#[hook]
pub fn use_logout() -> Callback<()> {
    let (_, dispatch) = use_store::<State>();

    Callback::from(move |_| {
        let dispatch = dispatch.clone();
        yew::platform::spawn_local(async move {
            let client = get_api_client();
            if let Err(err) = client.logout().await {
                tracing::warn!("logout request failed: {err}");
            }
            dispatch.reduce_mut(|state| state.logout());
        });
    })
}
