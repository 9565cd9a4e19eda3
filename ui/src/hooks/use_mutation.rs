use std::future::Future;
use std::rc::Rc;

use payloads::{ApiError, FieldErrors};
use yew::prelude::*;
use yewdux::prelude::*;

use crate::contexts::toast::use_toast;
use crate::state::State;

/// Generic mutation hook return type.
///
/// `is_pending` gates the triggering control: the UI disables the
/// button while its request is outstanding, which is the only
/// concurrency discipline a mutation needs.
pub struct MutationHandle<I> {
    pub is_pending: bool,
    /// Per-field server errors from the last run, for the active form.
    pub field_errors: Option<FieldErrors>,
    pub run: Callback<I>,
}

impl<I> MutationHandle<I> {
    /// First server message for one form field, if any.
    pub fn field_error(&self, field: &str) -> Option<String> {
        self.field_errors
            .as_ref()
            .and_then(|errors| errors.first(field))
            .map(String::from)
    }
}

/// Generic mutation composer.
///
/// Outcome handling:
/// - success: `on_success` fires with the backend's value (wrappers
///   invalidate the affected cache namespaces there);
/// - validation failure: field messages are kept for the form, the
///   reserved `general` message becomes a toast, and no second generic
///   notification is produced for the same cause;
/// - auth failure: the session is discarded, which routes guarded
///   views back to the login screen;
/// - anything else: a single failure toast naming the action.
///
/// `on_settled` fires after every completion, success or failure.
#[hook]
pub fn use_mutation<I, T, F, Fut>(
    action: &'static str,
    perform: F,
    on_success: Callback<T>,
    on_settled: Callback<()>,
) -> MutationHandle<I>
where
    I: 'static,
    T: 'static,
    F: Fn(I) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let (_, dispatch) = use_store::<State>();
    let toast = use_toast();
    let is_pending = use_state(|| false);
    let field_errors = use_state(|| None::<FieldErrors>);

    let run = {
        let perform = Rc::new(perform);
        let is_pending = is_pending.clone();
        let field_errors = field_errors.clone();

        Callback::from(move |input: I| {
            if *is_pending {
                return;
            }
            is_pending.set(true);
            field_errors.set(None);

            let perform = perform.clone();
            let is_pending = is_pending.clone();
            let field_errors = field_errors.clone();
            let toast = toast.clone();
            let on_success = on_success.clone();
            let on_settled = on_settled.clone();
            let dispatch = dispatch.clone();

            yew::platform::spawn_local(async move {
                match perform(input).await {
                    Ok(value) => {
                        on_success.emit(value);
                    }
                    Err(ApiError::Validation(errors)) => {
                        if let Some(general) = errors.general() {
                            toast.error(general.to_string());
                        }
                        field_errors.set(Some(errors));
                    }
                    Err(ApiError::Auth(_)) => {
                        toast.error(
                            "Your session has expired. \
                             Please sign in again.",
                        );
                        dispatch.reduce_mut(|state| state.logout());
                    }
                    Err(err) => {
                        tracing::error!("failed to {action}: {err}");
                        toast.error(format!("Failed to {action}: {err}"));
                    }
                }
                is_pending.set(false);
                on_settled.emit(());
            });
        })
    };

    MutationHandle {
        is_pending: *is_pending,
        field_errors: (*field_errors).clone(),
        run,
    }
}
