use std::future::Future;
use std::rc::Rc;

use payloads::ApiError;
use payloads::requests::ListParams;
use payloads::responses::Page;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::state::{QueryCache, State};

/// Bounded retry for list fetches: client errors are terminal, network
/// errors and 5xx get up to two more attempts with doubling backoff.
pub const MAX_RETRIES: u32 = 2;
pub const RETRY_BASE_MS: u32 = 500;

/// Delay before retry `attempt` (1-based): 500ms, 1000ms.
pub fn retry_delay_ms(attempt: u32) -> u32 {
    RETRY_BASE_MS * 2u32.pow(attempt.saturating_sub(1))
}

/// Generic list-query hook return type.
pub struct PageQueryHandle<T: Clone + PartialEq + 'static> {
    /// The cached page for the *current* derived parameters, if any.
    pub page: Option<Page<T>>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub refetch: Callback<()>,
}

impl<T: Clone + PartialEq + 'static> PageQueryHandle<T> {
    /// Render the list region with the three distinguishable terminal
    /// presentations: loading (no data yet), failed fetch, and a
    /// successful fetch of zero items. With data present the render
    /// function also receives the refetch-in-progress flag and any
    /// error from a failed refetch (previous page stays visible).
    pub fn render<F>(&self, context: &str, render_fn: F) -> Html
    where
        F: Fn(&Page<T>, bool, Option<&String>) -> Html,
    {
        match &self.page {
            None => {
                if let Some(error) = &self.error {
                    html! {
                        <div class="p-4 rounded-md bg-red-50 \
                                   dark:bg-red-900/20 border \
                                   border-red-200 dark:border-red-800">
                            <p class="text-sm text-red-700 \
                                      dark:text-red-400">
                                {format!("Error loading {}: {}", context, error)}
                            </p>
                            <button
                                onclick={self.refetch.reform(|_: MouseEvent| ())}
                                class="mt-2 text-sm font-medium underline \
                                       text-red-700 dark:text-red-400"
                            >
                                {"Try again"}
                            </button>
                        </div>
                    }
                } else {
                    html! {
                        <div class="text-center py-12">
                            <p class="text-neutral-600 dark:text-neutral-400">
                                {format!("Loading {}...", context)}
                            </p>
                        </div>
                    }
                }
            }
            Some(page) if page.items.is_empty() => {
                html! {
                    <div class="text-center py-12">
                        <p class="text-neutral-600 dark:text-neutral-400">
                            {format!("No {} found", context)}
                        </p>
                    </div>
                }
            }
            Some(page) => render_fn(page, self.is_loading, self.error.as_ref()),
        }
    }
}

/// Generic query-layer hook over the store's per-resource cache.
///
/// The cache key is derived from the normalized parameters; the hook
/// starts a fetch whenever the current key has no fresh entry and
/// nobody else is already fetching it (concurrent consumers of one key
/// share a single request). Results land in the store under the key of
/// the request that produced them, so a slow response for superseded
/// parameters never replaces what the current key renders.
///
/// `select`/`select_mut` pick the resource's namespace out of the
/// store; `fetch` performs the actual API call.
#[hook]
pub fn use_page_query<T, S, M, F, Fut>(
    resource: &'static str,
    params: ListParams,
    select: S,
    select_mut: M,
    fetch: F,
) -> PageQueryHandle<T>
where
    T: Clone + PartialEq + 'static,
    S: Fn(&State) -> &QueryCache<T> + 'static,
    M: Fn(&mut State) -> &mut QueryCache<T> + Copy + 'static,
    F: Fn(ListParams) -> Fut + 'static,
    Fut: Future<Output = Result<Page<T>, ApiError>> + 'static,
{
    let (state, dispatch) = use_store::<State>();
    // Fetch failures are remembered together with the key they belong
    // to, so an error for stale parameters is never shown.
    let error = use_state(|| None::<(String, String)>);

    let key = params.cache_key();

    let start_fetch: Callback<bool> = {
        let dispatch = dispatch.clone();
        let error = error.clone();
        let fetch = Rc::new(fetch);
        let params = params.clone();
        let key = key.clone();

        Callback::from(move |force: bool| {
            let mut claimed = false;
            dispatch.reduce_mut(|state| {
                let cache = select_mut(state);
                if !cache.is_in_flight(&key)
                    && (force || cache.needs_fetch(&key))
                {
                    claimed = cache.begin_fetch(&key);
                }
            });
            if !claimed {
                return;
            }

            let dispatch = dispatch.clone();
            let error = error.clone();
            let fetch = fetch.clone();
            let params = params.clone();
            let key = key.clone();

            yew::platform::spawn_local(async move {
                let mut attempt = 0;
                let result = loop {
                    match fetch(params.clone()).await {
                        Ok(page) => break Ok(page),
                        Err(err)
                            if err.is_retryable() && attempt < MAX_RETRIES =>
                        {
                            attempt += 1;
                            tracing::warn!(
                                "retrying {resource} fetch \
                                 (attempt {attempt}): {err}"
                            );
                            gloo_timers::future::TimeoutFuture::new(
                                retry_delay_ms(attempt),
                            )
                            .await;
                        }
                        Err(err) => break Err(err),
                    }
                };

                match result {
                    Ok(page) => {
                        dispatch.reduce_mut(|state| {
                            select_mut(state).complete_fetch(&key, page)
                        });
                        error.set(None);
                    }
                    Err(err) => {
                        tracing::error!("failed to fetch {resource}: {err}");
                        dispatch.reduce_mut(|state| {
                            select_mut(state).fail_fetch(&key)
                        });
                        error.set(Some((key.clone(), err.to_string())));
                    }
                }
            });
        })
    };

    // Fetch on mount, on key change, and when invalidation marks the
    // current entry stale.
    {
        let needs_fetch = select(&state).needs_fetch(&key);
        let start_fetch = start_fetch.clone();
        use_effect_with((key.clone(), needs_fetch), move |(_, needs_fetch)| {
            if *needs_fetch {
                start_fetch.emit(false);
            }
        });
    }

    let cache = select(&state);
    let page = cache.page(&key).cloned();
    let is_loading = cache.is_in_flight(&key);
    let current_error = (*error)
        .clone()
        .filter(|(error_key, _)| *error_key == key)
        .map(|(_, message)| message);

    PageQueryHandle {
        page,
        // Before the mount effect has run there is neither data nor an
        // in-flight request; present that as loading, not as empty.
        is_loading: is_loading || (page_missing_without_error(
            cache.page(&key).is_some(),
            current_error.as_ref(),
        )),
        error: current_error,
        refetch: start_fetch.reform(|_| true),
    }
}

fn page_missing_without_error(
    has_page: bool,
    error: Option<&String>,
) -> bool {
    !has_page && error.is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_delays_double() {
        assert_eq!(retry_delay_ms(1), 500);
        assert_eq!(retry_delay_ms(2), 1000);
    }

    #[test]
    fn initial_mount_presents_as_loading() {
        assert!(page_missing_without_error(false, None));
        assert!(!page_missing_without_error(true, None));
        assert!(!page_missing_without_error(false, Some(&"e".to_string())));
    }
}
