use yew::prelude::*;

use crate::contexts::toast::{ToastContext, ToastKind, use_toast};

/// Renders the active toasts in a fixed stack. Lives directly under the
/// provider so every page shares one surface.
#[function_component]
pub fn ToastContainer() -> Html {
    let context = use_context::<ToastContext>()
        .expect("ToastContainer must be used within a ToastProvider");
    let handle = use_toast();

    if context.toasts.is_empty() {
        return html! {};
    }

    let mut toasts: Vec<_> = context.toasts.values().cloned().collect();
    toasts.sort_by_key(|toast| toast.id);

    html! {
        <div class="fixed bottom-4 right-4 z-50 flex flex-col gap-2">
            {toasts.into_iter().map(|toast| {
                let dismiss = {
                    let handle = handle.clone();
                    let id = toast.id;
                    Callback::from(move |_: MouseEvent| handle.dismiss(id))
                };
                let palette = match toast.kind {
                    ToastKind::Success => {
                        "bg-green-50 dark:bg-green-900/20 border-green-200 \
                         dark:border-green-800 text-green-700 \
                         dark:text-green-300"
                    }
                    ToastKind::Error => {
                        "bg-red-50 dark:bg-red-900/20 border-red-200 \
                         dark:border-red-800 text-red-700 dark:text-red-300"
                    }
                };
                html! {
                    <div
                        key={toast.id.to_string()}
                        class={format!(
                            "flex items-center gap-3 px-4 py-3 border \
                             rounded-md shadow-md text-sm {palette}"
                        )}
                    >
                        <span>{&toast.message}</span>
                        <button
                            onclick={dismiss}
                            class="font-semibold opacity-70 hover:opacity-100"
                        >
                            {"\u{00D7}"}
                        </button>
                    </div>
                }
            }).collect::<Html>()}
        </div>
    }
}
