use payloads::responses::Pagination;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

const PER_PAGE_CHOICES: [u32; 4] = [10, 20, 50, 100];

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Backend-computed paging metadata for the rendered page.
    pub pagination: Pagination,
    pub on_page_change: Callback<u32>,
    pub on_per_page_change: Callback<u32>,
    /// Whether currently loading (to disable controls)
    #[prop_or(false)]
    pub is_loading: bool,
}

#[function_component]
pub fn PaginationControls(props: &Props) -> Html {
    let Props {
        pagination,
        is_loading,
        ..
    } = *props;

    // Nothing to navigate when the collection is empty.
    if pagination.total_items == 0 {
        return html! {};
    }

    let prev_disabled = !pagination.has_previous() || is_loading;
    let next_disabled = !pagination.has_next() || is_loading;

    let on_previous = {
        let on_page_change = props.on_page_change.clone();
        Callback::from(move |_: MouseEvent| {
            on_page_change.emit(pagination.page.saturating_sub(1).max(1));
        })
    };

    let on_next = {
        let on_page_change = props.on_page_change.clone();
        Callback::from(move |_: MouseEvent| {
            on_page_change.emit(pagination.page + 1);
        })
    };

    let on_per_page = {
        let on_per_page_change = props.on_per_page_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(per_page) = select.value().parse::<u32>() {
                on_per_page_change.emit(per_page);
            }
        })
    };

    let button_class = |disabled: bool| {
        if disabled {
            "px-4 py-2 border border-neutral-300 dark:border-neutral-600 \
             rounded-md text-sm font-medium text-neutral-400 \
             dark:text-neutral-500 bg-neutral-100 dark:bg-neutral-800 \
             cursor-not-allowed"
        } else {
            "px-4 py-2 border border-neutral-300 dark:border-neutral-600 \
             rounded-md text-sm font-medium text-neutral-700 \
             dark:text-neutral-300 bg-white dark:bg-neutral-700 \
             hover:bg-neutral-50 dark:hover:bg-neutral-600 \
             transition-colors duration-200"
        }
    };

    html! {
        <div class="flex items-center justify-between mt-4 pt-4 \
                    border-t border-neutral-200 dark:border-neutral-700">
            <button
                onclick={on_previous}
                disabled={prev_disabled}
                class={button_class(prev_disabled)}
            >
                {"Previous"}
            </button>

            <div class="flex items-center gap-4">
                <span class="text-sm text-neutral-600 dark:text-neutral-400">
                    {format!(
                        "Page {} of {} ({} items)",
                        pagination.page,
                        pagination.total_pages,
                        pagination.total_items,
                    )}
                </span>
                <select
                    onchange={on_per_page}
                    disabled={is_loading}
                    class="text-sm border border-neutral-300 \
                           dark:border-neutral-600 rounded-md px-2 py-1 \
                           bg-white dark:bg-neutral-700 \
                           text-neutral-700 dark:text-neutral-300"
                >
                    {PER_PAGE_CHOICES.iter().map(|choice| html! {
                        <option
                            value={choice.to_string()}
                            selected={*choice == pagination.per_page}
                        >
                            {format!("{choice} / page")}
                        </option>
                    }).collect::<Html>()}
                </select>
            </div>

            <button
                onclick={on_next}
                disabled={next_disabled}
                class={button_class(next_disabled)}
            >
                {"Next"}
            </button>
        </div>
    }
}
