use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    /// (field, label, visible) per toggleable column.
    pub columns: Vec<(&'static str, AttrValue, bool)>,
    pub on_toggle: Callback<&'static str>,
}

/// Dropdown of checkboxes controlling which table columns render. The
/// choice lives in the list controller only, so it resets when the
/// view unmounts.
#[function_component]
pub fn ColumnMenu(props: &Props) -> Html {
    let open = use_state(|| false);

    let toggle_open = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| {
            open.set(!*open);
        })
    };

    html! {
        <div class="relative inline-block">
            <button
                onclick={toggle_open}
                class="px-3 py-2 text-sm font-medium border \
                       border-neutral-300 dark:border-neutral-600 \
                       rounded-md text-neutral-700 dark:text-neutral-300 \
                       bg-white dark:bg-neutral-700 \
                       hover:bg-neutral-50 dark:hover:bg-neutral-600"
            >
                {"Columns"}
            </button>
            if *open {
                <div class="absolute right-0 mt-1 w-48 z-10 bg-white \
                            dark:bg-neutral-800 border border-neutral-200 \
                            dark:border-neutral-700 rounded-md shadow-lg p-2">
                    {props.columns.iter().map(|(field, label, visible)| {
                        let on_toggle = props.on_toggle.clone();
                        let field = *field;
                        let onchange = Callback::from(move |_: Event| {
                            on_toggle.emit(field);
                        });
                        html! {
                            <label
                                key={field}
                                class="flex items-center gap-2 px-2 py-1 \
                                       text-sm text-neutral-700 \
                                       dark:text-neutral-300 cursor-pointer"
                            >
                                <input
                                    type="checkbox"
                                    checked={*visible}
                                    onchange={onchange}
                                />
                                {label.clone()}
                            </label>
                        }
                    }).collect::<Html>()}
                </div>
            }
        </div>
    }
}
