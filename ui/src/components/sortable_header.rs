use payloads::SortOrder;
use yew::prelude::*;

use crate::list::SortSpec;

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Backend column name this header sorts by.
    pub field: &'static str,
    pub label: AttrValue,
    /// The list's active sort, to mark this header and pick the arrow.
    pub current: SortSpec,
    /// Direction used when this column becomes the active sort.
    #[prop_or(SortOrder::Asc)]
    pub default_order: SortOrder,
    /// Emits (field, default_order) on click; the list controller does
    /// the toggle-or-switch.
    pub on_sort: Callback<(&'static str, SortOrder)>,
}

#[function_component]
pub fn SortableHeader(props: &Props) -> Html {
    let is_active = props.current.by == props.field;

    let onclick = {
        let on_sort = props.on_sort.clone();
        let field = props.field;
        let default_order = props.default_order;
        Callback::from(move |_: MouseEvent| {
            on_sort.emit((field, default_order));
        })
    };

    let arrow = if is_active {
        match props.current.order {
            SortOrder::Asc => "\u{25B2}",
            SortOrder::Desc => "\u{25BC}",
        }
    } else {
        ""
    };

    let label_class = if is_active {
        "text-neutral-900 dark:text-neutral-100"
    } else {
        "text-neutral-500 dark:text-neutral-400"
    };

    html! {
        <th class="px-4 py-2 text-left">
            <button
                onclick={onclick}
                class={format!(
                    "text-xs font-medium uppercase tracking-wider \
                     hover:text-neutral-900 dark:hover:text-neutral-100 {}",
                    label_class,
                )}
            >
                {&props.label}
                if is_active {
                    <span class="ml-1">{arrow}</span>
                }
            </button>
        </th>
    }
}
