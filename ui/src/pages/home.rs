use payloads::SortOrder;
use payloads::requests::ListParams;
use yew::prelude::*;

use crate::components::PaginationControls;
use crate::hooks::use_published_posts;
use crate::utils::format_date;

/// Public landing page: the published side of the blog. Reads the
/// `posts` cache namespace, which admin mutations also invalidate.
#[function_component]
pub fn HomePage() -> Html {
    let page_number = use_state(|| 1u32);
    let per_page = use_state(|| 10u32);

    let params = ListParams::default()
        .page(*page_number)
        .per_page(*per_page)
        .sort("published_at", SortOrder::Desc);
    let query = use_published_posts(params);

    let on_page_change = {
        let page_number = page_number.clone();
        Callback::from(move |page: u32| page_number.set(page))
    };

    let on_per_page_change = {
        let page_number = page_number.clone();
        let per_page = per_page.clone();
        Callback::from(move |value: u32| {
            per_page.set(value);
            page_number.set(1);
        })
    };

    html! {
        <main class="max-w-3xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
            <h1 class="text-3xl font-bold text-neutral-900 \
                       dark:text-neutral-100 mb-8">
                {"Latest from the blog"}
            </h1>

            {query.render("posts", |page, is_loading, _| html! {
                <div>
                    <div class="space-y-6">
                        {page.items.iter().map(|post| html! {
                            <article
                                key={post.id.to_string()}
                                class="bg-white dark:bg-neutral-800 p-6 \
                                       rounded-lg border border-neutral-200 \
                                       dark:border-neutral-700"
                            >
                                <h2 class="text-xl font-semibold \
                                           text-neutral-900 \
                                           dark:text-neutral-100">
                                    {&post.title}
                                </h2>
                                if let Some(published_at) = &post.published_at {
                                    <p class="mt-1 text-sm text-neutral-500 \
                                              dark:text-neutral-400">
                                        {format_date(published_at)}
                                    </p>
                                }
                                <p class="mt-3 text-sm text-neutral-600 \
                                          dark:text-neutral-300 \
                                          line-clamp-3">
                                    {&post.content}
                                </p>
                            </article>
                        }).collect::<Html>()}
                    </div>
                    <PaginationControls
                        pagination={page.pagination}
                        on_page_change={on_page_change.clone()}
                        on_per_page_change={on_per_page_change.clone()}
                        is_loading={is_loading}
                    />
                </div>
            })}
        </main>
    }
}
