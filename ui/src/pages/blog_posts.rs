use payloads::requests::{CreateBlogPost, UpdateBlogPost};
use payloads::{BlogPostId, PostStatus, SortOrder, responses};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use super::update_controller;
use crate::access::{Capability, Guard};
use crate::components::{
    ConfirmationModal, PaginationControls, SortableHeader,
};
use crate::hooks::{
    use_blog_posts, use_bulk_delete_blog_posts, use_create_blog_post,
    use_delete_blog_post, use_update_blog_post,
};
use crate::list::{ListController, SortSpec};
use crate::utils::format_date;

#[function_component]
pub fn BlogPostsPage() -> Html {
    html! {
        <Guard capability={Capability::Admin}>
            <BlogPostsContent />
        </Guard>
    }
}

#[function_component]
fn BlogPostsContent() -> Html {
    let controller = use_state(|| {
        ListController::new(
            SortSpec {
                by: "created_at",
                order: SortOrder::Desc,
            },
            20,
            &["title", "slug", "status", "created_at"],
        )
    });
    // None = editor closed, Some(None) = new post,
    // Some(Some(post)) = editing that post.
    let editing = use_state(|| None::<Option<responses::BlogPost>>);

    let query = use_blog_posts(controller.params());

    let close_dialogs = {
        let controller = controller.clone();
        Callback::from(move |_: ()| {
            update_controller(&controller, |c| c.close_dialogs());
        })
    };
    let on_settled = {
        let controller = controller.clone();
        Callback::from(move |_: ()| {
            update_controller(&controller, |c| c.clear_selection());
        })
    };

    let delete = use_delete_blog_post(close_dialogs.clone(), on_settled.clone());
    let bulk_delete =
        use_bulk_delete_blog_posts(close_dialogs.clone(), on_settled.clone());

    let on_query_input = {
        let controller = controller.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            update_controller(&controller, |c| c.stage_query(input.value()));
        })
    };

    let on_status_filter = {
        let controller = controller.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            update_controller(&controller, |c| {
                c.stage_filter("status", select.value());
            });
        })
    };

    let on_apply = {
        let controller = controller.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            update_controller(&controller, |c| c.apply_filters());
        })
    };

    let on_reset = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| {
            update_controller(&controller, |c| c.reset_filters());
        })
    };

    let on_sort = {
        let controller = controller.clone();
        Callback::from(move |(field, default_order): (&'static str, SortOrder)| {
            update_controller(&controller, |c| {
                c.toggle_sort(field, default_order);
            });
        })
    };

    let on_page_change = {
        let controller = controller.clone();
        Callback::from(move |page: u32| {
            update_controller(&controller, |c| c.set_page(page));
        })
    };

    let on_per_page_change = {
        let controller = controller.clone();
        Callback::from(move |per_page: u32| {
            update_controller(&controller, |c| c.set_per_page(per_page));
        })
    };

    let on_new_post = {
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| editing.set(Some(None)))
    };

    let on_close_editor = {
        let editing = editing.clone();
        Callback::from(move |_: ()| editing.set(None))
    };

    let on_open_bulk_delete = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| {
            update_controller(&controller, |c| c.open_bulk_delete());
        })
    };

    let on_close_dialogs = {
        let controller = controller.clone();
        Callback::from(move |_: ()| {
            update_controller(&controller, |c| c.close_dialogs());
        })
    };

    let on_confirm_delete = {
        let controller = controller.clone();
        let run = delete.run.clone();
        Callback::from(move |_: ()| {
            if let Some(id) = controller.dialogs.delete_target {
                run.emit(BlogPostId(id));
            }
        })
    };

    let on_confirm_bulk_delete = {
        let controller = controller.clone();
        let run = bulk_delete.run.clone();
        Callback::from(move |_: ()| {
            let ids = controller.selected_ids();
            if !ids.is_empty() {
                run.emit(ids);
            }
        })
    };

    let selection_count = controller.selection().len();
    let staged = controller.staged_filters();
    let staged_q = staged.q.clone();
    let staged_status = staged
        .fields
        .get("status")
        .cloned()
        .unwrap_or_default();

    html! {
        <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
            <div class="flex justify-between items-center mb-6">
                <h1 class="text-2xl font-bold text-neutral-900 dark:text-neutral-100">
                    {"Blog posts"}
                </h1>
                <button
                    onclick={on_new_post}
                    class="px-4 py-2 text-sm font-medium text-white \
                           bg-blue-600 hover:bg-blue-700 rounded-md"
                >
                    {"New post"}
                </button>
            </div>

            <form onsubmit={on_apply} class="flex items-center gap-2 mb-4">
                <input
                    type="text"
                    placeholder="Search posts"
                    value={staged_q}
                    oninput={on_query_input}
                    class="px-3 py-2 text-sm border border-neutral-300 \
                           dark:border-neutral-600 rounded-md \
                           bg-white dark:bg-neutral-700 \
                           text-neutral-900 dark:text-neutral-100"
                />
                <select
                    onchange={on_status_filter}
                    class="px-3 py-2 text-sm border border-neutral-300 \
                           dark:border-neutral-600 rounded-md \
                           bg-white dark:bg-neutral-700 \
                           text-neutral-900 dark:text-neutral-100"
                >
                    <option value="" selected={staged_status.is_empty()}>
                        {"All statuses"}
                    </option>
                    <option
                        value="draft"
                        selected={staged_status == "draft"}
                    >
                        {"Draft"}
                    </option>
                    <option
                        value="published"
                        selected={staged_status == "published"}
                    >
                        {"Published"}
                    </option>
                </select>
                <button
                    type="submit"
                    class="px-3 py-2 text-sm font-medium border \
                           border-neutral-300 dark:border-neutral-600 \
                           rounded-md text-neutral-700 dark:text-neutral-300 \
                           hover:bg-neutral-50 dark:hover:bg-neutral-600"
                >
                    {"Apply"}
                </button>
                if controller.has_active_filters() {
                    <button
                        type="button"
                        onclick={on_reset}
                        class="px-3 py-2 text-sm text-neutral-500 \
                               dark:text-neutral-400 underline"
                    >
                        {"Reset"}
                    </button>
                }
                if selection_count > 0 {
                    <button
                        type="button"
                        onclick={on_open_bulk_delete}
                        disabled={bulk_delete.is_pending}
                        class="ml-auto px-3 py-2 text-sm font-medium \
                               text-white bg-red-600 hover:bg-red-700 \
                               rounded-md disabled:opacity-50"
                    >
                        {format!("Delete selected ({selection_count})")}
                    </button>
                }
            </form>

            {query.render("blog posts", |page, is_loading, refetch_error| {
                let ids: Vec<uuid::Uuid> =
                    page.items.iter().map(|p| p.id.0).collect();
                let all_selected = controller.page_fully_selected(&ids);

                let on_select_all = {
                    let controller = controller.clone();
                    let ids = ids.clone();
                    Callback::from(move |_: Event| {
                        let ids = ids.clone();
                        update_controller(&controller, move |c| {
                            if c.page_fully_selected(&ids) {
                                c.clear_selection();
                            } else {
                                c.select_page(&ids);
                            }
                        });
                    })
                };

                html! {
                    <div>
                        if let Some(error) = refetch_error {
                            <div class="mb-2 text-sm text-red-600 \
                                        dark:text-red-400">
                                {error}
                            </div>
                        }
                        <table class="w-full bg-white dark:bg-neutral-800 \
                                      rounded-lg border border-neutral-200 \
                                      dark:border-neutral-700">
                            <thead>
                                <tr class="border-b border-neutral-200 \
                                           dark:border-neutral-700">
                                    <th class="px-4 py-2 w-10">
                                        <input
                                            type="checkbox"
                                            checked={all_selected}
                                            onchange={on_select_all}
                                        />
                                    </th>
                                    <SortableHeader
                                        field="title"
                                        label="Title"
                                        current={controller.sort()}
                                        on_sort={on_sort.clone()}
                                    />
                                    <SortableHeader
                                        field="slug"
                                        label="Slug"
                                        current={controller.sort()}
                                        on_sort={on_sort.clone()}
                                    />
                                    <SortableHeader
                                        field="status"
                                        label="Status"
                                        current={controller.sort()}
                                        on_sort={on_sort.clone()}
                                    />
                                    <SortableHeader
                                        field="created_at"
                                        label="Created"
                                        current={controller.sort()}
                                        default_order={SortOrder::Desc}
                                        on_sort={on_sort.clone()}
                                    />
                                    <th class="px-4 py-2"></th>
                                </tr>
                            </thead>
                            <tbody>
                                {page.items.iter().map(|post| {
                                    let selected = controller.is_selected(post.id.0);
                                    let on_toggle = {
                                        let controller = controller.clone();
                                        let id = post.id.0;
                                        Callback::from(move |_: Event| {
                                            update_controller(&controller, |c| {
                                                c.toggle_row(id);
                                            });
                                        })
                                    };
                                    let on_edit = {
                                        let editing = editing.clone();
                                        let post = post.clone();
                                        Callback::from(move |_: MouseEvent| {
                                            editing.set(Some(Some(post.clone())));
                                        })
                                    };
                                    let on_delete = {
                                        let controller = controller.clone();
                                        let id = post.id.0;
                                        Callback::from(move |_: MouseEvent| {
                                            update_controller(&controller, |c| {
                                                c.open_delete(id);
                                            });
                                        })
                                    };
                                    let cell = "px-4 py-3 text-sm \
                                                text-neutral-900 \
                                                dark:text-neutral-100";
                                    html! {
                                        <tr
                                            key={post.id.to_string()}
                                            class="border-b border-neutral-100 \
                                                   dark:border-neutral-700/50"
                                        >
                                            <td class="px-4 py-3">
                                                <input
                                                    type="checkbox"
                                                    checked={selected}
                                                    onchange={on_toggle}
                                                />
                                            </td>
                                            <td class={cell}>{&post.title}</td>
                                            <td class={cell}>{&post.slug}</td>
                                            <td class={cell}>
                                                <StatusBadge status={post.status} />
                                            </td>
                                            <td class={cell}>
                                                {format_date(&post.created_at)}
                                            </td>
                                            <td class="px-4 py-3 text-right">
                                                <button
                                                    onclick={on_edit}
                                                    class="text-sm text-blue-600 \
                                                           dark:text-blue-400 \
                                                           hover:underline mr-3"
                                                >
                                                    {"Edit"}
                                                </button>
                                                <button
                                                    onclick={on_delete}
                                                    disabled={delete.is_pending}
                                                    class="text-sm text-red-600 \
                                                           dark:text-red-400 \
                                                           hover:underline \
                                                           disabled:opacity-50"
                                                >
                                                    {"Delete"}
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }).collect::<Html>()}
                            </tbody>
                        </table>
                        <PaginationControls
                            pagination={page.pagination}
                            on_page_change={on_page_change.clone()}
                            on_per_page_change={on_per_page_change.clone()}
                            is_loading={is_loading}
                        />
                    </div>
                }
            })}

            if controller.dialogs.delete_target.is_some() {
                <ConfirmationModal
                    title="Delete post"
                    message="The post will be removed from the blog."
                    confirm_text="Delete"
                    on_confirm={on_confirm_delete}
                    on_close={on_close_dialogs.clone()}
                    is_loading={delete.is_pending}
                />
            }

            if controller.dialogs.bulk_delete_open {
                <ConfirmationModal
                    title="Delete selected posts"
                    message={format!(
                        "{selection_count} posts will be removed from the blog."
                    )}
                    confirm_text="Delete all"
                    on_confirm={on_confirm_bulk_delete}
                    on_close={on_close_dialogs}
                    is_loading={bulk_delete.is_pending}
                />
            }

            if let Some(target) = (*editing).clone() {
                <PostEditorModal post={target} on_close={on_close_editor} />
            }
        </main>
    }
}

#[derive(Properties, PartialEq)]
struct StatusBadgeProps {
    status: PostStatus,
}

#[function_component]
fn StatusBadge(props: &StatusBadgeProps) -> Html {
    let (text, classes) = match props.status {
        PostStatus::Published => (
            "Published",
            "bg-green-100 text-green-800 dark:bg-green-900/40 \
             dark:text-green-300",
        ),
        PostStatus::Draft => (
            "Draft",
            "bg-neutral-200 text-neutral-800 dark:bg-neutral-600 \
             dark:text-neutral-200",
        ),
    };

    html! {
        <span class={format!(
            "px-2 py-1 text-xs font-medium rounded-full {}",
            classes,
        )}>
            {text}
        </span>
    }
}

#[derive(Default, Clone, PartialEq)]
struct PostForm {
    title: String,
    slug: String,
    status_published: bool,
    content: String,
}

impl PostForm {
    fn from_post(post: &responses::BlogPost) -> Self {
        Self {
            title: post.title.clone(),
            slug: post.slug.clone(),
            status_published: post.status == PostStatus::Published,
            content: post.content.clone(),
        }
    }

    fn status(&self) -> PostStatus {
        if self.status_published {
            PostStatus::Published
        } else {
            PostStatus::Draft
        }
    }
}

#[derive(Properties, PartialEq)]
struct PostEditorModalProps {
    /// None creates a new post; Some edits an existing one.
    pub post: Option<responses::BlogPost>,
    pub on_close: Callback<()>,
}

#[function_component]
fn PostEditorModal(props: &PostEditorModalProps) -> Html {
    let form = use_state(|| {
        props
            .post
            .as_ref()
            .map(PostForm::from_post)
            .unwrap_or_default()
    });

    let create =
        use_create_blog_post(props.on_close.clone(), Callback::noop());
    let update =
        use_update_blog_post(props.on_close.clone(), Callback::noop());

    let is_pending = create.is_pending || update.is_pending;
    let field_error = |field: &str| {
        create
            .field_error(field)
            .or_else(|| update.field_error(field))
    };

    let on_title_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut form_data = (*form).clone();
            form_data.title = input.value();
            form.set(form_data);
        })
    };

    let on_slug_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut form_data = (*form).clone();
            form_data.slug = input.value();
            form.set(form_data);
        })
    };

    let on_status_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut form_data = (*form).clone();
            form_data.status_published = select.value() == "published";
            form.set(form_data);
        })
    };

    let on_content_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            let mut form_data = (*form).clone();
            form_data.content = area.value();
            form.set(form_data);
        })
    };

    let on_submit = {
        let form = form.clone();
        let post = props.post.clone();
        let create_run = create.run.clone();
        let update_run = update.run.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form_data = (*form).clone();
            let status = form_data.status();

            match &post {
                Some(post) => update_run.emit((
                    post.id,
                    UpdateBlogPost {
                        title: form_data.title,
                        slug: form_data.slug,
                        status,
                        content: form_data.content,
                    },
                )),
                None => create_run.emit(CreateBlogPost {
                    title: form_data.title,
                    slug: form_data.slug,
                    status,
                    content: form_data.content,
                }),
            }
        })
    };

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let heading = if props.post.is_some() {
        "Edit post"
    } else {
        "New post"
    };

    let input_class = "mt-1 w-full px-3 py-2 text-sm border \
                       border-neutral-300 dark:border-neutral-600 \
                       rounded-md bg-white dark:bg-neutral-700 \
                       text-neutral-900 dark:text-neutral-100";
    let label_class = "block text-sm font-medium text-neutral-700 \
                       dark:text-neutral-300";
    let error_class = "mt-1 text-sm text-red-600 dark:text-red-400";

    html! {
        <div class="fixed inset-0 bg-neutral-900 bg-opacity-50 z-50 \
                    flex items-center justify-center p-4">
            <div class="bg-white dark:bg-neutral-800 rounded-lg shadow-xl \
                        max-w-lg w-full p-6">
                <h3 class="text-lg font-semibold text-neutral-900 \
                           dark:text-neutral-100 mb-4">
                    {heading}
                </h3>
                <form onsubmit={on_submit} class="space-y-4">
                    <div>
                        <label for="post-title" class={label_class}>
                            {"Title"}
                        </label>
                        <input
                            id="post-title"
                            type="text"
                            value={form.title.clone()}
                            onchange={on_title_change}
                            disabled={is_pending}
                            class={input_class}
                        />
                        if let Some(error) = field_error("title") {
                            <p class={error_class}>{error}</p>
                        }
                    </div>

                    <div>
                        <label for="post-slug" class={label_class}>
                            {"Slug"}
                        </label>
                        <input
                            id="post-slug"
                            type="text"
                            value={form.slug.clone()}
                            onchange={on_slug_change}
                            disabled={is_pending}
                            class={input_class}
                        />
                        if let Some(error) = field_error("slug") {
                            <p class={error_class}>{error}</p>
                        }
                    </div>

                    <div>
                        <label for="post-status" class={label_class}>
                            {"Status"}
                        </label>
                        <select
                            id="post-status"
                            onchange={on_status_change}
                            disabled={is_pending}
                            class={input_class}
                        >
                            <option
                                value="draft"
                                selected={!form.status_published}
                            >
                                {"Draft"}
                            </option>
                            <option
                                value="published"
                                selected={form.status_published}
                            >
                                {"Published"}
                            </option>
                        </select>
                    </div>

                    <div>
                        <label for="post-content" class={label_class}>
                            {"Content"}
                        </label>
                        <textarea
                            id="post-content"
                            rows="8"
                            value={form.content.clone()}
                            onchange={on_content_change}
                            disabled={is_pending}
                            class={input_class}
                        />
                        if let Some(error) = field_error("content") {
                            <p class={error_class}>{error}</p>
                        }
                    </div>

                    <div class="flex justify-end gap-3">
                        <button
                            type="button"
                            onclick={on_cancel}
                            disabled={is_pending}
                            class="px-4 py-2 text-sm font-medium \
                                   text-neutral-700 dark:text-neutral-300 \
                                   border border-neutral-300 \
                                   dark:border-neutral-600 rounded-md"
                        >
                            {"Cancel"}
                        </button>
                        <button
                            type="submit"
                            disabled={is_pending}
                            class="px-4 py-2 text-sm font-medium text-white \
                                   bg-blue-600 hover:bg-blue-700 rounded-md \
                                   disabled:opacity-50"
                        >
                            {if is_pending { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
