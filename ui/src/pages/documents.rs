use payloads::requests::UploadDocument;
use payloads::{DocumentId, SortOrder, responses};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::update_controller;
use crate::access::{Capability, Guard};
use crate::components::{
    ColumnMenu, ConfirmationModal, PaginationControls, SortableHeader,
};
use crate::contexts::toast::use_toast;
use crate::get_api_client;
use crate::hooks::{
    use_bulk_delete_documents, use_delete_document, use_documents,
    use_upload_document,
};
use crate::list::{ListController, SortSpec};
use crate::utils::{format_date, format_size, sanitize_filename, save_file};

const COLUMNS: [(&str, &str, SortOrder); 4] = [
    ("title", "Title", SortOrder::Asc),
    ("file_name", "File", SortOrder::Asc),
    ("size_bytes", "Size", SortOrder::Asc),
    ("uploaded_at", "Uploaded", SortOrder::Desc),
];

#[function_component]
pub fn DocumentsPage() -> Html {
    html! {
        <Guard capability={Capability::Authenticated}>
            <DocumentsContent />
        </Guard>
    }
}

#[function_component]
fn DocumentsContent() -> Html {
    let controller = use_state(|| {
        ListController::new(
            SortSpec {
                by: "uploaded_at",
                order: SortOrder::Desc,
            },
            20,
            &["title", "file_name", "size_bytes", "uploaded_at"],
        )
    });
    let upload_open = use_state(|| false);

    let query = use_documents(controller.params());

    // Dialogs close on success; the selection is dropped on every
    // completed mutation, since the surviving ids are only knowable
    // from the re-fetch.
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

    let delete = use_delete_document(close_dialogs.clone(), on_settled.clone());
    let bulk_delete =
        use_bulk_delete_documents(close_dialogs.clone(), on_settled.clone());

    // --- Toolbar callbacks ---

    let on_query_input = {
        let controller = controller.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            update_controller(&controller, |c| c.stage_query(input.value()));
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

    let on_toggle_column = {
        let controller = controller.clone();
        Callback::from(move |field: &'static str| {
            update_controller(&controller, |c| c.toggle_column(field));
        })
    };

    let on_open_upload = {
        let upload_open = upload_open.clone();
        Callback::from(move |_: MouseEvent| upload_open.set(true))
    };

    let on_open_bulk_delete = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| {
            update_controller(&controller, |c| c.open_bulk_delete());
        })
    };

    // --- Table callbacks ---

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

    // --- Dialog plumbing ---

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
                run.emit(DocumentId(id));
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

    let on_close_upload = {
        let upload_open = upload_open.clone();
        Callback::from(move |_: ()| upload_open.set(false))
    };

    let selection_count = controller.selection().len();
    let staged_q = controller.staged_filters().q.clone();

    let column_menu_entries: Vec<(&'static str, AttrValue, bool)> = COLUMNS
        .iter()
        .map(|&(field, label, _)| {
            (field, AttrValue::from(label), controller.is_column_visible(field))
        })
        .collect();

    html! {
        <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
            <div class="flex justify-between items-center mb-6">
                <h1 class="text-2xl font-bold text-neutral-900 dark:text-neutral-100">
                    {"Documents"}
                </h1>
                <button
                    onclick={on_open_upload}
                    class="px-4 py-2 text-sm font-medium text-white \
                           bg-blue-600 hover:bg-blue-700 rounded-md"
                >
                    {"Upload document"}
                </button>
            </div>

            <div class="flex items-center gap-3 mb-4">
                <form onsubmit={on_apply} class="flex items-center gap-2">
                    <input
                        type="text"
                        placeholder="Search documents"
                        value={staged_q}
                        oninput={on_query_input}
                        class="px-3 py-2 text-sm border border-neutral-300 \
                               dark:border-neutral-600 rounded-md \
                               bg-white dark:bg-neutral-700 \
                               text-neutral-900 dark:text-neutral-100"
                    />
                    <button
                        type="submit"
                        class="px-3 py-2 text-sm font-medium border \
                               border-neutral-300 dark:border-neutral-600 \
                               rounded-md text-neutral-700 \
                               dark:text-neutral-300 \
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
                </form>

                <div class="ml-auto flex items-center gap-3">
                    if selection_count > 0 {
                        <button
                            onclick={on_open_bulk_delete}
                            disabled={bulk_delete.is_pending}
                            class="px-3 py-2 text-sm font-medium text-white \
                                   bg-red-600 hover:bg-red-700 rounded-md \
                                   disabled:opacity-50"
                        >
                            {format!("Delete selected ({selection_count})")}
                        </button>
                    }
                    <ColumnMenu
                        columns={column_menu_entries}
                        on_toggle={on_toggle_column}
                    />
                </div>
            </div>

            {query.render("documents", |page, is_loading, refetch_error| {
                let ids: Vec<uuid::Uuid> =
                    page.items.iter().map(|d| d.id.0).collect();
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
                        if is_loading {
                            <p class="text-sm text-neutral-500 \
                                      dark:text-neutral-400 mb-2">
                                {"Refreshing..."}
                            </p>
                        }
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
                                    {COLUMNS.iter().filter_map(|&(field, label, default_order)| {
                                        controller.is_column_visible(field).then(|| html! {
                                            <SortableHeader
                                                key={field}
                                                field={field}
                                                label={label}
                                                current={controller.sort()}
                                                default_order={default_order}
                                                on_sort={on_sort.clone()}
                                            />
                                        })
                                    }).collect::<Html>()}
                                    <th class="px-4 py-2"></th>
                                </tr>
                            </thead>
                            <tbody>
                                {page.items.iter().map(|document| html! {
                                    <DocumentRow
                                        key={document.id.to_string()}
                                        document={document.clone()}
                                        controller={controller.clone()}
                                        delete_pending={delete.is_pending}
                                    />
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
                    title="Delete document"
                    message="The file will be removed from your vault."
                    confirm_text="Delete"
                    on_confirm={on_confirm_delete}
                    on_close={on_close_dialogs.clone()}
                    is_loading={delete.is_pending}
                />
            }

            if controller.dialogs.bulk_delete_open {
                <ConfirmationModal
                    title="Delete selected documents"
                    message={format!(
                        "{selection_count} documents will be removed from \
                         your vault."
                    )}
                    confirm_text="Delete all"
                    on_confirm={on_confirm_bulk_delete}
                    on_close={on_close_dialogs}
                    is_loading={bulk_delete.is_pending}
                />
            }

            if *upload_open {
                <UploadModal on_close={on_close_upload} />
            }
        </main>
    }
}

#[derive(Properties, PartialEq)]
struct DocumentRowProps {
    document: responses::Document,
    controller: UseStateHandle<ListController>,
    delete_pending: bool,
}

#[function_component]
fn DocumentRow(props: &DocumentRowProps) -> Html {
    let toast = use_toast();
    let downloading = use_state(|| false);
    let document = &props.document;
    let controller = &props.controller;
    let selected = controller.is_selected(document.id.0);

    let on_toggle = {
        let controller = controller.clone();
        let id = document.id.0;
        Callback::from(move |_: Event| {
            update_controller(&controller, |c| c.toggle_row(id));
        })
    };

    let on_delete = {
        let controller = controller.clone();
        let id = document.id.0;
        Callback::from(move |_: MouseEvent| {
            update_controller(&controller, |c| c.open_delete(id));
        })
    };

    let on_download = {
        let downloading = downloading.clone();
        let toast = toast.clone();
        let id = document.id;
        let file_name = document.file_name.clone();
        let mime_type = document.mime_type.clone();
        Callback::from(move |_: MouseEvent| {
            if *downloading {
                return;
            }
            downloading.set(true);

            let downloading = downloading.clone();
            let toast = toast.clone();
            let file_name = file_name.clone();
            let mime_type = mime_type.clone();
            yew::platform::spawn_local(async move {
                match get_api_client().download_document(&id).await {
                    Ok(bytes) => {
                        if save_file(
                            &bytes,
                            &mime_type,
                            &sanitize_filename(&file_name),
                        )
                        .is_err()
                        {
                            toast.error("Could not save the file");
                        }
                    }
                    Err(err) => {
                        toast.error(format!("Download failed: {err}"));
                    }
                }
                downloading.set(false);
            });
        })
    };

    let cell = "px-4 py-3 text-sm text-neutral-900 dark:text-neutral-100";

    html! {
        <tr class="border-b border-neutral-100 dark:border-neutral-700/50">
            <td class="px-4 py-3">
                <input
                    type="checkbox"
                    checked={selected}
                    onchange={on_toggle}
                />
            </td>
            if controller.is_column_visible("title") {
                <td class={cell}>{&document.title}</td>
            }
            if controller.is_column_visible("file_name") {
                <td class={cell}>{&document.file_name}</td>
            }
            if controller.is_column_visible("size_bytes") {
                <td class={cell}>{format_size(document.size_bytes)}</td>
            }
            if controller.is_column_visible("uploaded_at") {
                <td class={cell}>{format_date(&document.uploaded_at)}</td>
            }
            <td class="px-4 py-3 text-right">
                <button
                    onclick={on_download}
                    disabled={*downloading}
                    class="text-sm text-blue-600 dark:text-blue-400 \
                           hover:underline disabled:opacity-50 mr-3"
                >
                    {if *downloading { "Downloading..." } else { "Download" }}
                </button>
                <button
                    onclick={on_delete}
                    disabled={props.delete_pending}
                    class="text-sm text-red-600 dark:text-red-400 \
                           hover:underline disabled:opacity-50"
                >
                    {"Delete"}
                </button>
            </td>
        </tr>
    }
}

#[derive(Clone, PartialEq)]
struct PickedFile {
    file_name: String,
    mime_type: String,
    data: Vec<u8>,
}

#[derive(Properties, PartialEq)]
struct UploadModalProps {
    on_close: Callback<()>,
}

#[function_component]
fn UploadModal(props: &UploadModalProps) -> Html {
    let title = use_state(String::new);
    let picked = use_state(|| None::<PickedFile>);
    let local_error = use_state(|| None::<String>);

    let upload =
        use_upload_document(props.on_close.clone(), Callback::noop());

    let on_title_change = {
        let title = title.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            title.set(input.value());
        })
    };

    let on_file_change = {
        let picked = picked.clone();
        let local_error = local_error.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(file) = input.files().and_then(|files| files.get(0))
            else {
                picked.set(None);
                return;
            };

            let picked = picked.clone();
            let local_error = local_error.clone();
            yew::platform::spawn_local(async move {
                match crate::utils::read_file(&file).await {
                    Ok(data) => {
                        local_error.set(None);
                        picked.set(Some(PickedFile {
                            file_name: file.name(),
                            mime_type: file.type_(),
                            data,
                        }));
                    }
                    Err(_) => {
                        local_error
                            .set(Some("Could not read the file".to_string()));
                    }
                }
            });
        })
    };

    let on_submit = {
        let title = title.clone();
        let picked = picked.clone();
        let local_error = local_error.clone();
        let run = upload.run.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let Some(file) = (*picked).clone() else {
                local_error.set(Some("Please choose a file".to_string()));
                return;
            };
            run.emit(UploadDocument {
                title: (*title).clone(),
                file_name: file.file_name,
                mime_type: file.mime_type,
                data: file.data,
            });
        })
    };

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let title_error = upload.field_error("title");
    let file_error =
        (*local_error).clone().or_else(|| upload.field_error("file"));

    html! {
        <div class="fixed inset-0 bg-neutral-900 bg-opacity-50 z-50 \
                    flex items-center justify-center p-4">
            <div class="bg-white dark:bg-neutral-800 rounded-lg shadow-xl \
                        max-w-md w-full p-6">
                <h3 class="text-lg font-semibold text-neutral-900 \
                           dark:text-neutral-100 mb-4">
                    {"Upload document"}
                </h3>
                <form onsubmit={on_submit} class="space-y-4">
                    <div>
                        <label
                            for="document-title"
                            class="block text-sm font-medium \
                                   text-neutral-700 dark:text-neutral-300"
                        >
                            {"Title"}
                        </label>
                        <input
                            id="document-title"
                            type="text"
                            value={(*title).clone()}
                            onchange={on_title_change}
                            disabled={upload.is_pending}
                            class="mt-1 w-full px-3 py-2 text-sm border \
                                   border-neutral-300 dark:border-neutral-600 \
                                   rounded-md bg-white dark:bg-neutral-700 \
                                   text-neutral-900 dark:text-neutral-100"
                        />
                        if let Some(error) = title_error {
                            <p class="mt-1 text-sm text-red-600 \
                                      dark:text-red-400">
                                {error}
                            </p>
                        }
                    </div>

                    <div>
                        <label
                            for="document-file"
                            class="block text-sm font-medium \
                                   text-neutral-700 dark:text-neutral-300"
                        >
                            {"File"}
                        </label>
                        <input
                            id="document-file"
                            type="file"
                            onchange={on_file_change}
                            disabled={upload.is_pending}
                            class="mt-1 w-full text-sm text-neutral-700 \
                                   dark:text-neutral-300"
                        />
                        if let Some(error) = file_error {
                            <p class="mt-1 text-sm text-red-600 \
                                      dark:text-red-400">
                                {error}
                            </p>
                        }
                    </div>

                    <div class="flex justify-end gap-3">
                        <button
                            type="button"
                            onclick={on_cancel}
                            disabled={upload.is_pending}
                            class="px-4 py-2 text-sm font-medium \
                                   text-neutral-700 dark:text-neutral-300 \
                                   border border-neutral-300 \
                                   dark:border-neutral-600 rounded-md"
                        >
                            {"Cancel"}
                        </button>
                        <button
                            type="submit"
                            disabled={upload.is_pending}
                            class="px-4 py-2 text-sm font-medium text-white \
                                   bg-blue-600 hover:bg-blue-700 rounded-md \
                                   disabled:opacity-50"
                        >
                            {if upload.is_pending { "Uploading..." } else { "Upload" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
