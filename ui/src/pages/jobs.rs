use payloads::requests::CreateJob;
use payloads::{EmploymentType, JobId, JobStatus, SortOrder};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use super::update_controller;
use crate::access::{Capability, Guard};
use crate::components::{
    ConfirmationModal, PaginationControls, SortableHeader,
};
use crate::hooks::{
    use_bulk_delete_jobs, use_create_job, use_delete_job, use_jobs,
};
use crate::list::{ListController, SortSpec};
use crate::utils::format_date;

#[function_component]
pub fn JobsPage() -> Html {
    html! {
        <Guard capability={Capability::Admin}>
            <JobsContent />
        </Guard>
    }
}

#[function_component]
fn JobsContent() -> Html {
    let controller = use_state(|| {
        ListController::new(
            SortSpec {
                by: "posted_at",
                order: SortOrder::Desc,
            },
            20,
            &["title", "company", "location", "posted_at"],
        )
    });
    let create_open = use_state(|| false);

    let query = use_jobs(controller.params());

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

    let delete = use_delete_job(close_dialogs.clone(), on_settled.clone());
    let bulk_delete =
        use_bulk_delete_jobs(close_dialogs.clone(), on_settled.clone());

    let on_open_filter = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| {
            update_controller(&controller, |c| c.open_filter());
        })
    };

    let on_open_create = {
        let create_open = create_open.clone();
        Callback::from(move |_: MouseEvent| create_open.set(true))
    };

    let on_close_create = {
        let create_open = create_open.clone();
        Callback::from(move |_: ()| create_open.set(false))
    };

    let on_open_bulk_delete = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| {
            update_controller(&controller, |c| c.open_bulk_delete());
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
                run.emit(JobId(id));
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

    html! {
        <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
            <div class="flex justify-between items-center mb-6">
                <h1 class="text-2xl font-bold text-neutral-900 dark:text-neutral-100">
                    {"Jobs"}
                </h1>
                <div class="flex items-center gap-3">
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
                    <button
                        onclick={on_open_filter}
                        class="px-3 py-2 text-sm font-medium border \
                               border-neutral-300 dark:border-neutral-600 \
                               rounded-md text-neutral-700 \
                               dark:text-neutral-300 \
                               hover:bg-neutral-50 dark:hover:bg-neutral-600"
                    >
                        {if controller.has_active_filters() {
                            "Filters (active)"
                        } else {
                            "Filters"
                        }}
                    </button>
                    <button
                        onclick={on_open_create}
                        class="px-4 py-2 text-sm font-medium text-white \
                               bg-blue-600 hover:bg-blue-700 rounded-md"
                    >
                        {"New job"}
                    </button>
                </div>
            </div>

            {query.render("jobs", |page, is_loading, refetch_error| {
                let ids: Vec<uuid::Uuid> =
                    page.items.iter().map(|j| j.id.0).collect();
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
                                        field="company"
                                        label="Company"
                                        current={controller.sort()}
                                        on_sort={on_sort.clone()}
                                    />
                                    <th class="px-4 py-2 text-left text-xs \
                                               font-medium uppercase \
                                               tracking-wider text-neutral-500 \
                                               dark:text-neutral-400">
                                        {"Type"}
                                    </th>
                                    <SortableHeader
                                        field="posted_at"
                                        label="Posted"
                                        current={controller.sort()}
                                        default_order={SortOrder::Desc}
                                        on_sort={on_sort.clone()}
                                    />
                                    <th class="px-4 py-2"></th>
                                </tr>
                            </thead>
                            <tbody>
                                {page.items.iter().map(|job| {
                                    let selected =
                                        controller.is_selected(job.id.0);
                                    let on_toggle = {
                                        let controller = controller.clone();
                                        let id = job.id.0;
                                        Callback::from(move |_: Event| {
                                            update_controller(&controller, |c| {
                                                c.toggle_row(id);
                                            });
                                        })
                                    };
                                    let on_delete = {
                                        let controller = controller.clone();
                                        let id = job.id.0;
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
                                            key={job.id.to_string()}
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
                                            <td class={cell}>
                                                {&job.title}
                                                if job.status == JobStatus::Closed {
                                                    <span class="ml-2 px-2 py-0.5 \
                                                                 text-xs rounded-full \
                                                                 bg-neutral-200 \
                                                                 dark:bg-neutral-600">
                                                        {"Closed"}
                                                    </span>
                                                }
                                            </td>
                                            <td class={cell}>
                                                {format!(
                                                    "{} ({})",
                                                    job.company, job.location,
                                                )}
                                            </td>
                                            <td class={cell}>
                                                {job.employment_type.as_str()}
                                            </td>
                                            <td class={cell}>
                                                {format_date(&job.posted_at)}
                                            </td>
                                            <td class="px-4 py-3 text-right">
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

            if controller.dialogs.filter_open {
                <JobFilterDialog controller={controller.clone()} />
            }

            if controller.dialogs.delete_target.is_some() {
                <ConfirmationModal
                    title="Delete job"
                    message="The listing will be removed from the job board."
                    confirm_text="Delete"
                    on_confirm={on_confirm_delete}
                    on_close={on_close_dialogs.clone()}
                    is_loading={delete.is_pending}
                />
            }

            if controller.dialogs.bulk_delete_open {
                <ConfirmationModal
                    title="Delete selected jobs"
                    message={format!(
                        "{selection_count} listings will be removed from the \
                         job board."
                    )}
                    confirm_text="Delete all"
                    on_confirm={on_confirm_bulk_delete}
                    on_close={on_close_dialogs}
                    is_loading={bulk_delete.is_pending}
                />
            }

            if *create_open {
                <JobEditorModal on_close={on_close_create} />
            }
        </main>
    }
}

#[derive(Properties, PartialEq)]
struct JobFilterDialogProps {
    controller: UseStateHandle<ListController>,
}

/// Staged filters edited in a dialog; nothing reaches the query
/// parameters until Apply.
#[function_component]
fn JobFilterDialog(props: &JobFilterDialogProps) -> Html {
    let controller = &props.controller;
    let staged = controller.staged_filters();
    let staged_q = staged.q.clone();
    let staged_type = staged
        .fields
        .get("employment_type")
        .cloned()
        .unwrap_or_default();
    let staged_status =
        staged.fields.get("status").cloned().unwrap_or_default();

    let on_query_input = {
        let controller = controller.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            update_controller(&controller, |c| c.stage_query(input.value()));
        })
    };

    let on_type_change = {
        let controller = controller.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            update_controller(&controller, |c| {
                c.stage_filter("employment_type", select.value());
            });
        })
    };

    let on_status_change = {
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

    let on_cancel = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| {
            update_controller(&controller, |c| c.close_dialogs());
        })
    };

    let input_class = "mt-1 w-full px-3 py-2 text-sm border \
                       border-neutral-300 dark:border-neutral-600 \
                       rounded-md bg-white dark:bg-neutral-700 \
                       text-neutral-900 dark:text-neutral-100";
    let label_class = "block text-sm font-medium text-neutral-700 \
                       dark:text-neutral-300";

    html! {
        <div class="fixed inset-0 bg-neutral-900 bg-opacity-50 z-50 \
                    flex items-center justify-center p-4">
            <div class="bg-white dark:bg-neutral-800 rounded-lg shadow-xl \
                        max-w-md w-full p-6">
                <h3 class="text-lg font-semibold text-neutral-900 \
                           dark:text-neutral-100 mb-4">
                    {"Filter jobs"}
                </h3>
                <form onsubmit={on_apply} class="space-y-4">
                    <div>
                        <label for="job-q" class={label_class}>
                            {"Search"}
                        </label>
                        <input
                            id="job-q"
                            type="text"
                            value={staged_q}
                            oninput={on_query_input}
                            class={input_class}
                        />
                    </div>

                    <div>
                        <label for="job-type" class={label_class}>
                            {"Employment type"}
                        </label>
                        <select
                            id="job-type"
                            onchange={on_type_change}
                            class={input_class}
                        >
                            <option value="" selected={staged_type.is_empty()}>
                                {"Any"}
                            </option>
                            {[
                                EmploymentType::FullTime,
                                EmploymentType::PartTime,
                                EmploymentType::Contract,
                                EmploymentType::Internship,
                            ].iter().map(|employment_type| html! {
                                <option
                                    value={employment_type.as_str()}
                                    selected={
                                        staged_type == employment_type.as_str()
                                    }
                                >
                                    {employment_type.as_str()}
                                </option>
                            }).collect::<Html>()}
                        </select>
                    </div>

                    <div>
                        <label for="job-status" class={label_class}>
                            {"Status"}
                        </label>
                        <select
                            id="job-status"
                            onchange={on_status_change}
                            class={input_class}
                        >
                            <option value="" selected={staged_status.is_empty()}>
                                {"Any"}
                            </option>
                            <option
                                value="open"
                                selected={staged_status == "open"}
                            >
                                {"Open"}
                            </option>
                            <option
                                value="closed"
                                selected={staged_status == "closed"}
                            >
                                {"Closed"}
                            </option>
                        </select>
                    </div>

                    <div class="flex justify-end gap-3">
                        <button
                            type="button"
                            onclick={on_reset}
                            class="px-4 py-2 text-sm text-neutral-500 \
                                   dark:text-neutral-400 underline mr-auto"
                        >
                            {"Reset"}
                        </button>
                        <button
                            type="button"
                            onclick={on_cancel}
                            class="px-4 py-2 text-sm font-medium \
                                   text-neutral-700 dark:text-neutral-300 \
                                   border border-neutral-300 \
                                   dark:border-neutral-600 rounded-md"
                        >
                            {"Cancel"}
                        </button>
                        <button
                            type="submit"
                            class="px-4 py-2 text-sm font-medium text-white \
                                   bg-blue-600 hover:bg-blue-700 rounded-md"
                        >
                            {"Apply"}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}

#[derive(Default, Clone, PartialEq)]
struct JobForm {
    title: String,
    company: String,
    location: String,
    employment_type: String,
}

#[derive(Properties, PartialEq)]
struct JobEditorModalProps {
    on_close: Callback<()>,
}

#[function_component]
fn JobEditorModal(props: &JobEditorModalProps) -> Html {
    let form = use_state(JobForm::default);

    let create = use_create_job(props.on_close.clone(), Callback::noop());

    let on_text_change = |apply: fn(&mut JobForm, String)| {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut form_data = (*form).clone();
            apply(&mut form_data, input.value());
            form.set(form_data);
        })
    };

    let on_title_change = on_text_change(|f, v| f.title = v);
    let on_company_change = on_text_change(|f, v| f.company = v);
    let on_location_change = on_text_change(|f, v| f.location = v);

    let on_type_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut form_data = (*form).clone();
            form_data.employment_type = select.value();
            form.set(form_data);
        })
    };

    let on_submit = {
        let form = form.clone();
        let run = create.run.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form_data = (*form).clone();

            let employment_type = match form_data.employment_type.as_str() {
                "part-time" => EmploymentType::PartTime,
                "contract" => EmploymentType::Contract,
                "internship" => EmploymentType::Internship,
                _ => EmploymentType::FullTime,
            };
            // New listings start open; closing happens on the backend
            // side of the board.
            run.emit(CreateJob {
                title: form_data.title,
                company: form_data.company,
                location: form_data.location,
                employment_type,
                status: JobStatus::Open,
            });
        })
    };

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
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
                        max-w-md w-full p-6">
                <h3 class="text-lg font-semibold text-neutral-900 \
                           dark:text-neutral-100 mb-4">
                    {"New job"}
                </h3>
                <form onsubmit={on_submit} class="space-y-4">
                    <div>
                        <label for="job-title" class={label_class}>
                            {"Title"}
                        </label>
                        <input
                            id="job-title"
                            type="text"
                            value={form.title.clone()}
                            onchange={on_title_change}
                            disabled={create.is_pending}
                            class={input_class}
                        />
                        if let Some(error) = create.field_error("title") {
                            <p class={error_class}>{error}</p>
                        }
                    </div>

                    <div>
                        <label for="job-company" class={label_class}>
                            {"Company"}
                        </label>
                        <input
                            id="job-company"
                            type="text"
                            value={form.company.clone()}
                            onchange={on_company_change}
                            disabled={create.is_pending}
                            class={input_class}
                        />
                        if let Some(error) = create.field_error("company") {
                            <p class={error_class}>{error}</p>
                        }
                    </div>

                    <div>
                        <label for="job-location" class={label_class}>
                            {"Location"}
                        </label>
                        <input
                            id="job-location"
                            type="text"
                            value={form.location.clone()}
                            onchange={on_location_change}
                            disabled={create.is_pending}
                            class={input_class}
                        />
                        if let Some(error) = create.field_error("location") {
                            <p class={error_class}>{error}</p>
                        }
                    </div>

                    <div>
                        <label for="job-form-type" class={label_class}>
                            {"Employment type"}
                        </label>
                        <select
                            id="job-form-type"
                            onchange={on_type_change}
                            disabled={create.is_pending}
                            class={input_class}
                        >
                            {[
                                EmploymentType::FullTime,
                                EmploymentType::PartTime,
                                EmploymentType::Contract,
                                EmploymentType::Internship,
                            ].iter().map(|employment_type| html! {
                                <option
                                    value={employment_type.as_str()}
                                    selected={
                                        form.employment_type
                                            == employment_type.as_str()
                                    }
                                >
                                    {employment_type.as_str()}
                                </option>
                            }).collect::<Html>()}
                        </select>
                    </div>

                    <div class="flex justify-end gap-3">
                        <button
                            type="button"
                            onclick={on_cancel}
                            disabled={create.is_pending}
                            class="px-4 py-2 text-sm font-medium \
                                   text-neutral-700 dark:text-neutral-300 \
                                   border border-neutral-300 \
                                   dark:border-neutral-600 rounded-md"
                        >
                            {"Cancel"}
                        </button>
                        <button
                            type="submit"
                            disabled={create.is_pending}
                            class="px-4 py-2 text-sm font-medium text-white \
                                   bg-blue-600 hover:bg-blue-700 rounded-md \
                                   disabled:opacity-50"
                        >
                            {if create.is_pending { "Creating..." } else { "Create" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
