use payloads::requests::{self, ListParams};
use payloads::{JobId, responses};
use uuid::Uuid;
use yew::prelude::*;
use yewdux::prelude::*;

use super::use_mutation::{MutationHandle, use_mutation};
use super::use_page_query::{PageQueryHandle, use_page_query};
use crate::contexts::toast::use_toast;
use crate::get_api_client;
use crate::state::State;

#[hook]
pub fn use_jobs(params: ListParams) -> PageQueryHandle<responses::Job> {
    use_page_query(
        "jobs",
        params,
        |state: &State| &state.jobs,
        |state: &mut State| &mut state.jobs,
        |params| async move { get_api_client().list_jobs(&params).await },
    )
}

#[hook]
pub fn use_create_job(
    on_success: Callback<()>,
    on_settled: Callback<()>,
) -> MutationHandle<requests::CreateJob> {
    let (_, dispatch) = use_store::<State>();
    let toast = use_toast();

    let success = Callback::from(move |job: responses::Job| {
        dispatch.reduce_mut(|state| state.invalidate_jobs());
        toast.success(format!("Created \"{}\"", job.title));
        on_success.emit(());
    });

    use_mutation(
        "create job",
        |details: requests::CreateJob| async move {
            get_api_client().create_job(&details).await
        },
        success,
        on_settled,
    )
}

#[hook]
pub fn use_delete_job(
    on_success: Callback<()>,
    on_settled: Callback<()>,
) -> MutationHandle<JobId> {
    let (_, dispatch) = use_store::<State>();
    let toast = use_toast();

    let success = Callback::from(move |_: ()| {
        dispatch.reduce_mut(|state| state.invalidate_jobs());
        toast.success("Job deleted");
        on_success.emit(());
    });

    use_mutation(
        "delete job",
        |id: JobId| async move { get_api_client().delete_job(&id).await },
        success,
        on_settled,
    )
}

#[hook]
pub fn use_bulk_delete_jobs(
    on_success: Callback<()>,
    on_settled: Callback<()>,
) -> MutationHandle<Vec<Uuid>> {
    let (_, dispatch) = use_store::<State>();
    let toast = use_toast();

    let success = Callback::from(move |result: responses::BulkDeleteResult| {
        dispatch.reduce_mut(|state| state.invalidate_jobs());
        toast.success(format!("Deleted {} jobs", result.deleted));
        on_success.emit(());
    });

    use_mutation(
        "delete jobs",
        |ids: Vec<Uuid>| async move {
            get_api_client()
                .bulk_delete_jobs(&requests::BulkDelete { ids })
                .await
        },
        success,
        on_settled,
    )
}
