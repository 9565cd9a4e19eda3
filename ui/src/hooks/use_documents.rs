use payloads::requests::{self, ListParams};
use payloads::{DocumentId, responses};
use uuid::Uuid;
use yew::prelude::*;
use yewdux::prelude::*;

use super::use_mutation::{MutationHandle, use_mutation};
use super::use_page_query::{PageQueryHandle, use_page_query};
use crate::contexts::toast::use_toast;
use crate::get_api_client;
use crate::state::State;

#[hook]
pub fn use_documents(
    params: ListParams,
) -> PageQueryHandle<responses::Document> {
    use_page_query(
        "documents",
        params,
        |state: &State| &state.documents,
        |state: &mut State| &mut state.documents,
        |params| async move {
            get_api_client().list_documents(&params).await
        },
    )
}

#[hook]
pub fn use_upload_document(
    on_success: Callback<()>,
    on_settled: Callback<()>,
) -> MutationHandle<requests::UploadDocument> {
    let (_, dispatch) = use_store::<State>();
    let toast = use_toast();

    let success = Callback::from(move |document: responses::Document| {
        dispatch.reduce_mut(|state| state.invalidate_documents());
        toast.success(format!("Uploaded \"{}\"", document.title));
        on_success.emit(());
    });

    use_mutation(
        "upload document",
        |details: requests::UploadDocument| async move {
            get_api_client().upload_document(&details).await
        },
        success,
        on_settled,
    )
}

#[hook]
pub fn use_delete_document(
    on_success: Callback<()>,
    on_settled: Callback<()>,
) -> MutationHandle<DocumentId> {
    let (_, dispatch) = use_store::<State>();
    let toast = use_toast();

    let success = Callback::from(move |_: ()| {
        dispatch.reduce_mut(|state| state.invalidate_documents());
        toast.success("Document deleted");
        on_success.emit(());
    });

    use_mutation(
        "delete document",
        |id: DocumentId| async move {
            get_api_client().delete_document(&id).await
        },
        success,
        on_settled,
    )
}

#[hook]
pub fn use_bulk_delete_documents(
    on_success: Callback<()>,
    on_settled: Callback<()>,
) -> MutationHandle<Vec<Uuid>> {
    let (_, dispatch) = use_store::<State>();
    let toast = use_toast();

    let success = Callback::from(move |result: responses::BulkDeleteResult| {
        // Some ids may not have been deletable; either way the cached
        // lists are stale now.
        dispatch.reduce_mut(|state| state.invalidate_documents());
        toast.success(format!("Deleted {} documents", result.deleted));
        on_success.emit(());
    });

    use_mutation(
        "delete documents",
        |ids: Vec<Uuid>| async move {
            get_api_client()
                .bulk_delete_documents(&requests::BulkDelete { ids })
                .await
        },
        success,
        on_settled,
    )
}
