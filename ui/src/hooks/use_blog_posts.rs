use payloads::requests::{self, ListParams};
use payloads::{BlogPostId, responses};
use uuid::Uuid;
use yew::prelude::*;
use yewdux::prelude::*;

use super::use_mutation::{MutationHandle, use_mutation};
use super::use_page_query::{PageQueryHandle, use_page_query};
use crate::contexts::toast::use_toast;
use crate::get_api_client;
use crate::state::State;

/// Admin view of blog posts (drafts included).
#[hook]
pub fn use_blog_posts(
    params: ListParams,
) -> PageQueryHandle<responses::BlogPost> {
    use_page_query(
        "blog-posts",
        params,
        |state: &State| &state.blog_posts,
        |state: &mut State| &mut state.blog_posts,
        |params| async move {
            get_api_client().list_blog_posts(&params).await
        },
    )
}

/// Public view over the same entity; a separate cache namespace that
/// goes stale together with the admin view.
#[hook]
pub fn use_published_posts(
    params: ListParams,
) -> PageQueryHandle<responses::BlogPost> {
    use_page_query(
        "posts",
        params,
        |state: &State| &state.published_posts,
        |state: &mut State| &mut state.published_posts,
        |params| async move {
            get_api_client().list_published_posts(&params).await
        },
    )
}

#[hook]
pub fn use_create_blog_post(
    on_success: Callback<()>,
    on_settled: Callback<()>,
) -> MutationHandle<requests::CreateBlogPost> {
    let (_, dispatch) = use_store::<State>();
    let toast = use_toast();

    let success = Callback::from(move |post: responses::BlogPost| {
        dispatch.reduce_mut(|state| state.invalidate_blog_posts());
        toast.success(format!("Created \"{}\"", post.title));
        on_success.emit(());
    });

    use_mutation(
        "create blog post",
        |details: requests::CreateBlogPost| async move {
            get_api_client().create_blog_post(&details).await
        },
        success,
        on_settled,
    )
}

#[hook]
pub fn use_update_blog_post(
    on_success: Callback<()>,
    on_settled: Callback<()>,
) -> MutationHandle<(BlogPostId, requests::UpdateBlogPost)> {
    let (_, dispatch) = use_store::<State>();
    let toast = use_toast();

    let success = Callback::from(move |post: responses::BlogPost| {
        dispatch.reduce_mut(|state| state.invalidate_blog_posts());
        toast.success(format!("Updated \"{}\"", post.title));
        on_success.emit(());
    });

    use_mutation(
        "update blog post",
        |(id, details): (BlogPostId, requests::UpdateBlogPost)| async move {
            get_api_client().update_blog_post(&id, &details).await
        },
        success,
        on_settled,
    )
}

#[hook]
pub fn use_delete_blog_post(
    on_success: Callback<()>,
    on_settled: Callback<()>,
) -> MutationHandle<BlogPostId> {
    let (_, dispatch) = use_store::<State>();
    let toast = use_toast();

    let success = Callback::from(move |_: ()| {
        dispatch.reduce_mut(|state| state.invalidate_blog_posts());
        toast.success("Post deleted");
        on_success.emit(());
    });

    use_mutation(
        "delete blog post",
        |id: BlogPostId| async move {
            get_api_client().delete_blog_post(&id).await
        },
        success,
        on_settled,
    )
}

#[hook]
pub fn use_bulk_delete_blog_posts(
    on_success: Callback<()>,
    on_settled: Callback<()>,
) -> MutationHandle<Vec<Uuid>> {
    let (_, dispatch) = use_store::<State>();
    let toast = use_toast();

    let success = Callback::from(move |result: responses::BulkDeleteResult| {
        dispatch.reduce_mut(|state| state.invalidate_blog_posts());
        toast.success(format!("Deleted {} posts", result.deleted));
        on_success.emit(());
    });

    use_mutation(
        "delete blog posts",
        |ids: Vec<Uuid>| async move {
            get_api_client()
                .bulk_delete_blog_posts(&requests::BulkDelete { ids })
                .await
        },
        success,
        on_settled,
    )
}
