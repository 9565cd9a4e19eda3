pub mod use_authentication;
pub mod use_blog_posts;
pub mod use_documents;
pub mod use_jobs;
pub mod use_mutation;
pub mod use_page_query;

pub use use_authentication::{use_authentication, use_logout};
pub use use_blog_posts::{
    use_blog_posts, use_bulk_delete_blog_posts, use_create_blog_post,
    use_delete_blog_post, use_published_posts, use_update_blog_post,
};
pub use use_documents::{
    use_bulk_delete_documents, use_delete_document, use_documents,
    use_upload_document,
};
pub use use_jobs::{
    use_bulk_delete_jobs, use_create_job, use_delete_job, use_jobs,
};
pub use use_mutation::{MutationHandle, use_mutation};
pub use use_page_query::{PageQueryHandle, use_page_query};
