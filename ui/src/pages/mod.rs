pub mod blog_posts;
pub mod documents;
pub mod home;
pub mod jobs;
pub mod login;
pub mod not_found;

pub use blog_posts::BlogPostsPage;
pub use documents::DocumentsPage;
pub use home::HomePage;
pub use jobs::JobsPage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;

use yew::prelude::*;

use crate::list::ListController;

/// Clone-mutate-set for the controller held in component state, the
/// same idiom the form pages use for their form structs.
pub(crate) fn update_controller<F>(
    handle: &UseStateHandle<ListController>,
    mutate: F,
) where
    F: FnOnce(&mut ListController),
{
    let mut controller = (**handle).clone();
    mutate(&mut controller);
    handle.set(controller);
}
