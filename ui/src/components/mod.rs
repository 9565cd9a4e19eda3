pub mod column_menu;
pub mod confirmation_modal;
pub mod header;
pub mod pagination_controls;
pub mod sortable_header;
pub mod toast_container;

pub use column_menu::ColumnMenu;
pub use confirmation_modal::ConfirmationModal;
pub use header::Header;
pub use pagination_controls::PaginationControls;
pub use sortable_header::SortableHeader;
pub use toast_container::ToastContainer;
