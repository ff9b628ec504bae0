//! UI Components
//!
//! Reusable Leptos components.

mod confirm_modal;
mod crud_table;
mod detail_drawer;
mod footer_toolbar;
mod modal_form;
mod role_menu_form;
mod screen_tab_bar;
mod toast_host;

pub use confirm_modal::ConfirmModal;
pub use crud_table::CrudTable;
pub use detail_drawer::DetailDrawer;
pub use footer_toolbar::FooterToolbar;
pub use modal_form::ModalForm;
pub use role_menu_form::RoleMenuForm;
pub use screen_tab_bar::ScreenTabBar;
pub use toast_host::ToastHost;
