//! UI Components
//!
//! Pages, dialogs and the small widgets they share.

mod tab_bar;
mod search_box;
mod garment_selector;
mod modal;
mod delete_confirm_modal;
mod toast_stack;
mod measurement_card;
mod measurement_form_modal;
mod measurement_page;
mod client_modal;
mod client_page;

pub use tab_bar::{Page, TabBar};
pub use search_box::SearchBox;
pub use garment_selector::GarmentSelector;
pub use modal::Modal;
pub use delete_confirm_modal::DeleteConfirmModal;
pub use toast_stack::ToastStack;
pub use measurement_card::MeasurementCard;
pub use measurement_form_modal::MeasurementFormModal;
pub use measurement_page::MeasurementPage;
pub use client_modal::ClientModal;
pub use client_page::ClientPage;
