pub mod app_state;
pub mod contact;
pub mod text_edit;

pub use app_state::AppState;
pub use contact::ContactSection;
