pub mod contact;
pub mod controller;
pub mod errors;
pub mod record;

pub use contact::{ContactField, ContactForm, SimulatedSubmitter, validate_contact};
pub use controller::{FormController, FormValidator, SubmitStatus};
pub use errors::{FieldErrors, Touched};
pub use record::FormRecord;
