pub mod cli;
pub mod content;
pub mod error;
pub mod form;
pub mod reveal;
pub mod runtime;
pub mod section;
pub mod state;
pub mod task;
pub mod terminal;
pub mod ui;
pub mod validators;

pub use error::{FolioError, Result, SubmitError};
