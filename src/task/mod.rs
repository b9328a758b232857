pub mod execution;
pub mod executor;
pub mod run_state;

pub use execution::{CancelToken, SubmitCompletion, SubmitInvocation, Submitter};
pub use executor::SubmitExecutor;
pub use run_state::SubmitRunState;
