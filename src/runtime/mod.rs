pub mod command;
pub mod effect;
pub mod key_bindings;
pub mod reducer;
pub mod runner;
pub mod scheduler;

pub use runner::Runtime;
