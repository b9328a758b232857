pub mod layout;
pub mod page;
pub mod renderer;
pub mod span;
pub mod spinner;
pub mod style;
pub mod theme;

pub use page::Page;
pub use renderer::{RenderFrame, Renderer};
