pub mod observer;
pub mod viewport;

pub use observer::{IntersectionSource, REVEAL_THRESHOLD, RevealOnView};
pub use viewport::{Bounds, Viewport, ViewportSource};
