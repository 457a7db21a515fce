//! Small value types handed to GL by pointer.
pub mod color;
pub mod rect;

pub use color::ColorRgba;
pub use rect::Rect;
