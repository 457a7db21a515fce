//! The viewport transform.
use crate::{gl_check, utils::Rect};

/// Set the viewport.
pub fn set(x: i32, y: i32, width: i32, height: i32) {
    // SAFETY:
    // gl::Viewport only reports GL_INVALID_VALUE for negative sizes.
    unsafe { gl_check!(gl::Viewport(x, y, width, height)) };
}

pub fn set_rect(rect: Rect) {
    set(rect.x(), rect.y(), rect.width(), rect.height());
}

/// Cover a whole `width` x `height` surface, e.g. after a window resize.
pub fn set_size(width: u32, height: u32) {
    let width = i32::try_from(width).unwrap_or(i32::MAX);
    let height = i32::try_from(height).unwrap_or(i32::MAX);
    set_rect(Rect::from_size(width, height));
}

pub fn rect() -> Rect {
    let mut rect = Rect::default();
    unsafe { gl_check!(gl::GetIntegerv(gl::VIEWPORT, rect.as_mut_array().as_mut_ptr())) };
    rect
}

/// Largest supported `(width, height)`.
pub fn max_dimensions() -> (i32, i32) {
    let mut dimensions = [0; 2];
    unsafe { gl_check!(gl::GetIntegerv(gl::MAX_VIEWPORT_DIMS, dimensions.as_mut_ptr())) };
    (dimensions[0], dimensions[1])
}
