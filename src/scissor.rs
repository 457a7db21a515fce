//! The scissor test.
use gl::types::GLboolean;

use crate::{gl_check, utils::Rect};

pub fn set_enabled(enabled: bool) {
    unsafe {
        if enabled {
            gl_check!(gl::Enable(gl::SCISSOR_TEST));
        } else {
            gl_check!(gl::Disable(gl::SCISSOR_TEST));
        }
    }
}

pub fn is_enabled() -> bool {
    let enabled: GLboolean = unsafe { gl_check!(gl::IsEnabled(gl::SCISSOR_TEST)) };
    enabled != gl::FALSE
}

/// Set the scissor box. Only has an effect while the test is enabled.
pub fn set(x: i32, y: i32, width: i32, height: i32) {
    unsafe { gl_check!(gl::Scissor(x, y, width, height)) };
}

pub fn set_rect(rect: Rect) {
    set(rect.x(), rect.y(), rect.width(), rect.height());
}

pub fn rect() -> Rect {
    let mut rect = Rect::default();
    unsafe { gl_check!(gl::GetIntegerv(gl::SCISSOR_BOX, rect.as_mut_array().as_mut_ptr())) };
    rect
}
