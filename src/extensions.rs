//! Extension queries.
//!
//! OpenGL 3.0 and OpenGL ES 3.0 list extensions one by one through
//! `glGetStringi`; older contexts return one space separated string.
use std::ffi::{c_char, CStr};

use gl::types::{GLubyte, GLuint};

use crate::gl_check;

/// Split `text` on spaces, dropping empty pieces.
pub fn split_by_space(text: &str) -> Vec<String> {
    text.split(' ')
        .filter(|piece| !piece.is_empty())
        .map(str::to_owned)
        .collect()
}

/// # Safety
/// `text` is null or a NUL terminated string returned by the driver.
unsafe fn driver_string(text: *const GLubyte) -> Option<String> {
    if text.is_null() {
        return None;
    }
    Some(
        CStr::from_ptr(text.cast::<c_char>())
            .to_string_lossy()
            .into_owned(),
    )
}

fn indexed_extensions() -> Vec<String> {
    let mut count = 0;
    unsafe { gl_check!(gl::GetIntegerv(gl::NUM_EXTENSIONS, &mut count)) };

    let mut extensions = Vec::with_capacity(usize::try_from(count).unwrap_or(0));
    for index in 0..count.max(0) as GLuint {
        let text = unsafe { gl_check!(gl::GetStringi(gl::EXTENSIONS, index)) };
        match unsafe { driver_string(text) } {
            Some(name) => extensions.push(name),
            None => return Vec::new(),
        }
    }
    extensions
}

fn legacy_extensions() -> Vec<String> {
    let text = unsafe { gl_check!(gl::GetString(gl::EXTENSIONS)) };
    unsafe { driver_string(text) }
        .map(|text| split_by_space(&text))
        .unwrap_or_default()
}

/// Every extension the current context reports. Empty if the query fails.
pub fn extensions() -> Vec<String> {
    if cfg!(glwrap_has = "indexed_extensions") {
        indexed_extensions()
    } else {
        legacy_extensions()
    }
}

/// Whether the current context reports the extension `name`,
/// e.g. `"GL_OES_vertex_array_object"`.
pub fn is_extension_supported(name: &str) -> bool {
    extensions().iter().any(|extension| extension == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_strings_have_no_extensions() {
        for text in ["", " ", "  ", "   ", "    "] {
            assert!(split_by_space(text).is_empty(), "{text:?}");
        }
    }

    #[test]
    fn surrounding_and_repeated_spaces_are_dropped() {
        for text in ["qwe", " qwe ", "qwe   ", "   qwe   "] {
            assert_eq!(split_by_space(text), ["qwe"], "{text:?}");
        }
        for text in [
            "   qwe   asd zxc",
            "   qwe   asd zxc   ",
            "   qwe   asd   zxc",
            "   qwe   asd   zxc   ",
        ] {
            assert_eq!(split_by_space(text), ["qwe", "asd", "zxc"], "{text:?}");
        }
    }

    #[test]
    fn only_spaces_separate() {
        assert_eq!(
            split_by_space("GL_ARB_a\tGL_ARB_b GL_OES_c"),
            ["GL_ARB_a\tGL_ARB_b", "GL_OES_c"]
        );
    }

    #[test]
    fn null_driver_string_is_none() {
        assert_eq!(unsafe { driver_string(std::ptr::null()) }, None);
        let text = b"GL_KHR_debug\0";
        assert_eq!(
            unsafe { driver_string(text.as_ptr()) }.as_deref(),
            Some("GL_KHR_debug")
        );
    }
}
