//! Post-call error checking.
//!
//! Every wrapped call goes through [`gl_check!`]. With the `check-gl-errors`
//! feature the macro queries `glGetError()` after the call and logs anything
//! pending; without it the macro is just the expression.

use gl::types::GLenum;

/// Not exported by core profile bindings.
pub const STACK_OVERFLOW: GLenum = 0x0503;
/// Not exported by core profile bindings.
pub const STACK_UNDERFLOW: GLenum = 0x0504;

/// Symbolic name of a `glGetError()` code, or `"Unknown"`.
pub fn gl_error_to_str(error: GLenum) -> &'static str {
    match error {
        gl::NO_ERROR => "GL_NO_ERROR",
        gl::INVALID_ENUM => "GL_INVALID_ENUM",
        gl::INVALID_VALUE => "GL_INVALID_VALUE",
        gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
        gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        _ => "Unknown",
    }
}

/// Log the pending OpenGL error, if any.
///
/// Returns `true` if an error was pending. `expression` is the source text of
/// the call that preceded this check.
pub fn check_gl_error(file: &str, line: u32, expression: &str) -> bool {
    // SAFETY: glGetError has no preconditions beyond a current context.
    let error = unsafe { gl::GetError() };
    if error != gl::NO_ERROR {
        log::error!(
            "OpenGL error: {:08x} ({}) at {}:{} - for \"{}\"",
            error,
            gl_error_to_str(error),
            file,
            line,
            expression
        );
        return true;
    }
    false
}

/// Run a GL call and, with the `check-gl-errors` feature, check for errors.
///
/// Evaluates to the value of the call.
///
/// # Usage
/// ```no_run
/// use glwrap::gl_check;
///
/// let mut id = 0;
/// unsafe { gl_check!(gl::GenBuffers(1, &mut id)) };
/// ```
#[cfg(feature = "check-gl-errors")]
#[macro_export]
macro_rules! gl_check {
    ($call:expr) => {{
        let result = $call;
        $crate::gl_error::check_gl_error(file!(), line!(), stringify!($call));
        result
    }};
}

/// Run a GL call and, with the `check-gl-errors` feature, check for errors.
///
/// Evaluates to the value of the call.
///
/// # Usage
/// ```no_run
/// use glwrap::gl_check;
///
/// let mut id = 0;
/// unsafe { gl_check!(gl::GenBuffers(1, &mut id)) };
/// ```
#[cfg(not(feature = "check-gl-errors"))]
#[macro_export]
macro_rules! gl_check {
    ($call:expr) => {
        $call
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_error_names() {
        assert_eq!(gl_error_to_str(gl::NO_ERROR), "GL_NO_ERROR");
        assert_eq!(gl_error_to_str(0x0500), "GL_INVALID_ENUM");
        assert_eq!(gl_error_to_str(0x0501), "GL_INVALID_VALUE");
        assert_eq!(gl_error_to_str(0x0502), "GL_INVALID_OPERATION");
        assert_eq!(gl_error_to_str(0x0503), "GL_STACK_OVERFLOW");
        assert_eq!(gl_error_to_str(0x0504), "GL_STACK_UNDERFLOW");
        assert_eq!(gl_error_to_str(0x0505), "GL_OUT_OF_MEMORY");
        assert_eq!(gl_error_to_str(0x0506), "GL_INVALID_FRAMEBUFFER_OPERATION");
    }

    #[test]
    fn unknown_codes_fall_back() {
        for code in [0x0001, 0x0507, 0xFFFF, GLenum::MAX] {
            assert_eq!(gl_error_to_str(code), "Unknown");
        }
    }

    #[test]
    fn macro_yields_the_value() {
        // Only plain expressions here: with `check-gl-errors` the macro
        // would call into the (unloaded) driver.
        #[cfg(not(feature = "check-gl-errors"))]
        {
            let value = gl_check!(40 + 2);
            assert_eq!(value, 42);
        }
    }
}
