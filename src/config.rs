//! Build-time configuration of the wrapped context.
//!
//! The profile comes from the `gles` cargo feature and the version from the
//! `GLWRAP_GL_VERSION` environment variable (`MAJOR.MINOR`) at build time.

use crate::{
    gl_check,
    gl_version::{ContextVersion, GlApi},
    glsl_version::{glsl_version, GlslVersion},
};

include!(concat!(env!("OUT_DIR"), "/context.rs"));

/// GLSL version matching [`CONTEXT`].
pub const GLSL_VERSION: GlslVersion =
    glsl_version(CONTEXT.major as i32, CONTEXT.minor as i32, CONTEXT.api);

const _: () = assert!(GLSL_VERSION.is_defined(), "Cannot resolve GLSL version!");

/// Whether post-call error checks are compiled in.
pub const CHECK_GL_ERRORS: bool = cfg!(feature = "check-gl-errors");

/// Whether bound-state assertions are compiled in.
pub const CHECK_BOUND: bool = cfg!(feature = "check-bound");

/// The `#version` token for [`CONTEXT`], e.g. `"330"` or `"300 es"`.
pub fn glsl_version_str() -> &'static str {
    // Undefined versions are rejected at compile time above.
    GLSL_VERSION.token.unwrap_or_default()
}

/// Ask the current context for its `(major, minor)` version.
///
/// Requires OpenGL 3.0 / OpenGL ES 3.0; older contexts report `(0, 0)`.
pub fn query_context_version() -> (i32, i32) {
    let mut major = 0;
    let mut minor = 0;
    unsafe {
        gl_check!(gl::GetIntegerv(gl::MAJOR_VERSION, &mut major));
        gl_check!(gl::GetIntegerv(gl::MINOR_VERSION, &mut minor));
    }
    (major, minor)
}
