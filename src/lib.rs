//! Thin, owning wrappers over OpenGL and OpenGL ES.
//!
//! The crate does not create contexts. The application creates one, hands
//! its function lookup to [`loader::load_with`] and then uses the wrappers
//! from the thread that owns the context.
//!
//! The profile and version are fixed at build time (see [`config`]); methods
//! the configured context cannot provide are not compiled.
//!
//! # Usage
//! ```no_run
//! use glwrap::gl_wrappers::{Buffer, BufferTarget, BufferUsage};
//!
//! # fn lookup(_: &str) -> *const std::ffi::c_void { std::ptr::null() }
//! glwrap::logging::init_logging(Default::default());
//! glwrap::loader::load_with(lookup);
//!
//! let mut vertices = Buffer::new(BufferTarget::Array);
//! vertices.bind();
//! vertices.set_data(&[0.0f32, 0.5, -0.5, -0.5, 0.5, -0.5], BufferUsage::StaticDraw);
//! ```

pub mod config;
pub mod extensions;
pub mod gl_error;
pub mod gl_version;
pub mod gl_wrappers;
pub mod glsl_version;
pub mod loader;
pub mod logging;
pub mod program_utils;
pub mod scissor;
pub mod utils;
pub mod viewport;

pub use gl;

pub use gl_error::{check_gl_error, gl_error_to_str};
pub use gl_version::{pack_version, ContextVersion, Feature, GlApi};
pub use gl_wrappers::GlObject;
pub use glsl_version::{glsl_version, GlslVersion};
pub use utils::{ColorRgba, Rect};
