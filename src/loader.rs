//! Function address resolution.
//!
//! The embedding application owns the context and knows how to look up entry
//! points (SDL, GLFW, EGL, ...). [`load_with`] hands that lookup to the `gl`
//! crate and keeps it around for entry points the bindings do not cover,
//! such as the `OES` vertex array functions.
use std::{cell::RefCell, ffi::c_void, ptr::null};

use crate::config;

type Resolver = Box<dyn Fn(&str) -> *const c_void>;

thread_local! {
    // The thread that owns the context.
    static RESOLVER: RefCell<Option<Resolver>> = const { RefCell::new(None) };
}

/// Load all entry points through `resolver` and remember it.
///
/// Returns `true` if the core entry points could be resolved.
///
/// # Usage
/// ```no_run
/// # fn lookup(_: &str) -> *const std::ffi::c_void { std::ptr::null() }
/// if !glwrap::loader::load_with(lookup) {
///     panic!("no OpenGL");
/// }
/// ```
pub fn load_with<F>(resolver: F) -> bool
where
    F: Fn(&str) -> *const c_void + 'static,
{
    gl::load_with(&resolver);
    RESOLVER.with(|slot| *slot.borrow_mut() = Some(Box::new(resolver)));

    if is_loaded() {
        log::info!(
            "OpenGL loader initialized ({:?} {}.{}, GLSL {})",
            config::CONTEXT.api,
            config::CONTEXT.major,
            config::CONTEXT.minor,
            config::glsl_version_str()
        );
        true
    } else {
        log::error!("OpenGL loader init error: core entry points could not be resolved");
        false
    }
}

/// Load entry points through SDL2.
///
/// The video subsystem must have a current GL context.
#[cfg(feature = "sdl2")]
pub fn load_with_sdl2(video: &sdl2::VideoSubsystem) -> bool {
    let video = video.clone();
    load_with(move |name| video.gl_get_proc_address(name).cast())
}

/// Whether [`load_with`] resolved the core entry points.
pub fn is_loaded() -> bool {
    gl::GetError::is_loaded() && gl::GetIntegerv::is_loaded() && gl::GetString::is_loaded()
}

/// Address of the entry point `name`, or null.
///
/// Logs an error and returns null if no resolver was installed on this
/// thread.
pub fn get_proc_address(name: &str) -> *const c_void {
    RESOLVER.with(|slot| match slot.borrow().as_ref() {
        Some(resolver) => resolver(name),
        None => {
            log::error!("get_proc_address() not implemented! Can't get '{name}'");
            null()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_without_resolver_is_null() {
        // Each test runs on its own thread, so nothing is installed here.
        assert!(get_proc_address("glGenVertexArraysOES").is_null());
    }
}
