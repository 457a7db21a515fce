//! Exports [`VertexArray`].
//!
//! Vertex arrays are core on desktop GL and OpenGL ES 3.0, but only an
//! extension (`GL_OES_vertex_array_object`) on OpenGL ES 2.0. The entry
//! points are therefore resolved once, on first use, instead of through the
//! `gl` crate directly.
use std::{ffi::c_void, mem, sync::OnceLock};

use gl::types::{GLboolean, GLsizei, GLuint};

use super::NotSend;
use crate::{gl_check, loader};

type GenFn = unsafe extern "system" fn(GLsizei, *mut GLuint);
type DeleteFn = unsafe extern "system" fn(GLsizei, *const GLuint);
type BindFn = unsafe extern "system" fn(GLuint);
type IsFn = unsafe extern "system" fn(GLuint) -> GLboolean;

/// Extension entry point names, in the order of [`VertexArrayFns`].
const OES_NAMES: [&str; 4] = [
    "glGenVertexArraysOES",
    "glDeleteVertexArraysOES",
    "glBindVertexArrayOES",
    "glIsVertexArrayOES",
];

#[derive(Clone, Copy)]
struct VertexArrayFns {
    generate: GenFn,
    delete: DeleteFn,
    bind: BindFn,
    is_array: IsFn,
}

impl VertexArrayFns {
    /// Stand-ins that only log.
    const UNSUPPORTED: Self = Self {
        generate: unsupported_gen,
        delete: unsupported_delete,
        bind: unsupported_bind,
        is_array: unsupported_is,
    };

    const CORE: Self = Self {
        generate: core_gen,
        delete: core_delete,
        bind: core_bind,
        is_array: core_is,
    };
}

unsafe extern "system" fn unsupported_gen(n: GLsizei, arrays: *mut GLuint) {
    log::error!("glGenVertexArrays({n}, {arrays:p}) not supported!");
}

unsafe extern "system" fn unsupported_delete(n: GLsizei, arrays: *const GLuint) {
    log::error!("glDeleteVertexArrays({n}, {arrays:p}) not supported!");
}

unsafe extern "system" fn unsupported_bind(array: GLuint) {
    log::error!("glBindVertexArray({array}) not supported!");
}

unsafe extern "system" fn unsupported_is(array: GLuint) -> GLboolean {
    log::error!("glIsVertexArray({array}) not supported!");
    gl::FALSE
}

unsafe extern "system" fn core_gen(n: GLsizei, arrays: *mut GLuint) {
    gl::GenVertexArrays(n, arrays)
}

unsafe extern "system" fn core_delete(n: GLsizei, arrays: *const GLuint) {
    gl::DeleteVertexArrays(n, arrays)
}

unsafe extern "system" fn core_bind(array: GLuint) {
    gl::BindVertexArray(array)
}

unsafe extern "system" fn core_is(array: GLuint) -> GLboolean {
    gl::IsVertexArray(array)
}

/// Core entry points as loaded into the `gl` crate.
fn resolve_core() -> Option<VertexArrayFns> {
    let loaded = gl::GenVertexArrays::is_loaded()
        && gl::DeleteVertexArrays::is_loaded()
        && gl::BindVertexArray::is_loaded()
        && gl::IsVertexArray::is_loaded();
    loaded.then_some(VertexArrayFns::CORE)
}

/// Extension entry points looked up through `resolve`.
fn resolve_oes<F>(resolve: F) -> Option<VertexArrayFns>
where
    F: Fn(&str) -> *const c_void,
{
    let [generate, delete, bind, is_array] = OES_NAMES.map(|name| {
        let address = resolve(name);
        log::debug!("{name} -> {address:p}");
        address
    });
    if [generate, delete, bind, is_array].iter().any(|address| address.is_null()) {
        return None;
    }

    // SAFETY: non-null addresses returned for these names have the
    // signatures declared by GL_OES_vertex_array_object.
    unsafe {
        Some(VertexArrayFns {
            generate: mem::transmute::<*const c_void, GenFn>(generate),
            delete: mem::transmute::<*const c_void, DeleteFn>(delete),
            bind: mem::transmute::<*const c_void, BindFn>(bind),
            is_array: mem::transmute::<*const c_void, IsFn>(is_array),
        })
    }
}

/// Pick the entry points for a context with or without core vertex arrays.
///
/// All four come from the same source; if any is missing, none is used.
fn resolve_vertex_array_fns<F>(core: bool, resolve: F) -> VertexArrayFns
where
    F: Fn(&str) -> *const c_void,
{
    let resolved = if core {
        resolve_core()
    } else {
        resolve_oes(resolve)
    };
    resolved.unwrap_or_else(|| {
        log::error!("VertexArray function pointers invalid!");
        VertexArrayFns::UNSUPPORTED
    })
}

static FNS: OnceLock<VertexArrayFns> = OnceLock::new();

fn fns() -> &'static VertexArrayFns {
    FNS.get_or_init(|| {
        resolve_vertex_array_fns(
            cfg!(glwrap_has = "core_vertex_arrays"),
            loader::get_proc_address,
        )
    })
}

/// Wrapper for an OpenGL vertex array object.
///
/// <https://www.khronos.org/opengl/wiki/Vertex_Specification#Vertex_Array_Object>
#[derive(Debug)]
pub struct VertexArray {
    id: GLuint,
    _not_send: NotSend,
}

impl_gl_object!(VertexArray, |id| {
    is: gl_check!((fns().is_array)(id)),
    delete: gl_check!((fns().delete)(1, &id)),
});

impl VertexArray {
    /// Generate a vertex array name. Without vertex array support the name
    /// is `0` and an error is logged.
    pub fn new() -> Self {
        let mut id = 0;
        unsafe { gl_check!((fns().generate)(1, &mut id)) };
        Self {
            id,
            _not_send: NotSend::default(),
        }
    }

    /// # Safety
    /// `id` must be a vertex array name not owned by anything else.
    pub unsafe fn from_raw(id: GLuint) -> Self {
        Self {
            id,
            _not_send: NotSend::default(),
        }
    }

    pub fn bind(&self) {
        Self::set_bound_id(self.id);
    }

    pub fn unbind() {
        Self::set_bound_id(0);
    }

    pub fn bound_id() -> GLuint {
        let mut bound = 0;
        unsafe { gl_check!(gl::GetIntegerv(gl::VERTEX_ARRAY_BINDING, &mut bound)) };
        bound as GLuint
    }

    pub fn set_bound_id(id: GLuint) {
        unsafe { gl_check!((fns().bind)(id)) };
    }

    pub fn is_bound(&self) -> bool {
        self.is_ok() && self.id == Self::bound_id()
    }
}

impl Default for VertexArray {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, ptr::null};

    use super::*;

    thread_local! {
        static BOUND: Cell<GLuint> = const { Cell::new(0) };
    }

    unsafe extern "system" fn fake_gen(n: GLsizei, arrays: *mut GLuint) {
        for i in 0..n as usize {
            *arrays.add(i) = 40 + i as GLuint;
        }
    }

    unsafe extern "system" fn fake_delete(_: GLsizei, _: *const GLuint) {}

    unsafe extern "system" fn fake_bind(array: GLuint) {
        BOUND.with(|bound| bound.set(array));
    }

    unsafe extern "system" fn fake_is(array: GLuint) -> GLboolean {
        if array >= 40 {
            gl::TRUE
        } else {
            gl::FALSE
        }
    }

    fn fake_resolver(skip: Option<&'static str>) -> impl Fn(&str) -> *const c_void {
        move |name| {
            if Some(name) == skip {
                return null();
            }
            match name {
                "glGenVertexArraysOES" => fake_gen as GenFn as *const c_void,
                "glDeleteVertexArraysOES" => fake_delete as DeleteFn as *const c_void,
                "glBindVertexArrayOES" => fake_bind as BindFn as *const c_void,
                "glIsVertexArrayOES" => fake_is as IsFn as *const c_void,
                _ => null(),
            }
        }
    }

    #[test]
    fn oes_entry_points_are_used_when_all_resolve() {
        let fns = resolve_vertex_array_fns(false, fake_resolver(None));
        let mut id = 0;
        unsafe {
            (fns.generate)(1, &mut id);
            (fns.bind)(id);
            assert_eq!((fns.is_array)(id), gl::TRUE);
            (fns.delete)(1, &id);
        }
        assert_eq!(id, 40);
        assert_eq!(BOUND.with(Cell::get), 40);
    }

    #[test]
    fn one_missing_entry_point_disables_all() {
        for missing in OES_NAMES {
            let fns = resolve_vertex_array_fns(false, fake_resolver(Some(missing)));
            let mut id = 0;
            unsafe {
                (fns.generate)(1, &mut id);
                (fns.bind)(99);
                assert_eq!((fns.is_array)(40), gl::FALSE);
                (fns.delete)(1, &id);
            }
            assert_eq!(id, 0, "{missing}");
            assert_eq!(BOUND.with(Cell::get), 0, "{missing}");
        }
    }

    #[test]
    fn core_path_without_loaded_driver_falls_back() {
        // Nothing is loaded in unit tests, so the core path cannot resolve.
        let fns = resolve_vertex_array_fns(true, fake_resolver(None));
        let mut id = 0;
        unsafe { (fns.generate)(1, &mut id) };
        assert_eq!(id, 0);
    }
}
