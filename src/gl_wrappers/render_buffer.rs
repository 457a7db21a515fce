//! Exports [`RenderBuffer`].
use gl::types::{GLenum, GLint, GLuint};

use super::NotSend;
use crate::gl_check;

/// Wrapper for an OpenGL render buffer object.
///
/// Storage and parameter calls act on the bound render buffer.
///
/// <https://www.khronos.org/opengl/wiki/Renderbuffer_Object>
#[derive(Debug)]
pub struct RenderBuffer {
    id: GLuint,
    _not_send: NotSend,
}

impl_gl_object!(RenderBuffer, |id| {
    is: gl_check!(gl::IsRenderbuffer(id)),
    delete: gl_check!(gl::DeleteRenderbuffers(1, &id)),
});

impl RenderBuffer {
    pub fn new() -> Self {
        let mut id = 0;
        unsafe { gl_check!(gl::GenRenderbuffers(1, &mut id)) };
        Self {
            id,
            _not_send: NotSend::default(),
        }
    }

    /// # Safety
    /// `id` must be a render buffer name not owned by anything else.
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

    pub fn set_storage(&mut self, internal_format: GLenum, width: i32, height: i32) {
        check_bound!(self);
        unsafe {
            gl_check!(gl::RenderbufferStorage(
                gl::RENDERBUFFER,
                internal_format,
                width,
                height
            ))
        };
    }

    #[cfg(glwrap_has = "renderbuffer_multisample")]
    pub fn set_storage_multisample(
        &mut self,
        samples: i32,
        internal_format: GLenum,
        width: i32,
        height: i32,
    ) {
        check_bound!(self);
        unsafe {
            gl_check!(gl::RenderbufferStorageMultisample(
                gl::RENDERBUFFER,
                samples,
                internal_format,
                width,
                height
            ))
        };
    }

    fn parameter(&self, name: GLenum) -> GLint {
        check_bound!(self);
        let mut result = 0;
        unsafe {
            gl_check!(gl::GetRenderbufferParameteriv(
                gl::RENDERBUFFER,
                name,
                &mut result
            ))
        };
        result
    }

    pub fn width(&self) -> i32 {
        self.parameter(gl::RENDERBUFFER_WIDTH)
    }

    pub fn height(&self) -> i32 {
        self.parameter(gl::RENDERBUFFER_HEIGHT)
    }

    pub fn internal_format(&self) -> GLenum {
        self.parameter(gl::RENDERBUFFER_INTERNAL_FORMAT) as GLenum
    }

    /// Bits per red component.
    pub fn red_size(&self) -> i32 {
        self.parameter(gl::RENDERBUFFER_RED_SIZE)
    }

    pub fn green_size(&self) -> i32 {
        self.parameter(gl::RENDERBUFFER_GREEN_SIZE)
    }

    pub fn blue_size(&self) -> i32 {
        self.parameter(gl::RENDERBUFFER_BLUE_SIZE)
    }

    pub fn alpha_size(&self) -> i32 {
        self.parameter(gl::RENDERBUFFER_ALPHA_SIZE)
    }

    pub fn depth_size(&self) -> i32 {
        self.parameter(gl::RENDERBUFFER_DEPTH_SIZE)
    }

    pub fn stencil_size(&self) -> i32 {
        self.parameter(gl::RENDERBUFFER_STENCIL_SIZE)
    }

    #[cfg(glwrap_has = "renderbuffer_samples")]
    pub fn samples(&self) -> i32 {
        self.parameter(gl::RENDERBUFFER_SAMPLES)
    }

    /// Largest width or height the implementation accepts.
    pub fn max_size() -> i32 {
        let mut result = 0;
        unsafe { gl_check!(gl::GetIntegerv(gl::MAX_RENDERBUFFER_SIZE, &mut result)) };
        result
    }

    pub fn bound_id() -> GLuint {
        let mut bound = 0;
        unsafe { gl_check!(gl::GetIntegerv(gl::RENDERBUFFER_BINDING, &mut bound)) };
        bound as GLuint
    }

    pub fn set_bound_id(id: GLuint) {
        unsafe { gl_check!(gl::BindRenderbuffer(gl::RENDERBUFFER, id)) };
    }

    pub fn is_bound(&self) -> bool {
        self.is_ok() && self.id == Self::bound_id()
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
