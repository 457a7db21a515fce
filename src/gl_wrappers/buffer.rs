//! Exports [`Buffer`].
use std::ptr::null;

use bytemuck::Pod;
use gl::types::{GLenum, GLint, GLintptr, GLsizeiptr, GLuint};

use super::NotSend;
use crate::gl_check;

/// `GL_TEXTURE_BUFFER_BINDING`, missing from the core bindings.
const TEXTURE_BUFFER_BINDING: GLenum = 0x8C2A;

gl_enum! {
    /// Binding point of a [`Buffer`].
    pub enum BufferTarget {
        Array = ARRAY_BUFFER,
        AtomicCounter = ATOMIC_COUNTER_BUFFER,
        CopyRead = COPY_READ_BUFFER,
        CopyWrite = COPY_WRITE_BUFFER,
        DispatchIndirect = DISPATCH_INDIRECT_BUFFER,
        DrawIndirect = DRAW_INDIRECT_BUFFER,
        ElementArray = ELEMENT_ARRAY_BUFFER,
        PixelPack = PIXEL_PACK_BUFFER,
        PixelUnpack = PIXEL_UNPACK_BUFFER,
        Query = QUERY_BUFFER,
        ShaderStorage = SHADER_STORAGE_BUFFER,
        Texture = TEXTURE_BUFFER,
        TransformFeedback = TRANSFORM_FEEDBACK_BUFFER,
        Uniform = UNIFORM_BUFFER,
    }
}

impl BufferTarget {
    /// The `glGetIntegerv` query that returns the buffer bound here.
    pub const fn binding_query(self) -> GLenum {
        match self {
            Self::Array => gl::ARRAY_BUFFER_BINDING,
            Self::AtomicCounter => gl::ATOMIC_COUNTER_BUFFER_BINDING,
            Self::CopyRead => gl::COPY_READ_BUFFER_BINDING,
            Self::CopyWrite => gl::COPY_WRITE_BUFFER_BINDING,
            Self::DispatchIndirect => gl::DISPATCH_INDIRECT_BUFFER_BINDING,
            Self::DrawIndirect => gl::DRAW_INDIRECT_BUFFER_BINDING,
            Self::ElementArray => gl::ELEMENT_ARRAY_BUFFER_BINDING,
            Self::PixelPack => gl::PIXEL_PACK_BUFFER_BINDING,
            Self::PixelUnpack => gl::PIXEL_UNPACK_BUFFER_BINDING,
            Self::Query => gl::QUERY_BUFFER_BINDING,
            Self::ShaderStorage => gl::SHADER_STORAGE_BUFFER_BINDING,
            Self::Texture => TEXTURE_BUFFER_BINDING,
            Self::TransformFeedback => gl::TRANSFORM_FEEDBACK_BUFFER_BINDING,
            Self::Uniform => gl::UNIFORM_BUFFER_BINDING,
        }
    }

    /// What the binding point is used for.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Array => "Vertex attributes",
            Self::AtomicCounter => "Atomic counter storage",
            Self::CopyRead => "Buffer copy source",
            Self::CopyWrite => "Buffer copy destination",
            Self::DispatchIndirect => "Indirect compute dispatch commands",
            Self::DrawIndirect => "Indirect command arguments",
            Self::ElementArray => "Vertex array indices",
            Self::PixelPack => "Pixel read target",
            Self::PixelUnpack => "Texture data source",
            Self::Query => "Query result buffer",
            Self::ShaderStorage => "Read-write storage for shaders",
            Self::Texture => "Texture data buffer",
            Self::TransformFeedback => "Transform feedback buffer",
            Self::Uniform => "Uniform block storage",
        }
    }
}

gl_enum! {
    /// Usage hint for [`Buffer::set_data`].
    pub enum BufferUsage {
        StreamDraw = STREAM_DRAW,
        StreamRead = STREAM_READ,
        StreamCopy = STREAM_COPY,
        StaticDraw = STATIC_DRAW,
        StaticRead = STATIC_READ,
        StaticCopy = STATIC_COPY,
        DynamicDraw = DYNAMIC_DRAW,
        DynamicRead = DYNAMIC_READ,
        DynamicCopy = DYNAMIC_COPY,
    }
}

/// Wrapper for an OpenGL buffer object.
///
/// Content and parameter calls act on whatever is bound to the target, so
/// [`bind`](Self::bind) first. With `check-bound` this is asserted.
///
/// <https://www.khronos.org/opengl/wiki/Buffer_Object>
#[derive(Debug)]
pub struct Buffer {
    id: GLuint,
    target: BufferTarget,
    _not_send: NotSend,
}

impl_gl_object!(Buffer, |id| {
    is: gl_check!(gl::IsBuffer(id)),
    delete: gl_check!(gl::DeleteBuffers(1, &id)),
});

impl Buffer {
    /// Generate a buffer name for `target`.
    ///
    /// The object itself is created on the first [`bind`](Self::bind).
    pub fn new(target: BufferTarget) -> Self {
        let mut id = 0;
        unsafe { gl_check!(gl::GenBuffers(1, &mut id)) };
        Self {
            id,
            target,
            _not_send: NotSend::default(),
        }
    }

    /// # Safety
    /// `id` must be a buffer name not owned by anything else.
    pub unsafe fn from_raw(id: GLuint, target: BufferTarget) -> Self {
        Self {
            id,
            target,
            _not_send: NotSend::default(),
        }
    }

    pub fn target(&self) -> BufferTarget {
        self.target
    }

    pub fn bind(&self) {
        Self::set_bound_id(self.target, self.id);
    }

    pub fn unbind(&self) {
        Self::set_bound_id(self.target, 0);
    }

    /// Replace the whole store with `data`.
    pub fn set_data<T: Pod>(&mut self, data: &[T], usage: BufferUsage) {
        self.set_data_bytes(bytemuck::cast_slice(data), usage);
    }

    pub fn set_data_bytes(&mut self, data: &[u8], usage: BufferUsage) {
        check_bound!(self);
        unsafe {
            gl_check!(gl::BufferData(
                self.target.to_raw(),
                data.len() as GLsizeiptr,
                data.as_ptr().cast(),
                usage.to_raw()
            ))
        };
    }

    /// Reserve `size` bytes of uninitialized storage.
    pub fn allocate(&mut self, size: usize, usage: BufferUsage) {
        check_bound!(self);
        unsafe {
            gl_check!(gl::BufferData(
                self.target.to_raw(),
                size as GLsizeiptr,
                null(),
                usage.to_raw()
            ))
        };
    }

    /// Overwrite part of the store, starting `offset` bytes in.
    ///
    /// The range must lie inside the current store; the driver reports
    /// `GL_INVALID_VALUE` otherwise.
    pub fn set_sub_data<T: Pod>(&mut self, offset: usize, data: &[T]) {
        check_bound!(self);
        let bytes: &[u8] = bytemuck::cast_slice(data);
        unsafe {
            gl_check!(gl::BufferSubData(
                self.target.to_raw(),
                offset as GLintptr,
                bytes.len() as GLsizeiptr,
                bytes.as_ptr().cast()
            ))
        };
    }

    fn parameter(&self, name: GLenum) -> GLint {
        check_bound!(self);
        let mut result = 0;
        unsafe {
            gl_check!(gl::GetBufferParameteriv(
                self.target.to_raw(),
                name,
                &mut result
            ))
        };
        result
    }

    /// `GL_READ_ONLY`, `GL_WRITE_ONLY` or `GL_READ_WRITE`.
    #[cfg(glwrap_has = "buffer_access")]
    pub fn access(&self) -> GLenum {
        self.parameter(gl::BUFFER_ACCESS) as GLenum
    }

    pub fn access_flags(&self) -> GLenum {
        self.parameter(gl::BUFFER_ACCESS_FLAGS) as GLenum
    }

    #[cfg(glwrap_has = "buffer_immutable_storage")]
    pub fn is_immutable_storage(&self) -> bool {
        self.parameter(gl::BUFFER_IMMUTABLE_STORAGE) != GLint::from(gl::FALSE)
    }

    pub fn is_mapped(&self) -> bool {
        self.parameter(gl::BUFFER_MAPPED) != GLint::from(gl::FALSE)
    }

    pub fn map_length(&self) -> usize {
        self.parameter(gl::BUFFER_MAP_LENGTH).max(0) as usize
    }

    pub fn map_offset(&self) -> usize {
        self.parameter(gl::BUFFER_MAP_OFFSET).max(0) as usize
    }

    /// Size of the store in bytes.
    pub fn size(&self) -> usize {
        self.parameter(gl::BUFFER_SIZE).max(0) as usize
    }

    #[cfg(glwrap_has = "buffer_storage_flags")]
    pub fn storage_flags(&self) -> GLenum {
        self.parameter(gl::BUFFER_STORAGE_FLAGS) as GLenum
    }

    pub fn usage(&self) -> Option<BufferUsage> {
        BufferUsage::from_raw(self.parameter(gl::BUFFER_USAGE) as GLenum)
    }

    /// Name of the buffer currently bound to this buffer's target.
    pub fn bound_id(&self) -> GLuint {
        let mut bound = 0;
        unsafe { gl_check!(gl::GetIntegerv(self.target.binding_query(), &mut bound)) };
        bound as GLuint
    }

    /// Bind `id` to `target`. `0` unbinds.
    pub fn set_bound_id(target: BufferTarget, id: GLuint) {
        unsafe { gl_check!(gl::BindBuffer(target.to_raw(), id)) };
    }

    pub fn is_bound(&self) -> bool {
        self.is_ok() && self.id == self.bound_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_target_has_a_distinct_binding_query() {
        let mut queries: Vec<GLenum> = BufferTarget::VARIANTS
            .iter()
            .map(|target| target.binding_query())
            .collect();
        queries.sort_unstable();
        queries.dedup();
        assert_eq!(queries.len(), BufferTarget::VARIANTS.len());
    }

    #[test]
    fn target_names_and_descriptions() {
        assert_eq!(BufferTarget::Array.name(), "GL_ARRAY_BUFFER");
        assert_eq!(BufferTarget::Array.description(), "Vertex attributes");
        assert_eq!(BufferTarget::ElementArray.name(), "GL_ELEMENT_ARRAY_BUFFER");
        assert_eq!(BufferTarget::ElementArray.description(), "Vertex array indices");
        assert_eq!(BufferTarget::Uniform.description(), "Uniform block storage");
        assert_eq!(BufferTarget::Array.binding_query(), gl::ARRAY_BUFFER_BINDING);
        assert_eq!(BufferTarget::Texture.binding_query(), 0x8C2A);
    }

    #[test]
    fn usage_round_trips_through_raw() {
        for usage in BufferUsage::VARIANTS {
            assert_eq!(BufferUsage::from_raw(usage.to_raw()), Some(*usage));
        }
        assert_eq!(BufferUsage::from_raw(gl::ARRAY_BUFFER), None);
    }
}
