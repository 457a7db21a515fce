//! Exports [`FrameBuffer`].
use gl::types::{GLenum, GLuint};

#[cfg(any(
    glwrap_has = "framebuffer_texture_2d",
    glwrap_has = "framebuffer_texture_layer",
    glwrap_has = "framebuffer_texture"
))]
use super::texture::Texture;
use super::{render_buffer::RenderBuffer, NotSend};
use crate::gl_check;

gl_enum! {
    pub enum FrameBufferTarget {
        /// Both draw and read.
        FrameBuffer = FRAMEBUFFER,
        Draw = DRAW_FRAMEBUFFER,
        Read = READ_FRAMEBUFFER,
    }
}

impl FrameBufferTarget {
    /// The `glGetIntegerv` query that returns the frame buffer bound here.
    pub const fn binding_query(self) -> GLenum {
        match self {
            Self::Read => gl::READ_FRAMEBUFFER_BINDING,
            Self::FrameBuffer | Self::Draw => gl::DRAW_FRAMEBUFFER_BINDING,
        }
    }
}

gl_enum! {
    /// Result of `glCheckFramebufferStatus`.
    pub enum FrameBufferStatus {
        Complete = FRAMEBUFFER_COMPLETE,
        Undefined = FRAMEBUFFER_UNDEFINED,
        IncompleteAttachment = FRAMEBUFFER_INCOMPLETE_ATTACHMENT,
        IncompleteMissingAttachment = FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT,
        IncompleteDrawBuffer = FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER,
        IncompleteReadBuffer = FRAMEBUFFER_INCOMPLETE_READ_BUFFER,
        Unsupported = FRAMEBUFFER_UNSUPPORTED,
        IncompleteMultisample = FRAMEBUFFER_INCOMPLETE_MULTISAMPLE,
        IncompleteLayerTargets = FRAMEBUFFER_INCOMPLETE_LAYER_TARGETS,
    }
}

/// Attachment point of a [`FrameBuffer`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FrameBufferAttachment {
    /// `GL_COLOR_ATTACHMENTi`.
    Color(u32),
    Depth,
    Stencil,
    DepthStencil,
}

impl FrameBufferAttachment {
    /// Color indices past the driver's limit wrap around instead of
    /// panicking; the driver rejects the resulting enum.
    pub const fn to_raw(self) -> GLenum {
        match self {
            Self::Color(index) => gl::COLOR_ATTACHMENT0.wrapping_add(index),
            Self::Depth => gl::DEPTH_ATTACHMENT,
            Self::Stencil => gl::STENCIL_ATTACHMENT,
            Self::DepthStencil => gl::DEPTH_STENCIL_ATTACHMENT,
        }
    }
}

/// Wrapper for an OpenGL frame buffer object.
///
/// <https://www.khronos.org/opengl/wiki/Framebuffer_Object>
#[derive(Debug)]
pub struct FrameBuffer {
    id: GLuint,
    target: FrameBufferTarget,
    _not_send: NotSend,
}

impl_gl_object!(FrameBuffer, |id| {
    is: gl_check!(gl::IsFramebuffer(id)),
    delete: gl_check!(gl::DeleteFramebuffers(1, &id)),
});

impl FrameBuffer {
    pub fn new(target: FrameBufferTarget) -> Self {
        let mut id = 0;
        unsafe { gl_check!(gl::GenFramebuffers(1, &mut id)) };
        Self {
            id,
            target,
            _not_send: NotSend::default(),
        }
    }

    /// # Safety
    /// `id` must be a frame buffer name not owned by anything else.
    pub unsafe fn from_raw(id: GLuint, target: FrameBufferTarget) -> Self {
        Self {
            id,
            target,
            _not_send: NotSend::default(),
        }
    }

    pub fn target(&self) -> FrameBufferTarget {
        self.target
    }

    pub fn bind(&self) {
        Self::set_bound_id(self.target, self.id);
    }

    /// Bind the default frame buffer.
    pub fn unbind(&self) {
        Self::set_bound_id(self.target, 0);
    }

    /// Completeness of the bound frame buffer, `None` if the query failed.
    pub fn check_status(&self) -> Option<FrameBufferStatus> {
        check_bound!(self);
        let status = unsafe { gl_check!(gl::CheckFramebufferStatus(self.target.to_raw())) };
        FrameBufferStatus::from_raw(status)
    }

    pub fn is_complete(&self) -> bool {
        self.check_status() == Some(FrameBufferStatus::Complete)
    }

    pub fn attach_render_buffer(
        &mut self,
        attachment: FrameBufferAttachment,
        render_buffer: &RenderBuffer,
    ) {
        self.attach_render_buffer_id(attachment, render_buffer.id());
    }

    /// `0` detaches.
    pub fn attach_render_buffer_id(&mut self, attachment: FrameBufferAttachment, id: GLuint) {
        check_bound!(self);
        unsafe {
            gl_check!(gl::FramebufferRenderbuffer(
                self.target.to_raw(),
                attachment.to_raw(),
                gl::RENDERBUFFER,
                id
            ))
        };
    }

    /// Attach mipmap `level` of a 2D texture.
    #[cfg(glwrap_has = "framebuffer_texture_2d")]
    pub fn attach_texture_2d(
        &mut self,
        attachment: FrameBufferAttachment,
        texture: &Texture,
        level: i32,
    ) {
        check_bound!(self);
        unsafe {
            gl_check!(gl::FramebufferTexture2D(
                self.target.to_raw(),
                attachment.to_raw(),
                texture.target().to_raw(),
                texture.id(),
                level
            ))
        };
    }

    /// Attach one layer of a 3D or array texture.
    #[cfg(glwrap_has = "framebuffer_texture_layer")]
    pub fn attach_texture_layer(
        &mut self,
        attachment: FrameBufferAttachment,
        texture: &Texture,
        level: i32,
        layer: i32,
    ) {
        check_bound!(self);
        unsafe {
            gl_check!(gl::FramebufferTextureLayer(
                self.target.to_raw(),
                attachment.to_raw(),
                texture.id(),
                level,
                layer
            ))
        };
    }

    /// Attach a whole texture; layered textures become layered attachments.
    #[cfg(glwrap_has = "framebuffer_texture")]
    pub fn attach_texture(
        &mut self,
        attachment: FrameBufferAttachment,
        texture: &Texture,
        level: i32,
    ) {
        check_bound!(self);
        unsafe {
            gl_check!(gl::FramebufferTexture(
                self.target.to_raw(),
                attachment.to_raw(),
                texture.id(),
                level
            ))
        };
    }

    /// Name of the frame buffer bound to this frame buffer's target.
    pub fn bound_id(&self) -> GLuint {
        let mut bound = 0;
        unsafe { gl_check!(gl::GetIntegerv(self.target.binding_query(), &mut bound)) };
        bound as GLuint
    }

    /// Bind `id` to `target`. `0` is the default frame buffer.
    pub fn set_bound_id(target: FrameBufferTarget, id: GLuint) {
        unsafe { gl_check!(gl::BindFramebuffer(target.to_raw(), id)) };
    }

    pub fn is_bound(&self) -> bool {
        self.is_ok() && self.id == self.bound_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_attachments_are_offsets() {
        assert_eq!(FrameBufferAttachment::Color(0).to_raw(), gl::COLOR_ATTACHMENT0);
        assert_eq!(FrameBufferAttachment::Color(3).to_raw(), gl::COLOR_ATTACHMENT3);
        assert_eq!(
            FrameBufferAttachment::DepthStencil.to_raw(),
            gl::DEPTH_STENCIL_ATTACHMENT
        );
    }

    #[test]
    fn huge_color_index_does_not_panic() {
        assert_eq!(
            FrameBufferAttachment::Color(u32::MAX).to_raw(),
            gl::COLOR_ATTACHMENT0 - 1
        );
    }

    #[test]
    fn read_target_has_its_own_binding() {
        assert_eq!(
            FrameBufferTarget::Read.binding_query(),
            gl::READ_FRAMEBUFFER_BINDING
        );
        assert_eq!(
            FrameBufferTarget::FrameBuffer.binding_query(),
            gl::FRAMEBUFFER_BINDING
        );
    }

    #[test]
    fn status_names() {
        assert_eq!(
            FrameBufferStatus::from_raw(gl::FRAMEBUFFER_COMPLETE),
            Some(FrameBufferStatus::Complete)
        );
        assert_eq!(FrameBufferStatus::from_raw(0), None);
        assert_eq!(
            FrameBufferStatus::IncompleteAttachment.name(),
            "GL_FRAMEBUFFER_INCOMPLETE_ATTACHMENT"
        );
    }
}
