//! Exports [`Shader`].
use gl::types::{GLchar, GLenum, GLint, GLsizei, GLuint};

use super::{read_gl_string, NotSend};
use crate::gl_check;

gl_enum! {
    pub enum ShaderType {
        Fragment = FRAGMENT_SHADER,
        Geometry = GEOMETRY_SHADER,
        Vertex = VERTEX_SHADER,
    }
}

impl ShaderType {
    /// Human readable stage name, as used in build logs.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fragment => "Fragment",
            Self::Geometry => "Geometry",
            Self::Vertex => "Vertex",
        }
    }
}

/// Wrapper for an OpenGL shader object.
///
/// <https://www.khronos.org/opengl/wiki/Shader>
#[derive(Debug)]
pub struct Shader {
    id: GLuint,
    _not_send: NotSend,
}

impl_gl_object!(Shader, |id| {
    is: gl_check!(gl::IsShader(id)),
    delete: gl_check!(gl::DeleteShader(id)),
});

impl Shader {
    /// Create an empty shader of the given stage.
    pub fn new(shader_type: ShaderType) -> Self {
        let id = unsafe { gl_check!(gl::CreateShader(shader_type.to_raw())) };
        Self {
            id,
            _not_send: NotSend::default(),
        }
    }
    /// Helper function for `Shader::new()` with vertex shaders.
    pub fn vertex() -> Self {
        Self::new(ShaderType::Vertex)
    }
    /// Helper function for `Shader::new()` with fragment shaders.
    pub fn fragment() -> Self {
        Self::new(ShaderType::Fragment)
    }
    /// Helper function for `Shader::new()` with geo shaders.
    pub fn geometry() -> Self {
        Self::new(ShaderType::Geometry)
    }

    /// # Safety
    /// `id` must be a shader name not owned by anything else.
    pub unsafe fn from_raw(id: GLuint) -> Self {
        Self {
            id,
            _not_send: NotSend::default(),
        }
    }

    pub fn set_source(&mut self, source: &str) {
        self.set_sources(&[source]);
    }

    /// Replace the source with the concatenation of `sources`.
    ///
    /// Lengths are passed explicitly, so the strings need no NUL terminator.
    pub fn set_sources(&mut self, sources: &[&str]) {
        let pointers: Vec<*const GLchar> = sources.iter().map(|s| s.as_ptr().cast()).collect();
        let lengths: Vec<GLint> = sources.iter().map(|s| s.len() as GLint).collect();
        unsafe {
            gl_check!(gl::ShaderSource(
                self.id,
                sources.len() as GLsizei,
                pointers.as_ptr(),
                lengths.as_ptr()
            ))
        };
    }

    /// Compile the current source. Check [`is_compiled`](Self::is_compiled)
    /// and [`info_log`](Self::info_log) afterwards.
    pub fn compile(&mut self) {
        unsafe { gl_check!(gl::CompileShader(self.id)) };
    }

    fn parameter(&self, name: GLenum) -> GLint {
        let mut result = 0;
        unsafe { gl_check!(gl::GetShaderiv(self.id, name, &mut result)) };
        result
    }

    pub fn shader_type(&self) -> Option<ShaderType> {
        ShaderType::from_raw(self.parameter(gl::SHADER_TYPE) as GLenum)
    }

    pub fn is_deleted(&self) -> bool {
        self.parameter(gl::DELETE_STATUS) != GLint::from(gl::FALSE)
    }

    pub fn is_compiled(&self) -> bool {
        self.parameter(gl::COMPILE_STATUS) != GLint::from(gl::FALSE)
    }

    /// Length of the info log including the NUL terminator, `0` if empty.
    pub fn info_log_length(&self) -> i32 {
        self.parameter(gl::INFO_LOG_LENGTH)
    }

    /// Length of the source including the NUL terminator, `0` if empty.
    pub fn source_length(&self) -> i32 {
        self.parameter(gl::SHADER_SOURCE_LENGTH)
    }

    pub fn info_log(&self) -> String {
        read_gl_string(self.info_log_length(), |size, written, buffer| unsafe {
            gl_check!(gl::GetShaderInfoLog(self.id, size, written, buffer))
        })
    }

    pub fn source(&self) -> String {
        read_gl_string(self.source_length(), |size, written, buffer| unsafe {
            gl_check!(gl::GetShaderSource(self.id, size, written, buffer))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_labels() {
        assert_eq!(ShaderType::Vertex.label(), "Vertex");
        assert_eq!(ShaderType::Fragment.label(), "Fragment");
        assert_eq!(ShaderType::Geometry.name(), "GL_GEOMETRY_SHADER");
        assert_eq!(
            ShaderType::from_raw(gl::FRAGMENT_SHADER),
            Some(ShaderType::Fragment)
        );
    }
}
