//! Exports [`Program`].
use std::ffi::CString;

use gl::types::{GLboolean, GLenum, GLint, GLsizei, GLuint};

use super::{read_gl_string, shader::Shader, NotSend};
use crate::gl_check;

/// Location of a vertex attribute in a linked program.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct AttribLocation(GLuint);

impl AttribLocation {
    pub const fn new(index: GLuint) -> Self {
        Self(index)
    }

    pub const fn index(self) -> GLuint {
        self.0
    }
}

/// Location of a uniform in a linked program.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct UniformLocation(GLint);

impl UniformLocation {
    pub const fn new(location: GLint) -> Self {
        Self(location)
    }

    pub const fn raw(self) -> GLint {
        self.0
    }
}

/// A value that can be uploaded to a uniform of the current program.
pub trait Uniform {
    fn upload(self, location: UniformLocation);
}

impl Uniform for f32 {
    fn upload(self, location: UniformLocation) {
        unsafe { gl_check!(gl::Uniform1f(location.0, self)) };
    }
}

impl Uniform for i32 {
    fn upload(self, location: UniformLocation) {
        unsafe { gl_check!(gl::Uniform1i(location.0, self)) };
    }
}

impl Uniform for bool {
    fn upload(self, location: UniformLocation) {
        i32::from(self).upload(location);
    }
}

macro_rules! impl_vector_uniform {
    ($($ty:ty, $n:literal => $func:ident;)+) => {
        $(
            impl Uniform for [$ty; $n] {
                fn upload(self, location: UniformLocation) {
                    unsafe { gl_check!(gl::$func(location.0, 1, self.as_ptr())) };
                }
            }

            impl Uniform for &[[$ty; $n]] {
                fn upload(self, location: UniformLocation) {
                    unsafe {
                        gl_check!(gl::$func(
                            location.0,
                            self.len() as GLsizei,
                            self.as_ptr().cast()
                        ))
                    };
                }
            }
        )+
    };
}

impl_vector_uniform! {
    f32, 1 => Uniform1fv;
    f32, 2 => Uniform2fv;
    f32, 3 => Uniform3fv;
    f32, 4 => Uniform4fv;
    i32, 1 => Uniform1iv;
    i32, 2 => Uniform2iv;
    i32, 3 => Uniform3iv;
    i32, 4 => Uniform4iv;
}

impl Uniform for &[f32] {
    fn upload(self, location: UniformLocation) {
        unsafe {
            gl_check!(gl::Uniform1fv(
                location.0,
                self.len() as GLsizei,
                self.as_ptr()
            ))
        };
    }
}

impl Uniform for &[i32] {
    fn upload(self, location: UniformLocation) {
        unsafe {
            gl_check!(gl::Uniform1iv(
                location.0,
                self.len() as GLsizei,
                self.as_ptr()
            ))
        };
    }
}

fn gl_bool(value: bool) -> GLboolean {
    if value {
        gl::TRUE
    } else {
        gl::FALSE
    }
}

/// Wrapper for an OpenGL program.
///
/// Uniform setters act on the current program, so call
/// [`use_program`](Self::use_program) first. With `check-bound` this is
/// asserted.
///
/// <https://www.khronos.org/opengl/wiki/GLSL_Object#Program_objects>
#[derive(Debug)]
pub struct Program {
    id: GLuint,
    _not_send: NotSend,
}

impl_gl_object!(Program, |id| {
    is: gl_check!(gl::IsProgram(id)),
    delete: gl_check!(gl::DeleteProgram(id)),
});

impl Program {
    pub fn new() -> Self {
        let id = unsafe { gl_check!(gl::CreateProgram()) };
        Self {
            id,
            _not_send: NotSend::default(),
        }
    }

    /// # Safety
    /// `id` must be a program name not owned by anything else.
    pub unsafe fn from_raw(id: GLuint) -> Self {
        Self {
            id,
            _not_send: NotSend::default(),
        }
    }

    pub fn attach(&mut self, shader: &Shader) {
        self.attach_id(shader.id());
    }

    pub fn attach_id(&mut self, shader: GLuint) {
        unsafe { gl_check!(gl::AttachShader(self.id, shader)) };
    }

    pub fn detach(&mut self, shader: &Shader) {
        self.detach_id(shader.id());
    }

    pub fn detach_id(&mut self, shader: GLuint) {
        unsafe { gl_check!(gl::DetachShader(self.id, shader)) };
    }

    /// Check [`is_linked`](Self::is_linked) and [`info_log`](Self::info_log)
    /// afterwards.
    pub fn link(&mut self) {
        unsafe { gl_check!(gl::LinkProgram(self.id)) };
    }

    /// Check [`is_valid`](Self::is_valid) afterwards.
    pub fn validate(&mut self) {
        unsafe { gl_check!(gl::ValidateProgram(self.id)) };
    }

    /// Make this the current program.
    pub fn use_program(&self) {
        Self::set_current_id(self.id);
    }

    /// Make no program current.
    pub fn unuse() {
        Self::set_current_id(0);
    }

    /// Takes effect on the next [`link`](Self::link). `None` if `name`
    /// contains a NUL byte.
    pub fn bind_attrib_location(&mut self, location: AttribLocation, name: &str) -> Option<()> {
        let name = CString::new(name).ok()?;
        unsafe {
            gl_check!(gl::BindAttribLocation(
                self.id,
                location.index(),
                name.as_ptr()
            ))
        };
        Some(())
    }

    /// `None` if the attribute is not active or `name` contains a NUL byte.
    pub fn attrib_location(&self, name: &str) -> Option<AttribLocation> {
        let name = CString::new(name).ok()?;
        let location = unsafe { gl_check!(gl::GetAttribLocation(self.id, name.as_ptr())) };
        GLuint::try_from(location).ok().map(AttribLocation)
    }

    /// `None` if the uniform is not active or `name` contains a NUL byte.
    pub fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        let name = CString::new(name).ok()?;
        let location = unsafe { gl_check!(gl::GetUniformLocation(self.id, name.as_ptr())) };
        (location >= 0).then_some(UniformLocation(location))
    }

    /// Upload a scalar, vector or array of vectors.
    ///
    /// # Usage
    /// ```no_run
    /// # fn demo(program: &mut glwrap::gl_wrappers::Program) {
    /// program.use_program();
    /// if let Some(tint) = program.uniform_location("u_tint") {
    ///     program.set_uniform(tint, [1.0f32, 0.5, 0.25, 1.0]);
    /// }
    /// program.set_uniform_by_name("u_flip", true);
    /// # }
    /// ```
    pub fn set_uniform<U: Uniform>(&mut self, location: UniformLocation, value: U) {
        check_bound!(self, is_current);
        value.upload(location);
    }

    /// Like [`set_uniform`](Self::set_uniform), logging a warning if the
    /// uniform does not exist.
    pub fn set_uniform_by_name<U: Uniform>(&mut self, name: &str, value: U) {
        if let Some(location) = self.located(name) {
            self.set_uniform(location, value);
        }
    }

    pub fn set_uniform_matrix2(
        &mut self,
        location: UniformLocation,
        values: &[f32; 4],
        transpose: bool,
    ) {
        check_bound!(self, is_current);
        unsafe {
            gl_check!(gl::UniformMatrix2fv(
                location.0,
                1,
                gl_bool(transpose),
                values.as_ptr()
            ))
        };
    }

    pub fn set_uniform_matrix3(
        &mut self,
        location: UniformLocation,
        values: &[f32; 9],
        transpose: bool,
    ) {
        check_bound!(self, is_current);
        unsafe {
            gl_check!(gl::UniformMatrix3fv(
                location.0,
                1,
                gl_bool(transpose),
                values.as_ptr()
            ))
        };
    }

    pub fn set_uniform_matrix4(
        &mut self,
        location: UniformLocation,
        values: &[f32; 16],
        transpose: bool,
    ) {
        check_bound!(self, is_current);
        unsafe {
            gl_check!(gl::UniformMatrix4fv(
                location.0,
                1,
                gl_bool(transpose),
                values.as_ptr()
            ))
        };
    }

    pub fn set_uniform_matrix2_by_name(&mut self, name: &str, values: &[f32; 4], transpose: bool) {
        if let Some(location) = self.located(name) {
            self.set_uniform_matrix2(location, values, transpose);
        }
    }

    pub fn set_uniform_matrix3_by_name(&mut self, name: &str, values: &[f32; 9], transpose: bool) {
        if let Some(location) = self.located(name) {
            self.set_uniform_matrix3(location, values, transpose);
        }
    }

    pub fn set_uniform_matrix4_by_name(&mut self, name: &str, values: &[f32; 16], transpose: bool) {
        if let Some(location) = self.located(name) {
            self.set_uniform_matrix4(location, values, transpose);
        }
    }

    fn located(&self, name: &str) -> Option<UniformLocation> {
        let location = self.uniform_location(name);
        if location.is_none() {
            log::warn!("Cannot find uniform: {name}");
        }
        location
    }

    fn parameter(&self, name: GLenum) -> GLint {
        let mut result = 0;
        unsafe { gl_check!(gl::GetProgramiv(self.id, name, &mut result)) };
        result
    }

    pub fn is_deleted(&self) -> bool {
        self.parameter(gl::DELETE_STATUS) != GLint::from(gl::FALSE)
    }

    pub fn is_linked(&self) -> bool {
        self.parameter(gl::LINK_STATUS) != GLint::from(gl::FALSE)
    }

    pub fn is_valid(&self) -> bool {
        self.parameter(gl::VALIDATE_STATUS) != GLint::from(gl::FALSE)
    }

    pub fn info_log_length(&self) -> i32 {
        self.parameter(gl::INFO_LOG_LENGTH)
    }

    pub fn attached_shaders_count(&self) -> i32 {
        self.parameter(gl::ATTACHED_SHADERS)
    }

    pub fn active_attributes_count(&self) -> i32 {
        self.parameter(gl::ACTIVE_ATTRIBUTES)
    }

    pub fn active_attribute_max_length(&self) -> i32 {
        self.parameter(gl::ACTIVE_ATTRIBUTE_MAX_LENGTH)
    }

    pub fn active_uniforms_count(&self) -> i32 {
        self.parameter(gl::ACTIVE_UNIFORMS)
    }

    pub fn active_uniform_max_length(&self) -> i32 {
        self.parameter(gl::ACTIVE_UNIFORM_MAX_LENGTH)
    }

    /// Names of the attached shaders.
    pub fn attached_shaders(&self) -> Vec<GLuint> {
        let count = self.attached_shaders_count();
        let Ok(capacity) = usize::try_from(count) else {
            return Vec::new();
        };
        let mut shaders = vec![0; capacity];
        let mut written = 0;
        if capacity > 0 {
            unsafe {
                gl_check!(gl::GetAttachedShaders(
                    self.id,
                    count,
                    &mut written,
                    shaders.as_mut_ptr()
                ))
            };
        }
        shaders.truncate(usize::try_from(written).unwrap_or(0));
        shaders
    }

    pub fn info_log(&self) -> String {
        read_gl_string(self.info_log_length(), |size, written, buffer| unsafe {
            gl_check!(gl::GetProgramInfoLog(self.id, size, written, buffer))
        })
    }

    /// Name of the current program, `0` if none.
    pub fn current_id() -> GLuint {
        let mut current = 0;
        unsafe { gl_check!(gl::GetIntegerv(gl::CURRENT_PROGRAM, &mut current)) };
        current as GLuint
    }

    pub fn set_current_id(id: GLuint) {
        unsafe { gl_check!(gl::UseProgram(id)) };
    }

    pub fn is_current(&self) -> bool {
        self.is_ok() && self.id == Self::current_id()
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

/// GLSL type name of an attribute or uniform type as reported by
/// `glGetActiveAttrib` / `glGetActiveUniform`, or `"Unknown"`.
pub fn shader_variable_type_str(variable_type: GLenum) -> &'static str {
    match variable_type {
        gl::FLOAT => "GL_FLOAT",
        gl::FLOAT_VEC2 => "GL_FLOAT_VEC2",
        gl::FLOAT_VEC3 => "GL_FLOAT_VEC3",
        gl::FLOAT_VEC4 => "GL_FLOAT_VEC4",
        gl::INT => "GL_INT",
        gl::INT_VEC2 => "GL_INT_VEC2",
        gl::INT_VEC3 => "GL_INT_VEC3",
        gl::INT_VEC4 => "GL_INT_VEC4",
        gl::BOOL => "GL_BOOL",
        gl::BOOL_VEC2 => "GL_BOOL_VEC2",
        gl::BOOL_VEC3 => "GL_BOOL_VEC3",
        gl::BOOL_VEC4 => "GL_BOOL_VEC4",
        gl::FLOAT_MAT2 => "GL_FLOAT_MAT2",
        gl::FLOAT_MAT3 => "GL_FLOAT_MAT3",
        gl::FLOAT_MAT4 => "GL_FLOAT_MAT4",
        gl::FLOAT_MAT2x3 => "GL_FLOAT_MAT2x3",
        gl::FLOAT_MAT2x4 => "GL_FLOAT_MAT2x4",
        gl::FLOAT_MAT3x2 => "GL_FLOAT_MAT3x2",
        gl::FLOAT_MAT3x4 => "GL_FLOAT_MAT3x4",
        gl::FLOAT_MAT4x2 => "GL_FLOAT_MAT4x2",
        gl::FLOAT_MAT4x3 => "GL_FLOAT_MAT4x3",
        gl::SAMPLER_1D => "GL_SAMPLER_1D",
        gl::SAMPLER_2D => "GL_SAMPLER_2D",
        gl::SAMPLER_3D => "GL_SAMPLER_3D",
        gl::SAMPLER_CUBE => "GL_SAMPLER_CUBE",
        gl::SAMPLER_1D_SHADOW => "GL_SAMPLER_1D_SHADOW",
        gl::SAMPLER_2D_SHADOW => "GL_SAMPLER_2D_SHADOW",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locations_are_plain_integers() {
        assert_eq!(size_of::<UniformLocation>(), size_of::<GLint>());
        assert_eq!(size_of::<AttribLocation>(), size_of::<GLuint>());
        assert_eq!(UniformLocation::new(3).raw(), 3);
        assert_eq!(AttribLocation::new(7).index(), 7);
    }

    #[test]
    fn unuse_needs_no_program() {
        // Associated like `VertexArray::unbind`; no GL call is made here.
        let _unuse: fn() = Program::unuse;
        let _unbind: fn() = crate::gl_wrappers::VertexArray::unbind;
    }

    #[test]
    fn variable_type_names() {
        assert_eq!(shader_variable_type_str(gl::FLOAT_VEC3), "GL_FLOAT_VEC3");
        assert_eq!(shader_variable_type_str(gl::FLOAT_MAT4x3), "GL_FLOAT_MAT4x3");
        assert_eq!(shader_variable_type_str(gl::SAMPLER_2D), "GL_SAMPLER_2D");
        assert_eq!(shader_variable_type_str(gl::BOOL), "GL_BOOL");
        assert_eq!(shader_variable_type_str(gl::TEXTURE_2D), "Unknown");
    }

    #[test]
    fn bool_maps_to_gl_boolean() {
        assert_eq!(gl_bool(true), gl::TRUE);
        assert_eq!(gl_bool(false), gl::FALSE);
    }
}
