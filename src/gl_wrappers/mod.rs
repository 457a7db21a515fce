//! Owning wrappers around OpenGL objects.
//!
//! Every wrapper owns exactly one native handle and deletes it on drop.
//! Wrappers are neither `Clone` nor `Send`: the handle belongs to the context
//! of the thread that created it.
use std::marker::PhantomData;

use gl::types::{GLchar, GLint, GLsizei, GLuint};

/// Declare a Rust enum over a closed set of `GLenum` values.
macro_rules! gl_enum {
    (
        $(#[$enum_meta:meta])* $visibility:vis enum $enum_name:ident {
            $($(#[$variant_meta:meta])* $rust_variant:ident = $gl_variant:ident),+ $(,)?
        }
    ) => {
        #[repr(u32)]
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
        $(#[$enum_meta])*
        $visibility enum $enum_name {
            $($(#[$variant_meta])* $rust_variant = ::gl::$gl_variant,)+
        }

        impl $enum_name {
            pub const VARIANTS: &'static [Self] = &[$(Self::$rust_variant),+];

            pub const fn from_raw(raw: ::gl::types::GLenum) -> Option<Self> {
                Some(match raw {
                    $(::gl::$gl_variant => Self::$rust_variant,)+
                    _ => return None,
                })
            }

            #[inline(always)]
            pub const fn to_raw(self) -> ::gl::types::GLenum {
                self as ::gl::types::GLenum
            }

            /// The `GL_*` name of this value.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$rust_variant => concat!("GL_", stringify!($gl_variant)),)+
                }
            }
        }
    };
}

/// Shared handle plumbing: `id`, `into_raw`, `is_ok` and `Drop`.
///
/// `$id` is bound to the raw handle inside the `is` and `delete` bodies.
macro_rules! impl_gl_object {
    ($name:ident, |$id:ident| { is: $is:expr, delete: $delete:expr $(,)? }) => {
        impl $name {
            /// The native handle.
            #[inline]
            pub fn id(&self) -> ::gl::types::GLuint {
                self.id
            }

            /// Give up ownership of the handle without deleting it.
            pub fn into_raw(self) -> ::gl::types::GLuint {
                let id = self.id;
                ::std::mem::forget(self);
                id
            }

            /// Ask the driver whether the handle names a live object.
            pub fn is_ok(&self) -> bool {
                let $id = self.id;
                // SAFETY: glIs* accepts any value.
                let result: ::gl::types::GLboolean = unsafe { $is };
                result == ::gl::TRUE
            }
        }

        impl $crate::gl_wrappers::GlObject for $name {
            fn id(&self) -> ::gl::types::GLuint {
                self.id
            }

            fn is_ok(&self) -> bool {
                $name::is_ok(self)
            }
        }

        impl Drop for $name {
            fn drop(&mut self) {
                let $id = self.id;
                // SAFETY: deleting 0 or an already deleted name is ignored by the driver.
                unsafe {
                    $delete;
                }
            }
        }
    };
}

/// With the `check-bound` feature, panic if `$object` is not bound.
macro_rules! check_bound {
    ($object:expr) => {
        check_bound!($object, is_bound)
    };
    ($object:expr, $check:ident) => {
        #[cfg(feature = "check-bound")]
        assert!(
            $object.$check(),
            "{} {} failed {}",
            stringify!($object),
            $object.id(),
            stringify!($check)
        );
    };
}

pub mod buffer;
pub mod frame_buffer;
#[cfg(feature = "mint")]
mod mint_uniforms;
pub mod program;
pub mod render_buffer;
pub mod shader;
pub mod texture;
pub mod vertex_array;

pub use buffer::{Buffer, BufferTarget, BufferUsage};
pub use frame_buffer::{FrameBuffer, FrameBufferAttachment, FrameBufferStatus, FrameBufferTarget};
pub use program::{AttribLocation, Program, Uniform, UniformLocation};
pub use render_buffer::RenderBuffer;
pub use shader::{Shader, ShaderType};
pub use texture::{PixelFormat, PixelType, Texture, TextureFilter, TextureTarget, TextureWrap};
pub use vertex_array::VertexArray;

/// Behaviour shared by every wrapper.
pub trait GlObject {
    /// The native handle.
    fn id(&self) -> GLuint;

    /// Whether the handle names a live object.
    fn is_ok(&self) -> bool;
}

/// Keeps wrappers on the thread that owns the context.
pub(crate) type NotSend = PhantomData<*const ()>;

/// Read driver text (info logs, sources) of `length` bytes including the NUL.
///
/// `read` receives the buffer size, a length out-pointer and the buffer.
pub(crate) fn read_gl_string<F>(length: GLint, read: F) -> String
where
    F: FnOnce(GLsizei, *mut GLsizei, *mut GLchar),
{
    let Ok(capacity) = usize::try_from(length) else {
        return String::new();
    };
    if capacity == 0 {
        return String::new();
    }

    let mut buffer: Vec<u8> = vec![0; capacity];
    let mut written: GLsizei = 0;
    read(length, &mut written, buffer.as_mut_ptr().cast());
    buffer.truncate(usize::try_from(written).unwrap_or(0).min(capacity));
    String::from_utf8_lossy(&buffer).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    gl_enum! {
        enum Sample {
            Array = ARRAY_BUFFER,
            Uniform = UNIFORM_BUFFER,
        }
    }

    #[test]
    fn gl_enum_maps_both_ways() {
        assert_eq!(Sample::from_raw(gl::ARRAY_BUFFER), Some(Sample::Array));
        assert_eq!(Sample::from_raw(gl::TEXTURE_2D), None);
        assert_eq!(Sample::Uniform.to_raw(), gl::UNIFORM_BUFFER);
        assert_eq!(Sample::Array.name(), "GL_ARRAY_BUFFER");
        assert_eq!(Sample::VARIANTS.len(), 2);
    }

    #[test]
    fn read_gl_string_truncates_to_written() {
        let text = read_gl_string(16, |size, written, buffer| {
            assert_eq!(size, 16);
            let bytes = b"hello";
            // SAFETY: the buffer holds `size` bytes.
            unsafe {
                std::ptr::copy_nonoverlapping(bytes.as_ptr(), buffer.cast::<u8>(), bytes.len());
                *written = bytes.len() as GLsizei;
            }
        });
        assert_eq!(text, "hello");
    }

    #[test]
    fn read_gl_string_skips_empty_logs() {
        let text = read_gl_string(0, |_, _, _| panic!("should not be called"));
        assert!(text.is_empty());
        let text = read_gl_string(-1, |_, _, _| panic!("should not be called"));
        assert!(text.is_empty());
    }
}
