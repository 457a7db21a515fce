//! Exports [`Texture`].
use std::{ffi::c_void, ptr::null};

use bytemuck::Pod;
use gl::types::{GLenum, GLint, GLuint};

use super::NotSend;
use crate::gl_check;

gl_enum! {
    /// Binding point of a [`Texture`].
    pub enum TextureTarget {
        Texture1D = TEXTURE_1D,
        Texture2D = TEXTURE_2D,
        Texture3D = TEXTURE_3D,
        Texture1DArray = TEXTURE_1D_ARRAY,
        Texture2DArray = TEXTURE_2D_ARRAY,
        Rectangle = TEXTURE_RECTANGLE,
        CubeMap = TEXTURE_CUBE_MAP,
        CubeMapArray = TEXTURE_CUBE_MAP_ARRAY,
        Buffer = TEXTURE_BUFFER,
        Texture2DMultisample = TEXTURE_2D_MULTISAMPLE,
        Texture2DMultisampleArray = TEXTURE_2D_MULTISAMPLE_ARRAY,
    }
}

gl_enum! {
    /// Layout of client pixel data.
    pub enum PixelFormat {
        Red = RED,
        Rg = RG,
        Rgb = RGB,
        Rgba = RGBA,
        Bgr = BGR,
        Bgra = BGRA,
        RedInteger = RED_INTEGER,
        RgInteger = RG_INTEGER,
        RgbInteger = RGB_INTEGER,
        RgbaInteger = RGBA_INTEGER,
        DepthComponent = DEPTH_COMPONENT,
        DepthStencil = DEPTH_STENCIL,
        StencilIndex = STENCIL_INDEX,
    }
}

gl_enum! {
    /// Component type of client pixel data.
    pub enum PixelType {
        UnsignedByte = UNSIGNED_BYTE,
        Byte = BYTE,
        UnsignedShort = UNSIGNED_SHORT,
        Short = SHORT,
        UnsignedInt = UNSIGNED_INT,
        Int = INT,
        HalfFloat = HALF_FLOAT,
        Float = FLOAT,
        UnsignedInt248 = UNSIGNED_INT_24_8,
    }
}

gl_enum! {
    pub enum TextureWrap {
        Repeat = REPEAT,
        MirroredRepeat = MIRRORED_REPEAT,
        ClampToEdge = CLAMP_TO_EDGE,
        ClampToBorder = CLAMP_TO_BORDER,
    }
}

gl_enum! {
    pub enum TextureFilter {
        Nearest = NEAREST,
        Linear = LINEAR,
        NearestMipmapNearest = NEAREST_MIPMAP_NEAREST,
        LinearMipmapNearest = LINEAR_MIPMAP_NEAREST,
        NearestMipmapLinear = NEAREST_MIPMAP_LINEAR,
        LinearMipmapLinear = LINEAR_MIPMAP_LINEAR,
    }
}

impl PixelFormat {
    /// Values per pixel in client memory.
    pub const fn components(self) -> usize {
        match self {
            Self::Red
            | Self::RedInteger
            | Self::DepthComponent
            | Self::DepthStencil
            | Self::StencilIndex => 1,
            Self::Rg | Self::RgInteger => 2,
            Self::Rgb | Self::Bgr | Self::RgbInteger => 3,
            Self::Rgba | Self::Bgra | Self::RgbaInteger => 4,
        }
    }
}

impl PixelType {
    /// Size of one value, or of a whole pixel for packed types.
    pub const fn size(self) -> usize {
        match self {
            Self::UnsignedByte | Self::Byte => 1,
            Self::UnsignedShort | Self::Short | Self::HalfFloat => 2,
            Self::UnsignedInt | Self::Int | Self::Float | Self::UnsignedInt248 => 4,
        }
    }

    const fn is_packed(self) -> bool {
        matches!(self, Self::UnsignedInt248)
    }
}

/// Bytes the driver reads for a `width x height x depth` upload.
///
/// Rows start on `alignment` byte boundaries (`GL_UNPACK_ALIGNMENT`); the
/// last row is not padded. Other unpack parameters are assumed to be at their
/// defaults. `None` for negative sizes or when the count overflows.
pub fn pixel_data_size(
    size: [i32; 3],
    format: PixelFormat,
    pixel_type: PixelType,
    alignment: usize,
) -> Option<usize> {
    let [width, height, depth] = size.map(usize::try_from);
    let (width, height, depth) = (width.ok()?, height.ok()?, depth.ok()?);
    let rows = height.checked_mul(depth)?;
    if width == 0 || rows == 0 {
        return Some(0);
    }

    let pixel = if pixel_type.is_packed() {
        pixel_type.size()
    } else {
        format.components() * pixel_type.size()
    };
    let row = width.checked_mul(pixel)?;
    let stride = row.checked_next_multiple_of(alignment.max(1))?;
    stride.checked_mul(rows - 1)?.checked_add(row)
}

fn unpack_alignment() -> usize {
    let mut alignment = 4;
    unsafe { gl_check!(gl::GetIntegerv(gl::UNPACK_ALIGNMENT, &mut alignment)) };
    usize::try_from(alignment).unwrap_or(4)
}

/// Whether `pixels` holds everything the driver will read. Logs if not.
fn has_enough_pixels<T: Pod>(
    size: [i32; 3],
    format: PixelFormat,
    pixel_type: PixelType,
    pixels: &[T],
) -> bool {
    let given = size_of_val(pixels);
    match pixel_data_size(size, format, pixel_type, unpack_alignment()) {
        Some(needed) if needed <= given => true,
        Some(needed) => {
            log::error!(
                "Texture upload of {size:?} {} {} needs {needed} bytes, got {given}",
                format.name(),
                pixel_type.name()
            );
            false
        }
        None => {
            log::error!("Invalid texture upload size {size:?}");
            false
        }
    }
}

/// [`has_enough_pixels`] for the optional data of `glTexImage*`.
fn has_enough_optional_pixels<T: Pod>(
    size: [i32; 3],
    format: PixelFormat,
    pixel_type: PixelType,
    pixels: Option<&[T]>,
) -> bool {
    pixels.is_none_or(|pixels| has_enough_pixels(size, format, pixel_type, pixels))
}

impl TextureFilter {
    /// Whether the filter samples mipmaps. Only valid as a minification filter.
    pub const fn uses_mipmaps(self) -> bool {
        !matches!(self, Self::Nearest | Self::Linear)
    }
}

/// Pointer for `pixels`, or null to allocate without uploading.
fn pixels_ptr<T: Pod>(pixels: Option<&[T]>) -> *const c_void {
    pixels.map_or(null(), |pixels| pixels.as_ptr().cast())
}

/// Wrapper for an OpenGL texture object.
///
/// Every call except [`bind`](Self::bind) acts on the texture bound to the
/// target. Binding is not verified: there is no single binding query that
/// covers every target.
///
/// Uploads whose pixel slice is shorter than the region are logged and
/// skipped.
///
/// <https://www.khronos.org/opengl/wiki/Texture>
#[derive(Debug)]
pub struct Texture {
    id: GLuint,
    target: TextureTarget,
    _not_send: NotSend,
}

impl_gl_object!(Texture, |id| {
    is: gl_check!(gl::IsTexture(id)),
    delete: gl_check!(gl::DeleteTextures(1, &id)),
});

impl Texture {
    pub fn new(target: TextureTarget) -> Self {
        let mut id = 0;
        unsafe { gl_check!(gl::GenTextures(1, &mut id)) };
        Self {
            id,
            target,
            _not_send: NotSend::default(),
        }
    }

    /// # Safety
    /// `id` must be a texture name not owned by anything else.
    pub unsafe fn from_raw(id: GLuint, target: TextureTarget) -> Self {
        Self {
            id,
            target,
            _not_send: NotSend::default(),
        }
    }

    pub fn target(&self) -> TextureTarget {
        self.target
    }

    pub fn bind(&self) {
        unsafe { gl_check!(gl::BindTexture(self.target.to_raw(), self.id)) };
    }

    pub fn unbind(&self) {
        unsafe { gl_check!(gl::BindTexture(self.target.to_raw(), 0)) };
    }

    /// `glTexImage1D`. `None` allocates without uploading.
    #[cfg(glwrap_has = "texture_1d")]
    pub fn set_image_1d<T: Pod>(
        &mut self,
        level: i32,
        internal_format: GLenum,
        width: i32,
        format: PixelFormat,
        pixel_type: PixelType,
        pixels: Option<&[T]>,
    ) {
        if !has_enough_optional_pixels([width, 1, 1], format, pixel_type, pixels) {
            return;
        }
        unsafe {
            gl_check!(gl::TexImage1D(
                self.target.to_raw(),
                level,
                internal_format as GLint,
                width,
                0,
                format.to_raw(),
                pixel_type.to_raw(),
                pixels_ptr(pixels)
            ))
        };
    }

    /// `glTexImage2D`. `None` allocates without uploading.
    #[allow(clippy::too_many_arguments)]
    pub fn set_image_2d<T: Pod>(
        &mut self,
        level: i32,
        internal_format: GLenum,
        width: i32,
        height: i32,
        format: PixelFormat,
        pixel_type: PixelType,
        pixels: Option<&[T]>,
    ) {
        if !has_enough_optional_pixels([width, height, 1], format, pixel_type, pixels) {
            return;
        }
        unsafe {
            gl_check!(gl::TexImage2D(
                self.target.to_raw(),
                level,
                internal_format as GLint,
                width,
                height,
                0,
                format.to_raw(),
                pixel_type.to_raw(),
                pixels_ptr(pixels)
            ))
        };
    }

    /// `glTexImage3D`. `None` allocates without uploading.
    #[cfg(glwrap_has = "texture_3d")]
    #[allow(clippy::too_many_arguments)]
    pub fn set_image_3d<T: Pod>(
        &mut self,
        level: i32,
        internal_format: GLenum,
        width: i32,
        height: i32,
        depth: i32,
        format: PixelFormat,
        pixel_type: PixelType,
        pixels: Option<&[T]>,
    ) {
        if !has_enough_optional_pixels([width, height, depth], format, pixel_type, pixels) {
            return;
        }
        unsafe {
            gl_check!(gl::TexImage3D(
                self.target.to_raw(),
                level,
                internal_format as GLint,
                width,
                height,
                depth,
                0,
                format.to_raw(),
                pixel_type.to_raw(),
                pixels_ptr(pixels)
            ))
        };
    }

    #[cfg(glwrap_has = "texture_1d")]
    pub fn set_sub_image_1d<T: Pod>(
        &mut self,
        level: i32,
        x_offset: i32,
        width: i32,
        format: PixelFormat,
        pixel_type: PixelType,
        pixels: &[T],
    ) {
        if !has_enough_pixels([width, 1, 1], format, pixel_type, pixels) {
            return;
        }
        unsafe {
            gl_check!(gl::TexSubImage1D(
                self.target.to_raw(),
                level,
                x_offset,
                width,
                format.to_raw(),
                pixel_type.to_raw(),
                pixels.as_ptr().cast()
            ))
        };
    }

    #[allow(clippy::too_many_arguments)]
    pub fn set_sub_image_2d<T: Pod>(
        &mut self,
        level: i32,
        x_offset: i32,
        y_offset: i32,
        width: i32,
        height: i32,
        format: PixelFormat,
        pixel_type: PixelType,
        pixels: &[T],
    ) {
        if !has_enough_pixels([width, height, 1], format, pixel_type, pixels) {
            return;
        }
        unsafe {
            gl_check!(gl::TexSubImage2D(
                self.target.to_raw(),
                level,
                x_offset,
                y_offset,
                width,
                height,
                format.to_raw(),
                pixel_type.to_raw(),
                pixels.as_ptr().cast()
            ))
        };
    }

    #[cfg(glwrap_has = "texture_3d")]
    #[allow(clippy::too_many_arguments)]
    pub fn set_sub_image_3d<T: Pod>(
        &mut self,
        level: i32,
        offset: [i32; 3],
        size: [i32; 3],
        format: PixelFormat,
        pixel_type: PixelType,
        pixels: &[T],
    ) {
        if !has_enough_pixels(size, format, pixel_type, pixels) {
            return;
        }
        let [x, y, z] = offset;
        let [width, height, depth] = size;
        unsafe {
            gl_check!(gl::TexSubImage3D(
                self.target.to_raw(),
                level,
                x,
                y,
                z,
                width,
                height,
                depth,
                format.to_raw(),
                pixel_type.to_raw(),
                pixels.as_ptr().cast()
            ))
        };
    }

    fn set_parameter(&mut self, name: GLenum, value: GLenum) {
        unsafe {
            gl_check!(gl::TexParameteri(
                self.target.to_raw(),
                name,
                value as GLint
            ))
        };
    }

    pub fn set_wrap_s(&mut self, value: TextureWrap) {
        self.set_parameter(gl::TEXTURE_WRAP_S, value.to_raw());
    }

    pub fn set_wrap_t(&mut self, value: TextureWrap) {
        self.set_parameter(gl::TEXTURE_WRAP_T, value.to_raw());
    }

    pub fn set_wrap_st(&mut self, s: TextureWrap, t: TextureWrap) {
        self.set_wrap_s(s);
        self.set_wrap_t(t);
    }

    /// Same wrap mode on both axes.
    pub fn set_wrap(&mut self, value: TextureWrap) {
        self.set_wrap_st(value, value);
    }

    /// Mipmap filters are rejected by the driver here.
    pub fn set_mag_filter(&mut self, value: TextureFilter) {
        self.set_parameter(gl::TEXTURE_MAG_FILTER, value.to_raw());
    }

    pub fn set_min_filter(&mut self, value: TextureFilter) {
        self.set_parameter(gl::TEXTURE_MIN_FILTER, value.to_raw());
    }

    pub fn set_min_mag_filter(&mut self, min: TextureFilter, mag: TextureFilter) {
        self.set_min_filter(min);
        self.set_mag_filter(mag);
    }

    /// Same filter for minification and magnification.
    pub fn set_filter(&mut self, value: TextureFilter) {
        self.set_min_mag_filter(value, value);
    }

    #[cfg(glwrap_has = "texture_level_parameters")]
    fn level_parameter(&self, level: i32, name: GLenum) -> i32 {
        let mut result = 0;
        unsafe {
            gl_check!(gl::GetTexLevelParameteriv(
                self.target.to_raw(),
                level,
                name,
                &mut result
            ))
        };
        result
    }

    /// Width of mipmap `level`.
    #[cfg(glwrap_has = "texture_level_parameters")]
    pub fn width(&self, level: i32) -> i32 {
        self.level_parameter(level, gl::TEXTURE_WIDTH)
    }

    /// Height of mipmap `level`.
    #[cfg(glwrap_has = "texture_level_parameters")]
    pub fn height(&self, level: i32) -> i32 {
        self.level_parameter(level, gl::TEXTURE_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_mipmap_filters_use_mipmaps() {
        assert!(!TextureFilter::Nearest.uses_mipmaps());
        assert!(!TextureFilter::Linear.uses_mipmaps());
        assert!(TextureFilter::LinearMipmapLinear.uses_mipmaps());
        assert!(TextureFilter::NearestMipmapLinear.uses_mipmaps());
    }

    #[test]
    fn missing_pixels_are_null() {
        assert!(pixels_ptr::<u8>(None).is_null());
        let data = [1u8, 2, 3];
        assert_eq!(pixels_ptr(Some(&data[..])), data.as_ptr().cast());
    }

    #[test]
    fn tightly_packed_sizes() {
        let size = pixel_data_size([4, 2, 1], PixelFormat::Rgba, PixelType::UnsignedByte, 4);
        assert_eq!(size, Some(32));
        let size = pixel_data_size([2, 2, 3], PixelFormat::Rg, PixelType::Float, 4);
        assert_eq!(size, Some(96));
        let size = pixel_data_size(
            [3, 1, 1],
            PixelFormat::DepthStencil,
            PixelType::UnsignedInt248,
            4,
        );
        assert_eq!(size, Some(12));
    }

    #[test]
    fn rows_are_padded_except_the_last() {
        // 3 RGB bytes per pixel, one pixel wide: rows of 3 padded to 4.
        let size = pixel_data_size([1, 3, 1], PixelFormat::Rgb, PixelType::UnsignedByte, 4);
        assert_eq!(size, Some(4 + 4 + 3));
        let size = pixel_data_size([1, 3, 1], PixelFormat::Rgb, PixelType::UnsignedByte, 1);
        assert_eq!(size, Some(9));
    }

    #[test]
    fn large_region_needs_far_more_than_one_pixel() {
        let needed = pixel_data_size(
            [1024, 1024, 1],
            PixelFormat::Rgba,
            PixelType::UnsignedByte,
            4,
        );
        assert_eq!(needed, Some(4 * 1024 * 1024));
        assert!(needed.is_some_and(|needed| needed > size_of_val(&[0u8; 4])));
    }

    #[test]
    fn empty_and_invalid_regions() {
        let rgba = (PixelFormat::Rgba, PixelType::UnsignedByte);
        assert_eq!(pixel_data_size([0, 16, 1], rgba.0, rgba.1, 4), Some(0));
        assert_eq!(pixel_data_size([16, 16, 0], rgba.0, rgba.1, 4), Some(0));
        assert_eq!(pixel_data_size([-1, 16, 1], rgba.0, rgba.1, 4), None);
        assert_eq!(pixel_data_size([16, 16, -2], rgba.0, rgba.1, 4), None);
    }

    #[test]
    fn names_carry_the_gl_prefix() {
        assert_eq!(TextureTarget::Texture2D.name(), "GL_TEXTURE_2D");
        assert_eq!(TextureWrap::ClampToEdge.name(), "GL_CLAMP_TO_EDGE");
        assert_eq!(PixelFormat::from_raw(gl::RGBA), Some(PixelFormat::Rgba));
    }
}
