//! Context versions and the capability table.
//!
//! This module is also compiled into `build.rs`, so it must not depend on
//! anything else in the crate.

/// Which family of the graphics API is in use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GlApi {
    /// Desktop OpenGL.
    OpenGl,
    /// OpenGL ES.
    OpenGlEs,
}

/// Pack a `major.minor` pair into one sortable integer.
///
/// Major and minor are packed, not added, so `(2, 3)` and `(3, 2)` differ.
pub const fn pack_version(major: u8, minor: u8) -> u16 {
    ((major as u16) << 8) | (minor as u16)
}

/// An API family together with a `major.minor` version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContextVersion {
    pub api: GlApi,
    pub major: u8,
    pub minor: u8,
}

impl ContextVersion {
    pub const fn new(api: GlApi, major: u8, minor: u8) -> Self {
        Self { api, major, minor }
    }

    /// Desktop OpenGL `major.minor`.
    pub const fn opengl(major: u8, minor: u8) -> Self {
        Self::new(GlApi::OpenGl, major, minor)
    }

    /// OpenGL ES `major.minor`.
    pub const fn gles(major: u8, minor: u8) -> Self {
        Self::new(GlApi::OpenGlEs, major, minor)
    }

    /// The version packed with [`pack_version`].
    pub const fn packed(&self) -> u16 {
        pack_version(self.major, self.minor)
    }

    pub const fn is_gles(&self) -> bool {
        matches!(self.api, GlApi::OpenGlEs)
    }

    /// `true` for desktop OpenGL at `major.minor` or later.
    pub const fn from_opengl(&self, major: u8, minor: u8) -> bool {
        matches!(self.api, GlApi::OpenGl) && self.packed() >= pack_version(major, minor)
    }

    /// `true` for OpenGL ES at `major.minor` or later.
    pub const fn from_gles(&self, major: u8, minor: u8) -> bool {
        matches!(self.api, GlApi::OpenGlEs) && self.packed() >= pack_version(major, minor)
    }

    /// Parse a `"MAJOR.MINOR"` string.
    pub fn parse(api: GlApi, text: &str) -> Option<Self> {
        let (major, minor) = text.trim().split_once('.')?;
        Some(Self::new(api, major.parse().ok()?, minor.parse().ok()?))
    }
}

/// Optional pieces of the API whose wrappers only exist on some contexts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feature {
    /// `GL_BUFFER_ACCESS` query.
    BufferAccess,
    /// `GL_BUFFER_IMMUTABLE_STORAGE` query.
    BufferImmutableStorage,
    /// `GL_BUFFER_STORAGE_FLAGS` query.
    BufferStorageFlags,
    /// `glTexImage1D` / `glTexSubImage1D`.
    Texture1D,
    /// `glTexImage3D` / `glTexSubImage3D`.
    Texture3D,
    /// `glGetTexLevelParameteriv`.
    TextureLevelParameters,
    /// `glFramebufferTexture2D`.
    FramebufferTexture2D,
    /// `glFramebufferTextureLayer`.
    FramebufferTextureLayer,
    /// `glFramebufferTexture`.
    FramebufferTexture,
    /// `glRenderbufferStorageMultisample`.
    RenderbufferMultisample,
    /// `GL_RENDERBUFFER_SAMPLES` query.
    RenderbufferSamples,
    /// `GL_NUM_EXTENSIONS` + `glGetStringi`.
    IndexedExtensions,
    /// Vertex array objects without the `OES` extension.
    CoreVertexArrays,
}

impl Feature {
    pub const ALL: [Feature; 13] = [
        Feature::BufferAccess,
        Feature::BufferImmutableStorage,
        Feature::BufferStorageFlags,
        Feature::Texture1D,
        Feature::Texture3D,
        Feature::TextureLevelParameters,
        Feature::FramebufferTexture2D,
        Feature::FramebufferTextureLayer,
        Feature::FramebufferTexture,
        Feature::RenderbufferMultisample,
        Feature::RenderbufferSamples,
        Feature::IndexedExtensions,
        Feature::CoreVertexArrays,
    ];

    /// Value of the `glwrap_has` cfg emitted for this feature.
    pub const fn cfg_name(self) -> &'static str {
        match self {
            Feature::BufferAccess => "buffer_access",
            Feature::BufferImmutableStorage => "buffer_immutable_storage",
            Feature::BufferStorageFlags => "buffer_storage_flags",
            Feature::Texture1D => "texture_1d",
            Feature::Texture3D => "texture_3d",
            Feature::TextureLevelParameters => "texture_level_parameters",
            Feature::FramebufferTexture2D => "framebuffer_texture_2d",
            Feature::FramebufferTextureLayer => "framebuffer_texture_layer",
            Feature::FramebufferTexture => "framebuffer_texture",
            Feature::RenderbufferMultisample => "renderbuffer_multisample",
            Feature::RenderbufferSamples => "renderbuffer_samples",
            Feature::IndexedExtensions => "indexed_extensions",
            Feature::CoreVertexArrays => "core_vertex_arrays",
        }
    }

    /// Whether a context of version `ctx` provides this feature.
    pub const fn is_available(self, ctx: ContextVersion) -> bool {
        let opengl = matches!(ctx.api, GlApi::OpenGl);
        match self {
            Feature::BufferAccess
            | Feature::BufferImmutableStorage
            | Feature::BufferStorageFlags
            | Feature::Texture1D => opengl,
            Feature::Texture3D | Feature::RenderbufferSamples | Feature::CoreVertexArrays => {
                opengl || ctx.from_gles(3, 0)
            }
            Feature::TextureLevelParameters => ctx.from_opengl(2, 0) || ctx.from_gles(3, 1),
            Feature::FramebufferTexture2D => ctx.from_opengl(3, 0) || ctx.from_gles(2, 0),
            Feature::FramebufferTextureLayer
            | Feature::RenderbufferMultisample
            | Feature::IndexedExtensions => ctx.from_opengl(3, 0) || ctx.from_gles(3, 0),
            Feature::FramebufferTexture => ctx.from_opengl(3, 2) || ctx.from_gles(3, 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packing_is_not_addition() {
        assert_ne!(pack_version(2, 3), pack_version(3, 2));
        assert_eq!(pack_version(3, 2), 0x0302);
    }

    #[test]
    fn packing_preserves_order() {
        let versions = [(1, 0), (1, 5), (2, 0), (2, 1), (3, 0), (3, 3), (4, 0), (4, 6)];
        for pair in versions.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert!(pack_version(a.0, a.1) < pack_version(b.0, b.1), "{a:?} < {b:?}");
        }
    }

    #[test]
    fn from_version_checks_the_api() {
        let gl33 = ContextVersion::opengl(3, 3);
        assert!(gl33.from_opengl(3, 0));
        assert!(gl33.from_opengl(3, 3));
        assert!(!gl33.from_opengl(3, 4));
        assert!(!gl33.from_gles(2, 0));

        let es30 = ContextVersion::gles(3, 0);
        assert!(es30.from_gles(2, 0));
        assert!(!es30.from_gles(3, 1));
        assert!(!es30.from_opengl(1, 0));
    }

    #[test]
    fn parse_major_minor() {
        assert_eq!(
            ContextVersion::parse(GlApi::OpenGl, "4.3"),
            Some(ContextVersion::opengl(4, 3))
        );
        assert_eq!(
            ContextVersion::parse(GlApi::OpenGlEs, " 2.0\n"),
            Some(ContextVersion::gles(2, 0))
        );
        assert_eq!(ContextVersion::parse(GlApi::OpenGl, "4"), None);
        assert_eq!(ContextVersion::parse(GlApi::OpenGl, "4.x"), None);
        assert_eq!(ContextVersion::parse(GlApi::OpenGl, "300.0"), None);
    }

    #[test]
    fn desktop_only_features() {
        let es32 = ContextVersion::gles(3, 2);
        for feature in [
            Feature::BufferAccess,
            Feature::BufferImmutableStorage,
            Feature::BufferStorageFlags,
            Feature::Texture1D,
        ] {
            assert!(feature.is_available(ContextVersion::opengl(2, 0)));
            assert!(!feature.is_available(es32), "{feature:?}");
        }
    }

    #[test]
    fn gles2_lacks_most_features() {
        let es20 = ContextVersion::gles(2, 0);
        let available: Vec<_> = Feature::ALL
            .into_iter()
            .filter(|f| f.is_available(es20))
            .collect();
        assert_eq!(available, vec![Feature::FramebufferTexture2D]);
    }

    #[test]
    fn version_thresholds() {
        assert!(!Feature::TextureLevelParameters.is_available(ContextVersion::gles(3, 0)));
        assert!(Feature::TextureLevelParameters.is_available(ContextVersion::gles(3, 1)));
        assert!(!Feature::FramebufferTexture.is_available(ContextVersion::opengl(3, 1)));
        assert!(Feature::FramebufferTexture.is_available(ContextVersion::opengl(3, 2)));
        assert!(!Feature::FramebufferTexture2D.is_available(ContextVersion::opengl(2, 1)));
        assert!(Feature::CoreVertexArrays.is_available(ContextVersion::gles(3, 0)));
        assert!(Feature::IndexedExtensions.is_available(ContextVersion::opengl(4, 6)));
    }

    #[test]
    fn cfg_names_are_unique() {
        let mut names: Vec<_> = Feature::ALL.iter().map(|f| f.cfg_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Feature::ALL.len());
    }
}
