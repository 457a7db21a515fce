//! Shading language version lookup.
//!
//! Also compiled into `build.rs`.

use crate::gl_version::GlApi;

/// A GLSL version number and the token that goes after `#version`.
///
/// <https://en.wikipedia.org/wiki/OpenGL_Shading_Language#Versions>
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GlslVersion {
    pub version: u16,
    pub token: Option<&'static str>,
}

impl GlslVersion {
    pub const fn new(version: u16, token: &'static str) -> Self {
        Self {
            version,
            token: Some(token),
        }
    }

    /// No known GLSL version.
    pub const fn undefined() -> Self {
        Self {
            version: 0,
            token: None,
        }
    }

    pub const fn is_defined(&self) -> bool {
        self.version != 0
    }
}

/// GLSL version for a desktop OpenGL context.
pub const fn glsl_gl_version(major: i32, minor: i32) -> GlslVersion {
    match (major, minor) {
        (2, 0) => GlslVersion::new(110, "110"),
        (2, 1) => GlslVersion::new(120, "120"),
        (3, 0) => GlslVersion::new(130, "130"),
        (3, 1) => GlslVersion::new(140, "140"),
        (3, 2) => GlslVersion::new(150, "150"),
        (3, 3) => GlslVersion::new(330, "330"),
        (4, 0) => GlslVersion::new(400, "400"),
        (4, 1) => GlslVersion::new(410, "410"),
        (4, 2) => GlslVersion::new(420, "420"),
        (4, 3) => GlslVersion::new(430, "430"),
        (4, 4) => GlslVersion::new(440, "440"),
        (4, 5) => GlslVersion::new(450, "450"),
        (4, 6) => GlslVersion::new(460, "460"),
        _ => GlslVersion::undefined(),
    }
}

/// GLSL version for an OpenGL ES context.
pub const fn glsl_es_version(major: i32, minor: i32) -> GlslVersion {
    match (major, minor) {
        (2, 0) => GlslVersion::new(100, "100 es"),
        (3, 0) => GlslVersion::new(300, "300 es"),
        (3, 1) => GlslVersion::new(310, "310 es"),
        (3, 2) => GlslVersion::new(320, "320 es"),
        _ => GlslVersion::undefined(),
    }
}

/// GLSL version for the given context version.
///
/// Only exact `major.minor` pairs are known: an unlisted point release is
/// [`GlslVersion::undefined`], not the closest version. Works in constants
/// as well as with values read back from a live context:
///
/// ```no_run
/// let (major, minor) = glwrap::config::query_context_version();
/// let glsl = glwrap::glsl_version(major, minor, glwrap::GlApi::OpenGl);
/// if glsl.is_defined() {
///     // ...
/// }
/// ```
pub const fn glsl_version(major: i32, minor: i32, api: GlApi) -> GlslVersion {
    match api {
        GlApi::OpenGl => glsl_gl_version(major, minor),
        GlApi::OpenGlEs => glsl_es_version(major, minor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GL_TABLE: [(i32, i32, u16); 21] = [
        (0, 0, 0),
        (1, 0, 0),
        (1, 1, 0),
        (2, 0, 110),
        (2, 1, 120),
        (2, 2, 0),
        (3, 0, 130),
        (3, 1, 140),
        (3, 2, 150),
        (3, 3, 330),
        (3, 4, 0),
        (4, 0, 400),
        (4, 1, 410),
        (4, 2, 420),
        (4, 3, 430),
        (4, 4, 440),
        (4, 5, 450),
        (4, 6, 460),
        (4, 7, 0),
        (5, 0, 0),
        (5, 1, 0),
    ];

    const ES_TABLE: [(i32, i32, u16); 11] = [
        (0, 0, 0),
        (1, 0, 0),
        (1, 1, 0),
        (2, 0, 100),
        (2, 1, 0),
        (3, 0, 300),
        (3, 1, 310),
        (3, 2, 320),
        (3, 3, 0),
        (4, 0, 0),
        (4, 1, 0),
    ];

    // Evaluated by the compiler.
    const _: () = assert!(glsl_version(3, 3, GlApi::OpenGl).version == 330);
    const _: () = assert!(!glsl_version(3, 3, GlApi::OpenGlEs).is_defined());

    #[test]
    fn desktop_table() {
        for (major, minor, expected) in GL_TABLE {
            let glsl = glsl_version(major, minor, GlApi::OpenGl);
            assert_eq!(glsl.version, expected, "OpenGL {major}.{minor}");
            assert_eq!(glsl.is_defined(), expected != 0);
        }
    }

    #[test]
    fn es_table() {
        for (major, minor, expected) in ES_TABLE {
            let glsl = glsl_version(major, minor, GlApi::OpenGlEs);
            assert_eq!(glsl.version, expected, "OpenGL ES {major}.{minor}");
        }
    }

    #[test]
    fn tokens() {
        assert_eq!(
            glsl_version(3, 3, GlApi::OpenGl),
            GlslVersion::new(330, "330")
        );
        assert_eq!(
            glsl_version(2, 0, GlApi::OpenGlEs),
            GlslVersion::new(100, "100 es")
        );
        assert_eq!(
            glsl_version(3, 1, GlApi::OpenGlEs),
            GlslVersion::new(310, "310 es")
        );
    }

    #[test]
    fn unknown_versions_are_undefined() {
        for (major, minor) in [(-1, 0), (2, -1), (3, 9), (9, 9), (i32::MAX, 0)] {
            for api in [GlApi::OpenGl, GlApi::OpenGlEs] {
                let glsl = glsl_version(major, minor, api);
                assert_eq!(glsl, GlslVersion::undefined());
                assert_eq!(glsl.token, None);
            }
        }
    }
}
