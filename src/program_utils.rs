//! Building linked programs from vertex and fragment sources.
use thiserror::Error;

use crate::{
    config,
    gl_wrappers::{Program, Shader, ShaderType},
    glsl_version::GlslVersion,
};

/// Preprocessor block that lets one shader source target every GLSL version.
///
/// Shaders use `COMPAT_IN`/`COMPAT_OUT` for varyings, `COMPAT_ATTRIB` or
/// `COMPAT_ATTRIB_LOCATION(n)` for vertex inputs, `COMPAT_TEXTURE_2D` for
/// sampling and `COMPAT_FRAG_COLOR` for the fragment output.
pub const COMPATIBILITY_DEFINES: &str = concat!(
    "#if !defined(GL_ES)\n",
    "#if (__VERSION__ >= 110) && (__VERSION__ <= 120)\n",
    "#define COMPAT_IN  varying\n",
    "#define COMPAT_OUT varying\n",
    "#define COMPAT_ATTRIB attribute\n",
    "#define COMPAT_ATTRIB_LOCATION(IDX) attribute\n",
    "#define COMPAT_TEXTURE_2D texture2D\n",
    "#define COMPAT_FRAG_COLOR gl_FragColor\n",
    "#elif (__VERSION__ >= 130) && (__VERSION__ <= 140)\n",
    "#define COMPAT_IN  in\n",
    "#define COMPAT_OUT out\n",
    "#define COMPAT_ATTRIB in\n",
    "#define COMPAT_ATTRIB_LOCATION(IDX) in\n",
    "#define COMPAT_TEXTURE_2D texture2D\n",
    "#define COMPAT_FRAG_COLOR gl_FragColor\n",
    "#elif (__VERSION__ == 150)\n",
    "#define COMPAT_IN  in\n",
    "#define COMPAT_OUT out\n",
    "#define COMPAT_ATTRIB in\n",
    "#define COMPAT_ATTRIB_LOCATION(IDX) layout (location = IDX) in\n",
    "#define COMPAT_TEXTURE_2D texture\n",
    "#define COMPAT_FRAG_COLOR gl_FragColor\n",
    "#elif (__VERSION__ >= 330) && (__VERSION__ <= 450)\n",
    "#define COMPAT_IN  in\n",
    "#define COMPAT_OUT out\n",
    "#define COMPAT_ATTRIB in\n",
    "#define COMPAT_ATTRIB_LOCATION(IDX) layout (location = IDX) in\n",
    "#define COMPAT_TEXTURE_2D texture\n",
    "#define COMPAT_FRAG_COLOR FragColor\n",
    "COMPAT_OUT vec4 FragColor;\n",
    "#else\n",
    "#error \"Unsupported GL GLSL Version\"\n",
    "#endif\n",
    "#elif defined(GL_ES)\n",
    "#if (GL_FRAGMENT_PRECISION_HIGH == 1)\n",
    "precision highp   float;\n",
    "#else\n",
    "precision mediump float;\n",
    "#endif\n",
    "#if (__VERSION__ == 100)\n",
    "#define COMPAT_IN  varying\n",
    "#define COMPAT_OUT varying\n",
    "#define COMPAT_ATTRIB attribute\n",
    "#define COMPAT_ATTRIB_LOCATION(IDX) attribute\n",
    "#define COMPAT_TEXTURE_2D texture2D\n",
    "#define COMPAT_FRAG_COLOR gl_FragColor\n",
    "#elif (__VERSION__ >= 300) && (__VERSION__ <= 320)\n",
    "#define COMPAT_IN  in\n",
    "#define COMPAT_OUT out\n",
    "#define COMPAT_ATTRIB in\n",
    "#define COMPAT_ATTRIB_LOCATION(IDX) layout (location = IDX) in\n",
    "#define COMPAT_TEXTURE_2D texture\n",
    "#define COMPAT_FRAG_COLOR FragColor\n",
    "COMPAT_OUT vec4 FragColor;\n",
    "#else\n",
    "#error \"Unsupported GLES GLSL Version\"\n",
    "#endif\n",
    "#endif\n",
);

/// Why [`make_program`] failed. Each variant carries the program name and
/// the driver's info log.
#[derive(Debug, Error)]
pub enum ProgramBuildError {
    #[error("({name}) Vertex shader compilation error:\n{log}")]
    VertexCompile { name: String, log: String },
    #[error("({name}) Fragment shader compilation error:\n{log}")]
    FragmentCompile { name: String, log: String },
    #[error("({name}) Program linking error:\n{log}")]
    Link { name: String, log: String },
    #[error("({name}) Program validation error:\n{log}")]
    Validate { name: String, log: String },
}

impl ProgramBuildError {
    /// Name of the program that failed to build.
    pub fn name(&self) -> &str {
        match self {
            Self::VertexCompile { name, .. }
            | Self::FragmentCompile { name, .. }
            | Self::Link { name, .. }
            | Self::Validate { name, .. } => name,
        }
    }

    /// Driver info log of the failing stage.
    pub fn info_log(&self) -> &str {
        match self {
            Self::VertexCompile { log, .. }
            | Self::FragmentCompile { log, .. }
            | Self::Link { log, .. }
            | Self::Validate { log, .. } => log,
        }
    }
}

fn compile_stage(
    name: &str,
    shader_type: ShaderType,
    sources: &[&str],
) -> Result<Shader, ProgramBuildError> {
    let mut shader = Shader::new(shader_type);
    shader.set_sources(sources);
    shader.compile();
    if shader.is_compiled() {
        return Ok(shader);
    }

    let name = name.to_owned();
    let log = shader.info_log();
    Err(match shader_type {
        ShaderType::Fragment => ProgramBuildError::FragmentCompile { name, log },
        _ => ProgramBuildError::VertexCompile { name, log },
    })
}

fn link_and_validate(name: &str, program: &mut Program) -> Result<(), ProgramBuildError> {
    program.link();
    if !program.is_linked() {
        return Err(ProgramBuildError::Link {
            name: name.to_owned(),
            log: program.info_log(),
        });
    }

    program.validate();
    if !program.is_valid() {
        return Err(ProgramBuildError::Validate {
            name: name.to_owned(),
            log: program.info_log(),
        });
    }
    Ok(())
}

fn build_into(
    name: &str,
    program: &mut Program,
    vertex_sources: &[&str],
    fragment_sources: &[&str],
) -> Result<(), ProgramBuildError> {
    let vertex = compile_stage(name, ShaderType::Vertex, vertex_sources)?;
    let fragment = compile_stage(name, ShaderType::Fragment, fragment_sources)?;

    program.attach(&vertex);
    program.attach(&fragment);
    let result = link_and_validate(name, program);
    program.detach(&vertex);
    program.detach(&fragment);
    result
}

/// Compile, link and validate a program into an existing program object.
///
/// The shaders are always deleted before returning; on success the program
/// keeps the linked binary. Failures are logged.
///
/// # Errors
/// The first stage that fails, with its info log.
pub fn make_program_into(
    name: &str,
    program: &mut Program,
    vertex_sources: &[&str],
    fragment_sources: &[&str],
) -> Result<(), ProgramBuildError> {
    build_into(name, program, vertex_sources, fragment_sources).inspect_err(|error| {
        log::error!("{error}");
    })
}

/// Compile, link and validate a new program.
///
/// Each stage source is the concatenation of its slices. Nothing leaks on
/// failure: shaders and the program are deleted when dropped.
///
/// # Errors
/// The first stage that fails, with its info log.
///
/// # Usage
/// ```no_run
/// let program = glwrap::program_utils::make_program(
///     "quad",
///     &["#version 330\n", "void main() { gl_Position = vec4(0.0); }"],
///     &["#version 330\n", "out vec4 c; void main() { c = vec4(1.0); }"],
/// )?;
/// # Ok::<(), glwrap::program_utils::ProgramBuildError>(())
/// ```
pub fn make_program(
    name: &str,
    vertex_sources: &[&str],
    fragment_sources: &[&str],
) -> Result<Program, ProgramBuildError> {
    let mut program = Program::new();
    make_program_into(name, &mut program, vertex_sources, fragment_sources)?;
    Ok(program)
}

/// [`make_program`] with one source string per stage.
///
/// # Errors
/// See [`make_program`].
pub fn make_program_from_source(
    name: &str,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<Program, ProgramBuildError> {
    make_program(name, &[vertex_source], &[fragment_source])
}

/// `#version` line and [`COMPATIBILITY_DEFINES`] for `version`.
pub fn compat_prelude(version: GlslVersion) -> String {
    format!(
        "#version {}\n{}",
        version.token.unwrap_or_default(),
        COMPATIBILITY_DEFINES
    )
}

/// [`make_program`] for sources written against the `COMPAT_*` macros.
///
/// Both sources get the prelude for the configured GLSL version.
///
/// # Errors
/// See [`make_program`].
pub fn make_program_compat(
    name: &str,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<Program, ProgramBuildError> {
    let prelude = compat_prelude(config::GLSL_VERSION);
    make_program(name, &[&prelude, vertex_source], &[&prelude, fragment_source])
}

/// [`make_program_into`] for sources written against the `COMPAT_*` macros.
///
/// # Errors
/// See [`make_program`].
pub fn make_program_compat_into(
    name: &str,
    program: &mut Program,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<(), ProgramBuildError> {
    let prelude = compat_prelude(config::GLSL_VERSION);
    make_program_into(
        name,
        program,
        &[&prelude, vertex_source],
        &[&prelude, fragment_source],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{gl_version::GlApi, glsl_version::glsl_version};

    #[test]
    fn desktop_prelude_starts_with_version_line() {
        let prelude = compat_prelude(glsl_version(3, 3, GlApi::OpenGl));
        assert!(prelude.starts_with("#version 330\n#if !defined(GL_ES)\n"));
        assert!(prelude.ends_with("#endif\n"));
    }

    #[test]
    fn es_prelude_keeps_the_es_suffix() {
        let prelude = compat_prelude(glsl_version(2, 0, GlApi::OpenGlEs));
        assert!(prelude.starts_with("#version 100 es\n"));
        assert!(prelude.contains("precision mediump float;\n"));
    }

    #[test]
    fn defines_cover_every_macro_in_both_profiles() {
        let (desktop, es) = COMPATIBILITY_DEFINES
            .split_once("#elif defined(GL_ES)\n")
            .expect("ES branch");
        for define in [
            "COMPAT_IN ",
            "COMPAT_OUT ",
            "COMPAT_ATTRIB ",
            "COMPAT_ATTRIB_LOCATION(IDX) ",
            "COMPAT_TEXTURE_2D ",
            "COMPAT_FRAG_COLOR ",
        ] {
            let define = format!("#define {define}");
            assert_eq!(desktop.matches(&define).count(), 4, "{define}");
            assert_eq!(es.matches(&define).count(), 2, "{define}");
        }
    }

    #[test]
    fn error_message_names_program_and_stage() {
        let error = ProgramBuildError::Validate {
            name: "sprite".to_owned(),
            log: "no fragment output".to_owned(),
        };
        assert_eq!(
            error.to_string(),
            "(sprite) Program validation error:\nno fragment output"
        );
        assert_eq!(error.name(), "sprite");
        assert_eq!(error.info_log(), "no fragment output");
    }
}
