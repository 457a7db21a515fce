//! Resolves the configured context and evaluates the capability table.

use std::{env, fs, path::PathBuf};

#[allow(dead_code)]
#[path = "src/gl_version.rs"]
mod gl_version;
#[allow(dead_code)]
#[path = "src/glsl_version.rs"]
mod glsl_version;

use gl_version::{ContextVersion, Feature, GlApi};

const VERSION_ENV: &str = "GLWRAP_GL_VERSION";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/gl_version.rs");
    println!("cargo:rerun-if-changed=src/glsl_version.rs");
    println!("cargo:rerun-if-env-changed={VERSION_ENV}");

    let api = if env::var_os("CARGO_FEATURE_GLES").is_some() {
        GlApi::OpenGlEs
    } else {
        GlApi::OpenGl
    };
    let context = match env::var(VERSION_ENV) {
        Ok(text) => ContextVersion::parse(api, &text)
            .unwrap_or_else(|| panic!("GLWRAP :: {VERSION_ENV}={text:?} is not MAJOR.MINOR")),
        Err(_) => match api {
            GlApi::OpenGl => ContextVersion::opengl(4, 3),
            GlApi::OpenGlEs => ContextVersion::gles(3, 0),
        },
    };

    let glsl = glsl_version::glsl_version(context.major.into(), context.minor.into(), api);
    if !glsl.is_defined() {
        panic!(
            "GLWRAP :: cannot resolve GLSL version for {:?} {}.{}",
            api, context.major, context.minor
        );
    }

    let names: Vec<String> = Feature::ALL
        .iter()
        .map(|feature| format!("\"{}\"", feature.cfg_name()))
        .collect();
    println!(
        "cargo:rustc-check-cfg=cfg(glwrap_has, values({}))",
        names.join(", ")
    );
    for feature in Feature::ALL {
        if feature.is_available(context) {
            println!("cargo:rustc-cfg=glwrap_has=\"{}\"", feature.cfg_name());
        }
    }

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let generated = format!(
        "pub const CONTEXT: ContextVersion = ContextVersion::new(GlApi::{:?}, {}, {});\n",
        context.api, context.major, context.minor
    );
    fs::write(out_dir.join("context.rs"), generated).expect("failed to write context.rs");
}
