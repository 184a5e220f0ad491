//! Error type shared by every fallible startup step.
//!
//! None of these are recoverable: each one means the process was launched
//! against a driver or environment that cannot run the scene.

use std::path::PathBuf;

/// Fatal startup failure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The window system refused to initialize.
    #[error("window system initialization failed: {0}")]
    WindowSystem(String),

    /// Every context attempt in the negotiation list failed.
    #[error("no OpenGL context could be created ({attempts} attempts)")]
    NoContext {
        /// Number of attempts made before giving up.
        attempts: usize,
    },

    /// A required GL entry point could not be resolved.
    #[error("failed to load OpenGL function `{0}`")]
    GlLoad(&'static str),

    /// The negotiated context supports no shading-language dialect we ship.
    #[error("unsupported GLSL version {0}")]
    UnsupportedGlsl(u32),

    /// A shader stage failed to compile; `log` is the compiler output verbatim.
    #[error("{stage} shader compile error:\n{log}")]
    ShaderCompile {
        /// `"vertex"` or `"fragment"`.
        stage: &'static str,
        /// Compiler diagnostic text.
        log: String,
    },

    /// Program linking failed; `log` is the linker output verbatim.
    #[error("program link error:\n{log}")]
    ProgramLink {
        /// Linker diagnostic text.
        log: String,
    },

    /// A shader file could not be read.
    #[error("cannot read shader file {}: {source}", path.display())]
    ShaderFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A uniform the renderer needs is absent from a linked program.
    #[error("uniform `{0}` missing from linked program")]
    MissingUniform(&'static str),

    /// A GL object (buffer, program, vertex array) could not be created.
    #[error("GL object creation failed: {0}")]
    Gl(String),
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Self::Gl(message)
    }
}

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
