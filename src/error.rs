use crate::shader::TargetEnv;
use ash::vk;
use std::path::PathBuf;

/// Everything that can stop a shader build or the loading of its artifacts.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("failed to compile {shader} (--target-env={target_env}, exit code {}):\n{diagnostics}", display_code(.exit_code))]
    CompilerFailed {
        shader: String,
        target_env: TargetEnv,
        exit_code: Option<i32>,
        diagnostics: String,
    },

    #[error("could not start `{program}` for {shader}: {source}")]
    Launch {
        program: String,
        shader: String,
        #[source]
        source: std::io::Error,
    },

    #[error("output directory {0} does not exist")]
    MissingOutputDir(PathBuf),

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest {path}: {message}")]
    Manifest { path: PathBuf, message: String },

    #[error("unknown target environment `{0}`")]
    UnknownTargetEnv(String),

    #[error("invalid SPIR-V artifact {path}: {source}")]
    InvalidArtifact {
        path: PathBuf,
        #[source]
        source: ArtifactError,
    },

    #[error("no compiled shader named `{0}`")]
    UnknownShader(String),

    #[error("Vulkan call failed: {0}")]
    Vulkan(#[from] vk::Result),
}

/// Problems with the `-mfmt=c` text glslc writes.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ArtifactError {
    #[error("no words found")]
    Empty,

    #[error("`{0}` is not a 32-bit word")]
    BadToken(String),

    #[error("bad magic number {0:#010x}")]
    BadMagic(u32),
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "none".to_string(),
    }
}
