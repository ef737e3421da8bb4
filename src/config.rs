use crate::error::BuildError;
use crate::shader::{self, ShaderEntry, TargetEnv};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const COMPILER: &str = "glslc";
pub const OUTPUT_DIR_NAME: &str = "spv";
pub const SPV_EXTENSION: &str = "spv";
pub const OUTPUT_FORMAT: &str = "c";
pub const DEFAULT_TARGET_ENV: TargetEnv = TargetEnv::Vulkan1_0;
pub const SPIRV_MAGIC: u32 = 0x0723_0203;
pub const SHADER_TABLE: [(&str, TargetEnv); 4] = [
    ("black_hole_ray_marching_rk4.comp", TargetEnv::Vulkan1_0),
    ("black_hole_ray_marching_rk2.comp", TargetEnv::Vulkan1_0),
    ("black_hole_ray_marching_rk1.comp", TargetEnv::Vulkan1_0),
    ("black_hole_ray_query.comp", TargetEnv::Vulkan1_2),
];

/// Everything one build needs. Nothing is read from globals once this exists.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub compiler: String,
    pub optimize: bool,
    pub output_format: String,
    pub shaders: Vec<ShaderEntry>,
}

impl BuildConfig {
    /// Default table, sources in `input_dir`, outputs in `input_dir/spv`.
    pub fn new(input_dir: impl Into<PathBuf>) -> BuildConfig {
        let input_dir = input_dir.into();
        BuildConfig {
            output_dir: input_dir.join(OUTPUT_DIR_NAME),
            input_dir,
            compiler: COMPILER.to_string(),
            optimize: true,
            output_format: OUTPUT_FORMAT.to_string(),
            shaders: shader::default_shader_table(),
        }
    }

    pub fn with_shaders(mut self, shaders: Vec<ShaderEntry>) -> BuildConfig {
        self.shaders = shaders;
        self
    }

    pub fn with_compiler(mut self, compiler: impl Into<String>) -> BuildConfig {
        self.compiler = compiler.into();
        self
    }

    pub fn with_optimize(mut self, optimize: bool) -> BuildConfig {
        self.optimize = optimize;
        self
    }

    /// Reads a TOML manifest and applies it on top of [`BuildConfig::new`].
    pub fn from_manifest(
        input_dir: impl Into<PathBuf>,
        path: &Path,
    ) -> Result<BuildConfig, BuildError> {
        let text = std::fs::read_to_string(path).map_err(|source| BuildError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        BuildConfig::from_manifest_str(input_dir, &text).map_err(|err| match err {
            BuildError::Manifest { message, .. } => BuildError::Manifest {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    pub fn from_manifest_str(
        input_dir: impl Into<PathBuf>,
        text: &str,
    ) -> Result<BuildConfig, BuildError> {
        let manifest: Manifest = toml::from_str(text).map_err(|err| BuildError::Manifest {
            path: PathBuf::new(),
            message: err.to_string(),
        })?;
        manifest.apply(BuildConfig::new(input_dir))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    target_env: Option<String>,
    output_dir: Option<PathBuf>,
    optimize: Option<bool>,
    compiler: Option<String>,
    #[serde(rename = "shader")]
    shaders: Option<Vec<ManifestShader>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestShader {
    name: String,
    target_env: Option<String>,
}

impl Manifest {
    fn apply(self, mut config: BuildConfig) -> Result<BuildConfig, BuildError> {
        let default_env = match &self.target_env {
            Some(env) => env.parse()?,
            None => DEFAULT_TARGET_ENV,
        };
        if let Some(output_dir) = self.output_dir {
            config.output_dir = config.input_dir.join(output_dir);
        }
        if let Some(optimize) = self.optimize {
            config.optimize = optimize;
        }
        if let Some(compiler) = self.compiler {
            config.compiler = compiler;
        }
        match self.shaders {
            Some(shaders) => {
                config.shaders = shaders
                    .into_iter()
                    .map(|shader| -> Result<ShaderEntry, BuildError> {
                        let target_env = match shader.target_env {
                            Some(env) => env.parse()?,
                            None => default_env,
                        };
                        Ok(ShaderEntry::new(shader.name, target_env))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
            }
            // the built-in table carries its own environments
            None if self.target_env.is_some() => {
                return Err(BuildError::Manifest {
                    path: PathBuf::new(),
                    message: "`target_env` needs a [[shader]] list to apply to".to_string(),
                });
            }
            None => {}
        }
        Ok(config)
    }
}
