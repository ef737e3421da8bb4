use crate::config;
use crate::error::BuildError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Vulkan version whose semantics the compiled SPIR-V has to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetEnv {
    Vulkan1_0,
    Vulkan1_1,
    Vulkan1_2,
    Vulkan1_3,
}

impl TargetEnv {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetEnv::Vulkan1_0 => "vulkan1.0",
            TargetEnv::Vulkan1_1 => "vulkan1.1",
            TargetEnv::Vulkan1_2 => "vulkan1.2",
            TargetEnv::Vulkan1_3 => "vulkan1.3",
        }
    }

    /// The `--target-env=` argument understood by glslc.
    pub fn flag(&self) -> String {
        format!("--target-env={}", self.as_str())
    }
}

impl fmt::Display for TargetEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetEnv {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "vulkan1.0" => Ok(TargetEnv::Vulkan1_0),
            "vulkan1.1" => Ok(TargetEnv::Vulkan1_1),
            "vulkan1.2" => Ok(TargetEnv::Vulkan1_2),
            "vulkan1.3" => Ok(TargetEnv::Vulkan1_3),
            other => Err(BuildError::UnknownTargetEnv(other.to_string())),
        }
    }
}

/// One row of the shader table: a source file and the environment to compile it for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderEntry {
    pub name: String,
    pub target_env: TargetEnv,
}

impl ShaderEntry {
    pub fn new(name: impl Into<String>, target_env: TargetEnv) -> ShaderEntry {
        ShaderEntry {
            name: name.into(),
            target_env,
        }
    }

    pub fn input_path(&self, input_dir: &Path) -> PathBuf {
        input_dir.join(&self.name)
    }

    pub fn output_file_name(&self) -> String {
        format!("{}.{}", self.name, config::SPV_EXTENSION)
    }

    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(self.output_file_name())
    }
}

/// The built-in table of black hole compute shaders.
pub fn default_shader_table() -> Vec<ShaderEntry> {
    config::SHADER_TABLE
        .iter()
        .map(|(name, target_env)| ShaderEntry::new(*name, *target_env))
        .collect()
}
