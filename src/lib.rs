pub mod builder;
pub mod compiler;
pub mod config;
pub mod error;
pub mod shader;
pub mod shader_module;
pub mod utils;

pub use builder::{build_all, BuildReport};
pub use compiler::{CompileOutcome, Glslc, Invocation, ShaderCompiler};
pub use config::BuildConfig;
pub use error::BuildError;
pub use shader::{ShaderEntry, TargetEnv};
pub use shader_module::ShaderLibrary;
