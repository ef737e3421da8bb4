use crate::config::BuildConfig;
use crate::error::BuildError;
use crate::shader::ShaderEntry;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

/// A fully resolved compiler command line for one shader.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub program: String,
    pub shader: ShaderEntry,
    pub input: PathBuf,
    pub output: PathBuf,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new(config: &BuildConfig, shader: &ShaderEntry) -> Invocation {
        let input = shader.input_path(&config.input_dir);
        let output = shader.output_path(&config.output_dir);

        let mut args: Vec<OsString> = Vec::with_capacity(6);
        if config.optimize {
            args.push("-O".into());
        }
        args.push(shader.target_env.flag().into());
        args.push(format!("-mfmt={}", config.output_format).into());
        args.push(input.clone().into_os_string());
        args.push("-o".into());
        args.push(output.clone().into_os_string());

        Invocation {
            program: config.compiler.clone(),
            shader: shader.clone(),
            input,
            output,
            args,
        }
    }

    /// Human readable form, only meant for logs.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            line.push(' ');
            if arg.contains(' ') {
                line.push('"');
                line.push_str(&arg);
                line.push('"');
            } else {
                line.push_str(&arg);
            }
        }
        line
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOutcome {
    pub success: bool,
    pub exit_code: Option<i32>,
    /// Whatever the compiler wrote to stderr.
    pub diagnostics: String,
}

impl CompileOutcome {
    pub fn succeeded() -> CompileOutcome {
        CompileOutcome {
            success: true,
            exit_code: Some(0),
            diagnostics: String::new(),
        }
    }

    pub fn failed(exit_code: i32, diagnostics: impl Into<String>) -> CompileOutcome {
        CompileOutcome {
            success: false,
            exit_code: Some(exit_code),
            diagnostics: diagnostics.into(),
        }
    }
}

/// Runs a single compiler invocation to completion.
pub trait ShaderCompiler {
    fn compile(&mut self, invocation: &Invocation) -> Result<CompileOutcome, BuildError>;
}

/// The real thing: spawns the compiler process and waits for it.
#[derive(Debug, Default, Clone, Copy)]
pub struct Glslc;

impl ShaderCompiler for Glslc {
    fn compile(&mut self, invocation: &Invocation) -> Result<CompileOutcome, BuildError> {
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .output()
            .map_err(|source| BuildError::Launch {
                program: invocation.program.clone(),
                shader: invocation.shader.name.clone(),
                source,
            })?;

        Ok(CompileOutcome {
            success: output.status.success(),
            exit_code: output.status.code(),
            diagnostics: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
