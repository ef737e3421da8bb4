use crate::compiler::{Invocation, ShaderCompiler};
use crate::config::BuildConfig;
use crate::error::BuildError;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Compiled artifacts, in table order.
    pub outputs: Vec<PathBuf>,
}

/// Compiles every shader of `config` in order and stops at the first failure.
///
/// Entries after a failing one are never handed to `compiler`, and outputs that were
/// already written stay where they are.
pub fn build_all<C>(config: &BuildConfig, compiler: &mut C) -> Result<BuildReport, BuildError>
where
    C: ShaderCompiler + ?Sized,
{
    let mut report = BuildReport {
        outputs: Vec::with_capacity(config.shaders.len()),
    };

    for shader in &config.shaders {
        let invocation = Invocation::new(config, shader);
        log::debug!("running {}", invocation.command_line());

        let outcome = compiler.compile(&invocation)?;
        if !outcome.success {
            return Err(BuildError::CompilerFailed {
                shader: shader.name.clone(),
                target_env: shader.target_env,
                exit_code: outcome.exit_code,
                diagnostics: outcome.diagnostics,
            });
        }
        if !outcome.diagnostics.trim().is_empty() {
            log::warn!("{}: {}", shader.name, outcome.diagnostics.trim_end());
        }

        log::info!("compiled {} -> {}", shader.name, invocation.output.display());
        report.outputs.push(invocation.output);
    }

    Ok(report)
}

/// The compiler will not create the output directory, so check for it up front.
pub fn ensure_output_dir(config: &BuildConfig) -> Result<(), BuildError> {
    if config.output_dir.is_dir() {
        Ok(())
    } else {
        Err(BuildError::MissingOutputDir(config.output_dir.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::CompileOutcome;
    use crate::shader::{ShaderEntry, TargetEnv};
    use std::path::Path;

    /// Records every invocation and fails on one shader name.
    #[derive(Default)]
    struct RecordingCompiler {
        fail_on: Option<&'static str>,
        invocations: Vec<Invocation>,
    }

    impl ShaderCompiler for RecordingCompiler {
        fn compile(&mut self, invocation: &Invocation) -> Result<CompileOutcome, BuildError> {
            self.invocations.push(invocation.clone());
            if self.fail_on == Some(invocation.shader.name.as_str()) {
                Ok(CompileOutcome::failed(2, "error: 1 error generated."))
            } else {
                Ok(CompileOutcome::succeeded())
            }
        }
    }

    fn abc_config() -> BuildConfig {
        BuildConfig::new("shaders").with_shaders(vec![
            ShaderEntry::new("a.comp", TargetEnv::Vulkan1_0),
            ShaderEntry::new("b.comp", TargetEnv::Vulkan1_0),
            ShaderEntry::new("c.comp", TargetEnv::Vulkan1_2),
        ])
    }

    fn names(compiler: &RecordingCompiler) -> Vec<&str> {
        compiler
            .invocations
            .iter()
            .map(|invocation| invocation.shader.name.as_str())
            .collect()
    }

    #[test]
    fn invokes_compiler_once_per_entry() {
        let config = BuildConfig::new("shaders");
        let mut compiler = RecordingCompiler::default();

        let report = build_all(&config, &mut compiler).expect("all shaders compile");

        assert_eq!(compiler.invocations.len(), config.shaders.len());
        for (invocation, shader) in compiler.invocations.iter().zip(&config.shaders) {
            assert_eq!(invocation.input, Path::new("shaders").join(&shader.name));
            assert_eq!(
                invocation.output.extension().and_then(|ext| ext.to_str()),
                Some("spv")
            );
            assert!(invocation
                .args
                .iter()
                .any(|arg| arg == shader.target_env.flag().as_str()));
        }
        assert_eq!(
            report.outputs,
            compiler
                .invocations
                .iter()
                .map(|invocation| invocation.output.clone())
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn stops_at_first_failure() {
        let config = abc_config();
        let mut compiler = RecordingCompiler {
            fail_on: Some("b.comp"),
            ..Default::default()
        };

        let result = build_all(&config, &mut compiler);

        assert_eq!(names(&compiler), ["a.comp", "b.comp"]);
        match result {
            Err(BuildError::CompilerFailed {
                shader,
                target_env,
                exit_code,
                diagnostics,
            }) => {
                assert_eq!(shader, "b.comp");
                assert_eq!(target_env, TargetEnv::Vulkan1_0);
                assert_eq!(exit_code, Some(2));
                assert!(diagnostics.contains("1 error generated"));
            }
            other => panic!("expected compiler failure, got {:?}", other),
        }
    }

    #[test]
    fn failure_on_first_entry_runs_nothing_else() {
        let config = abc_config();
        let mut compiler = RecordingCompiler {
            fail_on: Some("a.comp"),
            ..Default::default()
        };
        assert!(build_all(&config, &mut compiler).is_err());
        assert_eq!(names(&compiler), ["a.comp"]);
    }

    #[test]
    fn launch_errors_propagate() {
        struct Unlaunchable(usize);
        impl ShaderCompiler for Unlaunchable {
            fn compile(&mut self, invocation: &Invocation) -> Result<CompileOutcome, BuildError> {
                self.0 += 1;
                Err(BuildError::Launch {
                    program: invocation.program.clone(),
                    shader: invocation.shader.name.clone(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                })
            }
        }

        let mut compiler = Unlaunchable(0);
        let result = build_all(&abc_config(), &mut compiler);
        assert!(matches!(result, Err(BuildError::Launch { .. })));
        assert_eq!(compiler.0, 1);
    }

    #[test]
    fn empty_table_succeeds_without_invocations() {
        let config = BuildConfig::new("shaders").with_shaders(Vec::new());
        let mut compiler = RecordingCompiler::default();
        let report = build_all(&config, &mut compiler).expect("nothing to do");
        assert!(report.outputs.is_empty());
        assert!(compiler.invocations.is_empty());
    }

    #[test]
    fn works_through_trait_object() {
        let config = abc_config();
        let mut recording = RecordingCompiler::default();
        let compiler: &mut dyn ShaderCompiler = &mut recording;
        let report = build_all(&config, compiler).expect("all shaders compile");
        assert_eq!(report.outputs.len(), 3);
    }

    #[test]
    fn missing_output_dir_is_reported() {
        let config = BuildConfig::new("/definitely/not/a/real/shader/dir");
        match ensure_output_dir(&config) {
            Err(BuildError::MissingOutputDir(dir)) => assert_eq!(dir, config.output_dir),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
