use clap::{App, Arg};
use shader_builder::builder;
use shader_builder::{BuildConfig, BuildError, Glslc};
use std::path::{Path, PathBuf};

fn load_config(matches: &clap::ArgMatches) -> Result<BuildConfig, BuildError> {
    let input_dir = match matches.value_of_os("SHADER_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir().map_err(|source| BuildError::Io {
            path: PathBuf::from("."),
            source,
        })?,
    };

    let mut config = match matches.value_of_os("manifest") {
        Some(manifest) => BuildConfig::from_manifest(input_dir, Path::new(manifest))?,
        None => BuildConfig::new(input_dir),
    };
    if let Some(compiler) = matches.value_of("compiler") {
        config = config.with_compiler(compiler);
    }
    if matches.is_present("no-optimize") {
        config = config.with_optimize(false);
    }
    Ok(config)
}

fn run(matches: &clap::ArgMatches) -> Result<(), BuildError> {
    let config = load_config(matches)?;
    builder::ensure_output_dir(&config)?;
    log::info!(
        "compiling {} shaders from {} into {}",
        config.shaders.len(),
        config.input_dir.display(),
        config.output_dir.display()
    );
    let report = builder::build_all(&config, &mut Glslc)?;
    log::info!("compiled {} shaders", report.outputs.len());
    Ok(())
}

fn main() {
    // compiler warnings are logged at warn and should show up without RUST_LOG
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = App::new("shader_builder")
        .about("Compiles the black hole compute shaders to SPIR-V with glslc")
        .arg(
            Arg::with_name("SHADER_DIR")
                .help("directory holding the shader sources; compiled files go to its spv/ subdirectory")
                .index(1),
        )
        .arg(
            Arg::with_name("manifest")
                .long("manifest")
                .value_name("FILE")
                .takes_value(true)
                .help("TOML file listing the shaders to build"),
        )
        .arg(
            Arg::with_name("compiler")
                .long("compiler")
                .value_name("PROGRAM")
                .takes_value(true)
                .help("shader compiler to run instead of glslc"),
        )
        .arg(
            Arg::with_name("no-optimize")
                .long("no-optimize")
                .help("do not pass -O to the compiler"),
        )
        .get_matches();

    if let Err(err) = run(&matches) {
        log::error!("{}", err);
        std::process::exit(1);
    }
}
