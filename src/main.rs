/// Name visualizer entry point for native builds
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;
    use nameviz::app::{self, AppError};
    use nameviz::cli::Cli;
    use nameviz::config::AppConfig;

    let cli = Cli::parse();
    let (mut config, source) = AppConfig::load_or_default(cli.config.as_deref());
    cli.apply(&mut config);

    // RUST_LOG overrides the configured level
    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .parse_default_env()
        .init();
    source.report();

    if cli.write_config {
        let result = AppConfig::resolve_path(cli.config.as_deref())
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "Could not determine config directory",
                )
            })
            .map_err(|e| AppError::Config(e.into()))
            .and_then(|path| config.save(&path).map_err(AppError::from));
        if let Err(e) = result {
            log::error!("{}", e);
            std::process::exit(1);
        }
        return;
    }

    if let Err(e) = app::run(config, cli.names, cli.config) {
        log::error!("Application error: {}", e);
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}

// WASM builds only use the library
#[cfg(target_arch = "wasm32")]
fn main() {}
