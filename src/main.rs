/// huewheel entry point for native builds
fn main() {
    use std::path::PathBuf;

    let config = huewheel::AppConfig::load_from_default_path().unwrap_or_default();

    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .parse_default_env()
        .init();
    log::debug!("log level {}", config.log_level.name());

    let out_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    if let Err(e) = huewheel::app::run(&config, &out_dir) {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}
