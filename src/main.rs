use clap::Parser;

use ascii_mirror::cli::{Args, Command, ConfigAction};
use ascii_mirror::config::Config;
use ascii_mirror::{commands, logging, AppError};

fn main() {
    if let Err(e) = real_main() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), AppError> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;
    let settings = args.settings(&config);

    let env_level = std::env::var(logging::LOG_ENV).ok();
    let level = logging::resolve_level(args.log_level, env_level.as_deref(), config.log.level);
    logging::init(&settings.log_file, level).map_err(|source| AppError::Log {
        path: settings.log_file.clone(),
        source,
    })?;
    log::info!("ascii-mirror {} starting", env!("CARGO_PKG_VERSION"));

    let mut stdout = std::io::stdout();
    match args.command() {
        Command::Run => commands::run_interactive(&settings),
        Command::Snapshot { ticks, copy } => commands::snapshot(&settings, ticks, copy, &mut stdout),
        Command::ListCameras => commands::list_cameras(&mut stdout),
        Command::Config { action } => match action {
            ConfigAction::Show => {
                commands::config_show(&settings, level, args.config.as_deref(), &mut stdout)
            }
            ConfigAction::Init => commands::config_init(args.config.as_deref(), &mut stdout),
        },
    }
}
