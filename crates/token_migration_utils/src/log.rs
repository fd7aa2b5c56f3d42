use std::str::FromStr;

use fern::colors::{Color, ColoredLevelConfig};

use crate::env::get_env_or;

/// Workspace crates logged at `LOG_LEVEL`; everything else stays at `Warn`.
const WORKSPACE_TARGETS: [&str; 3] = [
    "token_migration_rs",
    "token_migration_utils",
    "provider_utils",
];

pub fn setup_logger(
    levels: Option<Vec<(String, log::LevelFilter)>>,
) -> Result<(), fern::InitError> {
    let colors = ColoredLevelConfig {
        trace: Color::Cyan,
        debug: Color::Magenta,
        info: Color::Green,
        warn: Color::Red,
        error: Color::BrightRed,
    };

    let log_level_str = get_env_or("LOG_LEVEL", "INFO");
    let log_level = log::LevelFilter::from_str(&log_level_str).unwrap_or(log::LevelFilter::Info);

    let mut dispatch = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%H:%M:%S.%f]"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .chain(std::io::stdout())
        .level(log::LevelFilter::Warn);
    for target in WORKSPACE_TARGETS {
        dispatch = dispatch.level_for(target, log_level);
    }
    if let Some(bin_name) = current_bin_name() {
        dispatch = dispatch.level_for(bin_name, log_level);
    }
    if let Some(levels) = levels {
        for (module, level) in levels {
            dispatch = dispatch.level_for(module, level);
        }
    }

    dispatch.apply()?;
    if log::LevelFilter::from_str(&log_level_str).is_err() {
        log::warn!("LOG_LEVEL {:?} invalid, using INFO", log_level_str);
    }
    Ok(())
}

fn current_bin_name() -> Option<String> {
    std::env::current_exe()
        .ok()?
        .file_stem()?
        .to_str()?
        .to_owned()
        .into()
}
