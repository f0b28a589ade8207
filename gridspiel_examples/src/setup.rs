use std::path::Path;
use log::LevelFilter;

/// Initialises `fern` logger for example program.
///
/// `level` applies to the program itself, `level_core` to engine and games crates,
/// `level_rl` to learning crate. With `log_file` set records go to file instead of stdout.
pub fn setup_logger(level: LevelFilter, level_core: LevelFilter, level_rl: LevelFilter, log_file: Option<&Path>) -> Result<(), fern::InitError> {
    let dispatch  = fern::Dispatch::new()

        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level)
        .level_for("gridspiel_examples", level)
        .level_for("gridspiel_core", level_core)
        .level_for("gridspiel_games", level_core)
        .level_for("gridspiel_rl", level_rl);

        match log_file{
            None => dispatch.chain(std::io::stdout()),
            Some(f) => dispatch.chain(fern::log_file(f)?)
        }

        .apply()?;
    Ok(())
}
