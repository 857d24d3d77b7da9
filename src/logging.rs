use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;
use tracing::Level;

/// Send debug logs to the file named by `NN_LOG`. The terminal belongs to
/// the browser, so without `NN_LOG` nothing is logged at all.
pub fn init_from_env() -> io::Result<()> {
    let Some(path) = std::env::var_os("NN_LOG") else {
        return Ok(());
    };
    let level = parse_level(std::env::var("NN_LOG_LEVEL").ok().as_deref());
    init_file(Path::new(&path), level)
}

pub fn parse_level(value: Option<&str>) -> Level {
    value.and_then(|v| Level::from_str(v.trim()).ok()).unwrap_or(Level::DEBUG)
}

fn init_file(path: &Path, level: Level) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    // A subscriber may already be installed (tests); keep it.
    let _ = tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .try_init();
    Ok(())
}
