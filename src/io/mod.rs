//! Text formats, command line and logging.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use log::{info, LevelFilter};
use serde::Serialize;

use crate::error::{PickingError, Result};
use crate::EPOCH;

pub mod cli;
mod reader;
mod writer;

pub use reader::{parse_instance, read_instance};
pub use writer::{format_instance, format_solution, solution_path, write_instance, write_solution};

/// Writes `value` as pretty-printed JSON.
pub fn write_json(value: &impl Serialize, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| PickingError::io(path, e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value).map_err(|source| {
        PickingError::Json {
            path: path.to_path_buf(),
            source,
        }
    })?;
    info!("summary written to {}", path.display());
    Ok(())
}

/// Installs a stdout logger with a `[LEVEL] [hh:mm:ss] <thread>` prefix,
/// time measured from process start.
pub fn init_logger(level_filter: LevelFilter) -> std::result::Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            let handle = std::thread::current();
            let thread_name = handle.name().unwrap_or("-");

            let duration = EPOCH.elapsed();
            let sec = duration.as_secs() % 60;
            let min = (duration.as_secs() / 60) % 60;
            let hours = (duration.as_secs() / 60) / 60;

            let prefix = format!(
                "[{}] [{:0>2}:{:0>2}:{:0>2}] <{}>",
                record.level(),
                hours,
                min,
                sec,
                thread_name,
            );

            out.finish(format_args!("{:<27}{}", prefix, message))
        })
        .level(level_filter)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RunResult, Termination};

    #[test]
    fn test_write_json_summary() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("summary.json");
        let result = RunResult::new(vec![], vec![], 0, 0, (0, 0), Termination::Completed, vec![]);
        write_json(&result, &path).expect("written");
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).expect("readable"))
                .expect("valid json");
        assert_eq!(value["travelled_distance"], 0);
    }
}
