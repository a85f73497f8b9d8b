//! Batch runner: solves every instance of a set of folders and validates the
//! solutions with the external Java checker.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{error, info, warn};

use crate::config::SolverConfig;
use crate::constructive::solve;
use crate::error::{PickingError, Result};
use crate::evaluation::SolutionChecker;
use crate::io::{read_instance, write_solution};
use crate::models::RunResult;

/// Exit code recorded when the checker program cannot be found.
pub const MISSING_PROGRAM: i32 = 127;

/// External checker invocation: `<java> -jar <jar> <instance stem>`, run
/// inside `dir`.
#[derive(Debug, Clone)]
pub struct CheckerCommand {
    /// Folder holding the jar; instances and solutions are copied into it.
    pub dir: PathBuf,
    /// Jar file name, relative to `dir`.
    pub jar: String,
    /// Java launcher.
    pub java: String,
}

impl CheckerCommand {
    /// Checker with the default jar name and launcher.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            jar: "CheckerBatchingPicking.jar".to_string(),
            java: "java".to_string(),
        }
    }

    /// Copies the instance and its solution into the checker folder, runs the
    /// checker and returns its exit code.
    pub fn run(&self, instance_path: &Path, solution_path: &Path) -> Result<i32> {
        for file in [instance_path, solution_path] {
            let name = file.file_name().unwrap_or_default();
            let target = self.dir.join(name);
            fs::copy(file, &target).map_err(|e| PickingError::io(&target, e))?;
        }
        let stem = instance_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let status = Command::new(&self.java)
            .arg("-jar")
            .arg(&self.jar)
            .arg(&stem)
            .current_dir(&self.dir)
            .status();
        match status {
            Ok(status) => Ok(status.code().unwrap_or(1)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("`{}` not found, cannot validate {stem}", self.java);
                Ok(MISSING_PROGRAM)
            }
            Err(source) => Err(PickingError::Checker {
                command: self.java.clone(),
                source,
            }),
        }
    }
}

/// Batch parameters.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Folders scanned for `*.txt` instances.
    pub instance_dirs: Vec<PathBuf>,
    /// Folder receiving the solution files.
    pub solution_folder: PathBuf,
    /// External validation; solutions are only checked in-process without it.
    pub checker: Option<CheckerCommand>,
    /// Tour builder configuration.
    pub config: SolverConfig,
}

/// A solved instance and where its solution went.
#[derive(Debug, Clone)]
pub struct SolvedInstance {
    /// Instance file.
    pub instance_path: PathBuf,
    /// Written solution file.
    pub solution_path: PathBuf,
    /// Run result.
    pub result: RunResult,
}

/// Reads, solves and validates one instance, then writes its solution.
///
/// Violations found by [`SolutionChecker`] are logged, not returned.
pub fn solve_instance(
    instance_path: &Path,
    solution_folder: &Path,
    config: &SolverConfig,
) -> Result<SolvedInstance> {
    let instance = read_instance(instance_path)?;
    let result = solve(&instance, config);
    for violation in SolutionChecker::new(&instance).check(&result) {
        warn!("{}: {:?}", instance_path.display(), violation.kind);
    }
    let solution_path = write_solution(&result, solution_folder, instance_path)?;
    Ok(SolvedInstance {
        instance_path: instance_path.to_path_buf(),
        solution_path,
        result,
    })
}

/// Lists the `*.txt` files of each folder, sorted by name, folder by folder.
/// Missing folders are skipped with a warning.
pub fn discover_instances(dirs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for dir in dirs {
        if !dir.is_dir() {
            warn!("instance folder {} not found, skipped", dir.display());
            continue;
        }
        let mut files: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(|e| PickingError::io(dir, e))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "txt"))
            .collect();
        files.sort();
        found.extend(files);
    }
    Ok(found)
}

/// Outcome of one batch entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceStatus {
    /// Solved; the checker accepted the solution.
    Passed,
    /// Solved; the checker returned a non-zero code.
    Rejected(i32),
    /// Solved, no external checker configured.
    Unchecked,
    /// Reading, solving or writing failed.
    Failed(String),
}

/// Batch summary.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    entries: Vec<(PathBuf, InstanceStatus)>,
}

impl BatchReport {
    /// Every processed instance with its status, in processing order.
    pub fn entries(&self) -> &[(PathBuf, InstanceStatus)] {
        &self.entries
    }

    /// Number of processed instances.
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    /// Instances that were solved and not rejected.
    pub fn ok(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, s)| matches!(s, InstanceStatus::Passed | InstanceStatus::Unchecked))
            .count()
    }

    /// Instances that failed or were rejected.
    pub fn failures(&self) -> Vec<&Path> {
        self.entries
            .iter()
            .filter(|(_, s)| matches!(s, InstanceStatus::Rejected(_) | InstanceStatus::Failed(_)))
            .map(|(p, _)| p.as_path())
            .collect()
    }

    /// Human readable summary.
    pub fn summary(&self) -> String {
        let failures = self.failures();
        let mut text = format!(
            "total: {} | ok: {} | fail: {}",
            self.total(),
            self.ok(),
            failures.len()
        );
        for path in failures {
            let name = path.file_name().unwrap_or_default().to_string_lossy();
            text.push_str(&format!("\n  - {name}"));
        }
        text
    }
}

/// Solves every discovered instance and runs the checker on each solution.
pub fn run_batch(options: &BatchOptions) -> Result<BatchReport> {
    let instances = discover_instances(&options.instance_dirs)?;
    info!("{} instances found", instances.len());
    if let Some(checker) = &options.checker {
        fs::create_dir_all(&checker.dir).map_err(|e| PickingError::io(&checker.dir, e))?;
    }

    let mut report = BatchReport::default();
    for path in instances {
        let status = match solve_instance(&path, &options.solution_folder, &options.config) {
            Err(e) => {
                error!("{}: {e}", path.display());
                InstanceStatus::Failed(e.to_string())
            }
            Ok(solved) => match &options.checker {
                None => InstanceStatus::Unchecked,
                Some(checker) => match checker.run(&solved.instance_path, &solved.solution_path) {
                    Ok(0) => InstanceStatus::Passed,
                    Ok(code) => InstanceStatus::Rejected(code),
                    Err(e) => {
                        error!("{}: {e}", path.display());
                        InstanceStatus::Failed(e.to_string())
                    }
                },
            },
        };
        info!("{}: {status:?}", path.display());
        report.entries.push((path, status));
    }
    Ok(report)
}
