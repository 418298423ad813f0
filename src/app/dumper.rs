// dumper.rs
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use crate::app::Severity;
use crate::error::{DumperError, DumperResult};
use crate::utils::{measure_time, Logger};

/// Validated paths handed over to the worker thread.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunRequest {
    pub executable: PathBuf,
    pub metadata: PathBuf,
    pub output_dir: PathBuf,
}

impl RunRequest {
    fn args(&self) -> [&OsStr; 3] {
        [
            self.executable.as_os_str(),
            self.metadata.as_os_str(),
            self.output_dir.as_os_str(),
        ]
    }
}

pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: ExitStatus,
}

/// Worker entry point. Always ends with exactly one `Finished` update.
pub fn run_dumper(tool: &str, request: &RunRequest, logger: &Logger) {
    tracing::info!(tool, ?request, "starting dump");
    if let Err(err) = dump(tool, request, logger) {
        tracing::warn!("dump failed: {}", err);
        logger.log(Severity::Error, err.to_string());
    }
    logger.finish();
}

fn dump(tool: &str, request: &RunRequest, logger: &Logger) -> DumperResult<()> {
    if ensure_output_dir(&request.output_dir)? {
        logger.log(
            Severity::Warning,
            format!(
                "Warning: Output directory doesn't exist, creating output directory: {}",
                request.output_dir.display()
            ),
        );
    }

    logger.log(
        Severity::System,
        format!("Preparing to run: `{}`", command_line(tool, request)),
    );

    let (output, duration) = measure_time(|| invoke(tool, request));
    let output = output?;
    tracing::info!("{} exited with {} after {:?}", tool, output.status, duration);

    if !output.stdout.is_empty() {
        logger.log(Severity::Info, output.stdout);
    }
    if !output.stderr.is_empty() {
        logger.log(Severity::Error, format!("Error: (stderr): {}", output.stderr));
    }

    if output.status.success() {
        logger.log(Severity::Success, "Command completed successfully! ✨");
        Ok(())
    } else {
        Err(DumperError::ExitStatus(output.status.code()))
    }
}

/// Creates `dir` and any missing parents. Returns whether it had to.
pub fn ensure_output_dir(dir: &Path) -> DumperResult<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(dir).map_err(|source| DumperError::CreateOutputDir {
        path: dir.to_path_buf(),
        source,
    })?;
    Ok(true)
}

pub fn command_line(tool: &str, request: &RunRequest) -> String {
    let mut line = tool.to_string();
    for arg in request.args() {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}

/// Runs the dump tool to completion. A non-zero exit is not an error here.
pub fn invoke(tool: &str, request: &RunRequest) -> DumperResult<ToolOutput> {
    let output = Command::new(tool)
        .args(request.args())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => DumperError::ToolNotFound {
                tool: tool.to_string(),
            },
            _ => DumperError::Unexpected(err),
        })?;

    Ok(ToolOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        status: output.status,
    })
}
