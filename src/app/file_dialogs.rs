// file_dialogs.rs
//! Native file pickers borrowed from whatever desktop helper is installed.
//!
//! `zenity` is preferred, `kdialog` is the fallback. Both print the chosen
//! path on stdout, exit with 0 on success and with 1 when the user cancels.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogMode {
    File,
    Directory,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DialogResult {
    Selected(PathBuf),
    Cancelled,
    /// No helper could be found, or it failed in some way other than a cancel.
    Unavailable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Helper {
    Zenity,
    Kdialog,
}

impl Helper {
    const PREFERENCE: [Helper; 2] = [Helper::Zenity, Helper::Kdialog];

    fn program(self) -> &'static str {
        match self {
            Helper::Zenity => "zenity",
            Helper::Kdialog => "kdialog",
        }
    }

    fn args(self, prompt: &str, mode: DialogMode, initial_dir: Option<&Path>) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        match self {
            Helper::Zenity => {
                args.extend(["--file-selection", "--title", prompt].map(OsString::from));
                if mode == DialogMode::Directory {
                    args.push("--directory".into());
                }
                if let Some(dir) = initial_dir {
                    // zenity only opens *inside* the directory with a trailing separator
                    args.push("--filename".into());
                    args.push(dir.join("").into_os_string());
                }
            }
            Helper::Kdialog => {
                args.extend(["--title", prompt].map(OsString::from));
                args.push(match mode {
                    DialogMode::Directory => "--getexistingdirectory".into(),
                    DialogMode::File => "--getopenfilename".into(),
                });
                if let Some(dir) = initial_dir {
                    args.push(dir.as_os_str().to_owned());
                }
            }
        }
        args
    }
}

/// Runs pickers through an external helper found on the search path.
#[derive(Clone, Debug, Default)]
pub struct NativeDialog {
    search_path: Option<OsString>,
}

impl NativeDialog {
    /// Probes the process `PATH`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Probes `search_path` instead of the process `PATH`.
    #[cfg(test)]
    pub(crate) fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }

    pub fn select(&self, prompt: &str, mode: DialogMode, initial_dir: Option<&Path>) -> DialogResult {
        if !cfg!(unix) {
            return DialogResult::Unavailable;
        }

        let mut command = match self.build_command(prompt, mode, initial_dir) {
            Some(command) => command,
            None => {
                tracing::debug!("neither zenity nor kdialog found on the search path");
                return DialogResult::Unavailable;
            }
        };

        match command.output() {
            Ok(output) => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                interpret(output.status.code(), &stdout)
            }
            Err(err) => {
                tracing::warn!("error running native dialog command {:?}: {}", command, err);
                DialogResult::Unavailable
            }
        }
    }

    fn build_command(&self, prompt: &str, mode: DialogMode, initial_dir: Option<&Path>) -> Option<Command> {
        let search_path = self.search_path.as_deref();
        let (helper, program) = Helper::PREFERENCE
            .iter()
            .find_map(|&helper| locate(helper.program(), search_path).map(|p| (helper, p)))?;

        let mut command = Command::new(program);
        command.args(helper.args(prompt, mode, initial_dir));
        Some(command)
    }
}

/// Resolves `program` on `search_path`, or on the process `PATH` when none is set.
fn locate(program: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    match search_path {
        Some(paths) => which::which_in(program, Some(paths), ".").ok(),
        None => which::which(program).ok(),
    }
}

fn interpret(code: Option<i32>, stdout: &str) -> DialogResult {
    let selected = stdout.trim();
    match code {
        Some(0) if !selected.is_empty() => DialogResult::Selected(PathBuf::from(selected)),
        Some(1) => DialogResult::Cancelled,
        _ => DialogResult::Unavailable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(unix)]
    use crate::utils::tests::write_script;

    fn args_to_strings(args: &[OsString]) -> Vec<&str> {
        args.iter().filter_map(|arg| arg.to_str()).collect()
    }

    #[test]
    fn zenity_directory_args_get_trailing_separator() {
        let args = Helper::Zenity.args(
            "Select Output Directory",
            DialogMode::Directory,
            Some(Path::new("/home/user/dumps")),
        );
        assert_eq!(
            args_to_strings(&args),
            vec![
                "--file-selection",
                "--title",
                "Select Output Directory",
                "--directory",
                "--filename",
                "/home/user/dumps/",
            ]
        );
    }

    #[test]
    fn zenity_file_args_without_seed() {
        let args = Helper::Zenity.args("Select Executable File", DialogMode::File, None);
        assert_eq!(
            args_to_strings(&args),
            vec!["--file-selection", "--title", "Select Executable File"]
        );
    }

    #[test]
    fn kdialog_uses_its_own_flags() {
        let file = Helper::Kdialog.args("Pick", DialogMode::File, Some(Path::new("/srv/game")));
        assert_eq!(
            args_to_strings(&file),
            vec!["--title", "Pick", "--getopenfilename", "/srv/game"]
        );
        let dir = Helper::Kdialog.args("Pick", DialogMode::Directory, None);
        assert_eq!(
            args_to_strings(&dir),
            vec!["--title", "Pick", "--getexistingdirectory"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn locate_only_matches_executables() {
        let bin = tempfile::tempdir().unwrap();
        std::fs::write(bin.path().join("kdialog"), "not a program").unwrap();
        let script = write_script(bin.path(), "zenity", "exit 0");

        let search = bin.path().as_os_str();
        let found = locate("zenity", Some(search)).unwrap();
        assert_eq!(
            std::fs::canonicalize(found).unwrap(),
            std::fs::canonicalize(script).unwrap()
        );
        assert_eq!(locate("kdialog", Some(search)), None);
        assert_eq!(locate("missing", Some(search)), None);
    }

    #[test]
    fn exit_codes_map_to_results() {
        assert_eq!(
            interpret(Some(0), "  /data/GameAssembly.dll\n"),
            DialogResult::Selected(PathBuf::from("/data/GameAssembly.dll"))
        );
        assert_eq!(interpret(Some(0), "\n"), DialogResult::Unavailable);
        assert_eq!(interpret(Some(1), ""), DialogResult::Cancelled);
        assert_eq!(interpret(Some(5), "/x"), DialogResult::Unavailable);
        assert_eq!(interpret(None, "/x"), DialogResult::Unavailable);
    }

    #[test]
    fn no_helper_means_unavailable() {
        let empty = tempfile::tempdir().unwrap();
        let dialog = NativeDialog::with_search_path(empty.path());
        assert_eq!(
            dialog.select("Select Executable File", DialogMode::File, None),
            DialogResult::Unavailable
        );
    }

    #[cfg(unix)]
    #[test]
    fn zenity_selection_is_trimmed() {
        let bin = tempfile::tempdir().unwrap();
        write_script(bin.path(), "zenity", "echo '/games/GameAssembly.dll'");
        let dialog = NativeDialog::with_search_path(bin.path());
        assert_eq!(
            dialog.select("Select Executable File", DialogMode::File, None),
            DialogResult::Selected(PathBuf::from("/games/GameAssembly.dll"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn cancel_is_reported() {
        let bin = tempfile::tempdir().unwrap();
        write_script(bin.path(), "zenity", "exit 1");
        let dialog = NativeDialog::with_search_path(bin.path());
        assert_eq!(
            dialog.select("Select Output Directory", DialogMode::Directory, None),
            DialogResult::Cancelled
        );
    }

    #[cfg(unix)]
    #[test]
    fn helper_failure_is_unavailable() {
        let bin = tempfile::tempdir().unwrap();
        write_script(bin.path(), "zenity", "echo 'cannot open display' >&2\nexit 255");
        let dialog = NativeDialog::with_search_path(bin.path());
        assert_eq!(
            dialog.select("Select Output Directory", DialogMode::Directory, None),
            DialogResult::Unavailable
        );
    }

    #[cfg(unix)]
    #[test]
    fn zenity_wins_over_kdialog() {
        let bin = tempfile::tempdir().unwrap();
        write_script(bin.path(), "zenity", "echo zenity");
        write_script(bin.path(), "kdialog", "echo kdialog");
        let dialog = NativeDialog::with_search_path(bin.path());
        assert_eq!(
            dialog.select("Pick", DialogMode::File, None),
            DialogResult::Selected(PathBuf::from("zenity"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn kdialog_receives_bare_seed_path() {
        let bin = tempfile::tempdir().unwrap();
        // Echo the arguments back as the "selection"
        write_script(bin.path(), "kdialog", "printf '%s|' \"$@\"");
        let dialog = NativeDialog::with_search_path(bin.path());
        assert_eq!(
            dialog.select("Pick", DialogMode::Directory, Some(Path::new("/srv/dumps"))),
            DialogResult::Selected(PathBuf::from(
                "--title|Pick|--getexistingdirectory|/srv/dumps|"
            ))
        );
    }
}
