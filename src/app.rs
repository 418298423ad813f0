// app.rs
pub mod dumper;
pub mod file_dialogs;
pub mod gui;

use eframe::egui;
use eframe::App as EframeApp;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::config::AppConfig;
use crate::error::{DumperError, DumperResult};
use crate::utils::{Logger, Repaint};
use dumper::RunRequest;
use file_dialogs::{DialogMode, DialogResult, NativeDialog};

pub struct App {
    // Path fields, edited directly by the text inputs
    pub executable: String,
    pub metadata: String,
    pub output_dir: String,
    pub tool: String,
    pub run_state: RunState,
    pub log: Vec<LogEntry>,
    pub scroll_to_bottom: bool,
    pub dialogs: NativeDialog,
    pub update_receiver: Option<Receiver<RunUpdate>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
    Warning,
    System,
}

#[derive(Clone, Debug)]
pub struct LogEntry {
    pub at: chrono::DateTime<chrono::Local>,
    pub text: String,
    pub severity: Severity,
}

impl LogEntry {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        LogEntry {
            at: chrono::Local::now(),
            text: text.into(),
            severity,
        }
    }
}

/// Messages from the run worker, applied in arrival order on the UI thread.
#[derive(Debug)]
pub enum RunUpdate {
    Log(LogEntry),
    Finished,
}

/// The three paths the dump tool needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathField {
    Executable,
    Metadata,
    OutputDir,
}

impl PathField {
    pub const ALL: [PathField; 3] = [PathField::Executable, PathField::Metadata, PathField::OutputDir];

    pub fn label(self) -> &'static str {
        match self {
            PathField::Executable => "Executable File:",
            PathField::Metadata => "Global Metadata File:",
            PathField::OutputDir => "Output Directory:",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            PathField::Executable => "Path to your executable file (e.g., GameAssembly.dll)",
            PathField::Metadata => "Path to your global-metadata.dat file",
            PathField::OutputDir => "Directory to save the dumped files",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            PathField::Executable => "Select Executable File",
            PathField::Metadata => "Select Global Metadata File",
            PathField::OutputDir => "Select Output Directory",
        }
    }

    pub fn mode(self) -> DialogMode {
        match self {
            PathField::OutputDir => DialogMode::Directory,
            _ => DialogMode::File,
        }
    }

    fn selected_label(self) -> &'static str {
        match self {
            PathField::Executable => "executable",
            PathField::Metadata => "metadata",
            PathField::OutputDir => "output directory",
        }
    }
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            executable: config.executable,
            metadata: config.metadata,
            output_dir: config.output_dir,
            tool: config.tool,
            run_state: RunState::Idle,
            log: Vec::new(),
            scroll_to_bottom: false,
            dialogs: NativeDialog::new(),
            update_receiver: None,
        }
    }

    pub fn field(&self, field: PathField) -> &str {
        match field {
            PathField::Executable => &self.executable,
            PathField::Metadata => &self.metadata,
            PathField::OutputDir => &self.output_dir,
        }
    }

    pub fn field_mut(&mut self, field: PathField) -> &mut String {
        match field {
            PathField::Executable => &mut self.executable,
            PathField::Metadata => &mut self.metadata,
            PathField::OutputDir => &mut self.output_dir,
        }
    }

    pub fn push_log(&mut self, severity: Severity, text: impl Into<String>) {
        self.log.push(LogEntry::new(text, severity));
        self.scroll_to_bottom = true;
    }

    /// Opens a native picker for `field`. Blocks until the helper exits.
    pub fn browse(&mut self, field: PathField) {
        let initial_dir = self.initial_dir(field);
        let result = self
            .dialogs
            .select(field.prompt(), field.mode(), initial_dir.as_deref());
        self.apply_selection(field, result);
    }

    pub fn apply_selection(&mut self, field: PathField, result: DialogResult) {
        match result {
            DialogResult::Selected(path) => {
                let path = path.display().to_string();
                self.push_log(
                    Severity::Info,
                    format!("Selected {}: {}", field.selected_label(), path),
                );
                *self.field_mut(field) = path;
            }
            DialogResult::Cancelled => {}
            DialogResult::Unavailable => {
                let kind = match field.mode() {
                    DialogMode::File => "file",
                    DialogMode::Directory => "directory",
                };
                self.push_log(
                    Severity::Error,
                    format!(
                        "Error: Could not open a native {} dialog. Please ensure 'zenity' or 'kdialog' is installed and working.",
                        kind
                    ),
                );
            }
        }
    }

    // Start the picker where the current value lives, if that is a real directory.
    fn initial_dir(&self, field: PathField) -> Option<PathBuf> {
        let value = self.field(field);
        if value.is_empty() {
            return None;
        }
        let path = Path::new(value);
        let dir = match field.mode() {
            DialogMode::Directory => Some(path),
            DialogMode::File => path.parent(),
        }?;
        dir.is_dir().then(|| dir.to_path_buf())
    }

    fn validate(&self) -> DumperResult<RunRequest> {
        if PathField::ALL.iter().any(|&field| self.field(field).is_empty()) {
            return Err(DumperError::MissingFields);
        }
        let executable = PathBuf::from(&self.executable);
        if !executable.exists() {
            return Err(DumperError::ExecutableNotFound(executable));
        }
        let metadata = PathBuf::from(&self.metadata);
        if !metadata.exists() {
            return Err(DumperError::MetadataNotFound(metadata));
        }
        Ok(RunRequest {
            executable,
            metadata,
            output_dir: PathBuf::from(&self.output_dir),
        })
    }

    /// Validates the fields and hands the run to a background worker.
    ///
    /// Returns whether a worker was started. Validation failures are logged
    /// and leave the previous log in place.
    pub fn trigger_run(&mut self, repaint: Repaint) -> bool {
        if self.run_state == RunState::Running {
            return false;
        }

        let request = match self.validate() {
            Ok(request) => request,
            Err(err) => {
                self.push_log(Severity::Error, err.to_string());
                return false;
            }
        };

        self.run_state = RunState::Running;
        self.log.clear();

        let (sender, receiver) = mpsc::channel();
        let logger = Logger::new(sender, repaint);
        let tool = self.tool.clone();

        let spawned = thread::Builder::new()
            .name("dumper".to_string())
            .spawn(move || dumper::run_dumper(&tool, &request, &logger));

        match spawned {
            Ok(_) => {
                self.update_receiver = Some(receiver);
                true
            }
            Err(err) => {
                tracing::warn!("failed to spawn dumper thread: {}", err);
                self.push_log(Severity::Error, DumperError::Unexpected(err).to_string());
                self.run_state = RunState::Idle;
                false
            }
        }
    }

    /// Drains pending worker updates. Returns true if anything changed.
    pub fn poll_updates(&mut self) -> bool {
        let receiver = match &self.update_receiver {
            Some(receiver) => receiver,
            None => return false,
        };

        let mut changed = false;
        let mut finished = false;
        loop {
            match receiver.try_recv() {
                Ok(RunUpdate::Log(entry)) => {
                    self.log.push(entry);
                    self.scroll_to_bottom = true;
                    changed = true;
                }
                Ok(RunUpdate::Finished) => {
                    finished = true;
                    break;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    // Worker died without reporting back
                    self.log.push(LogEntry::new(
                        "Internal Error: the run ended without reporting its result.",
                        Severity::Error,
                    ));
                    self.scroll_to_bottom = true;
                    finished = true;
                    break;
                }
            }
        }

        if finished {
            self.update_receiver = None;
            self.run_state = RunState::Idle;
            changed = true;
        }
        changed
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl EframeApp for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let needs_redraw = self.poll_updates();

        gui::render(self, ctx);

        if needs_redraw {
            ctx.request_repaint();
        }
    }
}
