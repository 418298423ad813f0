// config.rs
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_TOOL: &str = "il2cppdumper";

/// Desktop front-end for il2cppdumper.
#[derive(Parser, Debug)]
#[command(name = "il2cppdumper-gui", version, about)]
pub struct Args {
    /// Dump tool to run, looked up on PATH
    #[arg(long, default_value = DEFAULT_TOOL)]
    pub tool: String,

    /// Prefill the executable file (e.g. GameAssembly.dll)
    #[arg(long)]
    pub executable: Option<PathBuf>,

    /// Prefill the global-metadata.dat file
    #[arg(long)]
    pub metadata: Option<PathBuf>,

    /// Prefill the output directory
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Diagnostic log filter, e.g. `debug` or `il2cppdumper_gui=trace`
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Startup state for the window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub tool: String,
    pub executable: String,
    pub metadata: String,
    pub output_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tool: DEFAULT_TOOL.to_string(),
            executable: String::new(),
            metadata: String::new(),
            output_dir: String::new(),
        }
    }
}

impl Args {
    pub fn app_config(&self) -> AppConfig {
        let text = |path: &Option<PathBuf>| {
            path.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        };
        AppConfig {
            tool: self.tool.clone(),
            executable: text(&self.executable),
            metadata: text(&self.metadata),
            output_dir: text(&self.output),
        }
    }
}
