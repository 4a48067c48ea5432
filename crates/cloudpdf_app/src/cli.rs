use std::path::PathBuf;

use clap::Parser;

use crate::logging::LogDestination;

/// CloudPDF workbench: run a simulated PDF tool over local files.
#[derive(Debug, Parser)]
#[command(name = "cloudpdf", version, about)]
pub struct Cli {
    /// Tool identifier, e.g. `merge` or `pdf-to-word`. See `--list-tools`.
    #[arg(required_unless_present = "list_tools")]
    pub tool: Option<String>,

    /// Input files for the run.
    #[arg(required_unless_present = "list_tools")]
    pub inputs: Vec<PathBuf>,

    /// Directory the result artifact is written to. Defaults to the value
    /// from the settings file.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Where log lines go.
    #[arg(long, value_enum, default_value = "file")]
    pub log: LogChoice,

    /// Print the tool catalog and exit.
    #[arg(long)]
    pub list_tools: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogChoice {
    File,
    Terminal,
    Both,
}

impl LogChoice {
    pub fn destination(self) -> LogDestination {
        match self {
            LogChoice::File => LogDestination::File,
            LogChoice::Terminal => LogDestination::Terminal,
            LogChoice::Both => LogDestination::Both,
        }
    }
}
