use clap::{Args, Parser, Subcommand};
use better_phpunit::{Platform, RunMode, config::SettingsArgs};

#[derive(Parser, Debug)]
#[command(name = "better-phpunit")]
#[command(version, about = "Print the PHPUnit or Codeception command for the file and cursor in your editor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: RunCommand,

    /// Log resolution steps to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum RunCommand {
    /// Run the test method enclosing the cursor
    Run(EditorArgs),
    /// Run every test in the active file
    RunFile(EditorArgs),
    /// Run the whole test suite
    RunSuite(EditorArgs),
}

impl RunCommand {
    #[must_use]
    pub fn into_parts(self) -> (RunMode, EditorArgs) {
        match self {
            RunCommand::Run(args) => (RunMode::SingleTest, args),
            RunCommand::RunFile(args) => (RunMode::File, args),
            RunCommand::RunSuite(args) => (RunMode::FullSuite, args),
        }
    }
}

/// Editor state and output options shared by every run mode.
#[derive(Args, Debug)]
pub struct EditorArgs {
    /// Active file, absolute or relative to the workspace root
    #[arg(short, long)]
    pub file: String,

    /// Workspace root (defaults to the current directory)
    #[arg(short, long)]
    pub workspace_root: Option<String>,

    /// Zero-based cursor line, required by `run`
    #[arg(short, long)]
    pub line: Option<usize>,

    /// Platform conventions for the runner path and filter quoting
    #[arg(long, value_enum)]
    pub platform: Option<Platform>,

    /// Print the command and its resolved context as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub settings: SettingsArgs,
}
