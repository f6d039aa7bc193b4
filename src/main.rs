mod cli;

use std::{env::current_dir, path::PathBuf, process::ExitCode};

use better_phpunit::{
    CommandBuilder, RunMode, RunRequest, Settings, TextDocument, error::BPError,
    log::init_logging, workspace,
};
use clap::Parser;

use crate::cli::Cli;

fn handle(cli: Cli) -> Result<String, BPError> {
    let (mode, args) = cli.command.into_parts();

    let cwd = current_dir()?;
    let workspace_root: PathBuf = match &args.workspace_root {
        Some(root) => workspace::resolve_path(&cwd, root),
        None => cwd,
    };
    let file_path = workspace::resolve_path(&workspace_root, &args.file);

    let settings = Settings::load(&workspace_root, &args.settings)?;
    for warning in settings.validate(&workspace_root) {
        log::warn!("{warning}");
    }
    log::debug!("settings={settings:#?}");

    let document = match mode {
        RunMode::SingleTest => {
            if args.line.is_none() {
                return Err(BPError::MissingLine);
            }
            TextDocument::open(&file_path)?
        }
        RunMode::File | RunMode::FullSuite => TextDocument::default(),
    };

    let request = RunRequest::new(
        mode,
        file_path.to_string_lossy(),
        args.line.unwrap_or(0),
        workspace_root.to_string_lossy(),
    );
    let builder = CommandBuilder::new(
        request,
        settings,
        args.platform.unwrap_or_default(),
        &document,
    );
    let command = builder.build();

    if args.json {
        Ok(serde_json::to_string(&command)?)
    } else {
        Ok(command.command)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    log::debug!("args={cli:#?}");

    match handle(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            log::error!("{error}");
            ExitCode::FAILURE
        }
    }
}
