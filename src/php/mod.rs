pub mod call;
pub mod parse;

use std::cell::OnceCell;

use serde::Serialize;

use crate::{
    RunMode, RunRequest, config::Settings, document::LineSource, platform::Platform, workspace,
};

/// Values derived from the filesystem and the document, once per request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedContext {
    /// Nearest directory with its own `phpunit.xml`, when not the workspace
    /// root.
    pub sub_directory: Option<String>,
    /// Method enclosing the cursor. Only looked up for single test runs.
    pub method: Option<String>,
}

impl ResolvedContext {
    pub fn resolve<D>(request: &RunRequest, settings: &Settings, document: &D) -> Self
    where
        D: LineSource + ?Sized,
    {
        let sub_directory = workspace::sub_directory(
            &request.file_path,
            &request.workspace_root,
            settings.use_codeception,
        );
        let method = match request.mode {
            RunMode::SingleTest => parse::find_test_method(document, request.cursor_line),
            RunMode::FullSuite | RunMode::File => None,
        };
        log::debug!("resolved sub_directory={sub_directory:?} method={method:?}");
        Self {
            sub_directory,
            method,
        }
    }
}

/// The finished command together with what was resolved to build it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    pub mode: RunMode,
    pub command: String,
    pub sub_directory: Option<String>,
    pub method: Option<String>,
}

/// Builds the runner command line for one request.
///
/// Context is resolved on construction; the assembled string is computed on
/// first read of [`CommandBuilder::output`] and reused afterwards.
#[derive(Debug)]
pub struct CommandBuilder {
    request: RunRequest,
    settings: Settings,
    platform: Platform,
    context: ResolvedContext,
    output: OnceCell<String>,
}

impl CommandBuilder {
    pub fn new<D>(request: RunRequest, settings: Settings, platform: Platform, document: &D) -> Self
    where
        D: LineSource + ?Sized,
    {
        let context = ResolvedContext::resolve(&request, &settings, document);
        Self::with_context(request, settings, platform, context)
    }

    /// Skip resolution and use a context the host already knows.
    #[must_use]
    pub fn with_context(
        request: RunRequest,
        settings: Settings,
        platform: Platform,
        context: ResolvedContext,
    ) -> Self {
        Self {
            request,
            settings,
            platform,
            context,
            output: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn context(&self) -> &ResolvedContext {
        &self.context
    }

    #[must_use]
    pub fn sub_directory(&self) -> Option<&str> {
        self.context.sub_directory.as_deref()
    }

    #[must_use]
    pub fn method(&self) -> Option<&str> {
        self.context.method.as_deref()
    }

    #[must_use]
    pub fn file(&self) -> String {
        call::normalize_path(&self.request.file_path)
    }

    #[must_use]
    pub fn binary(&self) -> String {
        let root = self
            .sub_directory()
            .unwrap_or(self.request.workspace_root.as_str());
        call::binary(&self.settings, self.platform, root)
    }

    #[must_use]
    pub fn configuration(&self) -> String {
        call::configuration(&self.settings, self.sub_directory())
    }

    #[must_use]
    pub fn filter(&self) -> String {
        call::filter(&self.settings, self.platform, self.method())
    }

    #[must_use]
    pub fn suffix(&self) -> String {
        call::suffix(&self.settings)
    }

    /// The command line. Assembled once per builder.
    pub fn output(&self) -> &str {
        self.output.get_or_init(|| {
            let command = self.assemble();
            log::debug!("{} command: {command}", self.request.mode);
            command
        })
    }

    /// Freeze the output together with the resolved context.
    #[must_use]
    pub fn build(self) -> Command {
        let command = self.output().to_string();
        Command {
            mode: self.request.mode,
            command,
            sub_directory: self.context.sub_directory,
            method: self.context.method,
        }
    }

    fn assemble(&self) -> String {
        match self.request.mode {
            RunMode::FullSuite => format!(
                "{}{}{}",
                self.binary(),
                call::suite_suffix(&self.settings),
                self.suffix()
            ),
            RunMode::File => format!(
                "{} {}{}{}",
                self.binary(),
                self.file(),
                self.configuration(),
                self.suffix()
            ),
            RunMode::SingleTest => format!(
                "{} {}{}{}{}",
                self.binary(),
                self.file(),
                self.filter(),
                self.configuration(),
                self.suffix()
            ),
        }
    }
}
