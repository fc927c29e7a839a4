mod indices;
mod show;

use indexboard_core::{Envelope, EnvelopeMeta, RenderOutcome};
use serde_json::Value;
use uuid::Uuid;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub use indices::IndexListing;

/// Typed payload of a finished command, kept around so the table renderer
/// can work from real types instead of re-parsing JSON.
pub enum CommandView {
    Dashboard(RenderOutcome),
    Indices(Vec<IndexListing>),
}

pub struct CommandResult {
    pub view: CommandView,
    pub warnings: Vec<String>,
    pub latency_ms: u64,
    pub source: &'static str,
}

impl CommandResult {
    pub fn ok(view: CommandView, source: &'static str) -> Self {
        Self {
            view,
            warnings: Vec::new(),
            latency_ms: 0,
            source,
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Wrap the payload in the standard envelope for JSON output.
    pub fn into_envelope(self) -> Result<Envelope<Value>, CliError> {
        let data = match &self.view {
            CommandView::Dashboard(outcome) => serde_json::to_value(outcome)?,
            CommandView::Indices(listings) => serde_json::to_value(listings)?,
        };

        let mut meta = EnvelopeMeta::new(
            Uuid::new_v4().hyphenated().to_string(),
            self.source,
            self.latency_ms,
        )?;
        for warning in self.warnings {
            meta.push_warning(warning);
        }

        Ok(Envelope::new(meta, data))
    }
}

pub async fn run(cli: &Cli) -> Result<CommandResult, CliError> {
    match &cli.command {
        Command::Show(args) => show::run(args, cli).await,
        Command::Indices => indices::run(),
    }
}
