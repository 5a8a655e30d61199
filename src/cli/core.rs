//! Shell context, command dispatch, and CLI error types.

use std::path::Path;

use dialoguer::{theme::ColorfulTheme, Confirm};
use strsim::levenshtein;
use thiserror::Error;

use crate::{
    catalog::Catalog,
    config::{Config, ConfigManager},
    errors::EstimatorError,
    format::{format_currency_with, CurrencyStyle},
    ingest::load_table_from_path,
    session::SessionState,
};

use super::commands;
use super::output;
use super::registry::{CommandEntry, CommandRegistry};

/// How the shell consumes input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

/// Top-level CLI failure surfaced to `main`.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] EstimatorError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("Prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),
}

/// Per-command failure reported to the user without ending the loop.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("exit requested")]
    ExitRequested,
    #[error("{0}")]
    InvalidArguments(String),
    #[error("Catalog not loaded")]
    CatalogNotLoaded,
    #[error(transparent)]
    Core(#[from] EstimatorError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),
}

pub type CommandResult = Result<(), CommandError>;

/// Shared shell runtime state: the session plus presentation-side inputs.
///
/// Quantity, density, and assumption text are presentation state; the core
/// only sees them when a quote or commit is requested.
pub struct ShellContext {
    pub(crate) mode: CliMode,
    registry: CommandRegistry,
    session: Option<SessionState>,
    config: Config,
    config_manager: ConfigManager,
    style: CurrencyStyle,
    theme: ColorfulTheme,
    pub(crate) pending_quantity: Option<f64>,
    pub(crate) pending_density: Option<f64>,
    pub(crate) pending_assumption: String,
    pub(crate) running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        let style = CurrencyStyle {
            symbol: config.currency_symbol.clone(),
            ..CurrencyStyle::default()
        };

        Ok(Self {
            mode,
            registry,
            session: None,
            config,
            config_manager,
            style,
            theme: ColorfulTheme::default(),
            pending_quantity: None,
            pending_density: None,
            pending_assumption: String::new(),
            running: true,
        })
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn command_entries(&self) -> Vec<&CommandEntry> {
        self.registry.list()
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn session(&self) -> Result<&SessionState, CommandError> {
        self.session.as_ref().ok_or(CommandError::CatalogNotLoaded)
    }

    pub(crate) fn session_mut(&mut self) -> Result<&mut SessionState, CommandError> {
        self.session.as_mut().ok_or(CommandError::CatalogNotLoaded)
    }

    /// Builds the catalog from the two dataset files and starts a session.
    pub(crate) fn load_tables(&mut self, area_path: &Path, category_path: &Path) -> CommandResult {
        let area_table = load_table_from_path(area_path)?;
        let category_table = load_table_from_path(category_path)?;
        let catalog = Catalog::from_tables(&area_table, &category_table)?;
        output::success(format!(
            "Catalog loaded: {} areas, {} categories.",
            catalog.areas().len(),
            catalog.categories().count()
        ));
        self.session = Some(SessionState::new(catalog));
        self.reset_pending();

        self.config.area_table_path = Some(area_path.display().to_string());
        self.config.category_table_path = Some(category_path.display().to_string());
        if let Err(err) = self.config_manager.save(&self.config) {
            output::warning(format!("could not persist dataset paths: {err}"));
        }
        Ok(())
    }

    pub(crate) fn configured_table_paths(&self) -> Option<(String, String)> {
        match (&self.config.area_table_path, &self.config.category_table_path) {
            (Some(area), Some(category)) => Some((area.clone(), category.clone())),
            _ => None,
        }
    }

    pub(crate) fn reset_pending(&mut self) {
        self.pending_quantity = None;
        self.pending_density = None;
        self.pending_assumption.clear();
    }

    pub(crate) fn format_money(&self, value: f64) -> String {
        format_currency_with(&self.style, value)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, input), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                output::info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt("Exit shell?")
            .default(true)
            .interact()?)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(&message);
                output::info("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::CatalogNotLoaded => {
                output::error("Catalog not loaded. Use `load <area-file> <category-file>` first.");
                Ok(())
            }
            other => {
                output::error(other.to_string());
                Ok(())
            }
        }
    }
}
