use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::{
    config::{Config, ConfigManager},
    core::{utils::PathResolver, LedgerManager},
    currency::CurrencyFormat,
    errors::CliError,
    storage::JsonStorage,
};

use super::output::{self, OutputPreferences};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub manager: LedgerManager,
    pub config: Config,
    pub format: CurrencyFormat,
    pub theme: ColorfulTheme,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    /// Opens the ledger under the data directory. A directory that cannot be
    /// created does not stop the shell: defaults are used and every change
    /// stays in memory, with each failed write reported.
    pub fn new(mode: CliMode) -> Self {
        let base = PathResolver::base_dir();
        let config = match ConfigManager::with_base_dir(base.clone())
            .and_then(|manager| manager.load())
        {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "using default configuration");
                output::warning(format!("{err}; using defaults."));
                Config::default()
            }
        };
        let storage = match JsonStorage::new(Some(base.clone()), Some(&config.state_file_name)) {
            Ok(storage) => storage,
            Err(err) => {
                let slot = PathResolver::state_file_in(&base, &config.state_file_name);
                tracing::warn!(
                    location = %slot.display(),
                    error = %err,
                    "data directory unavailable; changes stay in memory"
                );
                output::warning(format!(
                    "Data directory `{}` is unavailable ({err}); changes are kept in memory only.",
                    base.display()
                ));
                JsonStorage::at_path(slot)
            }
        };
        let manager = LedgerManager::open(Box::new(storage));
        Self::with_manager(mode, manager, config)
    }

    /// Builds a context around an already opened ledger.
    pub fn with_manager(mode: CliMode, manager: LedgerManager, config: Config) -> Self {
        output::set_preferences(OutputPreferences {
            color_enabled: config.color_enabled && mode == CliMode::Interactive,
        });
        for warning in manager.load_warnings() {
            output::warning(format!("While loading ledger: {warning}"));
        }
        Self {
            mode,
            format: CurrencyFormat::from_config(&config),
            manager,
            config,
            theme: ColorfulTheme::default(),
            last_command: None,
            running: true,
        }
    }

    pub fn prompt(&self) -> String {
        let state = self.manager.state();
        format!(
            "[{} | {}] > ",
            self.format.format(state.spending_balance),
            self.format.format(state.savings_balance)
        )
    }

    /// Asks a yes/no question. `assume_yes` answers it up front; in script
    /// mode an unanswered question counts as "no".
    pub fn confirm(&self, prompt: &str, assume_yes: bool) -> Result<bool, CliError> {
        if assume_yes {
            return Ok(true);
        }
        match self.mode {
            CliMode::Script => {
                output::info(format!("{prompt} -> no (pass --yes to confirm)"));
                Ok(false)
            }
            CliMode::Interactive => Ok(Confirm::with_theme(&self.theme)
                .with_prompt(prompt)
                .default(false)
                .interact()?),
        }
    }

    /// Warns once per failed write so the user knows data is only in memory.
    pub fn report_persistence(&self) {
        if let Some(err) = self.manager.last_persist_error() {
            output::warning(format!("Changes are kept in memory only: {err}"));
        }
    }

    pub fn report_error(&self, err: CliError) {
        tracing::debug!(command = ?self.last_command, error = %err, "command failed");
        output::error(err);
    }
}
