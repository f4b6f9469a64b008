pub mod config;
pub mod history;
pub mod options;
pub mod sample;
pub mod suggest;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::error::{LensError, Result};
use crate::panel::FilterPanel;
use crate::sample::sample_transactions;
use crate::settings::{shellexpand_path, Settings};
use crate::store::TransactionStore;

#[derive(Parser)]
#[command(name = "txnlens", about = "Search, filter and group transaction history.")]
pub struct Cli {
    /// Enable debug logging on stderr (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show transactions grouped by month, narrowed by search and filters.
    History {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        filters: FilterArgs,
        /// Remove the Nth active filter chip (1-based) before rendering; repeatable
        #[arg(long = "remove-chip", value_name = "N")]
        remove_chip: Vec<usize>,
        /// Print the render model as JSON
        #[arg(long)]
        json: bool,
    },
    /// Suggest search terms from recent searches and the merchant vocabulary.
    Suggest {
        /// Text typed so far (matches anywhere, case-insensitive)
        #[arg(default_value = "")]
        query: String,
        /// Maximum suggestions to show (default from settings)
        #[arg(long)]
        limit: Option<usize>,
        /// Commit a search before suggesting; repeatable, oldest first
        #[arg(long = "recent", value_name = "QUERY")]
        recent: Vec<String>,
    },
    /// Write the reference dataset as JSON.
    Sample {
        /// Output path (default: stdout)
        #[arg(long)]
        output: Option<String>,
    },
    /// List the fixed filter values (categories, statuses, accounts, types).
    Options,
    /// Show settings, or write the defaults.
    Config {
        /// Write default settings to the config file
        #[arg(long)]
        init: bool,
    },
}

#[derive(Args)]
pub struct SourceArgs {
    /// JSON file with a transaction array; amounts may be numbers or strings
    /// (default: settings data_file)
    #[arg(long)]
    pub file: Option<String>,
    /// Use the built-in reference dataset
    #[arg(long, conflicts_with = "file")]
    pub demo: bool,
}

#[derive(Args, Default)]
pub struct FilterArgs {
    /// Free-text search over merchant, description and category
    #[arg(long)]
    pub search: Option<String>,
    /// Start date: YYYY-MM-DD (requires --to)
    #[arg(long = "from")]
    pub from_date: Option<String>,
    /// End date: YYYY-MM-DD (requires --from)
    #[arg(long = "to")]
    pub to_date: Option<String>,
    /// Minimum absolute amount
    #[arg(long)]
    pub min: Option<String>,
    /// Maximum absolute amount
    #[arg(long)]
    pub max: Option<String>,
    /// Category to include; repeatable
    #[arg(long = "category")]
    pub categories: Vec<String>,
    /// Status to include: completed, pending, failed; repeatable
    #[arg(long = "status")]
    pub statuses: Vec<String>,
    /// Account to include; repeatable
    #[arg(long = "account")]
    pub accounts: Vec<String>,
    /// Type to include: transfer, payment, deposit, withdrawal, refund; repeatable
    #[arg(long = "type")]
    pub types: Vec<String>,
}

impl FilterArgs {
    /// Fill a filter panel the way a user would, one field and checkbox at a time.
    pub(crate) fn fill_panel(&self, panel: &mut FilterPanel) {
        if let Some(from) = &self.from_date {
            panel.set_date_start(from);
        }
        if let Some(to) = &self.to_date {
            panel.set_date_end(to);
        }
        if let Some(min) = &self.min {
            panel.set_amount_min(min);
        }
        if let Some(max) = &self.max {
            panel.set_amount_max(max);
        }
        for c in &self.categories {
            panel.toggle_category(c, true);
        }
        for s in &self.statuses {
            panel.toggle_status(s, true);
        }
        for a in &self.accounts {
            panel.toggle_account(a, true);
        }
        for t in &self.types {
            panel.toggle_type(t, true);
        }
    }
}

pub(crate) fn load_store(source: &SourceArgs, settings: &Settings) -> Result<TransactionStore> {
    if source.demo {
        return TransactionStore::new(sample_transactions());
    }
    let file = source
        .file
        .clone()
        .or_else(|| settings.data_file.clone())
        .ok_or_else(|| {
            LensError::Other(
                "No transaction file given. Pass --file, --demo, or set data_file in settings."
                    .to_string(),
            )
        })?;
    TransactionStore::from_json_file(&PathBuf::from(shellexpand_path(&file)))
}
