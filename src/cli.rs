use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::crafter::{AnalyzeQuery, MarketFiles};

/// CraftCalculator: cost price, fame, focus and profit of craftable items.
#[derive(Parser, Debug)]
#[command(name = "craft_calculator")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory with recipes, masteries, base focus cost and artifact item values.
    #[arg(short, long, global = true, default_value = "config")]
    pub config: PathBuf,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Market files and modifiers shared by the valuation commands.
#[derive(Args, Debug, Clone)]
pub struct MarketArgs {
    /// Resource prices, rows "{tier}.{ench}".
    #[arg(long, default_value = "resources.csv")]
    pub resources: PathBuf,

    /// Artifact prices, rows "{tier}".
    #[arg(long)]
    pub artifacts: Option<PathBuf>,

    /// Item sell prices, rows "{tier}.{ench}", one column per item.
    #[arg(long)]
    pub sell_prices: Option<PathBuf>,

    /// Empty journal prices, rows "{tier}", one column per machine.
    #[arg(long, requires = "journals_sell")]
    pub journals_buy: Option<PathBuf>,

    /// Full journal prices, rows "{tier}", one column per machine.
    #[arg(long, requires = "journals_buy")]
    pub journals_sell: Option<PathBuf>,

    /// Current masteries (YAML or JSON): family -> item -> level.
    #[arg(long)]
    pub masteries: Option<PathBuf>,

    /// Marketplace tax.
    #[arg(long, default_value = "0")]
    pub tax: f64,

    /// Resource return rate in [0, 1].
    #[arg(long, default_value = "0")]
    pub return_rate: f64,

    /// Apply the premium fame bonus.
    #[arg(long)]
    pub premium: bool,
}

impl MarketArgs {
    pub fn files(&self) -> MarketFiles {
        MarketFiles {
            resources: self.resources.clone(),
            artifacts: self.artifacts.clone(),
            sell_prices: self.sell_prices.clone(),
            journals_buy: self.journals_buy.clone(),
            journals_sell: self.journals_sell.clone(),
            masteries: self.masteries.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute every metric for every recipe, tier and enchantment.
    Prices {
        #[command(flatten)]
        market: MarketArgs,

        /// Output CSV for the aggregate table.
        #[arg(short, long, default_value = "prices.csv")]
        output: PathBuf,

        /// Print the aggregate table.
        #[arg(long)]
        show: bool,
    },

    /// Filter and sort a previously computed aggregate table.
    Analyze {
        /// Aggregate table produced by `prices`.
        #[arg(short, long, default_value = "prices.csv")]
        input: PathBuf,

        /// Keep only this item.
        #[arg(long)]
        item: Option<String>,

        /// Keep only this tier.
        #[arg(long)]
        tier: Option<i32>,

        /// Keep only this enchantment.
        #[arg(long)]
        ench: Option<i32>,

        /// Sort by this column.
        #[arg(long)]
        sort_by: Option<String>,

        /// Sort descending.
        #[arg(long)]
        descending: bool,

        /// Keep the first N rows.
        #[arg(long)]
        top: Option<usize>,

        /// Also write the result to this CSV.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Gross resources needed for a number of crafts.
    Requirements {
        #[arg(long)]
        item: String,

        #[arg(long)]
        amount: u64,

        /// Resource return rate in [0, 1].
        #[arg(long, default_value = "0")]
        return_rate: f64,
    },

    /// Project one recipe's metrics to a number of crafts.
    Calculate {
        #[arg(long)]
        item: String,

        #[arg(long)]
        tier: i32,

        #[arg(long)]
        ench: i32,

        #[arg(long)]
        amount: u64,

        #[command(flatten)]
        market: MarketArgs,
    },
}

impl Command {
    /// Analysis query for the `analyze` command.
    pub fn analyze_query(&self) -> Option<AnalyzeQuery> {
        match self {
            Command::Analyze {
                item,
                tier,
                ench,
                sort_by,
                descending,
                top,
                ..
            } => Some(AnalyzeQuery {
                item: item.clone(),
                tier: *tier,
                ench: *ench,
                sort_by: sort_by.clone(),
                descending: *descending,
                top: *top,
            }),
            _ => None,
        }
    }
}
