use std::path::{Path, PathBuf};

use crate::crafter::config::load_document;
use crate::engine::CostParams;
use crate::error::Result;
use crate::models::Masteries;
use crate::table::{read_table, KeyedTable};

/// Empty and full journal prices: rows `"{tier}"`, one column per machine.
#[derive(Debug, Clone, Copy)]
pub struct JournalPrices<'a> {
    pub buy: &'a KeyedTable,
    pub sell: &'a KeyedTable,
}

/// Borrowed market data for one valuation run.
#[derive(Debug, Clone, Copy)]
pub struct MarketInputs<'a> {
    /// Rows `"{tier}.{ench}"`, one column per resource.
    pub resources: &'a KeyedTable,
    /// Rows `"{tier}"`, one column per artifact.
    pub artifacts: Option<&'a KeyedTable>,
    /// Rows `"{tier}.{ench}"`, one column per item.
    pub sell_prices: Option<&'a KeyedTable>,
    pub journals: Option<JournalPrices<'a>>,
    pub masteries: Option<&'a Masteries>,
    pub params: CostParams,
    pub premium: bool,
}

impl<'a> MarketInputs<'a> {
    /// Inputs with only resource prices and no tax, return rate or premium.
    pub fn new(resources: &'a KeyedTable) -> Self {
        Self {
            resources,
            artifacts: None,
            sell_prices: None,
            journals: None,
            masteries: None,
            params: CostParams::default(),
            premium: false,
        }
    }
}

/// Paths of the market files to load. Only resource prices are required.
#[derive(Debug, Clone, Default)]
pub struct MarketFiles {
    pub resources: PathBuf,
    pub artifacts: Option<PathBuf>,
    pub sell_prices: Option<PathBuf>,
    pub journals_buy: Option<PathBuf>,
    pub journals_sell: Option<PathBuf>,
    pub masteries: Option<PathBuf>,
}

/// Owned market data loaded from disk.
#[derive(Debug, Clone, Default)]
pub struct MarketData {
    pub resources: KeyedTable,
    pub artifacts: Option<KeyedTable>,
    pub sell_prices: Option<KeyedTable>,
    pub journals: Option<(KeyedTable, KeyedTable)>,
    pub masteries: Option<Masteries>,
}

fn read_optional(path: Option<&Path>) -> Result<Option<KeyedTable>> {
    path.map(read_table).transpose()
}

impl MarketData {
    pub fn load(files: &MarketFiles) -> Result<Self> {
        let journals = match (&files.journals_buy, &files.journals_sell) {
            (Some(buy), Some(sell)) => Some((read_table(buy)?, read_table(sell)?)),
            _ => None,
        };
        let masteries = files
            .masteries
            .as_deref()
            .map(load_document::<Masteries>)
            .transpose()?;

        Ok(Self {
            resources: read_table(&files.resources)?,
            artifacts: read_optional(files.artifacts.as_deref())?,
            sell_prices: read_optional(files.sell_prices.as_deref())?,
            journals,
            masteries,
        })
    }

    /// Borrow the data as valuation inputs.
    pub fn inputs(&self, params: CostParams, premium: bool) -> MarketInputs<'_> {
        MarketInputs {
            resources: &self.resources,
            artifacts: self.artifacts.as_ref(),
            sell_prices: self.sell_prices.as_ref(),
            journals: self
                .journals
                .as_ref()
                .map(|(buy, sell)| JournalPrices { buy, sell }),
            masteries: self.masteries.as_ref(),
            params,
            premium,
        }
    }
}
