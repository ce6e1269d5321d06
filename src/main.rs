use std::path::Path;

use clap::Parser;

use craft_calculator_rs::cli::{Cli, Command, MarketArgs};
use craft_calculator_rs::crafter::{analyze, suggest_items, AnalyzeQuery, Crafter, MarketData};
use craft_calculator_rs::engine::CostParams;
use craft_calculator_rs::error::Result;
use craft_calculator_rs::interface::{display_projection, display_requirements, display_table};
use craft_calculator_rs::table::{read_table, write_table};

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let query = cli.command.analyze_query().unwrap_or_default();
    let config = cli.config;
    let load_crafter = || Crafter::from_dir(&config);

    match cli.command {
        Command::Prices {
            market,
            output,
            show,
        } => cmd_prices(&load_crafter()?, &market, &output, show),
        Command::Analyze { input, output, .. } => cmd_analyze(&input, &query, output.as_deref()),
        Command::Requirements {
            item,
            amount,
            return_rate,
        } => cmd_requirements(&load_crafter()?, &item, amount, return_rate),
        Command::Calculate {
            item,
            tier,
            ench,
            amount,
            market,
        } => cmd_calculate(&load_crafter()?, &item, tier, ench, amount, &market),
    }
}

/// Load market files named on the command line.
fn load_market(market: &MarketArgs) -> Result<(MarketData, CostParams)> {
    let params = CostParams::new(market.tax, market.return_rate)?;
    let data = MarketData::load(&market.files())?;
    Ok((data, params))
}

/// Compute the aggregate table and save it.
fn cmd_prices(crafter: &Crafter, market: &MarketArgs, output: &Path, show: bool) -> Result<()> {
    let (data, params) = load_market(market)?;
    let inputs = data.inputs(params, market.premium);

    let table = crafter.prices(&inputs)?;
    write_table(output, &table)?;
    println!(
        "Wrote {} rows for {} recipes to {}",
        table.len(),
        crafter.recipes().len(),
        output.display()
    );

    if show {
        display_table(&table, "Prices");
    }
    Ok(())
}

/// Filter and sort a saved aggregate table.
fn cmd_analyze(input: &Path, query: &AnalyzeQuery, output: Option<&Path>) -> Result<()> {
    let table = read_table(input)?;
    let result = analyze(&table, query)?;

    if result.is_empty() {
        if let Some(item) = &query.item {
            let suggestions = suggest_items(&table, item);
            if !suggestions.is_empty() {
                println!("No rows for '{}'. Did you mean: {}?", item, suggestions.join(", "));
                return Ok(());
            }
        }
    }

    display_table(&result, "Analysis");

    if let Some(path) = output {
        write_table(path, &result)?;
        println!("Wrote {} rows to {}", result.len(), path.display());
    }
    Ok(())
}

/// Print gross resources for a number of crafts.
fn cmd_requirements(crafter: &Crafter, item: &str, amount: u64, return_rate: f64) -> Result<()> {
    let recipe = crafter.recipe(item)?;
    let requirements = recipe.requirements(amount, return_rate)?;
    display_requirements(&recipe.name, amount, &requirements);
    Ok(())
}

/// Project one recipe to a number of crafts.
fn cmd_calculate(
    crafter: &Crafter,
    item: &str,
    tier: i32,
    ench: i32,
    amount: u64,
    market: &MarketArgs,
) -> Result<()> {
    let (data, params) = load_market(market)?;
    let inputs = data.inputs(params, market.premium);

    let projection = crafter.calculate(item, tier, ench, amount, &inputs)?;
    display_projection(&projection);
    Ok(())
}
