use anyhow::{Context, Result};
use std::path::Path;

use super::{build_pipeline, tui, SeriesQuery};
use crate::config::Config;
use crate::db::Database;
use crate::import::{split_description, StatementImporter, StatementLayout};
use crate::normalize::CategoryMap;
use crate::ui::util::truncate;

pub(crate) fn as_cli(args: &[String], config: &Config) -> Result<()> {
    match args[1].as_str() {
        "import" | "i" => cli_import(&args[2..], config),
        "series" => cli_series(&args[2..], config),
        "chart" => cli_chart(&args[2..], config),
        "categories" => cli_categories(config),
        "review" => cli_review(config),
        "normalize" | "n" => cli_normalize(&args[2..], config),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("spendtrail {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

pub(crate) fn print_usage() {
    println!("spendtrail - clean bank statement descriptions and chart daily spending");
    println!();
    println!("Usage: spendtrail [--verbose] <command>");
    println!();
    println!("Commands:");
    println!("  import <file.csv>             Import a statement (date, amount, description, balance)");
    println!("  series [filters]              Print the daily series");
    println!("    --category <name>           Only this category");
    println!("    --from <YYYY-MM-DD>         First day (default: first transaction)");
    println!("    --to <YYYY-MM-DD>           Last day (default: last transaction)");
    println!("    --smoothing <kind>          averaged or smoothed (default: none)");
    println!("    --window <N>                Smoothing half-width in days");
    println!("    --csv                       Write CSV to stdout");
    println!("  chart [filters]               Interactive chart of the daily series");
    println!("  categories                    List categories");
    println!("  review                        List descriptions no rule recognised");
    println!("  normalize <description>       Show how a description is cleaned up");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Environment: SPENDTRAIL_DB, SPENDTRAIL_GAZETTEER, SPENDTRAIL_WINDOW, RUST_LOG");
}

fn cli_import(args: &[String], config: &Config) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: spendtrail import <file.csv>");
    }

    let path = Path::new(&args[0]);
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let rows = StatementImporter::read(path, &StatementLayout::default())?;
    println!("Parsed {} transactions", rows.len());

    let pipeline = build_pipeline(config)?;
    let imported = pipeline.process_all(&rows)?;
    let matched = imported.iter().filter(|r| r.description.processed).count();
    let located = imported
        .iter()
        .filter(|r| r.transaction.location.is_some())
        .count();
    println!("Recognised {matched}/{} merchants, {located} with a location", imported.len());

    let mut db = Database::open(&config.db_path)?;
    let count = db.insert_rows(&imported)?;
    let dupes = imported.len() - count;
    println!("Imported {count} new transactions ({dupes} duplicates skipped)");
    println!("{} transactions stored", db.get_transaction_count()?);

    tracing::info!(
        file = %path.display(),
        parsed = rows.len(),
        matched,
        inserted = count,
        "Import finished"
    );
    if matched < imported.len() {
        println!("Run `spendtrail review` to see unrecognised descriptions");
    }
    Ok(())
}

fn open_query(args: &[String], config: &Config) -> Result<(Database, SeriesQuery)> {
    let db = Database::open(&config.db_path)?;
    let query = SeriesQuery::from_args(args, config.window)?;
    query.validate(&db.get_categories()?)?;
    Ok((db, query))
}

fn cli_series(args: &[String], config: &Config) -> Result<()> {
    let (db, query) = open_query(args, config)?;
    let series = query.run(&db)?;

    if args.iter().any(|a| a == "--csv") {
        let mut wtr = csv::Writer::from_writer(std::io::stdout());
        wtr.write_record(["date", "amount"])?;
        for day in &series {
            wtr.write_record([day.date.to_string(), format!("{:.2}", day.amount)])?;
        }
        wtr.flush().context("Failed to write CSV")?;
        return Ok(());
    }

    if series.is_empty() {
        println!("No transactions");
        return Ok(());
    }
    for day in &series {
        println!("{}  {:>12.2}", day.date, day.amount);
    }
    Ok(())
}

fn cli_chart(args: &[String], config: &Config) -> Result<()> {
    let (db, query) = open_query(args, config)?;
    tui::as_tui(&db, query)
}

fn cli_categories(config: &Config) -> Result<()> {
    let db = Database::open(&config.db_path)?;
    let mapped: Vec<&str> = CategoryMap::builtin()
        .categories()
        .iter()
        .map(|c| c.as_str())
        .collect();
    for category in db.get_categories()? {
        if mapped.contains(&category.as_str()) {
            println!("{category}");
        } else {
            println!("{category}  (no built-in merchants)");
        }
    }
    Ok(())
}

fn cli_review(config: &Config) -> Result<()> {
    let db = Database::open(&config.db_path)?;
    let unmatched = db.get_unmatched_descriptions()?;
    if unmatched.is_empty() {
        println!("Every description matched a rule");
        return Ok(());
    }

    println!("{:<40} Transactions", "Description");
    println!("{}", "─".repeat(53));
    for (name, count) in &unmatched {
        println!("{:<40} {count}", truncate(name, 40));
    }
    Ok(())
}

fn cli_normalize(args: &[String], config: &Config) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: spendtrail normalize <description>");
    }
    let raw = args.join(" ");
    let (text, value_date) = split_description(&raw)?;
    let described = build_pipeline(config)?.describe(&text);

    println!("Merchant text: {}", described.merchant_text);
    println!(
        "Location:      {}",
        described.location.as_deref().unwrap_or("-")
    );
    if let Some(date) = value_date {
        println!("Value date:    {date}");
    }
    println!(
        "Name:          {}{}",
        described.description.id,
        if described.description.processed {
            ""
        } else {
            " (no rule matched)"
        }
    );
    println!(
        "Category:      {}",
        described
            .description
            .category
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".into())
    );
    Ok(())
}
