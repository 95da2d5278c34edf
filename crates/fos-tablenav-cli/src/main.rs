//! tablenav - print the shadow tables of an HTML file

mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fos_tablenav::{build_from, BuildOptions};
use fos_tablenav_html::HtmlDocument;
use tracing_subscriber::EnvFilter;

use report::TableReport;

#[derive(Parser, Debug, PartialEq, Eq)]
#[command(name = "tablenav")]
#[command(version, about = "Print the shadow tables of an HTML file", long_about = None)]
struct Args {
    /// HTML file to read
    path: PathBuf,

    /// Only report the table at this index (document order)
    #[arg(short, long)]
    table: Option<usize>,

    /// Print JSON instead of text
    #[arg(short, long)]
    json: bool,

    /// Let rowspan=0 span to the end of its row group
    #[arg(long)]
    strict_rowspan: bool,
}

impl Args {
    fn build_options(&self) -> BuildOptions {
        if self.strict_rowspan {
            BuildOptions::strict()
        } else {
            BuildOptions::default()
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let html = std::fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    let doc = HtmlDocument::parse(&html).context("failed to parse HTML")?;
    tracing::info!(path = %args.path.display(), tables = doc.len(), "loaded document");

    let selected = match args.table {
        Some(index) => vec![(index, doc.table(index)?)],
        None => doc.tables().iter().enumerate().collect(),
    };

    let options = args.build_options();
    let reports: Vec<TableReport> = selected
        .into_iter()
        .map(|(index, table)| TableReport::new(index, table, build_from(table, &options)))
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print!("{report}");
        }
    }
    Ok(())
}
