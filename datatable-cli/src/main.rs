//! datatable-cli
//!
//! Mounts a table controller from a JSON table configuration, replays JSON
//! fetch results against the requests it dispatches, and prints the requests
//! and the resulting table.
//!
//! ```text
//! datatable-cli <CONFIG> [RESULTS] [--api <URL>] [--page <N>]
//!               [--sort <COLUMN>] [--search <TERM>] [--export] [--verbose]
//! ```
//!
//! `results.json` holds an array of fetch results
//! (`{data, dataTotalSize, error, fetched, fetching}`). Each page request is
//! answered with the next result in the array.

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use log::LevelFilter;
use simplelog::Config;
use simplelog::WriteLogger;
use tokio::sync::mpsc::UnboundedReceiver;

use datatable_lib::TableController;
use datatable_lib::TableViewModel;
use datatable_lib::config::TableConfiguration;
use datatable_lib::controller::TableView;
use datatable_lib::dispatch::ChannelDispatcher;
use datatable_lib::dispatch::FetchAction;
use datatable_lib::error::ConfigError;
use datatable_lib::fetch::FetchResponse;
use datatable_lib::fetch::FetchResult;
use datatable_lib::persist::InMemoryStore;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid results file: {0}")]
    Results(#[from] serde_json::Error),
}

/// Replays fetch results against a table controller
#[derive(Parser, Debug)]
#[command(name = "datatable-cli")]
#[command(about = "Mounts a data table from its settings and replays fetch results", long_about = None)]
struct Args {
    /// Table settings JSON file
    config: PathBuf,

    /// JSON array of fetch results, answered in request order
    results: Option<PathBuf>,

    /// API location carried by every request
    #[arg(long = "api", default_value = "")]
    api_location: String,

    /// Page to move to after the first response
    #[arg(long = "page")]
    page: Option<usize>,

    /// Column to sort by after the first response
    #[arg(long = "sort")]
    sort: Option<String>,

    /// Global search term to enter after the first response
    #[arg(long = "search")]
    search: Option<String>,

    /// Request an export of the exportable columns
    #[arg(long = "export")]
    export: bool,

    /// Log debug output to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn read(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = WriteLogger::init(level, Config::default(), std::io::stderr());

    let config = TableConfiguration::from_json(&read(&args.config)?)?;
    let results: Vec<FetchResult> = match &args.results {
        Some(path) => serde_json::from_str(&read(path)?)?,
        None => Vec::new(),
    };
    let mut replay = results.into_iter();

    let (dispatcher, mut actions) = ChannelDispatcher::new();
    let mut controller = TableController::builder()
        .config(config)
        .api_location(args.api_location.clone())
        .dispatcher(dispatcher)
        .store(Arc::new(InMemoryStore::new()))
        .mount();

    pump(&mut controller, &mut actions, &mut replay)?;

    if let Some(column) = &args.sort {
        report("sort", controller.apply_sort(column));
    }
    if let Some(term) = &args.search {
        report("search", controller.set_search(term.as_str()));
    }
    if let Some(page) = args.page {
        report("page", controller.go_to_page(page));
    }
    if args.export {
        report("export", controller.export());
    }

    pump(&mut controller, &mut actions, &mut replay)?;
    print_view(&controller.view());
    Ok(())
}

fn report(interaction: &str, applied: bool) {
    if !applied {
        println!("# {} rejected", interaction);
    }
}

/// Prints pending actions and answers each page request with the next
/// replayed result until no action is left or the results run out.
fn pump(
    controller: &mut TableController,
    actions: &mut UnboundedReceiver<FetchAction>,
    replay: &mut impl Iterator<Item = FetchResult>,
) -> Result<(), CliError> {
    while let Ok(action) = actions.try_recv() {
        println!("> {}", serde_json::to_string(&action)?);
        if let Ok(url) = action.url() {
            println!("  {}", url);
        }
        if action.is_export() {
            continue;
        }
        match replay.next() {
            Some(result) => {
                controller.receive(FetchResponse::for_action(&action, result));
            }
            None => log::debug!("No result to replay for request #{:?}", action.sequence()),
        }
    }
    Ok(())
}

fn print_view(view: &TableViewModel) {
    if let Some(title) = &view.title {
        println!("{}", title);
    }
    if let Some(text) = view.failure_text() {
        println!("{}", text);
        return;
    }
    if let Some(table) = view.table() {
        print_table(table);
    }
}

fn print_table(table: &TableView) {
    if let Some(search) = &table.search {
        println!("Search: {}", search.term);
    }

    let header: Vec<&str> = table.columns.iter().map(|c| c.title.as_str()).collect();
    println!("{}", header.join("\t"));

    for row in &table.rows {
        let cells: Vec<String> = table
            .columns
            .iter()
            .map(|column| match row.get(&column.key) {
                Some(serde_json::Value::String(s)) => s.clone(),
                Some(serde_json::Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            })
            .collect();
        println!("{}", cells.join("\t"));
    }

    if table.loading {
        println!("Loading...");
    }
    println!("{}", table.total_text);
    println!("Page {} of {}", table.page, table.page_count);
}
