/* 📖 # What does the cinefacet binary do?

It is a thin terminal front end over the engine:

1. Load `cinefacet.toml` from the current directory (or `--config`), or use
   `--catalog` directly with default settings
2. Load the catalog; skipped records are reported as warnings
3. Either rank the catalog for the given selections and search text, or list a
   facet's vocabulary

Exit codes:
- 0: Success
- 1: Configuration or catalog could not be loaded
*/

mod display;

use std::env;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use cinefacet_base::tracing::init_tracing;
use cinefacet_base::{CatalogResult, FilePath, PalHandle, RealPal, bail};
use cinefacet_engine::{
    CatalogStore, Config, Facet, QueryAction, QueryState, SearchMode, load_catalog, load_config,
    rank_with,
};

const DEFAULT_CONFIG: &str = "cinefacet.toml";

#[derive(Debug, Parser)]
#[command(name = "cinefacet", version, about = "Filter and rank a tagged movie catalog")]
struct Cli {
    /// Configuration file, relative to the current directory
    #[arg(long, global = true)]
    config: Option<String>,

    /// Catalog file; skips the configuration file when given alone
    #[arg(long, global = true)]
    catalog: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank the catalog for the given selections and search text
    Rank(RankArgs),
    /// List the distinct values of a facet
    Vocabulary {
        /// genre, language or country
        facet: Facet,
        /// Only show values containing this text (case-insensitive)
        #[arg(long)]
        filter: Option<String>,
    },
}

#[derive(Debug, Args)]
struct RankArgs {
    #[arg(short, long = "genre")]
    genres: Vec<String>,

    #[arg(short, long = "language")]
    languages: Vec<String>,

    #[arg(short = 'c', long = "country")]
    countries: Vec<String>,

    /// Search text matched against titles
    #[arg(short, long)]
    search: Option<String>,

    /// Overrides the configured search mode (literal or pattern)
    #[arg(long)]
    mode: Option<SearchMode>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl RankArgs {
    fn actions(&self) -> Vec<QueryAction> {
        let toggles = [
            (Facet::Genre, &self.genres),
            (Facet::Language, &self.languages),
            (Facet::Country, &self.countries),
        ]
        .into_iter()
        .flat_map(|(facet, values)| {
            values.iter().map(move |value| QueryAction::Toggle {
                facet,
                value: value.clone(),
            })
        });
        toggles
            .chain(self.search.clone().map(QueryAction::SetSearchText))
            .collect()
    }

    fn query(&self) -> QueryState {
        let mut query = QueryState::new();
        for action in self.actions() {
            // Selecting a value on the command line twice should not deselect it.
            if let QueryAction::Toggle { facet, value } = &action {
                if query.is_selected(*facet, value) {
                    continue;
                }
            }
            query.apply(action);
        }
        query
    }
}

fn resolve_config(pal: &PalHandle, cli: &Cli) -> CatalogResult<(Config, FilePath)> {
    match (&cli.config, &cli.catalog) {
        (None, Some(catalog)) => Ok((
            Config::default_for(catalog.as_str()),
            FilePath::from(catalog.as_str()),
        )),
        (config_path, catalog) => {
            let explicit = config_path.is_some();
            let config_path = FilePath::from(config_path.as_deref().unwrap_or(DEFAULT_CONFIG));
            if !explicit && !pal.file_exists(&config_path)? {
                bail!(
                    "No {} in the current directory (pass --config or --catalog)",
                    DEFAULT_CONFIG
                );
            }
            let mut config = load_config(pal, &config_path)?;
            let catalog_path = match catalog {
                Some(catalog) => {
                    config.catalog = catalog.clone();
                    FilePath::from(catalog.as_str())
                }
                None => config.catalog_path(&config_path),
            };
            Ok((config, catalog_path))
        }
    }
}

fn load(pal: &PalHandle, catalog_path: &FilePath) -> CatalogResult<CatalogStore> {
    let report = load_catalog(pal, catalog_path)?;
    if !report.skipped.is_empty() {
        eprintln!("Warnings while loading {}:", catalog_path);
        for error in &report.skipped {
            eprintln!("  - {}", error);
        }
    }
    Ok(report.catalog)
}

fn run(cli: Cli, pal: PalHandle) -> CatalogResult<String> {
    let (config, catalog_path) = resolve_config(&pal, &cli)?;
    debug!(catalog = %catalog_path, mode = ?config.search_mode, "configuration resolved");
    let catalog = load(&pal, &catalog_path)?;

    match cli.command {
        Command::Rank(args) => {
            let mut options = config.matcher_options();
            if let Some(mode) = args.mode {
                options.mode = mode;
            }
            let query = args.query();
            let ranking = rank_with(&catalog, &query, &options);
            if args.json {
                serde_json::to_string_pretty(&ranking.to_summary())
                    .map(|json| json + "\n")
                    .map_err(|e| cinefacet_base::err!("Failed to serialize ranking: {}", e))
            } else {
                Ok(display::render_ranking(&ranking, catalog.len()))
            }
        }
        Command::Vocabulary { facet, filter } => {
            let vocabulary = catalog.vocabulary(facet);
            let values = vocabulary.matching(filter.as_deref().unwrap_or(""));
            Ok(display::render_values(values))
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing() {
        eprintln!("Warning: {}", e);
    }

    let current_dir = env::current_dir().unwrap_or_else(|e| {
        eprintln!("Error: Failed to get current directory: {}", e);
        process::exit(1);
    });
    let pal = PalHandle::new(RealPal::new(current_dir));

    match run(cli, pal) {
        Ok(output) => {
            print!("{}", output);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
