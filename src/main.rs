//! `ba-ids`: look up character file IDs and the bundle files that belong to them.
//!
//! Commands:
//! - `resolve`: resolve names or file IDs to records
//! - `patterns`: print the bundle file name patterns for a character
//! - `list`: print every record in the table
//! - `find`: list bundle files in a directory that belong to a character

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ba_character_ids::{
  BundlePattern, CharacterRecord, LoadOptions, Platform, ProfilesConfig, RecordStore, Resolver,
  load_path,
  patterns::{find_bundles, patterns_for_id},
};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
  name = "ba-ids",
  about = "Resolve character names to internal file IDs and bundle file names",
  version
)]
struct Cli {
  #[command(subcommand)]
  command: Commands,

  /// CSV table mapping names to file IDs
  #[arg(long, env = "BA_IDS_DATA", default_value = "students_data.csv", global = true)]
  data: PathBuf,

  /// Platform profile overrides (JSON or YAML); defaults to platform_profiles.json next to the data
  #[arg(long, global = true)]
  profiles: Option<PathBuf>,

  /// Separator used inside the aliases column
  #[arg(long, default_value_t = '|', global = true)]
  alias_delimiter: char,

  /// Enable verbose logging
  #[arg(short, long, global = true)]
  verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
  /// Resolve names, aliases or file IDs
  Resolve {
    /// Queries to resolve
    #[arg(required = true)]
    queries: Vec<String>,

    /// Print full records as JSON
    #[arg(long)]
    json: bool,
  },

  /// Print bundle file name patterns for a character
  Patterns {
    /// Name, alias or file ID
    query: String,

    #[arg(short, long, value_enum, default_value_t = PlatformArg::Steam)]
    platform: PlatformArg,
  },

  /// Print every record
  List {
    /// Print records as JSON
    #[arg(long)]
    json: bool,
  },

  /// List bundle files in a directory matching a character's patterns
  Find {
    /// Name, alias or file ID
    query: String,

    /// Directory holding the unpacked bundles
    dir: PathBuf,

    #[arg(short, long, value_enum, default_value_t = PlatformArg::Steam)]
    platform: PlatformArg,

    /// Descend into subdirectories
    #[arg(short, long)]
    recursive: bool,
  },
}

#[derive(Clone, Copy, ValueEnum)]
enum PlatformArg {
  /// Steam (Windows) build
  Steam,
  /// Android / iOS builds
  Mobile,
}

impl From<PlatformArg> for Platform {
  fn from(value: PlatformArg) -> Self {
    match value {
      PlatformArg::Steam => Platform::SteamWindows,
      PlatformArg::Mobile => Platform::Mobile,
    }
  }
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let filter = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
    )
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();

  let options = LoadOptions {
    alias_delimiter: cli.alias_delimiter,
  };
  let store = load_path(&cli.data, &options)
    .with_context(|| format!("failed to load character table {}", cli.data.display()))?;
  let resolver = Resolver::new(&store);

  match &cli.command {
    Commands::Resolve { queries, json } => {
      let records = resolver.resolve_all(queries.iter().map(String::as_str))?;
      print_records(&records, *json)?;
    }
    Commands::Patterns { query, platform } => {
      let profiles = load_profiles(&cli)?;
      let record = resolver.resolve(query)?;
      for pattern in record_patterns(record, &profiles, (*platform).into())? {
        println!("{}\t{}", pattern.category, pattern.glob);
      }
    }
    Commands::List { json } => {
      let records: Vec<&CharacterRecord> = store.all_records().iter().collect();
      print_records(&records, *json)?;
    }
    Commands::Find {
      query,
      dir,
      platform,
      recursive,
    } => {
      let profiles = load_profiles(&cli)?;
      run_find(&store, &profiles, query, dir, (*platform).into(), *recursive)?;
    }
  }

  Ok(())
}

fn load_profiles(cli: &Cli) -> Result<ProfilesConfig> {
  match &cli.profiles {
    Some(path) => ProfilesConfig::from_path(path),
    None => {
      let dir = cli
        .data
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
      Ok(ProfilesConfig::discover(dir))
    }
  }
}

fn record_patterns(
  record: &CharacterRecord,
  profiles: &ProfilesConfig,
  platform: Platform,
) -> Result<Vec<BundlePattern>> {
  patterns_for_id(record.file_id, profiles.profile(platform)).with_context(|| {
    format!(
      "{} ({}) has no bundle patterns",
      record.display_name, record.file_id
    )
  })
}

fn print_records(records: &[&CharacterRecord], json: bool) -> Result<()> {
  if json {
    println!("{}", serde_json::to_string_pretty(records)?);
    return Ok(());
  }

  for record in records {
    if record.aliases.is_empty() {
      println!("{}\t{}", record.file_id, record.display_name);
    } else {
      println!(
        "{}\t{}\t{}",
        record.file_id,
        record.display_name,
        record.aliases.join(", ")
      );
    }
  }
  Ok(())
}

fn run_find(
  store: &RecordStore,
  profiles: &ProfilesConfig,
  query: &str,
  dir: &Path,
  platform: Platform,
  recursive: bool,
) -> Result<()> {
  let record = Resolver::new(store).resolve(query)?;
  let patterns = record_patterns(record, profiles, platform)?;

  let groups = find_bundles(dir, &patterns, recursive)?;

  for group in groups {
    println!("{} ({})", group.category, group.glob);
    if group.files.is_empty() {
      println!("  (none)");
    }
    for path in group.files {
      println!("  {}", path.display());
    }
  }
  Ok(())
}
