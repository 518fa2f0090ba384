use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use config::{Config, ConfigError, File};
use serde::Deserialize;

use duls::app_dirs;
use duls::index::{Metric, SortOrder};
use duls::render::RenderOptions;
use duls::terminal::TerminalEnv;

use crate::cli::CliArgs;

const DEFAULT_SNAPSHOT: &str = "index.json";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    index: IndexSection,
    listing: ListingSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct IndexSection {
    database: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ListingSection {
    apparent: Option<bool>,
    count: Option<bool>,
    ascii: Option<bool>,
    bytes: Option<bool>,
    classify: Option<bool>,
    color: Option<bool>,
    directory: Option<bool>,
    dirs_only: Option<bool>,
    full_path: Option<bool>,
    graph: Option<bool>,
    levels: Option<usize>,
    name_sort: Option<bool>,
    recursive: Option<bool>,
}

/// Fully resolved invocation settings.
pub(crate) struct ResolvedConfig {
    pub(crate) database: PathBuf,
    pub(crate) targets: Vec<String>,
    pub(crate) options: RenderOptions,
}

/// Load configuration files, apply CLI overrides, and resolve against the
/// detected terminal environment.
pub(crate) fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
    let builder = build_config(cli)?;
    let mut raw: RawConfig = builder
        .try_deserialize()
        .map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
    raw.apply_cli_overrides(cli);
    raw.resolve(cli.targets.clone(), TerminalEnv::detect())
}

fn build_config(cli: &CliArgs) -> Result<Config> {
    let mut builder = Config::builder();

    if !cli.no_config {
        for path in default_config_files() {
            builder = builder.add_source(File::from(path).required(false));
        }
    }

    for path in &cli.config {
        builder = builder.add_source(File::from(path.clone()).required(true));
    }

    builder = builder.add_source(
        config::Environment::with_prefix("duls")
            .separator("__")
            .try_parsing(true),
    );

    builder.build().map_err(|err| match err {
        ConfigError::Frozen => anyhow!("configuration builder is frozen"),
        other => other.into(),
    })
}

fn default_config_files() -> Vec<PathBuf> {
    let mut files = Vec::new();

    if let Ok(dir) = app_dirs::get_config_dir() {
        files.push(dir.join("config.toml"));
    }

    if let Ok(current_dir) = env::current_dir() {
        files.push(current_dir.join(".duls.toml"));
        files.push(current_dir.join("duls.toml"));
    }

    files
}

impl RawConfig {
    /// Boolean CLI flags only ever force a setting on; absence leaves the
    /// configured value in place.
    fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(database) = cli.database.clone() {
            self.index.database = Some(database);
        }

        let listing = &mut self.listing;
        for (flag, slot) in [
            (cli.apparent, &mut listing.apparent),
            (cli.count, &mut listing.count),
            (cli.ascii, &mut listing.ascii),
            (cli.bytes, &mut listing.bytes),
            (cli.classify, &mut listing.classify),
            (cli.color, &mut listing.color),
            (cli.directory, &mut listing.directory),
            (cli.dirs_only, &mut listing.dirs_only),
            (cli.full_path, &mut listing.full_path),
            (cli.graph, &mut listing.graph),
            (cli.name_sort, &mut listing.name_sort),
            (cli.recursive, &mut listing.recursive),
        ] {
            if flag {
                *slot = Some(true);
            }
        }
        if let Some(levels) = cli.levels {
            listing.levels = Some(levels);
        }
    }

    fn resolve(self, targets: Vec<String>, env: TerminalEnv) -> Result<ResolvedConfig> {
        let database = match self.index.database {
            Some(path) => path,
            None => app_dirs::get_data_dir()?.join(DEFAULT_SNAPSHOT),
        };

        let targets = if targets.is_empty() {
            vec![".".to_string()]
        } else {
            targets
        };

        let listing = self.listing;
        let defaults = RenderOptions::default();

        // Metric precedence: count over apparent over actual.
        let metric = if listing.count.unwrap_or(false) {
            Metric::Count
        } else if listing.apparent.unwrap_or(false) {
            Metric::Apparent
        } else {
            Metric::Actual
        };
        let sort = if listing.name_sort.unwrap_or(false) {
            SortOrder::Name
        } else {
            SortOrder::Size
        };

        let full_path = listing.full_path.unwrap_or(false);
        let options = RenderOptions {
            metric,
            sort,
            levels: listing.levels.unwrap_or(defaults.levels),
            recursive: listing.recursive.unwrap_or(false),
            ascii: listing.ascii.unwrap_or(false),
            bytes: listing.bytes.unwrap_or(false),
            classify: listing.classify.unwrap_or(false),
            // Color only reaches the output when it is an interactive terminal.
            color: listing.color.unwrap_or(false) && env.interactive,
            // There is no good way to draw a bar next to a variable-length path.
            graph: listing.graph.unwrap_or(false) && !full_path,
            full_path,
            dirs_only: listing.dirs_only.unwrap_or(false),
            summary: listing.directory.unwrap_or(false),
            width: env.columns,
        };

        Ok(ResolvedConfig {
            database,
            targets,
            options,
        })
    }
}
