use std::fmt::Write;
use std::path::PathBuf;

use clap::{
    ArgAction, ColorChoice, Command, CommandFactory, FromArgMatches, Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};

use duls::app_dirs;

/// Produce the full version banner including config and data directories.
fn long_version() -> &'static str {
    let config_dir = match app_dirs::get_config_dir() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };
    let data_dir = match app_dirs::get_data_dir() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };

    let mut details = format!("duls {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(details);
    let _ = writeln!(details, "config directory: {config_dir}");
    let _ = writeln!(details, "data directory: {data_dir}");

    Box::leak(details.into_boxed_str())
}

/// Create the clap styles used for custom colour output.
fn cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into the strongly typed [`CliArgs`] structure.
pub(crate) fn parse_cli() -> CliArgs {
    let mut matches = cli_command().get_matches();
    CliArgs::from_arg_matches_mut(&mut matches).unwrap_or_else(|err| err.exit())
}

pub(crate) fn cli_command() -> Command {
    CliArgs::command()
}

#[derive(Parser, Debug)]
#[command(
    name = "duls",
    version,
    long_version = long_version(),
    about = "List sizes of indexed directories and files",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
/// Command-line arguments accepted by the `duls` binary.
pub(crate) struct CliArgs {
    #[arg(
        short = 'a',
        long,
        help = "Show apparent instead of actual file size (default: actual)"
    )]
    pub(crate) apparent: bool,
    #[arg(long, help = "Show number of items instead of file size")]
    pub(crate) count: bool,
    #[arg(
        long,
        help = "Draw the tree with ASCII characters instead of Unicode (default: Unicode)"
    )]
    pub(crate) ascii: bool,
    #[arg(short = 'b', long, help = "Show sizes in exact number of bytes")]
    pub(crate) bytes: bool,
    #[arg(
        short = 'F',
        long,
        help = "Append a file type indicator (one of /@) to entries"
    )]
    pub(crate) classify: bool,
    #[arg(short = 'c', long, help = "Colorize output (only on terminals)")]
    pub(crate) color: bool,
    #[arg(
        short = 'd',
        long,
        value_name = "FILE",
        env = "DULS_DATABASE",
        help = "Index snapshot to read (default: snapshot in the data directory)"
    )]
    pub(crate) database: Option<PathBuf>,
    #[arg(
        short = 'D',
        long,
        help = "Show each target's own size only, not its contents"
    )]
    pub(crate) directory: bool,
    #[arg(
        long = "dirs-only",
        help = "List only directories, skip individual files"
    )]
    pub(crate) dirs_only: bool,
    #[arg(
        long = "full-path",
        help = "Show the full path instead of the tree in recursive view"
    )]
    pub(crate) full_path: bool,
    #[arg(
        short = 'g',
        long,
        help = "Draw a graph with relative size for each entry"
    )]
    pub(crate) graph: bool,
    #[arg(
        short = 'l',
        long,
        value_name = "N",
        help = "Traverse up to N levels deep (default: 4)"
    )]
    pub(crate) levels: Option<usize>,
    #[arg(
        short = 'n',
        long = "name-sort",
        help = "Sort output by name instead of by size"
    )]
    pub(crate) name_sort: bool,
    #[arg(short = 'R', long, help = "Recursively list subdirectories")]
    pub(crate) recursive: bool,
    #[arg(
        long = "config",
        value_name = "FILE",
        env = "DULS_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        value_name = "PATH",
        help = "Paths to list (default: current directory)"
    )]
    pub(crate) targets: Vec<String>,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, FromArgMatches};

    use super::{CliArgs, cli_command};

    fn parse(args: &[&str]) -> CliArgs {
        let mut matches = CliArgs::command().get_matches_from(args);
        CliArgs::from_arg_matches_mut(&mut matches).expect("parses")
    }

    #[test]
    fn command_definition_is_valid() {
        cli_command().debug_assert();
    }

    #[test]
    fn defaults_are_all_off() {
        let parsed = parse(&["duls"]);
        assert!(!parsed.recursive);
        assert!(!parsed.apparent);
        assert!(!parsed.count);
        assert!(parsed.levels.is_none());
        assert!(parsed.targets.is_empty());
    }

    #[test]
    fn short_flags_map_to_their_options() {
        let parsed = parse(&["duls", "-R", "-b", "-F", "-l", "2", "/srv"]);
        assert!(parsed.recursive);
        assert!(parsed.bytes);
        assert!(parsed.classify);
        assert_eq!(parsed.levels, Some(2));
        assert_eq!(parsed.targets, vec!["/srv".to_string()]);
    }

    #[test]
    fn multiple_targets_keep_their_order() {
        let parsed = parse(&["duls", "/a", "/b", "/c"]);
        assert_eq!(parsed.targets, vec!["/a", "/b", "/c"]);
    }
}
