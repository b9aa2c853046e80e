use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "guitree",
    about = "Merge menu and toolbar structure documents",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge overlay documents into a base document
    Merge(MergeArgs),
    /// Validate documents
    Check(CheckArgs),
    /// Print a document as an outline
    Show(ShowArgs),
}

#[derive(Args)]
pub struct MergeArgs {
    /// Base document (JSON)
    pub base: PathBuf,
    /// Overlay documents, merged in the order given
    #[arg(short, long = "overlay")]
    pub overlays: Vec<PathBuf>,
    /// Registered command name
    #[arg(short, long = "command")]
    pub commands: Vec<String>,
    /// File listing registered command names, one per line
    #[arg(long = "commands")]
    pub commands_file: Option<PathBuf>,
    /// Command to withhold even if registered
    #[arg(long)]
    pub deny: Vec<String>,
    /// Merge policy (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub drop_leading_separators: bool,
    #[arg(long)]
    pub drop_trailing_separator: bool,
    /// Print merge counters
    #[arg(long)]
    pub stats: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Args)]
pub struct ShowArgs {
    pub file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn merge_arguments_parse() {
        let cli = Cli::parse_from([
            "guitree", "merge", "base.json", "-o", "a.json", "--overlay", "b.json", "-c",
            "file_save", "--deny", "file_quit", "--drop-trailing-separator",
        ]);
        let Command::Merge(args) = cli.command else {
            panic!("expected merge command");
        };
        assert_eq!(args.base, PathBuf::from("base.json"));
        assert_eq!(args.overlays, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
        assert_eq!(args.commands, vec!["file_save".to_string()]);
        assert_eq!(args.deny, vec!["file_quit".to_string()]);
        assert!(args.drop_trailing_separator);
        assert!(!args.drop_leading_separators);
    }
}
