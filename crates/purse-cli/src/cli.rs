use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "purse",
    about = "Purse — compile style objects into deduplicated stylesheet rules",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with registry settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compile style objects and print their class names and rules
    Compile(CompileArgs),
    /// Compile style objects into one deduplicated stylesheet
    Sheet(SheetArgs),
    /// Print the class-name hash of a string
    Hash(HashArgs),
}

#[derive(Args)]
pub struct CompileArgs {
    /// JSON files, each holding one style object
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Args)]
pub struct SheetArgs {
    /// JSON files, each holding one style object
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
    /// Also inject global rules from a JSON map of selector to declarations
    #[arg(long)]
    pub globals: Option<PathBuf>,
}

#[derive(Args)]
pub struct HashArgs {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "purse", "compile", "a.json", "b.json", "--format", "json", "--config", "purse.toml",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.config, Some(PathBuf::from("purse.toml")));
        match cli.command {
            Command::Compile(args) => assert_eq!(args.files.len(), 2),
            _ => panic!("expected compile"),
        }
    }

    #[test]
    fn compile_requires_files() {
        assert!(Cli::try_parse_from(["purse", "compile"]).is_err());
    }
}
