use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "porter",
    version,
    about = "Porter - move Create React App components to Vite + React + TypeScript",
    long_about = "Porter converts one CRA component at a time into a typed Vite component together with its types, data hook, API service, state store and vitest suites, and can run the target project's tests and build afterwards."
)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to a TOML conversion config; missing keys keep their defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a component and write its artifacts
    #[command(about = "Convert a component and write the generated artifacts")]
    Convert(ConvertArgs),

    /// Show what the extractor sees in a component
    #[command(about = "Analyze a component without generating anything")]
    Analyze(AnalyzeArgs),
}

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Component source file; `-` or nothing reads stdin
    #[arg(help = "Path to the component source, or - for stdin")]
    pub input: Option<String>,

    /// Component name, overriding the one found in the source
    #[arg(short, long)]
    pub name: Option<String>,

    /// Output root for generated files
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Run the target project's test runner afterwards
    #[arg(long)]
    pub run_tests: bool,

    /// Run the target project's production build afterwards
    #[arg(long)]
    pub run_build: bool,

    /// Print the conversion result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Component source file; `-` or nothing reads stdin
    #[arg(help = "Path to the component source, or - for stdin")]
    pub input: Option<String>,

    /// Component name, overriding the one found in the source
    #[arg(short, long)]
    pub name: Option<String>,

    /// Print the analysis as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_convert() {
        let cli = Cli::try_parse_from([
            "porter", "-v", "convert", "src/UserList.js", "--name", "Users", "--output", "web/src", "--run-tests",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 1);
        let Commands::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.input.as_deref(), Some("src/UserList.js"));
        assert_eq!(args.name.as_deref(), Some("Users"));
        assert_eq!(args.output, Some(PathBuf::from("web/src")));
        assert!(args.run_tests);
        assert!(!args.run_build);
    }

    #[test]
    fn test_parse_stdin_with_global_config() {
        let cli = Cli::try_parse_from(["porter", "analyze", "-", "--json", "--config", "porter.toml"]).unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("porter.toml")));
        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.input.as_deref(), Some("-"));
        assert!(args.json);
    }
}
