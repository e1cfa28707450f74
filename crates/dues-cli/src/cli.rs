use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "dues",
    about = "Household dues tracker: split shared expenses and simplify who owes whom",
    version,
)]
pub struct Cli {
    /// Command file to process, one command per line ("-" reads stdin)
    pub input: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Maximum number of housemates (overrides the configuration file)
    #[arg(long)]
    pub capacity: Option<usize>,

    /// Log each command at debug level to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format for command results
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Print the final simplified dues to stderr
    #[arg(long)]
    pub summary: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_input_only() {
        let cli = Cli::try_parse_from(["dues", "input.txt"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("input.txt"));
        assert!(cli.config.is_none());
        assert!(cli.capacity.is_none());
        assert!(!cli.verbose);
        assert!(!cli.summary);
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn input_is_required() {
        assert!(Cli::try_parse_from(["dues"]).is_err());
    }

    #[test]
    fn parse_config_and_capacity() {
        let cli = Cli::try_parse_from(["dues", "-c", "house.toml", "--capacity", "5", "in.txt"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("house.toml")));
        assert_eq!(cli.capacity, Some(5));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["dues", "--verbose", "in.txt"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["dues", "--format", "json", "--summary", "-"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.summary);
        assert_eq!(cli.input, PathBuf::from("-"));
    }

    #[test]
    fn every_flag_has_help() {
        use clap::CommandFactory;

        for arg in Cli::command().get_arguments() {
            assert!(arg.get_help().is_some(), "--{} has no help", arg.get_id().as_str());
        }
    }

    #[test]
    fn reject_unknown_format() {
        assert!(Cli::try_parse_from(["dues", "--format", "xml", "in.txt"]).is_err());
    }
}
