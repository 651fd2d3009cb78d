use crate::util::logging::parse_level;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::Level;

/// Build-time generator for boilerplate registration tables
#[derive(Parser, Debug)]
#[command(
    name = "registrar",
    about = "Build-time generator for boilerplate registration tables",
    version,
    long_about = "registrar scans source files for registration markers such as \
                  COMAC_BOILERPLATE (name, ...) and emits a C unit that declares every \
                  _register_<name> function and calls them all, in discovery order, from \
                  one aggregate function."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        value_parser = parse_level,
        help = "Set logging level (trace, debug, info, warn, error)"
    )]
    pub log_level: Option<Level>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Generate the registration unit",
        long_about = "Scans INPUT files in the given order and writes OUTPUT. The output is \
                      replaced atomically and only when every input scanned cleanly.\n\n\
                      Examples:\n  \
                      registrar generate constructors.c comac-boilerplate.c comac-boilerplate-pdf.c\n  \
                      registrar generate --profile test test-constructors.c a1-mask.c clip.c\n  \
                      registrar generate --config widgets.toml widgets-init.c widgets/*.c"
    )]
    Generate(GenerateArgs),

    #[command(
        about = "List registrations without writing anything",
        long_about = "Scans INPUT files exactly like `generate` and prints the registrations \
                      found, in the order they would be emitted.\n\n\
                      Examples:\n  \
                      registrar list comac-boilerplate*.c\n  \
                      registrar list --format json --profile test a1-mask.c"
    )]
    List(ListArgs),
}

/// Profile selection shared by all commands
#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    #[arg(
        short = 'p',
        long,
        value_name = "NAME",
        default_value = "boilerplate",
        help = "Built-in marker profile (boilerplate, test)"
    )]
    pub profile: String,

    #[arg(
        short = 'c',
        long,
        value_name = "FILE",
        conflicts_with = "profile",
        help = "Load the marker profile from a TOML file"
    )]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Fail if two markers name the same registration")]
    pub reject_duplicates: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub markers: ProfileArgs,

    #[arg(value_name = "OUTPUT", help = "Generated file to create or replace")]
    pub output: PathBuf,

    #[arg(
        value_name = "INPUT",
        required = true,
        help = "Source files to scan, in emission order"
    )]
    pub inputs: Vec<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    #[command(flatten)]
    pub markers: ProfileArgs,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        value_name = "INPUT",
        required = true,
        help = "Source files to scan, in emission order"
    )]
    pub inputs: Vec<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_generate_args() {
        let args = CliArgs::parse_from([
            "registrar",
            "generate",
            "out.c",
            "a.c",
            "b.c",
        ]);
        match args.command {
            Commands::Generate(generate) => {
                assert_eq!(generate.output, PathBuf::from("out.c"));
                assert_eq!(
                    generate.inputs,
                    vec![PathBuf::from("a.c"), PathBuf::from("b.c")]
                );
                assert_eq!(generate.markers.profile, "boilerplate");
                assert!(generate.markers.config.is_none());
                assert!(!generate.markers.reject_duplicates);
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_generate_keeps_input_order() {
        let args = CliArgs::parse_from(["registrar", "generate", "out.c", "z.c", "a.c", "z.c"]);
        match args.command {
            Commands::Generate(generate) => {
                assert_eq!(
                    generate.inputs,
                    vec![
                        PathBuf::from("z.c"),
                        PathBuf::from("a.c"),
                        PathBuf::from("z.c")
                    ]
                );
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_generate_requires_inputs() {
        let err = CliArgs::try_parse_from(["registrar", "generate", "out.c"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_generate_requires_output() {
        let err = CliArgs::try_parse_from(["registrar", "generate"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_generate_with_options() {
        let args = CliArgs::parse_from([
            "registrar",
            "generate",
            "--profile",
            "test",
            "--reject-duplicates",
            "out.c",
            "a.c",
        ]);
        match args.command {
            Commands::Generate(generate) => {
                assert_eq!(generate.markers.profile, "test");
                assert!(generate.markers.reject_duplicates);
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_profile_conflicts_with_config() {
        let result = CliArgs::try_parse_from([
            "registrar",
            "generate",
            "--profile",
            "test",
            "--config",
            "x.toml",
            "out.c",
            "a.c",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_list_args() {
        let args = CliArgs::parse_from(["registrar", "list", "--format", "json", "a.c"]);
        match args.command {
            Commands::List(list) => {
                assert_eq!(list.format, OutputFormatArg::Json);
                assert_eq!(list.inputs, vec![PathBuf::from("a.c")]);
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let args = CliArgs::parse_from(["registrar", "-v", "list", "a.c"]);
        assert!(args.verbose);
        assert!(!args.quiet);

        let args = CliArgs::parse_from(["registrar", "list", "-q", "a.c"]);
        assert!(args.quiet);

        let args = CliArgs::parse_from(["registrar", "--log-level", "debug", "list", "a.c"]);
        assert_eq!(args.log_level, Some(Level::DEBUG));
    }

    #[test]
    fn test_invalid_log_level_is_usage_error() {
        let err = CliArgs::try_parse_from(["registrar", "--log-level", "loud", "list", "a.c"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }
}
