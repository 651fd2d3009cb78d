use registrar::cli::commands::{CliArgs, Commands};
use registrar::cli::handlers::{handle_generate, handle_list};
use registrar::util::logging::init_for_cli;
use registrar::VERSION;

use clap::Parser;
use tracing::debug;

fn main() {
    let args = CliArgs::parse();
    init_for_cli(args.log_level, args.verbose, args.quiet);

    debug!("registrar v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Generate(generate_args) => handle_generate(generate_args),
        Commands::List(list_args) => handle_list(list_args),
    };

    std::process::exit(exit_code);
}
