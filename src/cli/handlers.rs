//! Command handlers
//!
//! Each handler returns the process exit code. Failures are reported as a
//! single `error: ...` line on stderr.

use crate::cli::commands::{GenerateArgs, ListArgs, ProfileArgs};
use crate::cli::output::OutputFormatter;
use crate::config::{ConfigError, DuplicatePolicy, GeneratorConfig};
use crate::registration::{GenerateError, Generator};
use tracing::{debug, info};

impl ProfileArgs {
    /// Builds the generator configuration selected on the command line
    pub fn resolve(&self) -> Result<GeneratorConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => {
                debug!(path = %path.display(), "Loading profile file");
                GeneratorConfig::load(path)?
            }
            None => GeneratorConfig::builtin(&self.profile)?,
        };

        if self.reject_duplicates {
            config = config.with_duplicates(DuplicatePolicy::Reject);
        }

        Ok(config)
    }
}

pub fn handle_generate(args: &GenerateArgs) -> i32 {
    let config = match args.markers.resolve() {
        Ok(config) => config,
        Err(e) => return fail(&GenerateError::from(e)),
    };
    debug!("{}", config);

    let generator = Generator::new(config);
    match generator.generate(&args.output, &args.inputs) {
        Ok(report) => {
            info!(
                output = %report.output.display(),
                registrations = report.table.len(),
                "Generation complete"
            );
            0
        }
        Err(e) => fail(&e),
    }
}

pub fn handle_list(args: &ListArgs) -> i32 {
    let config = match args.markers.resolve() {
        Ok(config) => config,
        Err(e) => return fail(&GenerateError::from(e)),
    };

    let generator = Generator::new(config);
    let table = match generator.collect(&args.inputs) {
        Ok(table) => table,
        Err(e) => return fail(&e),
    };

    let formatter = OutputFormatter::new(args.format.into());
    match formatter.format(&generator.config().profile, &table) {
        Ok(output) => {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
            0
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            1
        }
    }
}

fn fail(err: &GenerateError) -> i32 {
    debug!(kind = err.kind(), error = ?err, "Run aborted");
    eprintln!("error: {}", err);
    1
}
