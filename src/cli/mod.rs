pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, GenerateArgs, ListArgs, ProfileArgs};
pub use handlers::{handle_generate, handle_list};
pub use output::{OutputFormat, OutputFormatter};
