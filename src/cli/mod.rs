//! CLI module: clap-based argument parsing into the validated `AppConfig`.

mod clap_parser;

pub use clap_parser::{Cli, FormatOpt, parse_cli_to_app_config};
