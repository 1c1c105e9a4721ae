//! Wraith CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use wraith_orders::{GRAMMAR, GRAMMAR_VERSION};
use wraith_runtime::{OutputFormat, Settings, check_file, init_logging};

/// Order-file checker.
#[derive(Parser)]
#[command(name = "wraith", version, about = "Order-file checker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an order file and report every order and error
    Check {
        /// Path to the order file
        file: PathBuf,
        /// Turn unrecognized lines into unknown orders instead of failing
        #[arg(long)]
        recover: bool,
        /// Print the rule trace
        #[arg(long)]
        trace: bool,
        /// Output format
        #[arg(long, default_value = "text", value_enum)]
        format: OutputFormat,
        /// Settings file (defaults to $WRAITH_CONFIG)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the order grammar
    Grammar,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Grammar => {
            println!("# grammar version {GRAMMAR_VERSION}");
            print!("{GRAMMAR}");
            ExitCode::SUCCESS
        }
        Commands::Check {
            file,
            recover,
            trace,
            format,
            config,
        } => {
            let settings = match Settings::load(config.as_deref()) {
                Ok(settings) => settings,
                Err(e) => {
                    eprintln!("error: {e}");
                    return ExitCode::from(2);
                }
            };
            if let Err(e) = init_logging(&settings.log_level) {
                eprintln!("warning: {e}");
            }

            let mut parser = settings.parser;
            if recover {
                parser.stop_on_first_error = false;
            }
            if trace {
                parser.emit_debug_trace = true;
            }

            match check_file(&file, &parser, trace) {
                Ok(report) => {
                    print!("{}", report.render(format));
                    if format == OutputFormat::Json {
                        println!();
                    }
                    ExitCode::from(report.exit_code())
                }
                Err(e) => {
                    eprintln!("error: {e}");
                    ExitCode::from(2)
                }
            }
        }
    }
}
