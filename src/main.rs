use clap::Parser;
use std::process;
use thousanddays_processor::cli::{args::Args, commands};

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        let shutdown_signal = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install CTRL+C signal handler");
        };

        tokio::select! {
            result = commands::run(args) => {
                result
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                Err(thousanddays_processor::Error::processing_interrupted(
                    "Processing interrupted by user".to_string()
                ))
            }
        }
    });

    match result {
        Ok(()) => {
            // Success - results have already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("1000 Days Processor - Community Health SMS Report Decoder");
    println!("=========================================================");
    println!();
    println!("Decode free-form SMS text reports from community health workers into");
    println!("typed, validated records, with error-tolerant per-field validation.");
    println!();
    println!("USAGE:");
    println!("    thousanddays-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    process     Process a message log into typed records (main command)");
    println!("    schemas     List the registered report types and their field schemas");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Process a message log:");
    println!("    thousanddays-processor process --input messages.csv");
    println!();
    println!("    # Process only pregnancy reports, sampling the queue at random:");
    println!("    thousanddays-processor process --input messages.csv --type PRE --shuffle");
    println!();
    println!("    # Preview a run without storing anything:");
    println!("    thousanddays-processor process --input messages.csv --dry-run -v");
    println!();
    println!("    # List the registered report schemas as JSON:");
    println!("    thousanddays-processor schemas --format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    thousanddays-processor <COMMAND> --help");
}
