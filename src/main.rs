use clap::Parser;
use std::process;
use waves_loader::cli::{args::Args, commands};

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(_summary) => {
            // Success - the summary has already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Waves Loader - SeaSonde WLS Ingestion Tool");
    println!("==========================================");
    println!();
    println!("Decode CODAR SeaSonde wave measurement files (WLS) and load them into");
    println!("a relational observation store without duplicating stored records.");
    println!();
    println!("USAGE:");
    println!("    waves-loader <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    ingest      Decode and load WLS files for one or more stations");
    println!("    sites       List or register sites in the observation store");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Register the station codes once:");
    println!("    waves-loader sites --add PRIO");
    println!();
    println!("    # Load every file fetched for one station:");
    println!("    waves-loader ingest --station PRIO --input ./wls/PRIO");
    println!();
    println!("    # Load all configured stations from a root directory:");
    println!("    waves-loader ingest --input ./wls --delete-processed");
    println!();
    println!("For detailed help on any command, use:");
    println!("    waves-loader <COMMAND> --help");
}
