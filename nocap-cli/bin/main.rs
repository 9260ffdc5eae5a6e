use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use nocap_cli::cli;
use nocap_cli::logger;

#[derive(Parser, Debug)]
#[command(name = "nocapc", about = "nocap to C compiler")]
struct Args {
    /// Turn on verbose logging. Repeat to increase verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write log messages to the file rather than to stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(clap::Subcommand, Debug)]
enum Action {
    /// Compiles the file to C.
    Compile {
        file: PathBuf,

        /// Path of the C file to write.
        #[arg(short, long, default_value = cli::DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Show the source around the error.
        #[arg(long)]
        annotate: bool,
    },
    /// Checks the file without writing output.
    Check {
        file: PathBuf,

        /// Show the source around the error.
        #[arg(long)]
        annotate: bool,
    },
    /// Prints the tokens of the file.
    Tokenize {
        file: PathBuf,

        /// Print the tokens as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Prints the version number of the compiler.
    Version,
}

pub fn main() -> ExitCode {
    let args = Args::parse();

    let result = logger::configure(args.verbose, args.log_file)
        .map_err(|e| format!("[Error] {}", e))
        .and_then(|_| match args.action {
            Action::Compile {
                file,
                output,
                annotate,
            } => cli::compile(&file, &output, annotate),
            Action::Check { file, annotate } => cli::check(&file, annotate),
            Action::Tokenize { file, json } => cli::tokenize(&file, json),
            Action::Version => {
                println!("nocapc version {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}
