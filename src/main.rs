use clap::{Parser, Subcommand};
use cipherstream::cipher::{Algorithm, Mode};
use cipherstream::cli::{run_cipher, CipherOptions};
use std::path::PathBuf;
use std::process::ExitCode;

/// Version info from build.rs
const VERSION: &str = env!("CIPHERSTREAM_VERSION");
const BUILD: &str = env!("CIPHERSTREAM_BUILD");
const PROFILE: &str = env!("CIPHERSTREAM_PROFILE");
const GIT_HASH: &str = env!("CIPHERSTREAM_GIT_HASH");

/// Combined version string (compile-time concatenation not possible, so we build at runtime)
fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} {} build {} ({})", PROFILE, VERSION, BUILD, GIT_HASH))
}

#[derive(Parser)]
#[command(name = "cipherstream")]
#[command(author, about = "Buffered streaming substitution cipher for UTF-8 files", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a file
    #[command(alias = "e")]
    Encode {
        /// Cipher algorithm
        #[arg(short, long, default_value = "caesar", value_parser = parse_algorithm)]
        algorithm: Algorithm,

        /// Caesar offset (required for caesar, ignored by mirror)
        #[arg(short, long)]
        key: Option<i32>,

        /// Input file
        input: PathBuf,

        /// Output file (defaults to <INPUT>.enc)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Decode a file
    #[command(alias = "d")]
    Decode {
        /// Cipher algorithm
        #[arg(short, long, default_value = "caesar", value_parser = parse_algorithm)]
        algorithm: Algorithm,

        /// Caesar offset (required for caesar, ignored by mirror)
        #[arg(short, long)]
        key: Option<i32>,

        /// Input file
        input: PathBuf,

        /// Output file (defaults to <INPUT>.dec)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },
}

fn parse_algorithm(s: &str) -> Result<Algorithm, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn default_output_path(input: &PathBuf, extension: &str) -> PathBuf {
    let mut os = input.as_os_str().to_os_string();
    os.push(extension);
    PathBuf::from(os)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Handle --version flag
    if cli.version {
        println!("cipherstream {}", get_version());
        return ExitCode::SUCCESS;
    }

    // Require a command if not showing version
    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            // Show help when no command provided
            use clap::CommandFactory;
            Cli::command().print_help().unwrap();
            println!();
            return ExitCode::SUCCESS;
        }
    };

    let result = match command {
        Commands::Encode {
            algorithm,
            key,
            input,
            output,
        } => {
            let options = CipherOptions { algorithm, key };
            let output_path = output.unwrap_or_else(|| default_output_path(&input, ".enc"));

            match run_cipher(&input, &output_path, Mode::Encode, &options) {
                Ok(()) => {
                    println!("Encoded {} to {}", input.display(), output_path.display());
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }

        Commands::Decode {
            algorithm,
            key,
            input,
            output,
        } => {
            let options = CipherOptions { algorithm, key };
            let output_path = output.unwrap_or_else(|| default_output_path(&input, ".dec"));

            match run_cipher(&input, &output_path, Mode::Decode, &options) {
                Ok(()) => {
                    println!("Decoded {} to {}", input.display(), output_path.display());
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
