//! Pixelseal CLI - image protection and provenance verification tool.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod commands;
mod exit_codes;
mod utils;

use exit_codes::ExitCode;

#[derive(Parser)]
#[command(name = "pixelseal")]
#[command(author, version, about = "Image provenance through noise, fingerprints, and signatures", long_about = None)]
#[command(after_help = "Exit codes:\n  0   success, image authentic\n  1   general error\n  65  verification failed (invalid signature or tampered content)\n  66  cannot open input, key, signature, or fingerprint file")]
struct Cli {
    /// Suppress decorative output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a P-256 keypair as PEM files
    Keygen {
        /// Path for the private key
        #[arg(long, default_value = utils::DEFAULT_PRIVATE_KEY)]
        private: PathBuf,

        /// Path for the public key
        #[arg(long, default_value = utils::DEFAULT_PUBLIC_KEY)]
        public: PathBuf,
    },

    /// Protect an image: fingerprint, poison, re-encode, and sign it
    Protect {
        /// Image to protect
        #[arg(value_name = "IMAGE", default_value = utils::DEFAULT_INPUT)]
        input: PathBuf,

        /// Where to write the protected image (.png selects lossless encoding)
        #[arg(short, long, default_value = utils::DEFAULT_PROTECTED)]
        output: PathBuf,

        /// PEM private key used for signing
        #[arg(short, long, default_value = utils::DEFAULT_PRIVATE_KEY)]
        key: PathBuf,

        /// Where to write the 8-byte fingerprint
        #[arg(long, default_value = utils::DEFAULT_FINGERPRINT)]
        fingerprint: PathBuf,

        /// Where to write the raw signature bytes
        #[arg(long, default_value = utils::DEFAULT_SIGNATURE)]
        signature: PathBuf,

        /// Seed for the deterministic noise stream
        #[arg(long, default_value_t = pixelseal_core::DEFAULT_NOISE_SEED)]
        seed: u64,

        /// JPEG quality for the protected image
        #[arg(long, default_value_t = pixelseal_core::DEFAULT_JPEG_QUALITY)]
        quality: u8,
    },

    /// Verify a protected image's signature and perceptual fingerprint
    Verify {
        /// Image to verify
        #[arg(value_name = "IMAGE", default_value = utils::DEFAULT_PROTECTED)]
        image: PathBuf,

        /// PEM public key for signature verification
        #[arg(short, long, default_value = utils::DEFAULT_PUBLIC_KEY)]
        key: PathBuf,

        /// Stored 8-byte fingerprint
        #[arg(long, default_value = utils::DEFAULT_FINGERPRINT)]
        fingerprint: PathBuf,

        /// Stored signature bytes
        #[arg(long, default_value = utils::DEFAULT_SIGNATURE)]
        signature: PathBuf,

        /// Hamming distance at which content counts as tampered
        #[arg(long, default_value_t = pixelseal_core::DEFAULT_TAMPER_THRESHOLD)]
        threshold: u32,

        /// Output format for the verification report
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Keygen { private, public } => {
            commands::keygen::execute(private, public, cli.quiet)
        }
        Commands::Protect {
            input,
            output,
            key,
            fingerprint,
            signature,
            seed,
            quality,
        } => commands::protect::execute(
            input,
            output,
            key,
            fingerprint,
            signature,
            seed,
            quality,
            cli.quiet,
        ),
        Commands::Verify {
            image,
            key,
            fingerprint,
            signature,
            threshold,
            format,
        } => commands::verify::execute(
            image,
            key,
            fingerprint,
            signature,
            threshold,
            format,
            cli.quiet,
        ),
    };

    if let Err(err) = result {
        let exit = ExitCode::from_anyhow(&err);
        if let Some(message) = &exit.message {
            eprintln!("Error: {}", message);
        }
        process::exit(exit.code);
    }
}
