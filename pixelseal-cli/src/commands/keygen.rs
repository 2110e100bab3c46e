//! Keygen command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use pixelseal_core::{generate_keypair, signing_key_to_pem, verifying_key_to_pem};
use tracing::info;

use crate::utils::write_file;

/// Execute the keygen command.
pub fn execute(private: PathBuf, public: PathBuf, quiet: bool) -> Result<()> {
    let (signing_key, verifying_key) = generate_keypair();

    let private_pem = signing_key_to_pem(&signing_key).context("Failed to encode private key")?;
    let public_pem = verifying_key_to_pem(&verifying_key).context("Failed to encode public key")?;

    write_file(&private, private_pem.as_bytes())?;
    write_file(&public, public_pem.as_bytes())?;

    info!(private = %private.display(), public = %public.display(), "Generated P-256 keypair");

    if !quiet {
        println!();
        println!("{}", "Generated P-256 keypair".green().bold());
        println!();
        println!("   {} {}", "Private key:".dimmed(), private.display());
        println!("   {} {}", "Public key:".dimmed(), public.display());
        println!();
        println!(
            "   {}",
            "Keep the private key out of version control.".yellow()
        );
    }

    Ok(())
}
