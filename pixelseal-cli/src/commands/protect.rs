//! Protect command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use pixelseal_core::{signing_key_from_pem, Protector, SealConfig};
use tracing::{debug, info};

use crate::utils::{codec_for, load_key_pem, load_pixels, write_file};

/// Execute the protect command.
#[allow(clippy::too_many_arguments)]
pub fn execute(
    input: PathBuf,
    output: PathBuf,
    key: PathBuf,
    fingerprint: PathBuf,
    signature: PathBuf,
    seed: u64,
    quality: u8,
    quiet: bool,
) -> Result<()> {
    let config = SealConfig {
        noise_seed: seed,
        jpeg_quality: quality,
        ..SealConfig::default()
    };

    let pem = load_key_pem(&key)?;
    let signing_key = signing_key_from_pem(&pem)
        .with_context(|| format!("Failed to load private key: {}", key.display()))?;
    debug!(key = %key.display(), "Loaded signing key");

    let codec = codec_for(&output, config.jpeg_quality);
    let buffer = load_pixels(&input, codec.as_ref())?;

    let sealed = Protector::new(&config)
        .protect(&buffer, &signing_key, codec.as_ref())
        .context("Protection pipeline failed")?;

    // Persist only after the whole pipeline succeeded; a partial artifact
    // set is unusable.
    write_file(&output, &sealed.image_bytes)?;
    write_file(&fingerprint, &sealed.fingerprint.to_bytes())?;
    write_file(&signature, &sealed.signature)?;

    info!(
        output = %output.display(),
        fingerprint = %sealed.fingerprint,
        signature_bytes = sealed.signature.len(),
        "Protection artifacts persisted"
    );

    if !quiet {
        println!();
        println!("{}", "Image protected and signed!".green().bold());
        println!();
        println!("   {} {}", "Protected image:".dimmed(), output.display());
        println!(
            "   {} {} ({})",
            "Fingerprint:".dimmed(),
            sealed.fingerprint.to_hex(),
            fingerprint.display()
        );
        println!(
            "   {} {} bytes ({})",
            "Signature:".dimmed(),
            sealed.signature.len(),
            signature.display()
        );
        println!("   {} {}", "Noise seed:".dimmed(), seed);
    }

    Ok(())
}
