//! Verify command implementation.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use pixelseal_core::{
    verifying_key_from_pem, Classification, SealConfig, VerificationReport, Verifier,
};
use tracing::debug;

use crate::utils::{codec_for, load_fingerprint, load_key_pem, load_pixels, load_signature};
use crate::ReportFormat;

/// Execute the verify command.
pub fn execute(
    image: PathBuf,
    key: PathBuf,
    fingerprint: PathBuf,
    signature: PathBuf,
    threshold: u32,
    format: ReportFormat,
    quiet: bool,
) -> Result<()> {
    let config = SealConfig {
        tamper_threshold: threshold,
        ..SealConfig::default()
    };

    let pem = load_key_pem(&key)?;
    let verifying_key = verifying_key_from_pem(&pem)
        .with_context(|| format!("Failed to load public key: {}", key.display()))?;
    debug!(key = %key.display(), "Loaded verifying key");

    let codec = codec_for(&image, config.jpeg_quality);
    let buffer = load_pixels(&image, codec.as_ref())?;
    let sealed_fingerprint = load_fingerprint(&fingerprint)?;
    let stored_signature = load_signature(&signature)?;

    let report = Verifier::new(&config)
        .verify(&buffer, &stored_signature, &sealed_fingerprint, &verifying_key)
        .context("Verification pipeline failed")?;

    match format {
        ReportFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?
            );
        }
        ReportFormat::Text => print_text_report(&report, quiet),
    }

    // Both signals were surfaced above; the exit code collapses them for
    // scripting: anything short of a valid signature on untampered content
    // is a failure.
    if !report.signature_valid {
        bail!("Verification failed: signature invalid");
    }
    if report.classification == Classification::Tampered {
        bail!(
            "Verification failed: content classified as TAMPERED (distance {})",
            report.distance
        );
    }

    Ok(())
}

fn print_text_report(report: &VerificationReport, quiet: bool) {
    if quiet {
        println!(
            "{} signature_valid={} distance={}",
            report.classification, report.signature_valid, report.distance
        );
        return;
    }

    let ok = report.signature_valid && report.classification != Classification::Tampered;
    let banner = format!("{:^40}", report.classification.to_string());

    println!();
    if ok {
        println!("{}", "╔════════════════════════════════════════╗".green());
        println!("{}", format!("║{}║", banner).green().bold());
        println!("{}", "╚════════════════════════════════════════╝".green());
    } else {
        println!("{}", "╔════════════════════════════════════════╗".red());
        println!("{}", format!("║{}║", banner).red().bold());
        println!("{}", "╚════════════════════════════════════════╝".red());
    }
    println!();

    if report.signature_valid {
        println!(
            "   {} {}",
            "Signature:".dimmed(),
            "Valid (ECDSA P-256 / SHA-256)".green()
        );
    } else {
        println!("   {} {}", "Signature:".dimmed(), "INVALID".red());
    }

    let content = match report.classification {
        Classification::Identical => "Bit-identical perceptual content".green(),
        Classification::Authentic => "Preserved (re-encoding drift only)".green(),
        Classification::Tampered => "MODIFIED since protection".red(),
    };
    println!("   {} {}", "Content:".dimmed(), content);
    println!(
        "   {} {} of 64 bits",
        "Hamming distance:".dimmed(),
        report.distance
    );
}
