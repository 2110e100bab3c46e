//! Robustness tests for the full protection pipeline.
//!
//! These run the real lossy JPEG codec end to end: the signature must cover
//! the post-compression bytes, and the perceptual fingerprint must survive
//! quality-90 compression plus the injected noise.

use pixelseal_core::{
    generate_keypair, Classification, ImageCodec, JpegCodec, PerceptualHasher, PixelBuffer,
    PngCodec, Protector, SealConfig, Verifier,
};

/// A smooth gradient with coarse structure, the friendliest case for both
/// JPEG and the average hash.
fn create_test_image(width: u32, height: u32) -> PixelBuffer {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / (width - 1)) as u8;
            let g = (y * 255 / (height - 1)) as u8;
            let b = ((x + y) * 200 / (width + height - 2)) as u8;
            data.extend_from_slice(&[r, g, b]);
        }
    }
    PixelBuffer::new(width, height, 3, data).unwrap()
}

#[test]
fn test_jpeg_pipeline_signature_survives_compression() {
    let config = SealConfig::default();
    let (signing_key, verifying_key) = generate_keypair();
    let codec = JpegCodec::new(config.jpeg_quality);
    let image = create_test_image(64, 64);

    let sealed = Protector::new(&config)
        .protect(&image, &signing_key, &codec)
        .expect("protect failed");

    // The verifier decodes the same JPEG bytes the protector signed.
    let loaded = codec.decode(&sealed.image_bytes).expect("decode failed");
    let report = Verifier::new(&config)
        .verify(&loaded, &sealed.signature, &sealed.fingerprint, &verifying_key)
        .expect("verify failed");

    assert!(
        report.signature_valid,
        "signature must cover post-compression bytes"
    );
}

#[test]
fn test_jpeg_pipeline_fingerprint_survives_compression() {
    let config = SealConfig::default();
    let (signing_key, verifying_key) = generate_keypair();
    let codec = JpegCodec::new(config.jpeg_quality);
    let image = create_test_image(64, 64);

    let sealed = Protector::new(&config)
        .protect(&image, &signing_key, &codec)
        .unwrap();

    let loaded = codec.decode(&sealed.image_bytes).unwrap();
    let report = Verifier::new(&config)
        .verify(&loaded, &sealed.signature, &sealed.fingerprint, &verifying_key)
        .unwrap();

    assert!(
        report.distance < config.tamper_threshold,
        "quality-90 JPEG drift should stay authentic, got distance {}",
        report.distance
    );
    assert_ne!(report.classification, Classification::Tampered);
}

#[test]
fn test_recompressed_image_invalidates_signature_but_stays_authentic() {
    let config = SealConfig::default();
    let (signing_key, verifying_key) = generate_keypair();
    let jpeg = JpegCodec::new(config.jpeg_quality);
    let image = create_test_image(64, 64);

    let sealed = Protector::new(&config)
        .protect(&image, &signing_key, &jpeg)
        .unwrap();

    // Recompress at a lower quality, as a social network might.
    let loaded = jpeg.decode(&sealed.image_bytes).unwrap();
    let recompressed_bytes = JpegCodec::new(70).encode(&loaded).unwrap();
    let recompressed = jpeg.decode(&recompressed_bytes).unwrap();

    let report = Verifier::new(&config)
        .verify(
            &recompressed,
            &sealed.signature,
            &sealed.fingerprint,
            &verifying_key,
        )
        .unwrap();

    // Exact integrity is gone, perceptual similarity is not.
    assert!(!report.signature_valid);
    assert!(
        report.distance < config.tamper_threshold,
        "recompression alone should not look like tampering, got {}",
        report.distance
    );
}

#[test]
fn test_cross_codec_fingerprints_agree() {
    // The fingerprint is computed pre-noise, so it is codec-independent.
    let config = SealConfig::default();
    let (signing_key, _) = generate_keypair();
    let image = create_test_image(64, 64);

    let via_jpeg = Protector::new(&config)
        .protect(&image, &signing_key, &JpegCodec::new(config.jpeg_quality))
        .unwrap();
    let via_png = Protector::new(&config)
        .protect(&image, &signing_key, &PngCodec)
        .unwrap();

    assert_eq!(via_jpeg.fingerprint, via_png.fingerprint);
    assert_eq!(
        via_jpeg.fingerprint,
        PerceptualHasher.fingerprint(&image).unwrap()
    );
}
