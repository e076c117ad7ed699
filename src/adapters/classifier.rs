//! Digest-based stand-in classifier.
//!
//! Implements [`CatClassifier`] without any image analysis: the first byte
//! of the image's SHA-256 digest, scaled to 0–100, is treated as the
//! confidence that a cat is present.  Deterministic for a given image, so
//! the console gives repeatable results while a real model is absent.

use log::debug;

use crate::app::ports::{CatClassifier, ClassifierError};

#[derive(Debug, Default, Clone, Copy)]
pub struct DigestCatClassifier;

impl DigestCatClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Pseudo-confidence (0–100) derived from the image bytes.
    pub fn confidence(image: &[u8]) -> f32 {
        let digest = hmac_sha256::Hash::hash(image);
        f32::from(digest[0]) * 100.0 / 255.0
    }
}

impl CatClassifier for DigestCatClassifier {
    fn contains_cat(
        &self,
        image: &[u8],
        confidence_threshold: f32,
    ) -> Result<bool, ClassifierError> {
        if image.is_empty() {
            return Err(ClassifierError::EmptyImage);
        }
        let confidence = Self::confidence(image);
        debug!(
            "DigestCatClassifier: confidence={:.1} threshold={:.1}",
            confidence, confidence_threshold
        );
        Ok(confidence >= confidence_threshold)
    }
}
