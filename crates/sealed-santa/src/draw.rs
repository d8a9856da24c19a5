//! SantaDraw: configured entry point for running and revealing a draw.
//!
//! Ties setup parsing, assignment, and the results file together. This is
//! the only layer that logs; the core and envelope crates stay silent.

use std::path::{Path, PathBuf};

use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use sealed_santa_core::ParticipantRegistry;
use sealed_santa_envelope::EnvelopeFormat;

use crate::assign::{assign_with, SealedAssignment};
use crate::error::Result;
use crate::results::{load_results, reveal, write_results};
use crate::setup::{load_setup, parse_setup, SetupOptions};

/// Default name of the results file, written next to the setup file.
pub const DEFAULT_RESULTS_FILE_NAME: &str = "Results.txt";

/// Configuration for a draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    /// Envelope scheme used to seal and open assignments.
    pub format: EnvelopeFormat,
    /// Setup parsing options.
    pub setup: SetupOptions,
    /// File name for results written by [`SantaDraw::draw_file`].
    pub results_file_name: String,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            format: EnvelopeFormat::default(),
            setup: SetupOptions::default(),
            results_file_name: DEFAULT_RESULTS_FILE_NAME.to_string(),
        }
    }
}

/// Runs draws and reveals under one configuration.
#[derive(Debug, Clone, Default)]
pub struct SantaDraw {
    config: DrawConfig,
}

impl SantaDraw {
    /// Create a draw runner.
    pub fn new(config: DrawConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &DrawConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Setup
    // ─────────────────────────────────────────────────────────────────────────

    /// Parse setup text with the configured options.
    pub fn parse_setup(&self, text: &str) -> Result<ParticipantRegistry> {
        parse_setup(text, &self.config.setup)
    }

    /// Read a setup file with the configured options.
    pub fn load_setup(&self, path: impl AsRef<Path>) -> Result<ParticipantRegistry> {
        load_setup(path, &self.config.setup)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Drawing
    // ─────────────────────────────────────────────────────────────────────────

    /// Draw assignments using the thread-local CSPRNG.
    pub fn draw(&self, registry: &ParticipantRegistry) -> Result<Vec<SealedAssignment>> {
        self.draw_with_rng(registry, &mut rand::thread_rng())
    }

    /// Draw assignments with an explicit derangement generator.
    #[instrument(skip_all, fields(participants = registry.len(), format = ?self.config.format))]
    pub fn draw_with_rng<R>(
        &self,
        registry: &ParticipantRegistry,
        rng: &mut R,
    ) -> Result<Vec<SealedAssignment>>
    where
        R: RngCore + CryptoRng,
    {
        let assignments = assign_with(registry, self.config.format, rng)?;
        info!(sealed = assignments.len(), "draw complete");
        Ok(assignments)
    }

    /// Read a setup file, draw, and write the results file next to it.
    ///
    /// Returns the path of the results file. Nothing is written unless every
    /// envelope was sealed.
    #[instrument(skip_all, fields(setup = %setup_path.as_ref().display()))]
    pub fn draw_file(&self, setup_path: impl AsRef<Path>) -> Result<PathBuf> {
        let setup_path = setup_path.as_ref();
        let registry = self.load_setup(setup_path)?;
        debug!(participants = registry.len(), "setup loaded");

        let assignments = self.draw(&registry)?;

        let results_path = self.results_path_for(setup_path);
        write_results(&results_path, &assignments)?;
        info!(results = %results_path.display(), "results written");
        Ok(results_path)
    }

    /// Where [`draw_file`](Self::draw_file) writes results for a setup file.
    pub fn results_path_for(&self, setup_path: impl AsRef<Path>) -> PathBuf {
        setup_path
            .as_ref()
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(&self.config.results_file_name)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reveal
    // ─────────────────────────────────────────────────────────────────────────

    /// Open `giver`'s line in a results file with their secret key.
    pub fn reveal(
        &self,
        results_path: impl AsRef<Path>,
        giver: &str,
        secret_key: &str,
    ) -> Result<String> {
        let assignments = load_results(results_path)?;
        reveal(&assignments, giver, secret_key, self.config.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DrawConfig::default();
        assert_eq!(config.format, EnvelopeFormat::X25519ChaCha20Poly1305);
        assert!(config.setup.skip_malformed_lines);
        assert_eq!(config.results_file_name, "Results.txt");
    }

    #[test]
    fn test_config_from_json_fills_defaults() {
        let config: DrawConfig =
            serde_json::from_str(r#"{ "results_file_name": "draw-2026.txt" }"#).unwrap();
        assert_eq!(config.results_file_name, "draw-2026.txt");
        assert_eq!(config.format, EnvelopeFormat::default());
        assert!(config.setup.skip_malformed_lines);

        let config: DrawConfig = serde_json::from_str(
            r#"{ "format": "x25519-chacha20poly1305", "setup": { "skip_malformed_lines": false } }"#,
        )
        .unwrap();
        assert!(!config.setup.skip_malformed_lines);
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result = serde_json::from_str::<DrawConfig>(r#"{ "format": "rsa-pkcs1-aes-cbc" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_results_path_next_to_setup() {
        let draw = SantaDraw::default();
        assert_eq!(
            draw.results_path_for("/tmp/santa/setup.txt"),
            PathBuf::from("/tmp/santa/Results.txt")
        );
        assert_eq!(draw.results_path_for("setup.txt"), PathBuf::from("Results.txt"));
    }
}
