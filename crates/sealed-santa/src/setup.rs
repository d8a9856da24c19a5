//! Setup text: one `name:publicKey` line per participant.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use sealed_santa_core::ParticipantRegistry;

use crate::error::{Result, SetupError};

/// Separator between a participant's name and their key.
pub const FIELD_SEPARATOR: char = ':';

/// How strictly setup text is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupOptions {
    /// Skip unreadable lines with a warning instead of failing.
    pub skip_malformed_lines: bool,
}

impl Default for SetupOptions {
    fn default() -> Self {
        Self {
            skip_malformed_lines: true,
        }
    }
}

/// Parse setup text into a registry.
///
/// Blank lines are ignored. Names and keys are trimmed. A repeated name is
/// always an error, whatever the options say.
pub fn parse_setup(text: &str, options: &SetupOptions) -> Result<ParticipantRegistry> {
    let mut registry = ParticipantRegistry::new();

    for (index, line) in text.trim_start_matches('\u{feff}').lines().enumerate() {
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        match split_line(line) {
            Ok((name, key)) => {
                registry.insert(name, key)?;
            }
            Err(reason) if options.skip_malformed_lines => {
                warn!(line = line_no, %reason, "skipping unreadable setup line");
            }
            Err(reason) => {
                return Err(SetupError::Malformed {
                    line: line_no,
                    reason,
                }
                .into());
            }
        }
    }

    debug!(participants = registry.len(), "setup parsed");
    Ok(registry)
}

/// Read and parse a setup file.
pub fn load_setup(path: impl AsRef<Path>, options: &SetupOptions) -> Result<ParticipantRegistry> {
    let text = fs::read_to_string(path)?;
    parse_setup(&text, options)
}

fn split_line(line: &str) -> std::result::Result<(&str, &str), String> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    let &[name, key] = fields.as_slice() else {
        return Err(format!(
            "expected `name{FIELD_SEPARATOR}key`, found {} fields",
            fields.len()
        ));
    };

    let (name, key) = (name.trim(), key.trim());
    if name.is_empty() {
        return Err("participant name is empty".into());
    }
    if key.is_empty() {
        return Err("public key is empty".into());
    }
    Ok((name, key))
}
