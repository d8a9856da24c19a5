//! Results text: one `giver : envelope` line per participant.

use std::fs;
use std::path::Path;

use sealed_santa_envelope::EnvelopeFormat;

use crate::assign::SealedAssignment;
use crate::error::{Result, SantaError, SetupError};

/// Separator between a giver and their envelope.
pub const RESULT_SEPARATOR: &str = " : ";

/// Render assignments as results text, in the given order.
pub fn format_results(assignments: &[SealedAssignment]) -> String {
    let mut out = String::new();
    for assignment in assignments {
        out.push_str(&assignment.giver);
        out.push_str(RESULT_SEPARATOR);
        out.push_str(&assignment.envelope);
        out.push('\n');
    }
    out
}

/// Write results text to `path`, replacing any existing file.
pub fn write_results(path: impl AsRef<Path>, assignments: &[SealedAssignment]) -> Result<()> {
    fs::write(path, format_results(assignments))?;
    Ok(())
}

/// Parse results text. Blank lines are ignored.
///
/// Each line is split on the first [`RESULT_SEPARATOR`]; both halves are
/// trimmed.
pub fn parse_results(text: &str) -> Result<Vec<SealedAssignment>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| -> Result<SealedAssignment> {
            let (giver, envelope) = line
                .split_once(RESULT_SEPARATOR)
                .map(|(g, e)| (g.trim(), e.trim()))
                .filter(|(g, e)| !g.is_empty() && !e.is_empty())
                .ok_or_else(|| SetupError::Malformed {
                    line: index + 1,
                    reason: "expected `giver : envelope`".into(),
                })?;

            Ok(SealedAssignment {
                giver: giver.to_string(),
                envelope: envelope.to_string(),
            })
        })
        .collect()
}

/// Read and parse a results file.
pub fn load_results(path: impl AsRef<Path>) -> Result<Vec<SealedAssignment>> {
    parse_results(&fs::read_to_string(path)?)
}

/// Open the envelope addressed to `giver` and return their receiver's id.
pub fn reveal(
    assignments: &[SealedAssignment],
    giver: &str,
    secret_key: &str,
    format: EnvelopeFormat,
) -> Result<String> {
    let giver = giver.trim();
    let assignment = assignments
        .iter()
        .find(|a| a.giver == giver)
        .ok_or_else(|| SantaError::UnknownGiver(giver.to_string()))?;

    Ok(format.open_utf8(&assignment.envelope, secret_key)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assign::assign;
    use sealed_santa_core::{DrawError, ParticipantRegistry};
    use sealed_santa_envelope::{seal, EnvelopeError, ParticipantSecret};

    fn sample() -> Vec<SealedAssignment> {
        vec![
            SealedAssignment {
                giver: "Alice".into(),
                envelope: "QUJD".into(),
            },
            SealedAssignment {
                giver: "Bob".into(),
                envelope: "REVG".into(),
            },
        ]
    }

    #[test]
    fn test_format_lines() {
        assert_eq!(format_results(&sample()), "Alice : QUJD\nBob : REVG\n");
    }

    #[test]
    fn test_parse_formatted_text() {
        let parsed = parse_results(&format_results(&sample())).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_parse_tolerates_spacing() {
        let parsed = parse_results("Alice : QUJD\r\n\n  Bob  :  REVG  \n").unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_parse_rejects_bad_line() {
        let err = parse_results("Alice : QUJD\nBob:REVG\n").unwrap_err();
        assert!(matches!(
            err,
            SantaError::Setup(SetupError::Malformed { line: 2, .. })
        ));
    }

    #[test]
    fn test_ids_with_spaces_survive_results_text() {
        let secrets: Vec<_> = (1u8..=3).map(|i| hex::encode([i; 32])).collect();
        let pairs = ["Ann Lee", "Bo  Chen", "Cy"].into_iter().zip(&secrets).map(|(id, s)| {
            let public = ParticipantSecret::from_hex(s).unwrap().public_key().to_hex();
            (id, public)
        });
        let registry = ParticipantRegistry::from_pairs(pairs).unwrap();

        let out = assign(&registry).unwrap();
        let parsed = parse_results(&format_results(&out)).unwrap();
        assert_eq!(parsed, out);

        let format = EnvelopeFormat::default();
        for (id, secret) in registry.ids().zip(&secrets) {
            let receiver = reveal(&parsed, id, secret, format).unwrap();
            assert!(registry.contains(&receiver));
            assert_ne!(receiver, id);
        }
    }

    #[test]
    fn test_colon_in_id_never_reaches_results() {
        let result = ParticipantRegistry::from_pairs([("Team:Ann", "k1"), ("Bob", "k2")]);
        assert!(matches!(result, Err(DrawError::InvalidInput(_))));
    }

    #[test]
    fn test_reveal() {
        let secret_hex = "5a".repeat(32);
        let public_hex = ParticipantSecret::from_hex(&secret_hex)
            .unwrap()
            .public_key()
            .to_hex();

        let assignments = vec![SealedAssignment {
            giver: "Alice".into(),
            envelope: seal(b"Bob", &public_hex).unwrap(),
        }];
        let format = EnvelopeFormat::default();

        assert_eq!(reveal(&assignments, " Alice", &secret_hex, format).unwrap(), "Bob");
        assert!(matches!(
            reveal(&assignments, "Mallory", &secret_hex, format),
            Err(SantaError::UnknownGiver(name)) if name == "Mallory"
        ));
        assert!(matches!(
            reveal(&assignments, "Alice", &"01".repeat(32), format),
            Err(SantaError::Envelope(EnvelopeError::DecryptionFailure(_)))
        ));
    }
}
