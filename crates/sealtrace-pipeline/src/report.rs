use sealtrace_core::{LookupOutcome, MessageId};
use std::fmt;
use std::path::PathBuf;

/// Outcome of one detection run.
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    NotDetected {
        score: f32,
    },
    Detected {
        score: f32,
        bits: String,
        message_id: MessageId,
        log_path: PathBuf,
        lookup: LookupOutcome,
    },
}

impl Report {
    pub fn is_watermarked(&self) -> bool {
        matches!(self, Report::Detected { .. })
    }

    pub fn score(&self) -> f32 {
        match self {
            Report::NotDetected { score } | Report::Detected { score, .. } => *score,
        }
    }

    /// Console text, one entry per line.
    pub fn lines(&self) -> Vec<String> {
        let detected = if self.is_watermarked() { "True" } else { "False" };
        let mut lines = vec![format!("Watermark Detected: {detected}")];
        match self {
            Report::NotDetected { .. } => {
                lines.push("No watermark detected. No message to decode.".to_string());
            }
            Report::Detected {
                bits,
                message_id,
                log_path,
                lookup,
                ..
            } => {
                lines.push(format!("Decoded Message ID: {message_id} (Bits: {bits})"));
                lines.push(match lookup {
                    LookupOutcome::Found(metadata) => format!("Full Metadata: {metadata}"),
                    LookupOutcome::NotFound => format!(
                        "Found ID {message_id}, but no metadata was found in '{}'.",
                        log_path.display()
                    ),
                    LookupOutcome::LogMissing => format!(
                        "Could not find '{}' to look up ID.",
                        log_path.display()
                    ),
                });
            }
        }
        lines
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detected(lookup: LookupOutcome) -> Report {
        Report::Detected {
            score: 0.97,
            bits: "101010".to_string(),
            message_id: MessageId(42),
            log_path: PathBuf::from("metadata_log.csv"),
            lookup,
        }
    }

    #[test]
    fn test_not_detected_lines() {
        let report = Report::NotDetected { score: 0.02 };
        assert_eq!(
            report.lines(),
            vec![
                "Watermark Detected: False".to_string(),
                "No watermark detected. No message to decode.".to_string(),
            ]
        );
        assert_eq!(report.score(), 0.02);
    }

    #[test]
    fn test_detected_found_lines() {
        let report = detected(LookupOutcome::Found("Jane Doe - Night Drive".to_string()));
        assert_eq!(
            report.lines(),
            vec![
                "Watermark Detected: True".to_string(),
                "Decoded Message ID: 42 (Bits: 101010)".to_string(),
                "Full Metadata: Jane Doe - Night Drive".to_string(),
            ]
        );
    }

    #[test]
    fn test_detected_not_found_names_log() {
        let report = detected(LookupOutcome::NotFound);
        assert_eq!(
            report.lines()[2],
            "Found ID 42, but no metadata was found in 'metadata_log.csv'."
        );
    }

    #[test]
    fn test_detected_log_missing_notice() {
        let report = detected(LookupOutcome::LogMissing);
        assert_eq!(
            report.lines()[2],
            "Could not find 'metadata_log.csv' to look up ID."
        );
    }

    #[test]
    fn test_display_joins_lines() {
        let report = Report::NotDetected { score: 0.0 };
        assert_eq!(
            report.to_string(),
            "Watermark Detected: False\nNo watermark detected. No message to decode."
        );
    }
}
