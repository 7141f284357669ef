// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages.
//
// Every technical error is mapped to plain English with a clear suggestion.
// Severity drives how loudly the screen presents it.

use std::io::ErrorKind;

use crate::error::SnapfolioError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Network blip or busy device; trying again may work.
    Transient,
    /// User must do something (free space, grant permission, pick again).
    ActionRequired,
    /// Cannot be fixed by retrying.
    Permanent,
    /// Expected outcome such as a cancelled print dialog.
    Benign,
}

/// A human-readable error with a plain message and an actionable suggestion.
#[derive(Debug, Clone, PartialEq)]
pub struct HumanError {
    pub message: String,
    pub suggestion: String,
    pub retriable: bool,
    pub severity: Severity,
}

/// Convert a `SnapfolioError` into something a user can act on.
pub fn humanize_error(err: &SnapfolioError) -> HumanError {
    match err {
        SnapfolioError::Storage { source, .. } | SnapfolioError::Io(source) => {
            humanize_io(source.kind())
        }

        SnapfolioError::NotFound(_) => HumanError {
            message: "That image is no longer in your library.".into(),
            suggestion: "It was probably removed already. Nothing else to do.".into(),
            retriable: false,
            severity: Severity::Benign,
        },

        SnapfolioError::Collision(_) => HumanError {
            message: "Two images were saved at the same moment.".into(),
            suggestion: "Try adding the image again.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        SnapfolioError::Upload(detail) => {
            let lower = detail.to_ascii_lowercase();
            if lower.contains("connect") || lower.contains("dns") {
                HumanError {
                    message: "We couldn't reach the upload server.".into(),
                    suggestion: "Check your network connection, then try again.".into(),
                    retriable: true,
                    severity: Severity::Transient,
                }
            } else {
                HumanError {
                    message: "The upload didn't finish.".into(),
                    suggestion: format!("Try again in a moment. ({detail})"),
                    retriable: true,
                    severity: Severity::Transient,
                }
            }
        }

        SnapfolioError::UploadStatus { status } => HumanError {
            message: "The server didn't accept the image.".into(),
            suggestion: format!("The server answered with status {status}."),
            retriable: *status >= 500,
            severity: if *status >= 500 {
                Severity::Transient
            } else {
                Severity::Permanent
            },
        },

        SnapfolioError::Export(_) => HumanError {
            message: "The document wasn't printed or shared.".into(),
            suggestion: "If you cancelled, that's fine. Otherwise try again.".into(),
            retriable: true,
            severity: Severity::Benign,
        },

        SnapfolioError::Config(detail) => HumanError {
            message: "The app settings look wrong.".into(),
            suggestion: format!("Default settings are used instead. ({detail})"),
            retriable: false,
            severity: Severity::Permanent,
        },

        SnapfolioError::Serialization(_) => HumanError {
            message: "The app had an internal data problem.".into(),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        SnapfolioError::Bridge(_) => HumanError {
            message: "A device feature didn't work.".into(),
            suggestion: "Try restarting the app.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        SnapfolioError::PlatformUnavailable => HumanError {
            message: "This feature isn't available on your device.".into(),
            suggestion: "Some features need a phone or tablet.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}

fn humanize_io(kind: ErrorKind) -> HumanError {
    match kind {
        ErrorKind::NotFound => HumanError {
            message: "The file couldn't be found.".into(),
            suggestion: "It may have been moved or deleted. Try choosing it again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },
        ErrorKind::PermissionDenied => HumanError {
            message: "The app isn't allowed to access that file.".into(),
            suggestion: "Check the app's storage permissions.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },
        _ => HumanError {
            message: "There was a problem reading or writing a file.".into(),
            suggestion: "Try again. If this keeps happening, your device's storage may be full."
                .into(),
            retriable: true,
            severity: Severity::Transient,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_201_is_permanent() {
        let human = humanize_error(&SnapfolioError::UploadStatus { status: 201 });
        assert_eq!(human.severity, Severity::Permanent);
        assert!(!human.retriable);
    }

    #[test]
    fn server_error_is_transient() {
        let human = humanize_error(&SnapfolioError::UploadStatus { status: 503 });
        assert_eq!(human.severity, Severity::Transient);
        assert!(human.retriable);
    }

    #[test]
    fn export_failure_is_benign() {
        let human = humanize_error(&SnapfolioError::Export("cancelled".into()));
        assert_eq!(human.severity, Severity::Benign);
    }

    #[test]
    fn missing_image_asks_for_nothing() {
        let human = humanize_error(&SnapfolioError::NotFound("/data/1.jpg".into()));
        assert_eq!(human.severity, Severity::Benign);
        assert!(!human.retriable);
        assert!(!human.suggestion.contains("refresh"));
    }

    #[test]
    fn permission_denied_needs_action() {
        let err = SnapfolioError::storage(
            "/data/images",
            std::io::Error::from(ErrorKind::PermissionDenied),
        );
        assert_eq!(humanize_error(&err).severity, Severity::ActionRequired);
    }

    #[test]
    fn connection_failure_is_transient() {
        let err = SnapfolioError::Upload("error trying to connect: refused".into());
        assert_eq!(humanize_error(&err).severity, Severity::Transient);
    }
}
