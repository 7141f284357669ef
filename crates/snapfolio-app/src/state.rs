// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Screen state: the reactive signal shared by the library list and the
// document export controls.

use std::path::PathBuf;

use snapfolio_core::human_errors::HumanError;
use snapfolio_core::types::ImageEntry;

use crate::services::app_services::AppServices;

/// Shared state accessible to the page via `use_context`.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Images currently in the library, in display order.
    pub images: Vec<ImageEntry>,
    /// Status message for user feedback.
    pub status_message: Option<String>,
    /// Whether a library or export action is running.
    pub busy: bool,
    /// Most recent print-to-file output.
    pub last_export: Option<PathBuf>,
}

impl AppState {
    /// Create initial state from the backend services.
    pub fn new(svc: &AppServices) -> Self {
        Self {
            images: svc.images(),
            ..Self::default()
        }
    }

    /// Pull the latest library entries and any reported error into the state.
    pub fn sync(&mut self, svc: &AppServices) {
        self.images = svc.images();
        if let Some(err) = svc.take_last_error() {
            self.status_message = Some(error_message(&err));
        }
    }
}

fn error_message(err: &HumanError) -> String {
    format!("{} {}", err.message, err.suggestion)
}
