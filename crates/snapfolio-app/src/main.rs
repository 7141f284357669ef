// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Snapfolio: local image library with upload and document export
//
// Entry point. Initialises logging, backend services, app state, and launches
// the Dioxus UI.

mod pages;
mod services;
mod state;

use dioxus::prelude::*;

use pages::library::Library;
use services::app_services::AppServices;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Snapfolio starting");

    dioxus::launch(app);
}

/// Root component.
fn app() -> Element {
    let svc = use_hook(|| match AppServices::init() {
        Ok(s) => {
            tracing::info!("backend services initialised");
            Ok(s)
        }
        Err(e) => {
            tracing::error!(error = %e, "data directory unusable, falling back to temp dir");
            AppServices::fallback().map_err(|e| {
                tracing::error!(error = %e, "fallback init failed");
                e.to_string()
            })
        }
    });

    match svc {
        Ok(svc) => rsx! { Shell { svc } },
        Err(msg) => rsx! {
            div { style: "padding: 16px; font-family: system-ui, -apple-system, sans-serif;",
                h1 { "Snapfolio could not start" }
                p { "{msg}" }
            }
        },
    }
}

/// Provides services and state to the page.
#[component]
fn Shell(svc: AppServices) -> Element {
    use_context_provider(|| svc.clone());
    use_context_provider(|| Signal::new(state::AppState::new(&svc)));

    rsx! {
        div { class: "app-container",
            style: "height: 100vh; overflow-y: auto; padding: 16px; font-family: system-ui, -apple-system, sans-serif;",
            Library {}
        }
    }
}
