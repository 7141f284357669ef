// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Library page: print or export the bundled document, pick images into the
// library, and upload or delete each one.
//
// Every action routes its result through `AppServices::report`; the page only
// re-reads the library and the latest error afterwards.

use dioxus::prelude::*;
use snapfolio_core::types::ImageEntry;

use crate::services::app_services::AppServices;
use crate::state::AppState;

const BUTTON_STYLE: &str = "padding: 12px 20px; border-radius: 8px; border: 1px solid #007aff; color: #007aff; background: white; font-size: 16px;";
const SMALL_BUTTON_STYLE: &str = "padding: 4px 12px; border-radius: 4px; border: 1px solid #ccc; background: white; font-size: 12px;";

#[component]
pub fn Library() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();

    // Populate the list from disk once on mount
    let svc_load = svc.clone();
    use_hook(move || {
        spawn(async move {
            let outcome = svc_load.load_images().await;
            svc_load.report("load library", outcome);
            state.write().sync(&svc_load);
        })
    });

    let busy = state.read().busy;
    let images_dir = svc.images_dir().display().to_string();

    rsx! {
        div {
            h1 { "Snapfolio" }

            section { style: "display: flex; gap: 8px; flex-wrap: wrap; margin: 16px 0;",
                button {
                    style: BUTTON_STYLE,
                    disabled: busy,
                    onclick: {
                        let svc = svc.clone();
                        move |_| {
                            state.write().status_message = None;
                            if svc.report("print", svc.print_document()).is_some() {
                                state.write().status_message = Some("Sent to the printer.".into());
                            }
                            state.write().sync(&svc);
                        }
                    },
                    "Print"
                }
                button {
                    style: BUTTON_STYLE,
                    disabled: busy,
                    onclick: {
                        let svc = svc.clone();
                        move |_| {
                            state.write().status_message = None;
                            if let Some(path) = svc.report("print to file", svc.print_to_file()) {
                                tracing::info!(path = %path.display(), "document exported");
                                let mut s = state.write();
                                s.status_message = Some(format!("Saved to {}", path.display()));
                                s.last_export = Some(path);
                            }
                            state.write().sync(&svc);
                        }
                    },
                    "Print to PDF file"
                }
                button {
                    style: BUTTON_STYLE,
                    disabled: busy,
                    onclick: {
                        let svc = svc.clone();
                        move |_| {
                            let svc = svc.clone();
                            state.write().busy = true;
                            state.write().status_message = None;
                            spawn(async move {
                                let outcome = svc.pick_and_add_image().await;
                                if let Some(Some(entry)) = svc.report("add image", outcome) {
                                    state.write().status_message = Some(format!("Added {}", entry.file_name()));
                                }
                                let mut s = state.write();
                                s.sync(&svc);
                                s.busy = false;
                            });
                        }
                    },
                    "Upload"
                }
            }

            if let Some(ref msg) = state.read().status_message {
                div { style: "padding: 12px; border-radius: 8px; background: #f0f0f0; margin-bottom: 16px;",
                    p { style: "margin: 0;", "{msg}" }
                }
            }

            if let Some(ref path) = state.read().last_export {
                p { style: "color: #666; font-size: 14px;", "Last export: {path.display()}" }
            }

            section {
                h3 { "Images" }
                p { style: "color: #888; font-size: 12px;", "Stored in {images_dir}" }
                if state.read().images.is_empty() {
                    p { style: "color: #888;", "No images yet. Use Upload to add one." }
                } else {
                    for entry in state.read().images.iter().cloned() {
                        ImageRow { key: "{entry}", entry, busy }
                    }
                }
            }
        }
    }
}

/// One library entry with its per-item actions.
#[component]
fn ImageRow(entry: ImageEntry, busy: bool) -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let name = entry.file_name();
    let src = entry.to_string();
    let path = entry.into_path();

    rsx! {
        div { style: "display: flex; align-items: center; gap: 12px; padding: 8px 0; border-bottom: 1px solid #eee;",
            img { src: "{src}", style: "width: 96px; height: 72px; object-fit: cover; border-radius: 4px;" }
            span { style: "flex: 1; font-family: monospace;", "{name}" }
            button {
                style: SMALL_BUTTON_STYLE,
                disabled: busy,
                onclick: {
                    let svc = svc.clone();
                    let path = path.clone();
                    move |_| {
                        let svc = svc.clone();
                        let path = path.clone();
                        state.write().busy = true;
                        state.write().status_message = None;
                        spawn(async move {
                            let outcome = svc.upload_image(&path).await;
                            if svc.report("upload image", outcome).is_some() {
                                state.write().status_message = Some("Upload complete.".into());
                            }
                            let mut s = state.write();
                            s.sync(&svc);
                            s.busy = false;
                        });
                    }
                },
                "Upload"
            }
            button {
                style: SMALL_BUTTON_STYLE,
                disabled: busy,
                onclick: {
                    let svc = svc.clone();
                    let path = path.clone();
                    move |_| {
                        let svc = svc.clone();
                        let path = path.clone();
                        state.write().busy = true;
                        state.write().status_message = None;
                        spawn(async move {
                            let outcome = svc.delete_image(&path).await;
                            svc.report("delete image", outcome);
                            let mut s = state.write();
                            s.sync(&svc);
                            s.busy = false;
                        });
                    }
                },
                "Delete"
            }
        }
    }
}
