//! Bulk create modal: a grid of rows for one schema, sent in a single request.

use api::{ApiError, Resource};
use dioxus::prelude::*;
use store::{BulkCreate, BulkError, BulkPhase, FieldValue, Schema};

use super::form_modal::{ChoiceOptions, FieldInput};
use crate::activity_log::{record_activity, Activity, ActivityLog, Affected, Operation};
use crate::components::{Button, ButtonVariant};
use crate::console::Console;

fn report(result: Result<(), BulkError>) {
    if let Err(e) = result {
        tracing::debug!("bulk edit ignored: {}", e);
    }
}

pub fn bulk_body<S>(
    mut bulk: Signal<BulkCreate<S>>,
    options: ChoiceOptions,
    on_submit: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element
where
    S: Schema + 'static,
{
    let (rows, errors, phase, notice) = {
        let state = bulk.read();
        let errors: Vec<_> = (0..state.rows().len())
            .map(|row| state.row_errors(row).cloned().unwrap_or_default())
            .collect();
        (
            state.rows().to_vec(),
            errors,
            state.phase(),
            state.notice().map(str::to_string),
        )
    };
    let submitting = phase == BulkPhase::Submitting;
    let single = rows.len() == 1;
    let count = rows.len();
    let noun = if count == 1 {
        S::NOUN.to_string()
    } else {
        format!("{}s", S::NOUN)
    };

    rsx! {
        form {
            class: "bulk-form",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                on_submit.call(());
            },

            div {
                class: "bulk-row bulk-row--header",
                span { class: "bulk-index", "#" }
                for spec in S::FIELDS.iter() {
                    span { key: "{spec.name}", class: "bulk-cell", "{spec.label}" }
                }
                span { class: "bulk-remove" }
            }

            for (index, row) in rows.into_iter().enumerate() {
                div {
                    key: "{index}",
                    class: "bulk-row",
                    span { class: "bulk-index", "{index + 1}" }
                    for spec in S::FIELDS.iter().copied() {
                        div {
                            key: "{spec.name}",
                            class: "bulk-cell",
                            FieldInput {
                                id: format!("bulk-{index}-{}", spec.name),
                                spec,
                                value: row.get(spec.name).cloned().unwrap_or(FieldValue::Single(String::new())),
                                error: errors[index].get(spec.name).cloned(),
                                options: options.get(spec.name).cloned().unwrap_or_default(),
                                disabled: submitting,
                                show_label: false,
                                on_text: move |text: String| report(bulk.write().set_text(index, spec.name, text)),
                                on_toggle: move |item: String| report(bulk.write().toggle(index, spec.name, &item)),
                            }
                        }
                    }
                    Button {
                        class: "bulk-remove",
                        variant: ButtonVariant::Ghost,
                        title: "Remove row",
                        disabled: single || submitting,
                        onclick: move |evt: MouseEvent| {
                            evt.prevent_default();
                            report(bulk.write().remove_row(index));
                        },
                        "✕"
                    }
                }
            }

            Button {
                variant: ButtonVariant::Secondary,
                disabled: submitting,
                onclick: move |evt: MouseEvent| {
                    evt.prevent_default();
                    report(bulk.write().add_row());
                },
                "+ Add row"
            }

            if let Some(message) = notice {
                p { class: "form-notice", "{message}" }
            }

            div {
                class: "form-actions",
                Button {
                    variant: ButtonVariant::Outline,
                    disabled: submitting,
                    onclick: move |evt: MouseEvent| {
                        evt.prevent_default();
                        on_cancel.call(());
                    },
                    "Cancel"
                }
                Button {
                    variant: ButtonVariant::Primary,
                    disabled: submitting,
                    if submitting { "Working…" } else { "Create {count} {noun}" }
                }
            }
        }
    }
}

/// Validate every row and send the batch through `R`. Returns true once the
/// server created them.
pub async fn submit_bulk<S, R>(
    mut bulk: Signal<BulkCreate<S>>,
    console: Console,
    mut log: Signal<ActivityLog>,
) -> bool
where
    S: Schema<Draft = R::Draft> + 'static,
    R: Resource,
{
    let begun = bulk.write().begin_submit();
    let drafts = match begun {
        Ok(drafts) => drafts,
        Err(e) => {
            tracing::debug!("bulk {} not submitted: {}", S::NOUN, e);
            return false;
        }
    };

    let gateway = console.gateway::<R>();
    let outcome = console
        .track(gateway.bulk_create(&drafts))
        .await
        .map(|created| Affected::Many(created.len()));
    let accepted = settle_bulk(&mut bulk.write(), &outcome);
    record_activity(&mut log, Activity::new(S::NOUN, Operation::BulkCreate, outcome));
    accepted
}

/// Hand the batch's outcome to the flow. On an error the rows stay for a retry.
pub fn settle_bulk<S: Schema, T>(bulk: &mut BulkCreate<S>, outcome: &Result<T, ApiError>) -> bool {
    match outcome {
        Ok(_) => {
            bulk.finish_ok();
            true
        }
        Err(e) => {
            bulk.fail(e.message());
            false
        }
    }
}
