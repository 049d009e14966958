//! # Create / update / delete modals
//!
//! Every entity modal is a [`FormState`] rendered by [`form_body`] and sent by
//! [`submit_form`]. The entity-specific modals in `phones`, `users` and
//! `orders` only supply the schema, the records to pick from and the choice
//! options.

use std::collections::HashMap;

use api::{ApiError, Gateway, Resource, Transport};
use dioxus::prelude::*;
use store::{FieldKind, FieldSpec, FieldValue, FormMode, FormState, Identified, Schema, Submission};

use crate::activity_log::{record_activity, Activity, ActivityLog, Affected, Operation};
use crate::components::{Button, ButtonVariant, Input, Label};
use crate::console::Console;

/// One entry of a select or checkbox list.
#[derive(Clone, Debug, PartialEq)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(value: impl ToString, label: impl Into<String>) -> Self {
        Self {
            value: value.to_string(),
            label: label.into(),
        }
    }
}

/// Options per choice field name.
pub type ChoiceOptions = HashMap<&'static str, Vec<ChoiceOption>>;

pub fn modal_title(mode: FormMode, noun: &str) -> String {
    match mode {
        FormMode::Create => format!("New {noun}"),
        FormMode::Update { .. } => format!("Update {noun}"),
        FormMode::Delete { .. } => format!("Delete {noun}"),
    }
}

/// The input for one field, with its label and inline error.
#[component]
pub fn FieldInput(
    id: String,
    spec: FieldSpec,
    value: FieldValue,
    error: Option<String>,
    #[props(default)] options: Vec<ChoiceOption>,
    #[props(default)] disabled: bool,
    #[props(default = true)] show_label: bool,
    on_text: EventHandler<String>,
    on_toggle: EventHandler<String>,
) -> Element {
    let invalid = error.is_some();
    let input_type = match spec.kind {
        FieldKind::Secret => "password",
        FieldKind::Decimal => "number",
        _ => "text",
    };
    let choice_prompt = format!("Select {}…", spec.label.to_lowercase());
    let input = match spec.kind {
        FieldKind::Text | FieldKind::Secret | FieldKind::Decimal => rsx! {
            Input {
                id: id.clone(),
                r#type: input_type.to_string(),
                placeholder: spec.label.to_string(),
                value: value.as_text().to_string(),
                disabled,
                invalid,
                oninput: move |evt: FormEvent| on_text.call(evt.value()),
            }
        },
        FieldKind::Choice => rsx! {
            select {
                id: "{id}",
                class: if invalid { "input input--invalid" } else { "input" },
                disabled,
                value: value.as_text().to_string(),
                onchange: move |evt| on_text.call(evt.value()),
                option { value: "", "{choice_prompt}" }
                for choice in options.iter() {
                    option {
                        key: "{choice.value}",
                        value: "{choice.value}",
                        selected: choice.value == value.as_text(),
                        "{choice.label}"
                    }
                }
            }
        },
        FieldKind::MultiChoice => rsx! {
            div {
                id: "{id}",
                class: if invalid { "choice-list choice-list--invalid" } else { "choice-list" },
                if options.is_empty() {
                    span { class: "muted", "Nothing to choose from." }
                }
                for choice in options.iter().cloned() {
                    label {
                        key: "{choice.value}",
                        class: "choice",
                        input {
                            r#type: "checkbox",
                            disabled,
                            checked: value.items().contains(&choice.value),
                            onchange: {
                                let item = choice.value.clone();
                                move |_| on_toggle.call(item.clone())
                            },
                        }
                        " {choice.label}"
                    }
                }
            }
        },
    };

    rsx! {
        div {
            class: "field",
            if show_label {
                Label { html_for: id.clone(), "{spec.label}" }
            }
            {input}
            if let Some(message) = error {
                p { class: "field-error", "{message}" }
            }
        }
    }
}

/// Target picker, fields, notice and buttons for a single-entity form.
pub fn form_body<S>(
    mut form: Signal<FormState<S>>,
    targets: Vec<S::Entity>,
    options: ChoiceOptions,
    on_submit: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element
where
    S: Schema + 'static,
    S::Entity: Clone + 'static,
{
    let (mode, values, errors, notice, submitting, can_submit) = {
        let state = form.read();
        (
            state.mode(),
            state.values().clone(),
            state.errors().clone(),
            state.notice().map(str::to_string),
            state.is_submitting(),
            state.can_submit(),
        )
    };
    let target = mode.target();
    let selected = target.and_then(|id| targets.iter().find(|e| e.id() == id).cloned());
    let choices: Vec<ChoiceOption> = targets
        .iter()
        .map(|entity| ChoiceOption::new(entity.id(), S::describe(entity)))
        .collect();
    let target_label = capitalize(S::NOUN);
    let target_prompt = format!("Select {}…", S::NOUN);
    let confirm = match (mode, selected.as_ref()) {
        (FormMode::Delete { .. }, Some(entity)) => {
            Some(format!("Delete {}? This cannot be undone.", S::describe(entity)))
        }
        _ => None,
    };
    let show_fields = mode.shows_fields();

    rsx! {
        form {
            class: "entity-form",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                on_submit.call(());
            },

            if mode.needs_target() {
                div {
                    class: "field",
                    Label { html_for: "form-target", "{target_label}" }
                    select {
                        id: "form-target",
                        class: "input",
                        disabled: submitting,
                        onchange: move |evt| {
                            let id = evt.value().parse::<store::Id>().ok();
                            match id.and_then(|id| targets.iter().find(|e| e.id() == id)) {
                                Some(entity) => form.write().select_target(entity),
                                None => form.write().clear_target(),
                            }
                        },
                        option { value: "", "{target_prompt}" }
                        for choice in choices.iter() {
                            option {
                                key: "{choice.value}",
                                value: "{choice.value}",
                                selected: Some(choice.value.clone()) == target.map(|id| id.to_string()),
                                "{choice.label}"
                            }
                        }
                    }
                }
            }

            if show_fields {
                for spec in S::FIELDS.iter().copied() {
                    FieldInput {
                        key: "{spec.name}",
                        id: format!("form-{}", spec.name),
                        spec,
                        value: values.get(spec.name).cloned().unwrap_or(FieldValue::Single(String::new())),
                        error: errors.get(spec.name).cloned(),
                        options: options.get(spec.name).cloned().unwrap_or_default(),
                        disabled: submitting,
                        on_text: move |text: String| form.write().set_text(spec.name, text),
                        on_toggle: move |item: String| form.write().toggle(spec.name, &item),
                    }
                }
            }

            if let Some(question) = confirm {
                p { class: "confirm", "{question}" }
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
                    variant: if matches!(mode, FormMode::Delete { .. }) { ButtonVariant::Destructive } else { ButtonVariant::Primary },
                    disabled: !can_submit,
                    if submitting { "Working…" } else { "{mode.verb()}" }
                }
            }
        }
    }
}

/// Run the client checks and, when they pass, send the form through `R`.
/// Returns true once the server accepted the change.
pub async fn submit_form<S, R>(
    mut form: Signal<FormState<S>>,
    console: Console,
    mut log: Signal<ActivityLog>,
) -> bool
where
    S: Schema<Draft = R::Draft> + 'static,
    R: Resource,
{
    let begun = form.write().begin_submit();
    let submission = match begun {
        Ok(submission) => submission,
        Err(e) => {
            tracing::debug!("{} form not submitted: {}", S::NOUN, e);
            return false;
        }
    };

    let gateway = console.gateway::<R>();
    let (operation, outcome) = console.track(send(&gateway, submission)).await;
    let accepted = settle_form(&mut form.write(), &outcome);
    record_activity(&mut log, Activity::new(S::NOUN, operation, outcome));
    accepted
}

/// One round trip for a submission, reporting what it touched.
async fn send<R: Resource, T: Transport>(
    gateway: &Gateway<R, T>,
    submission: Submission<R::Draft>,
) -> (Operation, Result<Affected, ApiError>) {
    match submission {
        Submission::Create(draft) => (
            Operation::Create,
            gateway
                .create(&draft)
                .await
                .map(|created| Affected::One(created.id())),
        ),
        Submission::Update(id, draft) => (
            Operation::Update,
            gateway.update(id, &draft).await.map(|_| Affected::One(id)),
        ),
        Submission::Delete(id) => (
            Operation::Delete,
            gateway.delete(id).await.map(|()| Affected::One(id)),
        ),
    }
}

/// Hand the request's outcome to the form. True when the modal should reload
/// and close; on an error it stays open with the user's input.
pub fn settle_form<S: Schema, T>(form: &mut FormState<S>, outcome: &Result<T, ApiError>) -> bool {
    match outcome {
        Ok(_) => {
            form.finish();
            true
        }
        Err(e) => {
            form.fail(e.clone().into_failure());
            false
        }
    }
}

pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::transport::scripted::ScriptedTransport;
    use api::{Phones, Users};
    use store::{Phone, PhoneSchema, User, UserSchema};

    #[test]
    fn test_titles() {
        assert_eq!(modal_title(FormMode::Create, "phone"), "New phone");
        assert_eq!(modal_title(FormMode::update(), "user"), "Update user");
        assert_eq!(modal_title(FormMode::delete(), "order"), "Delete order");
        assert_eq!(capitalize("order"), "Order");
    }

    fn acme() -> Phone {
        Phone {
            id: 3,
            brand: "Acme".to_string(),
            model: "X1".to_string(),
            price: 99.5,
        }
    }

    #[tokio::test]
    async fn test_rejected_update_keeps_modal_open() {
        let gateway: Gateway<Phones, _> = Gateway::new(
            ScriptedTransport::default().reply(400, r#"{"brand":"must not be blank"}"#),
        );
        let mut form = FormState::<PhoneSchema>::new(FormMode::update());
        form.select_target(&acme());
        form.set_text("model", "X2");

        let submission = form.begin_submit().unwrap();
        let (operation, outcome) = send(&gateway, submission).await;
        assert_eq!(operation, Operation::Update);

        assert!(!settle_form(&mut form, &outcome));
        assert_eq!(form.error("brand"), Some("must not be blank"));
        assert_eq!(form.text("model"), "X2");
        assert!(!form.is_submitting());
        assert!(form.can_submit());
        assert_eq!(gateway.transport().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_accepted_create_closes_modal() {
        let gateway: Gateway<Phones, _> = Gateway::new(ScriptedTransport::default().reply(
            201,
            r#"{"id":8,"brand":"Acme","model":"X1","price":99.5}"#,
        ));
        let mut form = FormState::<PhoneSchema>::new(FormMode::Create);
        form.set_text("brand", "Acme");
        form.set_text("model", "X1");
        form.set_text("price", "99.5");

        let (_, outcome) = send(&gateway, form.begin_submit().unwrap()).await;
        assert_eq!(outcome, Ok(Affected::One(8)));
        assert!(settle_form(&mut form, &outcome));
        assert!(!form.is_submitting());
        assert_eq!(form.notice(), None);
    }

    #[tokio::test]
    async fn test_refused_delete_shows_notice() {
        let gateway: Gateway<Users, _> = Gateway::new(
            ScriptedTransport::default().reply(409, "constraint violation"),
        );
        let mut form = FormState::<UserSchema>::new(FormMode::delete());
        form.select_target(&User {
            id: 1,
            username: "ann".to_string(),
            orders: vec![],
        });

        let (operation, outcome) = send(&gateway, form.begin_submit().unwrap()).await;
        assert_eq!(operation, Operation::Delete);
        assert!(!settle_form(&mut form, &outcome));
        assert_eq!(form.notice(), Some("constraint violation"));
        assert!(form.errors().is_empty());
    }

    #[tokio::test]
    async fn test_empty_rejection_is_not_silent() {
        let gateway: Gateway<Phones, _> =
            Gateway::new(ScriptedTransport::default().reply(400, "{}"));
        let mut form = FormState::<PhoneSchema>::new(FormMode::update());
        form.select_target(&acme());

        let (_, outcome) = send(&gateway, form.begin_submit().unwrap()).await;
        assert!(!settle_form(&mut form, &outcome));
        assert_eq!(form.notice(), Some("server returned 400"));
    }
}
