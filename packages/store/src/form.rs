//! # Form state for create, update and delete modals
//!
//! One controller, [`FormState`], drives every entity modal. What differs between
//! phones, users and orders lives in a [`Schema`]: the field list, how an entity
//! pre-fills the form, and how raw input becomes a request draft.
//!
//! ## Lifecycle
//!
//! 1. Build the form for a [`FormMode`]. Update and delete modes start without a
//!    target; [`FormState::select_target`] picks one (and pre-fills on update).
//! 2. Edit with [`FormState::set_text`] / [`FormState::toggle`]. The submit button
//!    follows [`FormState::can_submit`].
//! 3. [`FormState::begin_submit`] performs the shallow client-side checks and,
//!    when they pass, marks the form as submitting and hands back a [`Submission`].
//!    Nothing here talks to the network.
//! 4. The caller reports back with [`FormState::finish`] or [`FormState::fail`].
//!    A failure keeps every value the user typed.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use thiserror::Error;

use crate::models::{Id, Identified};

/// Field name -> server or client validation message.
pub type FieldErrors = BTreeMap<String, String>;

/// Field name -> current raw input.
pub type FieldValues = BTreeMap<&'static str, FieldValue>;

#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Single(String),
    Many(Vec<String>),
}

impl FieldValue {
    fn blank(kind: FieldKind) -> Self {
        match kind {
            FieldKind::MultiChoice => FieldValue::Many(Vec::new()),
            _ => FieldValue::Single(String::new()),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Single(text) => text.trim().is_empty(),
            FieldValue::Many(items) => items.is_empty(),
        }
    }

    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Single(text) => text,
            FieldValue::Many(_) => "",
        }
    }

    pub fn items(&self) -> &[String] {
        match self {
            FieldValue::Single(_) => &[],
            FieldValue::Many(items) => items,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Write-only text, never pre-filled.
    Secret,
    Decimal,
    /// One id out of a list of options.
    Choice,
    /// Any number of ids out of a list of options.
    MultiChoice,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Requirement {
    Always,
    OnCreate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire name, also the key of server-side field errors.
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: Requirement,
}

impl FieldSpec {
    pub fn is_required(&self, mode: &FormMode) -> bool {
        match (self.required, mode) {
            (_, FormMode::Delete { .. }) => false,
            (Requirement::Always, _) => true,
            (Requirement::OnCreate, FormMode::Create) => true,
            _ => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update { target: Option<Id> },
    Delete { target: Option<Id> },
}

impl FormMode {
    pub fn update() -> Self {
        FormMode::Update { target: None }
    }

    pub fn delete() -> Self {
        FormMode::Delete { target: None }
    }

    pub fn target(&self) -> Option<Id> {
        match self {
            FormMode::Create => None,
            FormMode::Update { target } | FormMode::Delete { target } => *target,
        }
    }

    pub fn needs_target(&self) -> bool {
        !matches!(self, FormMode::Create)
    }

    /// Whether the form renders its input fields. Delete forms only confirm,
    /// and update forms wait for a target.
    pub fn shows_fields(&self) -> bool {
        match self {
            FormMode::Create => true,
            FormMode::Update { target } => target.is_some(),
            FormMode::Delete { .. } => false,
        }
    }

    /// Label for the submit button.
    pub fn verb(&self) -> &'static str {
        match self {
            FormMode::Create => "Create",
            FormMode::Update { .. } => "Save",
            FormMode::Delete { .. } => "Delete",
        }
    }
}

/// The per-entity half of a form: fields, pre-fill and parsing.
pub trait Schema {
    type Entity: Identified;
    type Draft;

    /// Singular noun used in titles: "phone".
    const NOUN: &'static str;
    const FIELDS: &'static [FieldSpec];

    /// Values for an update form. Secret fields are left blank.
    fn values_of(entity: &Self::Entity) -> FieldValues;

    /// Turn raw input into a draft. Required fields have already been checked.
    fn parse(values: &FieldValues) -> Result<Self::Draft, FieldErrors>;

    /// Short description of an entity for target pickers.
    fn describe(entity: &Self::Entity) -> String;

    fn blank_values() -> FieldValues {
        Self::FIELDS
            .iter()
            .map(|field| (field.name, FieldValue::blank(field.kind)))
            .collect()
    }
}

/// Check required fields, then parse. Used by single forms and bulk rows alike.
pub fn validate<S: Schema>(
    values: &FieldValues,
    mode: &FormMode,
) -> Result<S::Draft, FieldErrors> {
    let missing: FieldErrors = S::FIELDS
        .iter()
        .filter(|field| field.is_required(mode))
        .filter(|field| values.get(field.name).is_none_or(FieldValue::is_blank))
        .map(|field| (field.name.to_string(), format!("{} is required", field.label)))
        .collect();
    if !missing.is_empty() {
        return Err(missing);
    }
    S::parse(values)
}

/// Text of a single-valued field, or "" when absent.
pub fn text_of<'a>(values: &'a FieldValues, name: &str) -> &'a str {
    values.get(name).map(FieldValue::as_text).unwrap_or("")
}

/// What a successful `begin_submit` asks the caller to send.
#[derive(Clone, Debug, PartialEq)]
pub enum Submission<D> {
    Create(D),
    Update(Id, D),
    Delete(Id),
}

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("a request is already in flight")]
    Busy,
    #[error("no record selected")]
    NoTarget,
    #[error("required fields are blank: {}", .0.join(", "))]
    Incomplete(Vec<&'static str>),
    #[error("some fields are invalid")]
    Invalid(FieldErrors),
}

/// How a failed request is shown on the form.
#[derive(Clone, Debug, PartialEq)]
pub enum FormFailure {
    /// Messages keyed by field name, shown next to the inputs.
    Fields(FieldErrors),
    /// A single message not tied to any field.
    Notice(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormState<S: Schema> {
    mode: FormMode,
    values: FieldValues,
    errors: FieldErrors,
    notice: Option<String>,
    submitting: bool,
    _schema: PhantomData<S>,
}

impl<S: Schema> FormState<S> {
    pub fn new(mode: FormMode) -> Self {
        Self {
            mode,
            values: S::blank_values(),
            errors: FieldErrors::new(),
            notice: None,
            submitting: false,
            _schema: PhantomData,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn text(&self, field: &str) -> &str {
        text_of(&self.values, field)
    }

    pub fn selected(&self, field: &str) -> &[String] {
        self.values.get(field).map(FieldValue::items).unwrap_or(&[])
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Set a single-valued field. Unknown field names are ignored.
    pub fn set_text(&mut self, field: &str, value: impl Into<String>) {
        if let Some(spec) = spec_of::<S>(field) {
            self.values.insert(spec.name, FieldValue::Single(value.into()));
            self.errors.remove(field);
        }
    }

    /// Add `item` to a multi-choice field, or remove it when already present.
    pub fn toggle(&mut self, field: &str, item: &str) {
        let Some(spec) = spec_of::<S>(field) else {
            return;
        };
        let entry = self
            .values
            .entry(spec.name)
            .or_insert_with(|| FieldValue::Many(Vec::new()));
        toggle_item(entry, item);
        self.errors.remove(field);
    }

    /// Point an update or delete form at `entity`. Update forms are pre-filled.
    pub fn select_target(&mut self, entity: &S::Entity) {
        let id = entity.id();
        match self.mode {
            FormMode::Create => return,
            FormMode::Update { .. } => {
                self.mode = FormMode::Update { target: Some(id) };
                let mut values = S::blank_values();
                values.extend(S::values_of(entity));
                self.values = values;
            }
            FormMode::Delete { .. } => {
                self.mode = FormMode::Delete { target: Some(id) };
            }
        }
        self.errors.clear();
        self.notice = None;
    }

    pub fn clear_target(&mut self) {
        if self.mode.needs_target() {
            *self = Self::new(match self.mode {
                FormMode::Update { .. } => FormMode::update(),
                _ => FormMode::delete(),
            });
        }
    }

    /// Required fields that are still blank, in field order.
    pub fn missing_required(&self) -> Vec<&'static str> {
        S::FIELDS
            .iter()
            .filter(|field| field.is_required(&self.mode))
            .filter(|field| self.values.get(field.name).is_none_or(FieldValue::is_blank))
            .map(|field| field.name)
            .collect()
    }

    pub fn can_submit(&self) -> bool {
        !self.submitting
            && (!self.mode.needs_target() || self.mode.target().is_some())
            && self.missing_required().is_empty()
    }

    /// Run the client-side checks and, if they pass, enter the submitting state.
    pub fn begin_submit(&mut self) -> Result<Submission<S::Draft>, FormError> {
        if self.submitting {
            return Err(FormError::Busy);
        }
        if self.mode.needs_target() && self.mode.target().is_none() {
            return Err(FormError::NoTarget);
        }
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(FormError::Incomplete(missing));
        }

        let submission = match self.mode {
            FormMode::Delete { target: Some(id) } => Submission::Delete(id),
            mode => {
                let draft = validate::<S>(&self.values, &mode).map_err(|errors| {
                    self.errors = errors.clone();
                    FormError::Invalid(errors)
                })?;
                match mode {
                    FormMode::Update { target: Some(id) } => Submission::Update(id, draft),
                    _ => Submission::Create(draft),
                }
            }
        };

        self.submitting = true;
        self.errors.clear();
        self.notice = None;
        Ok(submission)
    }

    /// The request failed: leave the form open with its values intact.
    ///
    /// Field errors go next to their inputs. Errors for fields this form does
    /// not render right now, such as any field of a delete form, become the
    /// notice instead.
    pub fn fail(&mut self, failure: FormFailure) {
        self.submitting = false;
        match failure {
            FormFailure::Fields(errors) if errors.is_empty() => {
                self.errors.clear();
                self.notice = Some("The server rejected the request".to_string());
            }
            FormFailure::Fields(errors) => {
                let shown = self.mode.shows_fields();
                let (inline, elsewhere): (FieldErrors, FieldErrors) = errors
                    .into_iter()
                    .partition(|(field, _)| shown && spec_of::<S>(field).is_some());
                self.errors = inline;
                self.notice = if elsewhere.is_empty() {
                    None
                } else {
                    Some(elsewhere.into_values().collect::<Vec<_>>().join("; "))
                };
            }
            FormFailure::Notice(message) => {
                self.errors.clear();
                self.notice = Some(message);
            }
        }
    }

    pub fn finish(&mut self) {
        self.submitting = false;
        self.errors.clear();
        self.notice = None;
    }
}

pub(crate) fn spec_of<S: Schema>(field: &str) -> Option<&'static FieldSpec> {
    S::FIELDS.iter().find(|spec| spec.name == field)
}

pub(crate) fn toggle_item(value: &mut FieldValue, item: &str) {
    match value {
        FieldValue::Many(items) => {
            if let Some(pos) = items.iter().position(|existing| existing == item) {
                items.remove(pos);
            } else {
                items.push(item.to_string());
            }
        }
        FieldValue::Single(_) => *value = FieldValue::Many(vec![item.to_string()]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Order, Phone, PhoneDraft, User, UserDraft};
    use crate::schema::{OrderSchema, PhoneSchema, UserSchema};

    fn acme() -> Phone {
        Phone {
            id: 3,
            brand: "Acme".to_string(),
            model: "X1".to_string(),
            price: 99.5,
        }
    }

    #[test]
    fn test_blank_required_field_blocks_submit_without_request() {
        let mut form = FormState::<PhoneSchema>::new(FormMode::Create);
        form.set_text("model", "X1");
        form.set_text("price", "10");
        assert!(!form.can_submit());
        assert_eq!(form.missing_required(), vec!["brand"]);
        assert_eq!(form.begin_submit(), Err(FormError::Incomplete(vec!["brand"])));
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_create_submission() {
        let mut form = FormState::<PhoneSchema>::new(FormMode::Create);
        form.set_text("brand", " Acme ");
        form.set_text("model", "X1");
        form.set_text("price", "99.50");
        assert!(form.can_submit());
        let submission = form.begin_submit().unwrap();
        assert_eq!(
            submission,
            Submission::Create(PhoneDraft {
                brand: "Acme".to_string(),
                model: "X1".to_string(),
                price: 99.5,
            })
        );
        assert!(form.is_submitting());
        assert!(!form.can_submit());
        assert_eq!(form.begin_submit(), Err(FormError::Busy));
    }

    #[test]
    fn test_parse_errors_are_shown_inline() {
        let mut form = FormState::<PhoneSchema>::new(FormMode::Create);
        form.set_text("brand", "Acme");
        form.set_text("model", "X1");
        form.set_text("price", "-3");
        let err = form.begin_submit().unwrap_err();
        assert!(matches!(err, FormError::Invalid(_)));
        assert_eq!(form.error("price"), Some("Price must not be negative"));
        assert!(!form.is_submitting());

        form.set_text("price", "3");
        assert_eq!(form.error("price"), None);
    }

    #[test]
    fn test_update_requires_target_and_prefills() {
        let mut form = FormState::<PhoneSchema>::new(FormMode::update());
        assert!(!form.can_submit());
        assert_eq!(form.begin_submit(), Err(FormError::NoTarget));

        form.select_target(&acme());
        assert_eq!(form.mode().target(), Some(3));
        assert_eq!(form.text("brand"), "Acme");
        assert_eq!(form.text("price"), "99.5");

        form.set_text("model", "X2");
        match form.begin_submit().unwrap() {
            Submission::Update(id, draft) => {
                assert_eq!(id, 3);
                assert_eq!(draft.model, "X2");
            }
            other => panic!("unexpected submission {other:?}"),
        }
    }

    #[test]
    fn test_server_field_errors_keep_values() {
        let mut form = FormState::<PhoneSchema>::new(FormMode::update());
        form.select_target(&acme());
        form.set_text("brand", "Acme2");
        form.begin_submit().unwrap();

        let mut errors = FieldErrors::new();
        errors.insert("brand".to_string(), "must not be blank".to_string());
        form.fail(FormFailure::Fields(errors));

        assert!(!form.is_submitting());
        assert_eq!(form.error("brand"), Some("must not be blank"));
        assert_eq!(form.notice(), None);
        assert_eq!(form.text("brand"), "Acme2");
        assert_eq!(form.mode().target(), Some(3));
    }

    #[test]
    fn test_unknown_error_fields_become_notice() {
        let mut form = FormState::<UserSchema>::new(FormMode::Create);
        form.set_text("username", "ann");
        form.set_text("password", "secret");
        form.begin_submit().unwrap();

        let mut errors = FieldErrors::new();
        errors.insert("error".to_string(), "User not found".to_string());
        form.fail(FormFailure::Fields(errors));
        assert!(form.errors().is_empty());
        assert_eq!(form.notice(), Some("User not found"));

        form.begin_submit().unwrap();
        form.fail(FormFailure::Notice("Request failed".to_string()));
        assert_eq!(form.notice(), Some("Request failed"));
        assert_eq!(form.text("username"), "ann");
    }

    #[test]
    fn test_delete_rejection_becomes_notice() {
        let mut form = FormState::<UserSchema>::new(FormMode::delete());
        form.select_target(&User {
            id: 1,
            username: "ann".to_string(),
            orders: vec![],
        });
        assert_eq!(form.begin_submit(), Ok(Submission::Delete(1)));

        let errors = FieldErrors::from([(
            "username".to_string(),
            "constraint violation".to_string(),
        )]);
        form.fail(FormFailure::Fields(errors));
        assert!(!form.is_submitting());
        assert!(form.errors().is_empty());
        assert_eq!(form.notice(), Some("constraint violation"));
        assert_eq!(form.mode().target(), Some(1));
    }

    #[test]
    fn test_empty_field_errors_still_show_a_notice() {
        let mut form = FormState::<PhoneSchema>::new(FormMode::update());
        form.select_target(&acme());
        form.begin_submit().unwrap();
        form.fail(FormFailure::Fields(FieldErrors::new()));
        assert!(form.errors().is_empty());
        assert_eq!(form.notice(), Some("The server rejected the request"));
    }

    #[test]
    fn test_shows_fields() {
        assert!(FormMode::Create.shows_fields());
        assert!(!FormMode::update().shows_fields());
        assert!(FormMode::Update { target: Some(2) }.shows_fields());
        assert!(!FormMode::Delete { target: Some(2) }.shows_fields());
    }

    #[test]
    fn test_password_required_only_on_create() {
        let create = FormState::<UserSchema>::new(FormMode::Create);
        assert_eq!(create.missing_required(), vec!["username", "password"]);

        let mut update = FormState::<UserSchema>::new(FormMode::update());
        update.select_target(&User {
            id: 1,
            username: "ann".to_string(),
            orders: vec![],
        });
        assert_eq!(update.text("password"), "");
        assert!(update.can_submit());
        assert_eq!(
            update.begin_submit(),
            Ok(Submission::Update(
                1,
                UserDraft {
                    username: "ann".to_string(),
                    password: None,
                }
            ))
        );
    }

    #[test]
    fn test_delete_needs_only_target() {
        let mut form = FormState::<OrderSchema>::new(FormMode::delete());
        assert!(!form.can_submit());
        form.select_target(&Order {
            id: 12,
            user_id: 1,
            order_date: None,
            total_amount: 0.0,
            phones: vec![],
        });
        assert!(form.can_submit());
        assert_eq!(form.begin_submit(), Ok(Submission::Delete(12)));
    }

    #[test]
    fn test_toggle_multi_choice() {
        let mut form = FormState::<OrderSchema>::new(FormMode::Create);
        form.set_text("userId", "4");
        form.toggle("smartphoneIds", "1");
        form.toggle("smartphoneIds", "2");
        form.toggle("smartphoneIds", "1");
        assert_eq!(form.selected("smartphoneIds"), ["2".to_string()]);
        assert!(form.can_submit());
    }

    #[test]
    fn test_clear_target_resets_form() {
        let mut form = FormState::<PhoneSchema>::new(FormMode::update());
        form.select_target(&acme());
        form.clear_target();
        assert_eq!(form.mode(), FormMode::update());
        assert_eq!(form.text("brand"), "");
    }
}
