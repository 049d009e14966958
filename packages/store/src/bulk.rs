//! Bulk create: several rows of the same form submitted as one request.
//!
//! ```text
//! Editing --begin_submit--> Submitting --finish_ok--> Done
//!    ^                          |
//!    +------ edit ---- Failed <-+ fail
//! ```

use std::collections::BTreeMap;
use std::marker::PhantomData;

use thiserror::Error;

use crate::form::{
    spec_of, toggle_item, validate, FieldErrors, FieldValue, FieldValues, FormMode, Schema,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BulkPhase {
    #[default]
    Editing,
    Submitting,
    Done,
    Failed,
}

#[derive(Debug, Error, PartialEq)]
pub enum BulkError {
    #[error("at least one row is required")]
    LastRow,
    #[error("row {0} does not exist")]
    NoSuchRow(usize),
    #[error("a bulk request is already in flight")]
    Busy,
    #[error("no field named {0}")]
    UnknownField(String),
    #[error("rows {} have invalid fields", display_rows(.0))]
    Invalid(Vec<usize>),
}

fn display_rows(rows: &[usize]) -> String {
    rows.iter()
        .map(|row| (row + 1).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Clone, Debug, PartialEq)]
pub struct BulkCreate<S: Schema> {
    rows: Vec<FieldValues>,
    row_errors: BTreeMap<usize, FieldErrors>,
    phase: BulkPhase,
    notice: Option<String>,
    _schema: PhantomData<S>,
}

impl<S: Schema> Default for BulkCreate<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Schema> BulkCreate<S> {
    pub fn new() -> Self {
        Self {
            rows: vec![S::blank_values()],
            row_errors: BTreeMap::new(),
            phase: BulkPhase::Editing,
            notice: None,
            _schema: PhantomData,
        }
    }

    pub fn rows(&self) -> &[FieldValues] {
        &self.rows
    }

    pub fn phase(&self) -> BulkPhase {
        self.phase
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == BulkPhase::Submitting
    }

    pub fn row_errors(&self, row: usize) -> Option<&FieldErrors> {
        self.row_errors.get(&row)
    }

    pub fn error(&self, row: usize, field: &str) -> Option<&str> {
        self.row_errors
            .get(&row)
            .and_then(|errors| errors.get(field))
            .map(String::as_str)
    }

    pub fn add_row(&mut self) -> Result<(), BulkError> {
        self.start_edit()?;
        self.rows.push(S::blank_values());
        Ok(())
    }

    pub fn remove_row(&mut self, row: usize) -> Result<(), BulkError> {
        if self.is_submitting() {
            return Err(BulkError::Busy);
        }
        if row >= self.rows.len() {
            return Err(BulkError::NoSuchRow(row));
        }
        if self.rows.len() == 1 {
            return Err(BulkError::LastRow);
        }
        self.start_edit()?;
        self.rows.remove(row);
        // Errors of later rows shift down with their rows.
        self.row_errors = std::mem::take(&mut self.row_errors)
            .into_iter()
            .filter(|(index, _)| *index != row)
            .map(|(index, errors)| (if index > row { index - 1 } else { index }, errors))
            .collect();
        Ok(())
    }

    pub fn set_text(
        &mut self,
        row: usize,
        field: &str,
        value: impl Into<String>,
    ) -> Result<(), BulkError> {
        let name = field_name::<S>(field)?;
        let values = self.row_mut(row)?;
        values.insert(name, FieldValue::Single(value.into()));
        self.clear_error(row, field);
        Ok(())
    }

    pub fn toggle(&mut self, row: usize, field: &str, item: &str) -> Result<(), BulkError> {
        let name = field_name::<S>(field)?;
        let values = self.row_mut(row)?;
        let entry = values
            .entry(name)
            .or_insert_with(|| FieldValue::Many(Vec::new()));
        toggle_item(entry, item);
        self.clear_error(row, field);
        Ok(())
    }

    /// Validate every row as a create form. On success the flow is submitting
    /// and the drafts come back in row order.
    pub fn begin_submit(&mut self) -> Result<Vec<S::Draft>, BulkError> {
        if self.is_submitting() {
            return Err(BulkError::Busy);
        }

        let mut drafts = Vec::with_capacity(self.rows.len());
        let mut row_errors = BTreeMap::new();
        for (index, values) in self.rows.iter().enumerate() {
            match validate::<S>(values, &FormMode::Create) {
                Ok(draft) => drafts.push(draft),
                Err(errors) => {
                    row_errors.insert(index, errors);
                }
            }
        }

        self.notice = None;
        if !row_errors.is_empty() {
            let invalid = row_errors.keys().copied().collect();
            self.row_errors = row_errors;
            self.phase = BulkPhase::Editing;
            return Err(BulkError::Invalid(invalid));
        }

        self.row_errors.clear();
        self.phase = BulkPhase::Submitting;
        Ok(drafts)
    }

    pub fn finish_ok(&mut self) {
        self.phase = BulkPhase::Done;
        self.notice = None;
    }

    /// The request failed. Rows stay as they were so the user can retry.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.phase = BulkPhase::Failed;
        self.notice = Some(message.into());
    }

    fn start_edit(&mut self) -> Result<(), BulkError> {
        match self.phase {
            BulkPhase::Submitting => Err(BulkError::Busy),
            BulkPhase::Failed => {
                self.phase = BulkPhase::Editing;
                Ok(())
            }
            BulkPhase::Editing | BulkPhase::Done => Ok(()),
        }
    }

    fn row_mut(&mut self, row: usize) -> Result<&mut FieldValues, BulkError> {
        if row >= self.rows.len() {
            return Err(BulkError::NoSuchRow(row));
        }
        self.start_edit()?;
        Ok(&mut self.rows[row])
    }

    fn clear_error(&mut self, row: usize, field: &str) {
        if let Some(errors) = self.row_errors.get_mut(&row) {
            errors.remove(field);
            if errors.is_empty() {
                self.row_errors.remove(&row);
            }
        }
    }
}

fn field_name<S: Schema>(field: &str) -> Result<&'static str, BulkError> {
    spec_of::<S>(field)
        .map(|spec| spec.name)
        .ok_or_else(|| BulkError::UnknownField(field.to_string()))
}
