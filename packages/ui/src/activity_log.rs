//! # Activity log
//!
//! Every mutation the console sends ends up here as an [`Activity`]: which
//! entity kind, which operation, and either what it affected or the
//! [`ApiError`] it failed with. The panel groups entries by entity kind and
//! counts failures per kind; each entry is also emitted as a `tracing` event.

use api::ApiError;
use dioxus::prelude::*;
use store::Id;

/// Oldest entries are dropped beyond this many.
const MAX_ENTRIES: usize = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
    BulkCreate,
}

impl Operation {
    fn verb(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::BulkCreate => "bulk create",
        }
    }

    fn done(self) -> &'static str {
        match self {
            Operation::Create => "Created",
            Operation::Update => "Updated",
            Operation::Delete => "Deleted",
            Operation::BulkCreate => "Bulk created",
        }
    }
}

/// What a successful request touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Affected {
    One(Id),
    Many(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Done,
    /// The server refused the input (validation or uniqueness).
    Rejected,
    Failed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Activity {
    pub time: String,
    /// Entity noun: "phone", "user" or "order".
    pub noun: &'static str,
    pub operation: Operation,
    pub outcome: Result<Affected, ApiError>,
}

impl Activity {
    pub fn new(noun: &'static str, operation: Operation, outcome: Result<Affected, ApiError>) -> Self {
        Self {
            time: current_time(),
            noun,
            operation,
            outcome,
        }
    }

    pub fn severity(&self) -> Severity {
        match &self.outcome {
            Ok(_) => Severity::Done,
            Err(ApiError::ValidationFailed(_)) => Severity::Rejected,
            Err(ApiError::NotFound(_) | ApiError::RequestFailed(_)) => Severity::Failed,
        }
    }

    pub fn summary(&self) -> String {
        match &self.outcome {
            Ok(Affected::One(id)) => format!("{} {} #{}", self.operation.done(), self.noun, id),
            Ok(Affected::Many(count)) => {
                format!("{} {} {}s", self.operation.done(), count, self.noun)
            }
            Err(e) => format!(
                "Could not {} {}: {}",
                self.operation.verb(),
                self.noun,
                e.message()
            ),
        }
    }

    /// Field messages of a rejected request, for listing under the summary.
    pub fn field_errors(&self) -> Vec<(String, String)> {
        match &self.outcome {
            Err(ApiError::ValidationFailed(errors)) => errors
                .iter()
                .map(|(field, message)| (field.clone(), message.clone()))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn is_failure(&self) -> bool {
        self.severity() != Severity::Done
    }
}

#[derive(Clone, Debug, Default)]
pub struct ActivityLog {
    entries: Vec<Activity>,
    pub visible: bool,
    /// Entity noun the panel is narrowed to; `None` shows every entry.
    pub focus: Option<&'static str>,
}

impl ActivityLog {
    pub fn record(&mut self, activity: Activity) {
        self.entries.push(activity);
        if self.entries.len() > MAX_ENTRIES {
            let excess = self.entries.len() - MAX_ENTRIES;
            self.entries.drain(..excess);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.focus = None;
    }

    /// Newest first, narrowed to [`focus`](Self::focus).
    pub fn shown(&self) -> Vec<Activity> {
        self.entries
            .iter()
            .rev()
            .filter(|a| self.focus.is_none_or(|noun| a.noun == noun))
            .cloned()
            .collect()
    }

    /// Entity kinds in the log, in order of first appearance.
    pub fn nouns(&self) -> Vec<&'static str> {
        let mut nouns = Vec::new();
        for activity in &self.entries {
            if !nouns.contains(&activity.noun) {
                nouns.push(activity.noun);
            }
        }
        nouns
    }

    /// Rejected or failed requests, for one entity kind or all of them.
    pub fn failures(&self, noun: Option<&str>) -> usize {
        self.entries
            .iter()
            .filter(|a| noun.is_none_or(|noun| a.noun == noun))
            .filter(|a| a.is_failure())
            .count()
    }
}

pub fn use_activity_log() -> Signal<ActivityLog> {
    use_context::<Signal<ActivityLog>>()
}

/// Append to the log and emit the matching `tracing` event.
pub fn record_activity(log: &mut Signal<ActivityLog>, activity: Activity) {
    let summary = activity.summary();
    match activity.severity() {
        Severity::Done => tracing::info!(noun = activity.noun, "{}", summary),
        Severity::Rejected => tracing::warn!(noun = activity.noun, "{}", summary),
        Severity::Failed => tracing::error!(noun = activity.noun, "{}", summary),
    }
    log.write().record(activity);
}

#[cfg(target_arch = "wasm32")]
fn current_time() -> String {
    let date = js_sys::Date::new_0();
    let h = date.get_hours();
    let m = date.get_minutes();
    let s = date.get_seconds();
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(not(target_arch = "wasm32"))]
fn current_time() -> String {
    "00:00:00".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::FieldErrors;

    fn rejected_username() -> ApiError {
        ApiError::ValidationFailed(FieldErrors::from([(
            "username".to_string(),
            "already taken".to_string(),
        )]))
    }

    #[test]
    fn test_summaries() {
        let created = Activity::new("phone", Operation::Create, Ok(Affected::One(12)));
        assert_eq!(created.summary(), "Created phone #12");
        assert_eq!(created.severity(), Severity::Done);

        let bulk = Activity::new("user", Operation::BulkCreate, Ok(Affected::Many(3)));
        assert_eq!(bulk.summary(), "Bulk created 3 users");

        let rejected = Activity::new("user", Operation::Create, Err(rejected_username()));
        assert_eq!(rejected.summary(), "Could not create user: username: already taken");
        assert_eq!(rejected.severity(), Severity::Rejected);
        assert_eq!(
            rejected.field_errors(),
            vec![("username".to_string(), "already taken".to_string())]
        );

        let gone = Activity::new(
            "order",
            Operation::Delete,
            Err(ApiError::NotFound("Order not found".to_string())),
        );
        assert_eq!(gone.severity(), Severity::Failed);
        assert!(gone.field_errors().is_empty());
    }

    #[test]
    fn test_focus_and_failure_counts() {
        let mut log = ActivityLog::default();
        log.record(Activity::new("phone", Operation::Update, Ok(Affected::One(1))));
        log.record(Activity::new("user", Operation::Create, Err(rejected_username())));
        log.record(Activity::new(
            "phone",
            Operation::Delete,
            Err(ApiError::RequestFailed("offline".to_string())),
        ));

        assert_eq!(log.nouns(), vec!["phone", "user"]);
        assert_eq!(log.failures(None), 2);
        assert_eq!(log.failures(Some("phone")), 1);
        assert_eq!(log.shown().len(), 3);
        assert_eq!(log.shown()[0].operation, Operation::Delete);

        log.focus = Some("user");
        assert_eq!(log.shown().len(), 1);

        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.focus, None);
    }

    #[test]
    fn test_record_caps_entries() {
        let mut log = ActivityLog::default();
        for id in 0..(MAX_ENTRIES + 5) as Id {
            log.record(Activity::new("phone", Operation::Create, Ok(Affected::One(id))));
        }
        assert_eq!(log.len(), MAX_ENTRIES);
        assert_eq!(log.shown().last().map(|a| a.summary()), Some("Created phone #5".to_string()));
    }
}
