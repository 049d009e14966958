pub mod bulk;
pub mod collection;
pub mod config;
pub mod filter;
pub mod form;
pub mod models;
pub mod paginator;
pub mod schema;

pub use bulk::{BulkCreate, BulkError, BulkPhase};
pub use collection::CollectionStore;
pub use config::ConsoleConfig;
pub use filter::{Filter, OrderFilter, PhoneFilter, UserFilter};
pub use form::{
    FieldErrors, FieldKind, FieldSpec, FieldValue, FieldValues, FormError, FormFailure, FormMode,
    FormState, Schema, Submission,
};
pub use models::{Id, Identified, Order, OrderDraft, Phone, PhoneDraft, User, UserDraft};
pub use paginator::{PageSize, Paginator};
pub use schema::{OrderSchema, PhoneSchema, UserSchema};
