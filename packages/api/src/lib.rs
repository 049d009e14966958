//! # API crate: client for the catalog REST API
//!
//! Everything the console sends over the network goes through this crate.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`resource`] | The `/api/phones`, `/api/users` and `/api/orders` collections as [`Resource`] markers |
//! | [`transport`] | The [`Transport`] seam and its reqwest implementation, [`HttpTransport`] |
//! | [`gateway`] | [`Gateway`]: list, get, create, update, delete and bulk create with status mapping |
//! | [`error`] | [`ApiError`], the three ways a call can fail |

pub mod error;
pub mod gateway;
pub mod resource;
pub mod transport;

pub use error::ApiError;
pub use gateway::Gateway;
pub use resource::{Orders, Phones, Resource, Users};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};
