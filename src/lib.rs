//! Catequesis - Console CRUD front-end for a parish catechism registry
//!
//! All data operations are delegated to stored procedures in the `academico`
//! schema; this crate is the thin, validated façade in front of them. Three
//! components, composed linearly:
//!
//! - **Connection Manager** ([`connection`]) - opens and holds the single
//!   database connection for the process lifetime; a failed startup attempt
//!   degrades the process instead of crashing it
//! - **Record Gateway** ([`gateway`]) - insert / get-by-id / get-all /
//!   update / delete, each validating locally and issuing exactly one
//!   stored-procedure call
//! - **Interactive Menu Loop** ([`menu`]) - numbered console menu collecting
//!   free-text input and dispatching typed records into the gateway
//!
//! Everything is synchronous in behavior: one connection, no pooling, no
//! retries, one request at a time. Errors are values ([`error`]) with
//! distinguished kinds; nothing propagates far enough to kill the menu loop.
//!
//! # Module Organization
//! - [`error`] - Error types and stable error codes
//! - [`config`] - Credentials file loading and resolution
//! - [`record`] - Domain entity and field validation
//! - [`store`] - Store trait and the MySQL implementation
//! - [`connection`] - Connection lifecycle and degraded mode
//! - [`gateway`] - Validated CRUD operations
//! - [`menu`] - Console input adapter and loop

pub mod config;
pub mod connection;
pub mod error;
pub mod gateway;
pub mod menu;
pub mod record;
pub mod store;

// Re-export commonly used types for convenience
pub use config::DbConfig;
pub use connection::ConnectionManager;
pub use error::{CatequesisError, Result, ValidationError};
pub use gateway::{RecordGateway, WriteOutcome};
pub use menu::Menu;
pub use record::{validar_documento, validar_email, validar_fecha, Catequizando, CatequizandoRecord};
pub use store::{mysql::MySqlStore, CatequizandoStore};
