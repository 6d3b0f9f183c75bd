//! Store Trait and Implementations
//!
//! The store is the seam between the Record Gateway and the database: one
//! method per stored procedure, typed records in, typed rows out. The
//! production implementation speaks to MySQL; tests substitute an in-memory
//! fake.
//!
//! # Stateful Design
//! Unlike a per-call connect/close scheme, methods take `&mut self` on a
//! connection held for the process lifetime. There is exactly one connection,
//! no pooling, and no retry; each mutating call auto-commits its single
//! statement.

use std::future::Future;

use crate::error::Result;
use crate::record::{Catequizando, CatequizandoRecord};

pub mod mysql;

/// One method per stored procedure of the catequizando contract
///
/// Implementations map driver-level failures into the crate error taxonomy;
/// in particular a uniqueness violation on insert must surface as
/// [`CatequesisError::DuplicateDocumento`](crate::error::CatequesisError).
pub trait CatequizandoStore {
    /// Invoke the insert procedure; returns the database-assigned id
    fn insert(&mut self, record: &CatequizandoRecord) -> impl Future<Output = Result<i64>> + Send;

    /// Invoke the get-by-id procedure; `None` when no row matches
    fn get_by_id(&mut self, id: i64) -> impl Future<Output = Result<Option<Catequizando>>> + Send;

    /// Invoke the get-all procedure; row order is whatever the procedure returns
    fn get_all(&mut self) -> impl Future<Output = Result<Vec<Catequizando>>> + Send;

    /// Invoke the update procedure (full replace); returns affected rows
    fn update(
        &mut self,
        id: i64,
        record: &CatequizandoRecord,
    ) -> impl Future<Output = Result<u64>> + Send;

    /// Invoke the delete procedure; returns affected rows
    fn delete(&mut self, id: i64) -> impl Future<Output = Result<u64>> + Send;

    /// Release the underlying connection
    fn close(self) -> impl Future<Output = Result<()>> + Send
    where
        Self: Sized;
}
