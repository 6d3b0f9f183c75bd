//! Record Gateway
//!
//! Translates typed domain calls into stored-procedure invocations through a
//! [`CatequizandoStore`], validating records before any database call and
//! classifying outcomes into the crate error taxonomy. The gateway never
//! touches the console; its contract is typed-record-in, result-out.
//!
//! Validation failures return before the store is reached, so an invalid
//! record makes zero database calls.

use tracing::{debug, instrument};

use crate::error::Result;
use crate::record::{Catequizando, CatequizandoRecord};
use crate::store::CatequizandoStore;

/// Result of a mutating call, distinguishing "no matching row"
///
/// Zero affected rows is an outcome, not an error: update/delete on a missing
/// id complete normally and report `NotFound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// At least one row was affected
    Applied,
    /// No row matched the given id
    NotFound,
}

impl WriteOutcome {
    #[must_use]
    pub fn from_affected(rows: u64) -> Self {
        if rows == 0 {
            Self::NotFound
        } else {
            Self::Applied
        }
    }
}

/// The five-operation CRUD façade over the stored-procedure contract
pub struct RecordGateway<S> {
    store: S,
}

impl<S: CatequizandoStore> RecordGateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate and insert; returns the database-assigned id
    #[instrument(skip(self, record), fields(documento_id = %record.documento_id))]
    pub async fn insert(&mut self, record: &CatequizandoRecord) -> Result<i64> {
        record.validar()?;
        let id = self.store.insert(record).await?;
        debug!(id, "catequizando inserted");
        Ok(id)
    }

    /// Fetch one record; `None` is the not-found outcome, never an error
    #[instrument(skip(self))]
    pub async fn get_by_id(&mut self, id: i64) -> Result<Option<Catequizando>> {
        self.store.get_by_id(id).await
    }

    /// Fetch every record, in whatever order the procedure returns
    #[instrument(skip(self))]
    pub async fn get_all(&mut self) -> Result<Vec<Catequizando>> {
        let registros = self.store.get_all().await?;
        debug!(count = registros.len(), "catequizandos listed");
        Ok(registros)
    }

    /// Validate and update with full-replace semantics (all 12 fields re-sent)
    #[instrument(skip(self, record), fields(documento_id = %record.documento_id))]
    pub async fn update(&mut self, id: i64, record: &CatequizandoRecord) -> Result<WriteOutcome> {
        record.validar()?;
        let rows = self.store.update(id, record).await?;
        debug!(rows, "catequizando updated");
        Ok(WriteOutcome::from_affected(rows))
    }

    /// Delete by id
    #[instrument(skip(self))]
    pub async fn delete(&mut self, id: i64) -> Result<WriteOutcome> {
        let rows = self.store.delete(id).await?;
        debug!(rows, "catequizando deleted");
        Ok(WriteOutcome::from_affected(rows))
    }

    /// Release the underlying connection
    pub async fn close(self) -> Result<()> {
        self.store.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CatequesisError, ValidationError};

    /// Counting fake: records how often each operation reaches the store
    #[derive(Default)]
    struct FakeStore {
        insert_calls: usize,
        update_calls: usize,
        delete_calls: usize,
        duplicate: bool,
        affected_rows: u64,
    }

    impl CatequizandoStore for FakeStore {
        async fn insert(&mut self, record: &CatequizandoRecord) -> Result<i64> {
            self.insert_calls += 1;
            if self.duplicate {
                Err(CatequesisError::duplicate_documento(&record.documento_id))
            } else {
                Ok(42)
            }
        }

        async fn get_by_id(&mut self, _id: i64) -> Result<Option<Catequizando>> {
            Ok(None)
        }

        async fn get_all(&mut self) -> Result<Vec<Catequizando>> {
            Ok(vec![])
        }

        async fn update(&mut self, _id: i64, _record: &CatequizandoRecord) -> Result<u64> {
            self.update_calls += 1;
            Ok(self.affected_rows)
        }

        async fn delete(&mut self, _id: i64) -> Result<u64> {
            self.delete_calls += 1;
            Ok(self.affected_rows)
        }

        async fn close(self) -> Result<()> {
            Ok(())
        }
    }

    fn valido() -> CatequizandoRecord {
        CatequizandoRecord::basico("0912345678", "Ana", "Ruiz", "2010-05-01")
    }

    #[tokio::test]
    async fn test_insert_returns_generated_id() {
        let mut gateway = RecordGateway::new(FakeStore::default());
        let id = gateway.insert(&valido()).await.unwrap();
        assert_eq!(id, 42);
        assert_eq!(gateway.store.insert_calls, 1);
    }

    #[tokio::test]
    async fn test_insert_blank_documento_makes_no_store_call() {
        let mut gateway = RecordGateway::new(FakeStore::default());
        let record = CatequizandoRecord::basico("   ", "Ana", "Ruiz", "2010-05-01");

        let err = gateway.insert(&record).await.unwrap_err();
        assert!(matches!(
            err,
            CatequesisError::Validation(ValidationError::DocumentoVacio)
        ));
        assert_eq!(gateway.store.insert_calls, 0);
    }

    #[tokio::test]
    async fn test_insert_bad_email_makes_no_store_call() {
        let mut gateway = RecordGateway::new(FakeStore::default());
        let mut record = valido();
        record.email = Some("bad-email".into());

        let err = gateway.insert(&record).await.unwrap_err();
        assert!(matches!(
            err,
            CatequesisError::Validation(ValidationError::EmailInvalido(_))
        ));
        assert_eq!(gateway.store.insert_calls, 0);
    }

    #[tokio::test]
    async fn test_insert_bad_fecha_makes_no_store_call() {
        let mut gateway = RecordGateway::new(FakeStore::default());
        let record = CatequizandoRecord::basico("123", "Ana", "Ruiz", "2010-02-30");

        let err = gateway.insert(&record).await.unwrap_err();
        assert!(matches!(
            err,
            CatequesisError::Validation(ValidationError::FechaInvalida(_))
        ));
        assert_eq!(gateway.store.insert_calls, 0);
    }

    #[tokio::test]
    async fn test_insert_duplicate_surfaces_distinguished_error() {
        let mut gateway = RecordGateway::new(FakeStore { duplicate: true, ..Default::default() });

        let err = gateway.insert(&valido()).await.unwrap_err();
        assert!(matches!(err, CatequesisError::DuplicateDocumento(d) if d == "0912345678"));
        assert_eq!(gateway.store.insert_calls, 1);
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_none_not_error() {
        let mut gateway = RecordGateway::new(FakeStore::default());
        assert_eq!(gateway.get_by_id(99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_all_empty_table() {
        let mut gateway = RecordGateway::new(FakeStore::default());
        assert!(gateway.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_validates_before_store() {
        let mut gateway = RecordGateway::new(FakeStore::default());
        let record = CatequizandoRecord::basico("", "Ana", "Ruiz", "2010-05-01");

        assert!(gateway.update(1, &record).await.is_err());
        assert_eq!(gateway.store.update_calls, 0);
    }

    #[tokio::test]
    async fn test_update_zero_rows_is_not_found() {
        let mut gateway = RecordGateway::new(FakeStore::default());
        assert_eq!(gateway.update(99, &valido()).await.unwrap(), WriteOutcome::NotFound);

        let mut gateway = RecordGateway::new(FakeStore { affected_rows: 1, ..Default::default() });
        assert_eq!(gateway.update(1, &valido()).await.unwrap(), WriteOutcome::Applied);
    }

    #[tokio::test]
    async fn test_delete_zero_rows_is_not_found() {
        let mut gateway = RecordGateway::new(FakeStore::default());
        assert_eq!(gateway.delete(99).await.unwrap(), WriteOutcome::NotFound);
        assert_eq!(gateway.store.delete_calls, 1);
    }

    #[test]
    fn test_write_outcome_from_affected() {
        assert_eq!(WriteOutcome::from_affected(0), WriteOutcome::NotFound);
        assert_eq!(WriteOutcome::from_affected(1), WriteOutcome::Applied);
        assert_eq!(WriteOutcome::from_affected(3), WriteOutcome::Applied);
    }
}
