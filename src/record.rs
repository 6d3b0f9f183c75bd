//! Domain Entity and Validation
//!
//! A *catequizando* is a catechism student registered in the parish academic
//! schema. This module defines the record types exchanged with the stored
//! procedures and the client-side validation applied before any call.
//!
//! # Field Language
//! Field names are kept in Spanish because they are the stored-procedure
//! parameter names; the wire contract is positional, so struct field order
//! matches the procedure signature.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The 12 writable fields of a catequizando, in procedure-parameter order
///
/// Only `documento_id`, `fecha_nacimiento` and (when present) `email` are
/// validated here. `bautizo_fecha` and `representante_email` are deliberately
/// passed through unchecked; the database procedures own any further rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatequizandoRecord {
    /// Identity-document number; required, must be non-blank
    pub documento_id: String,

    /// Given names; required
    pub nombres: String,

    /// Family names; required
    pub apellidos: String,

    /// Birth date as `YYYY-MM-DD`; required, must be a real calendar date
    pub fecha_nacimiento: String,

    pub telefono: Option<String>,

    /// Contact email; when present must look like `local@domain.tld`
    pub email: Option<String>,

    pub direccion: Option<String>,

    pub representante_nombre: Option<String>,
    pub representante_email: Option<String>,
    pub representante_telefono: Option<String>,

    /// Baptism date; sent as-is, no format check
    pub bautizo_fecha: Option<String>,

    /// Sponsor names, unstructured
    pub padrinos: Option<String>,
}

impl CatequizandoRecord {
    /// Create a record carrying only the four mandatory fields
    ///
    /// This is what the console menu collects; every optional field is unset.
    #[must_use]
    pub fn basico(
        documento_id: impl Into<String>,
        nombres: impl Into<String>,
        apellidos: impl Into<String>,
        fecha_nacimiento: impl Into<String>,
    ) -> Self {
        Self {
            documento_id: documento_id.into(),
            nombres: nombres.into(),
            apellidos: apellidos.into(),
            fecha_nacimiento: fecha_nacimiento.into(),
            ..Self::default()
        }
    }

    /// Validate the record, returning the first failing field
    ///
    /// Checks documento_id, fecha_nacimiento, and email in that order.
    pub fn validar(&self) -> Result<(), ValidationError> {
        if !validar_documento(&self.documento_id) {
            return Err(ValidationError::DocumentoVacio);
        }
        if !validar_fecha(&self.fecha_nacimiento) {
            return Err(ValidationError::FechaInvalida(self.fecha_nacimiento.clone()));
        }
        if let Some(email) = &self.email {
            if !validar_email(email) {
                return Err(ValidationError::EmailInvalido(email.clone()));
            }
        }
        Ok(())
    }
}

/// A stored row: the database-assigned surrogate key plus the record fields
///
/// `id` is assigned on insert and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catequizando {
    pub id: i64,

    #[serde(flatten)]
    pub record: CatequizandoRecord,
}

/// True iff the documento is non-blank after trimming
#[must_use]
pub fn validar_documento(documento_id: &str) -> bool {
    !documento_id.trim().is_empty()
}

/// True iff the string is a real `YYYY-MM-DD` calendar date
///
/// The round-trip comparison rejects unpadded forms like `2010-5-1`.
#[must_use]
pub fn validar_fecha(fecha: &str) -> bool {
    NaiveDate::parse_from_str(fecha, "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string() == fecha)
        .unwrap_or(false)
}

/// True iff the string has the `local@domain.tld` shape
///
/// Both sides allow word characters, dots and hyphens; the domain must
/// contain at least one dot with non-empty labels.
#[must_use]
pub fn validar_email(email: &str) -> bool {
    let is_word = |s: &str, allow_dot: bool| {
        !s.is_empty()
            && s.chars().all(|c| {
                c.is_alphanumeric() || c == '_' || c == '-' || (allow_dot && c == '.')
            })
    };

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    is_word(local, true)
        && domain.contains('.')
        && domain.split('.').all(|label| is_word(label, false))
}
