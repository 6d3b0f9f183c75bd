//! MySQL-Backed Store
//!
//! Implements [`CatequizandoStore`] over a single held `mysql_async`
//! connection. Every data operation is one `CALL` to a stored procedure in
//! the `academico` schema; this module never composes SQL beyond those calls.
//!
//! # Implementation Notes
//! - Positional parameters are built as `Vec<Value>` (the update call carries
//!   13 parameters, beyond what parameter tuples cover)
//! - The generated id of an insert is read back with `SELECT LAST_INSERT_ID()`
//!   on the same connection
//! - `affected_rows()` after update/delete reflects the procedure's last
//!   statement; the contract assumes single-statement procedures
//! - DATE columns come back as native values and are rendered `YYYY-MM-DD`
//! - MySQL error 1062 (duplicate key) on insert is surfaced as the
//!   distinguished duplicate-documento error

use mysql_async::{prelude::*, Conn, OptsBuilder, Row, Value};

use crate::config::DbConfig;
use crate::error::{CatequesisError, Result};
use crate::record::{Catequizando, CatequizandoRecord};
use crate::store::CatequizandoStore;

/// MySQL `ER_DUP_ENTRY`: a unique constraint was violated
const ER_DUP_ENTRY: u16 = 1062;

const SP_INSERT: &str =
    "CALL academico.SP_Catequizando_Insert(?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";
const SP_GET_BY_ID: &str = "CALL academico.SP_Catequizando_GetById(?)";
const SP_GET_ALL: &str = "CALL academico.SP_Catequizando_GetAll()";
const SP_UPDATE: &str =
    "CALL academico.SP_Catequizando_Update(?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";
const SP_DELETE: &str = "CALL academico.SP_Catequizando_Delete(?)";

/// Store implementation holding one live MySQL connection
pub struct MySqlStore {
    conn: Conn,
}

impl MySqlStore {
    /// Open the connection described by the config
    ///
    /// This is the process's single connection attempt; there is no retry.
    pub async fn connect(config: &DbConfig) -> Result<Self> {
        let opts = OptsBuilder::default()
            .ip_or_hostname(&config.server)
            .tcp_port(config.port)
            .user(Some(&config.user))
            .pass(Some(&config.password))
            .db_name(Some(&config.database));

        let conn = Conn::new(opts).await.map_err(|e| {
            CatequesisError::connection_failed(format!("could not connect to MySQL: {e}"))
        })?;

        Ok(Self { conn })
    }
}

impl CatequizandoStore for MySqlStore {
    async fn insert(&mut self, record: &CatequizandoRecord) -> Result<i64> {
        if let Err(err) = self.conn.exec_drop(SP_INSERT, record_params(record)).await {
            return Err(classify_insert_error(&err, &record.documento_id));
        }

        let row: Option<Row> = self
            .conn
            .exec_first("SELECT LAST_INSERT_ID()", ())
            .await
            .map_err(|e| db_error("failed to read generated id", &e))?;

        match row.and_then(|r| r.get::<u64, _>(0)) {
            Some(id) if id > 0 => Ok(id as i64),
            _ => Err(CatequesisError::unexpected("insert did not yield a generated id")),
        }
    }

    async fn get_by_id(&mut self, id: i64) -> Result<Option<Catequizando>> {
        let row: Option<Row> = self
            .conn
            .exec_first(SP_GET_BY_ID, (id,))
            .await
            .map_err(|e| db_error("failed to fetch catequizando by id", &e))?;

        row.map(|r| row_to_catequizando(&r)).transpose()
    }

    async fn get_all(&mut self) -> Result<Vec<Catequizando>> {
        let rows: Vec<Row> = self
            .conn
            .exec(SP_GET_ALL, ())
            .await
            .map_err(|e| db_error("failed to list catequizandos", &e))?;

        rows.iter().map(row_to_catequizando).collect()
    }

    async fn update(&mut self, id: i64, record: &CatequizandoRecord) -> Result<u64> {
        let mut params = vec![Value::from(id)];
        params.extend(record_params(record));

        self.conn
            .exec_drop(SP_UPDATE, params)
            .await
            .map_err(|e| db_error("failed to update catequizando", &e))?;

        Ok(self.conn.affected_rows())
    }

    async fn delete(&mut self, id: i64) -> Result<u64> {
        self.conn
            .exec_drop(SP_DELETE, (id,))
            .await
            .map_err(|e| db_error("failed to delete catequizando", &e))?;

        Ok(self.conn.affected_rows())
    }

    async fn close(self) -> Result<()> {
        self.conn
            .disconnect()
            .await
            .map_err(|e| db_error("failed to disconnect", &e))
    }
}

/// Build the 12 positional procedure parameters, in contract order
fn record_params(record: &CatequizandoRecord) -> Vec<Value> {
    vec![
        Value::from(record.documento_id.as_str()),
        Value::from(record.nombres.as_str()),
        Value::from(record.apellidos.as_str()),
        Value::from(record.fecha_nacimiento.as_str()),
        Value::from(record.telefono.as_deref()),
        Value::from(record.email.as_deref()),
        Value::from(record.direccion.as_deref()),
        Value::from(record.representante_nombre.as_deref()),
        Value::from(record.representante_email.as_deref()),
        Value::from(record.representante_telefono.as_deref()),
        Value::from(record.bautizo_fecha.as_deref()),
        Value::from(record.padrinos.as_deref()),
    ]
}

fn classify_insert_error(err: &mysql_async::Error, documento_id: &str) -> CatequesisError {
    match err {
        mysql_async::Error::Server(server) if server.code == ER_DUP_ENTRY => {
            CatequesisError::duplicate_documento(documento_id)
        }
        _ => db_error("failed to insert catequizando", err),
    }
}

fn db_error(context: &str, err: &mysql_async::Error) -> CatequesisError {
    CatequesisError::database(format!("{context}: {err}"))
}

/// Map a procedure result row onto the domain entity by column name
///
/// Unknown columns are ignored so the procedures may project extras.
fn row_to_catequizando(row: &Row) -> Result<Catequizando> {
    let mut id = None;
    let mut record = CatequizandoRecord::default();

    for (idx, column) in row.columns_ref().iter().enumerate() {
        let value = row.as_ref(idx).ok_or_else(|| {
            CatequesisError::unexpected(format!("missing value at column index {idx}"))
        })?;

        match column.name_str().as_ref() {
            "id" => id = value_to_id(value),
            "documento_id" => record.documento_id = value_to_text(value).unwrap_or_default(),
            "nombres" => record.nombres = value_to_text(value).unwrap_or_default(),
            "apellidos" => record.apellidos = value_to_text(value).unwrap_or_default(),
            "fecha_nacimiento" => {
                record.fecha_nacimiento = value_to_text(value).unwrap_or_default();
            }
            "telefono" => record.telefono = value_to_text(value),
            "email" => record.email = value_to_text(value),
            "direccion" => record.direccion = value_to_text(value),
            "representante_nombre" => record.representante_nombre = value_to_text(value),
            "representante_email" => record.representante_email = value_to_text(value),
            "representante_telefono" => record.representante_telefono = value_to_text(value),
            "bautizo_fecha" => record.bautizo_fecha = value_to_text(value),
            "padrinos" => record.padrinos = value_to_text(value),
            _ => {}
        }
    }

    let id =
        id.ok_or_else(|| CatequesisError::unexpected("result row has no usable id column"))?;

    Ok(Catequizando { id, record })
}

/// Render a MySQL value as display text; `None` for SQL NULL
///
/// Pure DATE values render `YYYY-MM-DD`; values with a time part keep it.
fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::NULL => None,
        Value::Bytes(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
        Value::Int(i) => Some(i.to_string()),
        Value::UInt(u) => Some(u.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::Double(d) => Some(d.to_string()),
        Value::Date(year, month, day, hour, minute, second, micro) => {
            if *hour == 0 && *minute == 0 && *second == 0 && *micro == 0 {
                Some(format!("{year:04}-{month:02}-{day:02}"))
            } else {
                Some(format!(
                    "{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}"
                ))
            }
        }
        Value::Time(negative, days, hours, minutes, seconds, _micro) => {
            let sign = if *negative { "-" } else { "" };
            let total_hours = u32::from(*hours) + days * 24;
            Some(format!("{sign}{total_hours}:{minutes:02}:{seconds:02}"))
        }
    }
}

fn value_to_id(value: &Value) -> Option<i64> {
    match value {
        Value::Int(i) => Some(*i),
        Value::UInt(u) => i64::try_from(*u).ok(),
        // Text-protocol results deliver numbers as bytes
        Value::Bytes(bytes) => std::str::from_utf8(bytes).ok()?.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_placeholder_counts_match_contract() {
        assert_eq!(SP_INSERT.matches('?').count(), 12);
        assert_eq!(SP_GET_BY_ID.matches('?').count(), 1);
        assert_eq!(SP_GET_ALL.matches('?').count(), 0);
        assert_eq!(SP_UPDATE.matches('?').count(), 13);
        assert_eq!(SP_DELETE.matches('?').count(), 1);
    }

    #[test]
    fn test_record_params_order_and_nulls() {
        let mut record = CatequizandoRecord::basico("123", "Ana", "Ruiz", "2010-05-01");
        record.email = Some("ana@dominio.ec".into());

        let params = record_params(&record);
        assert_eq!(params.len(), 12);
        assert_eq!(params[0], Value::from("123"));
        assert_eq!(params[1], Value::from("Ana"));
        assert_eq!(params[2], Value::from("Ruiz"));
        assert_eq!(params[3], Value::from("2010-05-01"));
        assert_eq!(params[4], Value::NULL); // telefono unset
        assert_eq!(params[5], Value::from("ana@dominio.ec"));
        assert_eq!(params[11], Value::NULL); // padrinos unset
    }

    #[test]
    fn test_classify_duplicate_entry() {
        let err = mysql_async::Error::Server(mysql_async::ServerError {
            code: ER_DUP_ENTRY,
            message: "Duplicate entry '123' for key 'documento_id'".into(),
            state: "23000".into(),
        });

        let classified = classify_insert_error(&err, "123");
        assert!(matches!(classified, CatequesisError::DuplicateDocumento(d) if d == "123"));
    }

    #[test]
    fn test_classify_other_server_error() {
        let err = mysql_async::Error::Server(mysql_async::ServerError {
            code: 1305, // PROCEDURE does not exist
            message: "PROCEDURE academico.SP_Catequizando_Insert does not exist".into(),
            state: "42000".into(),
        });

        let classified = classify_insert_error(&err, "123");
        assert_eq!(classified.error_code(), "DATABASE_ERROR");
        assert!(classified.message().contains("does not exist"));
    }

    #[test]
    fn test_value_to_text_date_rendering() {
        let date = Value::Date(2010, 5, 1, 0, 0, 0, 0);
        assert_eq!(value_to_text(&date), Some("2010-05-01".to_string()));

        let datetime = Value::Date(2010, 5, 1, 13, 45, 9, 0);
        assert_eq!(value_to_text(&datetime), Some("2010-05-01T13:45:09".to_string()));
    }

    #[test]
    fn test_value_to_text_null_and_bytes() {
        assert_eq!(value_to_text(&Value::NULL), None);
        assert_eq!(
            value_to_text(&Value::Bytes(b"Quito".to_vec())),
            Some("Quito".to_string())
        );
        assert_eq!(value_to_text(&Value::Int(-3)), Some("-3".to_string()));
    }

    #[test]
    fn test_value_to_id_variants() {
        assert_eq!(value_to_id(&Value::Int(17)), Some(17));
        assert_eq!(value_to_id(&Value::UInt(17)), Some(17));
        assert_eq!(value_to_id(&Value::Bytes(b"17".to_vec())), Some(17));
        assert_eq!(value_to_id(&Value::Bytes(b"x".to_vec())), None);
        assert_eq!(value_to_id(&Value::NULL), None);
    }

    // Live-server tests; run against a MySQL instance that carries the
    // academico schema with:
    //   cargo test -- --ignored

    #[tokio::test]
    #[ignore] // Requires a running MySQL instance
    async fn test_connect_live() {
        let config = DbConfig {
            server: "localhost".to_string(),
            database: "academico".to_string(),
            user: "root".to_string(),
            password: "password".to_string(),
            port: 3306,
        };

        let store = MySqlStore::connect(&config).await;
        assert!(store.is_ok(), "connection failed: {:?}", store.err().map(|e| e.message()));
        store.unwrap().close().await.unwrap();
    }
}
