//! Interactive Menu Loop
//!
//! The input-adapter layer: a numbered console menu that collects free-text
//! input, coerces it into typed values, and dispatches into the
//! [`RecordGateway`]. All parsing lives here; the gateway never sees raw
//! console text.
//!
//! The loop is single-threaded and blocking: reading a line blocks the loop,
//! and an in-flight database call cannot be interrupted. Every outcome —
//! success or any error kind — is rendered as its own message by matching on
//! the error variant; nothing is string-matched and nothing terminates the
//! loop except option 6 (or end of input).
//!
//! User-facing text is Spanish, matching the parish console this tool serves.

use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::error::{CatequesisError, ValidationError};
use crate::gateway::{RecordGateway, WriteOutcome};
use crate::record::{Catequizando, CatequizandoRecord};
use crate::store::CatequizandoStore;

/// Console menu bound to a reader, a writer and a gateway
///
/// Generic over `BufRead`/`Write` so tests can script a whole session.
pub struct Menu<R, W, S> {
    reader: R,
    writer: W,
    gateway: RecordGateway<S>,
}

impl<R: BufRead, W: Write, S: CatequizandoStore> Menu<R, W, S> {
    pub fn new(reader: R, writer: W, gateway: RecordGateway<S>) -> Self {
        Self { reader, writer, gateway }
    }

    /// Recover the gateway, e.g. to close the connection after the loop ends
    pub fn into_gateway(self) -> RecordGateway<S> {
        self.gateway
    }

    /// Run the loop until "6" (exit) or end of input
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            self.write_menu()?;
            let Some(opcion) = self.prompt("Seleccione una opción: ")? else {
                break;
            };

            match opcion.trim() {
                "1" => self.insertar().await?,
                "2" => self.consultar_por_id().await?,
                "3" => self.listar_todos().await?,
                "4" => self.actualizar().await?,
                "5" => self.eliminar().await?,
                "6" => {
                    writeln!(self.writer, "Saliendo del sistema...")?;
                    break;
                }
                _ => writeln!(self.writer, "Opción inválida. Intente nuevamente.")?,
            }
        }
        Ok(())
    }

    fn write_menu(&mut self) -> io::Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "\t** SISTEMA DE CATEQUIZANDOS **")?;
        writeln!(self.writer, "\t1. Crear registro (Insertar)")?;
        writeln!(self.writer, "\t2. Consultar por ID")?;
        writeln!(self.writer, "\t3. Listar todos")?;
        writeln!(self.writer, "\t4. Actualizar registro")?;
        writeln!(self.writer, "\t5. Eliminar registro")?;
        writeln!(self.writer, "\t6. Salir")
    }

    /// Read one line after a label; `None` on end of input
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.writer, "{label}")?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Read an integer id; reports the format error and yields `None` so the
    /// caller falls through to the next loop iteration (no inline retry)
    fn prompt_id(&mut self, label: &str) -> io::Result<Option<i64>> {
        let Some(line) = self.prompt(label)? else {
            return Ok(None);
        };

        match line.trim().parse::<i64>() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                let err =
                    CatequesisError::invalid_input(format!("'{}' is not an integer id", line.trim()));
                self.report_error("leer el ID", &err)?;
                Ok(None)
            }
        }
    }

    /// Collect the four mandatory fields; optional fields stay unset
    fn prompt_datos_basicos(
        &mut self,
        etiquetas: [&str; 4],
    ) -> io::Result<Option<CatequizandoRecord>> {
        let Some(documento) = self.prompt(etiquetas[0])? else { return Ok(None) };
        let Some(nombres) = self.prompt(etiquetas[1])? else { return Ok(None) };
        let Some(apellidos) = self.prompt(etiquetas[2])? else { return Ok(None) };
        let Some(fecha) = self.prompt(etiquetas[3])? else { return Ok(None) };

        Ok(Some(CatequizandoRecord::basico(documento, nombres, apellidos, fecha)))
    }

    async fn insertar(&mut self) -> io::Result<()> {
        writeln!(self.writer, "\n--- INGRESO DE NUEVO CATEQUIZANDO ---")?;
        let Some(record) = self.prompt_datos_basicos([
            "Documento ID: ",
            "Nombres: ",
            "Apellidos: ",
            "Fecha de nacimiento (YYYY-MM-DD): ",
        ])?
        else {
            return Ok(());
        };

        match self.gateway.insert(&record).await {
            Ok(id) => {
                writeln!(self.writer, "Registro insertado correctamente (ID asignado: {id}).")?;
            }
            Err(err) => self.report_error("insertar", &err)?,
        }
        Ok(())
    }

    async fn consultar_por_id(&mut self) -> io::Result<()> {
        let Some(id) = self.prompt_id("Ingrese el ID del catequizando a consultar: ")? else {
            return Ok(());
        };

        match self.gateway.get_by_id(id).await {
            Ok(Some(catequizando)) => {
                writeln!(self.writer, "\nRegistro encontrado:")?;
                self.write_catequizando(&catequizando)?;
            }
            Ok(None) => {
                writeln!(self.writer, "No se encontró ningún catequizando con ese ID.")?;
            }
            Err(err) => self.report_error("consultar", &err)?,
        }
        Ok(())
    }

    async fn listar_todos(&mut self) -> io::Result<()> {
        match self.gateway.get_all().await {
            Ok(registros) => {
                writeln!(self.writer, "\nLISTADO DE CATEQUIZANDOS:")?;
                if registros.is_empty() {
                    writeln!(self.writer, "No hay registros para mostrar.")?;
                } else {
                    for catequizando in &registros {
                        self.write_catequizando(catequizando)?;
                    }
                }
            }
            Err(err) => self.report_error("listar", &err)?,
        }
        Ok(())
    }

    async fn actualizar(&mut self) -> io::Result<()> {
        writeln!(self.writer, "\n--- ACTUALIZACIÓN DE CATEQUIZANDO (solo datos básicos) ---")?;
        let Some(id) = self.prompt_id("Ingrese el ID del catequizando a actualizar: ")? else {
            return Ok(());
        };
        let Some(record) = self.prompt_datos_basicos([
            "Nuevo Documento ID: ",
            "Nuevos Nombres: ",
            "Nuevos Apellidos: ",
            "Nueva Fecha de nacimiento (YYYY-MM-DD): ",
        ])?
        else {
            return Ok(());
        };

        match self.gateway.update(id, &record).await {
            Ok(WriteOutcome::Applied) => {
                writeln!(self.writer, "Registro actualizado correctamente.")?;
            }
            Ok(WriteOutcome::NotFound) => {
                writeln!(self.writer, "No existe un catequizando con el ID {id}.")?;
            }
            Err(err) => self.report_error("actualizar", &err)?,
        }
        Ok(())
    }

    async fn eliminar(&mut self) -> io::Result<()> {
        let Some(id) = self.prompt_id("Ingrese el ID del catequizando a eliminar: ")? else {
            return Ok(());
        };

        match self.gateway.delete(id).await {
            Ok(WriteOutcome::Applied) => {
                writeln!(self.writer, "Registro eliminado correctamente.")?;
            }
            Ok(WriteOutcome::NotFound) => {
                writeln!(self.writer, "No existe un catequizando con el ID {id}.")?;
            }
            Err(err) => self.report_error("eliminar", &err)?,
        }
        Ok(())
    }

    fn write_catequizando(&mut self, catequizando: &Catequizando) -> io::Result<()> {
        let r = &catequizando.record;
        writeln!(
            self.writer,
            "[{}] {} {} | documento: {} | nacimiento: {}",
            catequizando.id, r.nombres, r.apellidos, r.documento_id, r.fecha_nacimiento
        )?;

        let opcionales = [
            ("teléfono", &r.telefono),
            ("email", &r.email),
            ("dirección", &r.direccion),
            ("representante", &r.representante_nombre),
            ("email del representante", &r.representante_email),
            ("teléfono del representante", &r.representante_telefono),
            ("fecha de bautizo", &r.bautizo_fecha),
            ("padrinos", &r.padrinos),
        ];
        for (etiqueta, valor) in opcionales {
            if let Some(valor) = valor {
                writeln!(self.writer, "      {etiqueta}: {valor}")?;
            }
        }
        Ok(())
    }

    /// Render one distinct message per error kind
    fn report_error(&mut self, accion: &str, err: &CatequesisError) -> io::Result<()> {
        warn!(code = err.error_code(), "operation '{accion}' failed: {}", err.message());

        match err {
            CatequesisError::NoConnection => {
                writeln!(self.writer, "No hay conexión con la base de datos.")
            }
            CatequesisError::Validation(ValidationError::DocumentoVacio) => {
                writeln!(self.writer, "El documento de identidad no puede estar vacío.")
            }
            CatequesisError::Validation(ValidationError::FechaInvalida(fecha)) => {
                writeln!(self.writer, "Fecha inválida (se espera YYYY-MM-DD): {fecha}")
            }
            CatequesisError::Validation(ValidationError::EmailInvalido(email)) => {
                writeln!(self.writer, "Email inválido: {email}")
            }
            CatequesisError::DuplicateDocumento(documento) => {
                writeln!(self.writer, "Ya existe un catequizando con el documento {documento}.")
            }
            CatequesisError::InvalidInput(_) => {
                writeln!(self.writer, "El ID debe ser un número entero.")
            }
            otro => writeln!(self.writer, "Error al {accion}: {}", otro.message()),
        }
    }
}
