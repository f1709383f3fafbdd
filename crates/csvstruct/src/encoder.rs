use crate::{
    config::EncoderConfig,
    errors::EncodeResult,
    record::Record,
    schema::ColumnSchema,
    ser::to_record,
};
use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;
use tracing::{debug, trace, warn};

/// Writes records as CSV rows, taking the header from the first record
pub struct Encoder<W: Write> {
    output: W,
    builder: WriterBuilder,
    config: EncoderConfig,
    schema: Option<ColumnSchema>,
}

impl<W: Write> Encoder<W> {
    /// Create an encoder with default configuration
    pub fn new(output: W) -> Self {
        Self::with_config(output, EncoderConfig::default())
    }

    /// Create an encoder with custom configuration
    pub fn with_config(output: W, config: EncoderConfig) -> Self {
        Self {
            output,
            builder: config.writer_builder(),
            config,
            schema: None,
        }
    }

    /// Header columns, once the first record has locked them
    pub fn columns(&self) -> Option<&[String]> {
        self.schema.as_ref().map(ColumnSchema::columns)
    }

    /// Encode `value` as the next row.
    ///
    /// On the first call the value's fields become the header row, then its
    /// values are written as the first data row. `None` writes nothing.
    pub fn encode_next<T: Serialize + ?Sized>(&mut self, value: &T) -> EncodeResult<()> {
        match to_record(value)? {
            Some(record) => self.encode_record(&record),
            None => Ok(()),
        }
    }

    /// Encode an already captured record as the next row.
    ///
    /// The bytes of one call reach the output in a single write. If that write
    /// fails they are dropped, so a failed call never shows up in the output
    /// of a later one.
    pub fn encode_record(&mut self, record: &Record) -> EncodeResult<()> {
        let (schema, locking) = match self.schema.take() {
            Some(schema) => (schema, false),
            None => (ColumnSchema::lock(record), true),
        };

        if schema.is_empty() {
            if locking {
                warn!("First record has no encodable fields, all output will be empty");
            }
            self.schema = Some(schema);
            return Ok(());
        }

        if locking {
            debug!("Locked {} columns: {:?}", schema.width(), schema.columns());
        }

        let outcome = self
            .stage(&schema, locking, record)
            .and_then(|(bytes, projected)| {
                self.commit(&bytes)?;
                Ok(projected)
            });

        match outcome {
            Ok(projected) => {
                // The header is out, so the columns are final.
                self.schema = Some(schema);
                if !projected? {
                    trace!("Record shares no columns with the header, skipping");
                }
                Ok(())
            }
            Err(e) => {
                // A header that never reached the output is locked again next call.
                if !locking {
                    self.schema = Some(schema);
                }
                Err(e)
            }
        }
    }

    /// Render the header (when locking) and the row for `record`.
    ///
    /// A conversion failure does not discard the header; it is reported in
    /// the second element, which otherwise says whether a row was rendered.
    fn stage(
        &self,
        schema: &ColumnSchema,
        locking: bool,
        record: &Record,
    ) -> EncodeResult<(Vec<u8>, EncodeResult<bool>)> {
        let mut staged = self.builder.from_writer(Vec::new());

        if locking && !self.config.skip_header {
            staged.write_record(schema.columns())?;
        }

        let projected = project(schema, record);
        if let Ok(Some(row)) = &projected {
            staged.write_record(row)?;
        }

        let bytes = staged.into_inner().map_err(|e| e.into_error())?;
        Ok((bytes, projected.map(|row| row.is_some())))
    }

    fn commit(&mut self, bytes: &[u8]) -> EncodeResult<()> {
        if bytes.is_empty() {
            return Ok(());
        }
        self.output.write_all(bytes)?;
        self.output.flush()?;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.output
    }

    /// Flush and return the underlying output
    pub fn into_inner(mut self) -> EncodeResult<W> {
        self.output.flush()?;
        Ok(self.output)
    }
}

/// Place the values of `record` at their column positions.
///
/// Returns `None` when no field of the record maps to a column.
fn project(schema: &ColumnSchema, record: &Record) -> EncodeResult<Option<Vec<String>>> {
    let mut row = vec![String::new(); schema.width()];
    let mut has_content = false;

    for (name, value) in record.entries() {
        let Some(position) = schema.position(name) else {
            continue;
        };
        row[position] = value.to_cell(name)?;
        has_content = true;
    }

    Ok(has_content.then_some(row))
}
