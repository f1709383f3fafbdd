use csv::{Terminator, WriterBuilder};

/// Output options for an [`Encoder`](crate::Encoder)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Field delimiter byte
    pub comma: u8,

    /// Whether to suppress the header row entirely
    pub skip_header: bool,

    /// Whether to terminate every line with `\r\n` instead of `\n`
    pub use_crlf: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            comma: b',',
            skip_header: false,
            use_crlf: false,
        }
    }
}

impl EncoderConfig {
    /// Builder for the underlying row writer.
    ///
    /// Headers are always written by the encoder itself, so the csv writer
    /// never tries to infer them from serde.
    pub(crate) fn writer_builder(&self) -> WriterBuilder {
        let terminator = if self.use_crlf {
            Terminator::CRLF
        } else {
            Terminator::Any(b'\n')
        };

        let mut builder = WriterBuilder::new();
        builder
            .delimiter(self.comma)
            .terminator(terminator)
            .has_headers(false);
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EncoderConfig::default();
        assert_eq!(config.comma, b',');
        assert!(!config.skip_header);
        assert!(!config.use_crlf);
    }

    #[test]
    fn test_writer_builder_applies_overrides() {
        let config = EncoderConfig {
            comma: b';',
            use_crlf: true,
            ..Default::default()
        };

        let mut wtr = config.writer_builder().from_writer(vec![]);
        wtr.write_record(["a", "b"]).unwrap();
        let out = String::from_utf8(wtr.into_inner().unwrap()).unwrap();

        assert_eq!(out, "a;b\r\n");
    }
}
