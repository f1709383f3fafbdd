use csvstruct::{Encoder, EncoderConfig};
use serde::Serialize;
use std::fs;
use tempfile::NamedTempFile;

#[derive(Serialize)]
#[allow(non_snake_case)]
struct Abc {
    A: &'static str,
    B: &'static str,
    C: &'static str,
}

const ROWS: [Abc; 2] = [
    Abc {
        A: "a",
        B: "b",
        C: "c",
    },
    Abc {
        A: "d",
        B: "e",
        C: "f",
    },
];

fn encode_with(config: EncoderConfig) -> String {
    let mut encoder = Encoder::with_config(Vec::new(), config);
    for row in &ROWS {
        encoder.encode_next(row).unwrap();
    }
    String::from_utf8(encoder.into_inner().unwrap()).unwrap()
}

#[test]
fn test_custom_delimiter() {
    let out = encode_with(EncoderConfig {
        comma: b'%',
        ..Default::default()
    });
    assert_eq!(out, "A%B%C\na%b%c\nd%e%f\n");
}

#[test]
fn test_skip_header() {
    let out = encode_with(EncoderConfig {
        skip_header: true,
        ..Default::default()
    });
    assert_eq!(out, "a,b,c\nd,e,f\n");
}

#[test]
fn test_crlf_line_endings() {
    let out = encode_with(EncoderConfig {
        use_crlf: true,
        ..Default::default()
    });
    assert_eq!(out, "A,B,C\r\na,b,c\r\nd,e,f\r\n");
}

#[test]
fn test_skip_header_still_locks_columns() {
    let mut encoder = Encoder::with_config(
        Vec::new(),
        EncoderConfig {
            skip_header: true,
            ..Default::default()
        },
    );
    encoder.encode_next(&ROWS[0]).unwrap();

    assert_eq!(encoder.columns().unwrap(), ["A", "B", "C"]);
    assert_eq!(
        String::from_utf8(encoder.into_inner().unwrap()).unwrap(),
        "a,b,c\n"
    );
}

#[test]
fn test_rows_are_flushed_to_file() {
    let temp_file = NamedTempFile::new().unwrap();
    let file = temp_file.reopen().unwrap();

    let mut encoder = Encoder::new(file);
    encoder.encode_next(&ROWS[0]).unwrap();

    // Each row is flushed before encode_next returns.
    assert_eq!(fs::read_to_string(temp_file.path()).unwrap(), "A,B,C\na,b,c\n");

    encoder.encode_next(&ROWS[1]).unwrap();
    assert_eq!(
        fs::read_to_string(temp_file.path()).unwrap(),
        "A,B,C\na,b,c\nd,e,f\n"
    );
}

#[test]
fn test_write_errors_are_propagated() {
    struct BrokenPipe;

    impl std::io::Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let mut encoder = Encoder::new(BrokenPipe);
    let err = encoder.encode_next(&ROWS[0]).unwrap_err();
    assert!(err.to_string().contains("closed"));
}

#[test]
fn test_failed_write_is_not_replayed() {
    #[derive(Serialize)]
    struct Id {
        id: u32,
    }

    /// Fails the `fail_on`-th write, then recovers
    struct FlakyWriter {
        out: Vec<u8>,
        writes: usize,
        fail_on: usize,
    }

    impl std::io::Write for FlakyWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.writes += 1;
            if self.writes == self.fail_on {
                return Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
            }
            self.out.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let mut encoder = Encoder::new(FlakyWriter {
        out: Vec::new(),
        writes: 0,
        fail_on: 2,
    });

    encoder.encode_next(&Id { id: 1 }).unwrap();
    let err = encoder.encode_next(&Id { id: 2 }).unwrap_err();
    assert!(err.to_string().contains("disk full"));
    encoder.encode_next(&Id { id: 3 }).unwrap();

    let out = encoder.into_inner().unwrap().out;
    assert_eq!(String::from_utf8(out).unwrap(), "id\n1\n3\n");
}

#[test]
fn test_failed_header_write_is_retried() {
    struct FailFirst {
        out: Vec<u8>,
        failed: bool,
    }

    impl std::io::Write for FailFirst {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if !self.failed {
                self.failed = true;
                return Err(std::io::Error::new(std::io::ErrorKind::Other, "not ready"));
            }
            self.out.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let mut encoder = Encoder::new(FailFirst {
        out: Vec::new(),
        failed: false,
    });

    assert!(encoder.encode_next(&ROWS[0]).is_err());
    assert!(encoder.columns().is_none());

    encoder.encode_next(&ROWS[1]).unwrap();
    let out = encoder.into_inner().unwrap().out;
    assert_eq!(String::from_utf8(out).unwrap(), "A,B,C\nd,e,f\n");
}
