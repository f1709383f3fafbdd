/*!
# csvstruct

Encode structs and maps as CSV rows.

The first record passed to an [`Encoder`] decides the header. Every later
record is reconciled against that header: fields it lacks become empty cells,
fields the header does not know are dropped, and a record that shares no
column with the header writes no row at all.

## Records

Anything implementing `serde::Serialize` as a struct or a map can be encoded:

- **Structs** keep their field declaration order. Use `#[serde(rename = "...")]`
  to change a column name and `#[serde(skip)]` to leave a field out.
- **Maps** (`HashMap`, `BTreeMap`, `serde_json::Map`, ...) use their keys as
  columns, sorted ascending so the header never depends on iteration order.
- **`None`** is a no-op.

A struct with a `#[serde(flatten)]` field is serialized by serde as a map, so
it is encoded like one: its header is the sorted union of its own and the
flattened fields' names rather than the declaration order.

Records can also be built by hand with [`Record::from_map`] and
[`Record::from_fields`] and passed to [`Encoder::encode_record`].

## Cells

| Kind | Cell |
|---|---|
| strings, chars, unit enum variants | verbatim |
| integers | base-10 |
| floats | fixed-point, six decimals (`123.456000`) |
| `bool` | `true` / `false` |
| `Option<T>` | empty when `None`, otherwise `T`'s cell |
| [`as_text`] / [`Value::display`] | the type's `Display` output |

Anything else (sequences, nested structs or maps, bytes) fails with
[`EncodeError::UnsupportedField`] when it falls in a header column.

## Usage

```rust
use csvstruct::{EncodeResult, Encoder, EncoderConfig};
use serde::Serialize;

#[derive(Serialize)]
struct Row {
    #[serde(rename = "name")]
    label: String,
    count: u64,
}

fn example() -> EncodeResult<String> {
    let config = EncoderConfig {
        comma: b';',
        ..Default::default()
    };
    let mut encoder = Encoder::with_config(Vec::new(), config);

    encoder.encode_next(&Row { label: "a".to_string(), count: 1 })?;
    encoder.encode_next(&Row { label: "b".to_string(), count: 2 })?;

    let out = encoder.into_inner()?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

assert_eq!(example().unwrap(), "name;count\na;1\nb;2\n");
```

An encoder is not synchronized; callers with several producers must serialize
their calls.
*/

pub mod config;
pub mod encoder;
pub mod errors;
pub mod record;
pub mod schema;
pub mod ser;
pub mod value;

// Re-export main types for convenience
pub use config::EncoderConfig;
pub use encoder::Encoder;
pub use errors::{EncodeError, EncodeResult};
pub use record::{Field, Record};
pub use schema::ColumnSchema;
pub use ser::to_record;
pub use value::{as_text, Value};
