/*!
# Cell Values

The closed set of scalar kinds a CSV cell can be rendered from, and the
conversion from each kind to its text form.
*/

use crate::errors::{EncodeError, EncodeResult};
use serde::Serializer;
use std::fmt::Display;

/// A dynamically typed scalar, as captured from a record field or map entry
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Int(i128),
    Uint(u128),
    Float(f64),
    Bool(bool),

    /// Text produced by the value's own rendering, used verbatim
    Custom(String),

    /// Pointer-like indirection: absent renders as an empty cell
    Optional(Option<Box<Value>>),

    /// Anything outside the kinds above, carrying a description of its type.
    /// Only an error once it has to be rendered into a column.
    Unsupported(String),
}

impl Value {
    /// Capture a value through its `Display` implementation
    pub fn display<T: Display + ?Sized>(value: &T) -> Self {
        Value::Custom(value.to_string())
    }

    /// Render this value as the text of the cell for `column`
    pub fn to_cell(&self, column: &str) -> EncodeResult<String> {
        match self {
            Value::Text(s) | Value::Custom(s) => Ok(s.clone()),
            Value::Int(n) => Ok(n.to_string()),
            Value::Uint(n) => Ok(n.to_string()),
            // Non-finite values print as `inf`, `-inf` and `NaN`.
            Value::Float(f) => Ok(format!("{:.6}", f)),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Optional(None) => Ok(String::new()),
            Value::Optional(Some(inner)) => inner.to_cell(column),
            Value::Unsupported(type_name) => Err(EncodeError::UnsupportedField {
                column: column.to_string(),
                type_name: type_name.clone(),
            }),
        }
    }
}

macro_rules! impl_from {
    ($variant:ident, $target:ty, [$($source:ty),*]) => {
        $(
            impl From<$source> for Value {
                fn from(v: $source) -> Self {
                    Value::$variant(<$target>::from(v))
                }
            }
        )*
    };
}

impl_from!(Int, i128, [i8, i16, i32, i64, i128]);
impl_from!(Uint, u128, [u8, u16, u32, u64, u128]);
impl_from!(Float, f64, [f32, f64]);

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        Value::Int(v as i128)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Uint(v as u128)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Text(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        Value::Optional(v.map(|inner| Box::new(inner.into())))
    }
}

/// Serialize a field through its `Display` implementation so it is rendered
/// as a custom cell.
///
/// ```rust
/// # use serde::Serialize;
/// # use std::net::Ipv4Addr;
/// #[derive(Serialize)]
/// struct Host {
///     name: String,
///     #[serde(serialize_with = "csvstruct::as_text")]
///     addr: Ipv4Addr,
/// }
/// ```
pub fn as_text<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.collect_str(value)
}
