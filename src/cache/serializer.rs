//! Value Serializer Module
//!
//! Every cached value is stored as a JSON envelope carrying the Rust type
//! it was written from:
//!
//! ```json
//! {"@class":"my_app::Customer","value":{"id":1,"name":"Ann"}}
//! ```
//!
//! The class is always the owned form of the written type: a value written
//! through a reference, as `str` or as a slice is recorded as the type it
//! reads back as (`Customer`, `String`, `Vec<_>`).
//!
//! Typed reads check `@class` against the requested type. Untyped reads
//! hand back the class and raw JSON so a reader can inspect an entry
//! without knowing its type. Polymorphic fields inside a value use serde
//! internally tagged enums on the same property (`#[serde(tag = "@class")]`).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CacheError, Result};

/// Property holding the type name in envelopes and tagged enums.
pub const TYPE_PROPERTY: &str = "@class";

#[derive(Serialize)]
struct EnvelopeRef<'a, T: ?Sized> {
    #[serde(rename = "@class")]
    class: &'a str,
    value: &'a T,
}

// == Typed Value ==
/// A decoded envelope whose payload type is not known statically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedValue {
    #[serde(rename = "@class")]
    pub class: String,
    pub value: Value,
}

// == JSON Value Serializer ==
/// The single encoding used for every named cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonValueSerializer;

impl JsonValueSerializer {
    pub fn new() -> Self {
        Self
    }

    /// Encodes `value` together with the owned name of its type.
    ///
    /// # Errors
    /// [`CacheError::Serialization`] if serde_json cannot represent the value.
    pub fn serialize<T>(&self, value: &T) -> Result<Vec<u8>>
    where
        T: Serialize + ?Sized,
    {
        let class = owned_class(std::any::type_name::<T>());
        let envelope = EnvelopeRef {
            class: &class,
            value,
        };
        Ok(serde_json::to_vec(&envelope)?)
    }

    /// Decodes an envelope written for type `T`.
    ///
    /// # Errors
    /// [`CacheError::Serialization`] on malformed JSON or a class mismatch.
    pub fn deserialize<T>(&self, bytes: &[u8]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let typed = self.deserialize_untyped(bytes)?;
        let expected = owned_class(std::any::type_name::<T>());
        if owned_class(&typed.class) != expected {
            return Err(CacheError::Serialization(format!(
                "stored value is a {}, expected {}",
                typed.class, expected
            )));
        }
        Ok(serde_json::from_value(typed.value)?)
    }

    /// Decodes an envelope without knowing its payload type.
    pub fn deserialize_untyped(&self, bytes: &[u8]) -> Result<TypedValue> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

// == Owned Class Names ==
/// Rewrites a type name into the name of the owned type it deserializes as.
///
/// References are dropped, `str` becomes `String` and `[T]` becomes
/// `Vec<T>`, at any nesting depth. Arrays `[T; N]` are kept.
pub fn owned_class(type_name: &str) -> String {
    let mut out = String::with_capacity(type_name.len());
    let mut rest = type_name;

    while let Some(c) = rest.chars().next() {
        if let Some(tail) = rest.strip_prefix("&mut ") {
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix('&') {
            rest = tail;
        } else if let Some(inner) = rest.strip_prefix('[') {
            let close = find_top_level(inner, ']').unwrap_or(inner.len());
            let element = &inner[..close];
            if find_top_level(element, ';').is_some() {
                out.push('[');
                out.push_str(&owned_class(element));
                out.push(']');
            } else {
                out.push_str("alloc::vec::Vec<");
                out.push_str(&owned_class(element));
                out.push('>');
            }
            rest = inner.get(close + 1..).unwrap_or("");
        } else if is_path_char(c) {
            let end = rest.find(|ch: char| !is_path_char(ch)).unwrap_or(rest.len());
            let (ident, tail) = rest.split_at(end);
            out.push_str(if ident == "str" {
                "alloc::string::String"
            } else {
                ident
            });
            rest = tail;
        } else {
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }
    out
}

fn is_path_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == ':'
}

/// Byte offset of the first `target` outside any `<>`, `()` or `[]` pair.
fn find_top_level(input: &str, target: char) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in input.char_indices() {
        if depth == 0 && c == target {
            return Some(i);
        }
        match c {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}
