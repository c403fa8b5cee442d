//! Cache Key Module
//!
//! Derives the store key of a memoized call from the target type, the
//! operation name and the ordered argument values:
//!
//! ```text
//! <type-name>.<operation>(<arg1>,<arg2>,...)
//! ```
//!
//! `None` arguments are dropped rather than rendered as empty slots, so
//! `[a, None, b]` and `[a, b]` produce the same key.

use std::fmt::Display;

// == Key Arguments ==
/// Ordered argument values of a cached call, rendered with `Display`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyArgs {
    values: Vec<Option<String>>,
}

impl KeyArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a present argument.
    pub fn arg<T: Display + ?Sized>(mut self, value: &T) -> Self {
        self.values.push(Some(value.to_string()));
        self
    }

    /// Appends an optional argument; `None` is elided from the key.
    pub fn opt<T: Display>(mut self, value: Option<T>) -> Self {
        self.values.push(value.map(|v| v.to_string()));
        self
    }

    pub fn as_slice(&self) -> &[Option<String>] {
        &self.values
    }
}

// == Key Generator ==
/// Strategy turning a call into a cache key.
pub trait KeyGenerator: Send + Sync {
    fn generate(&self, target: &str, operation: &str, args: &[Option<String>]) -> String;
}

/// Default generator: `<type>.<operation>(<non-null args joined by ','>)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct QualifiedKeyGenerator;

impl KeyGenerator for QualifiedKeyGenerator {
    fn generate(&self, target: &str, operation: &str, args: &[Option<String>]) -> String {
        derive_key(target, operation, args)
    }
}

/// Builds `<target>.<operation>(<args>)`, skipping `None` arguments.
pub fn derive_key(target: &str, operation: &str, args: &[Option<String>]) -> String {
    let joined = args
        .iter()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(",");
    format!("{}.{}({})", target, operation, joined)
}

/// Fully qualified name of the type an operation is invoked on.
pub fn target_name<T: ?Sized>() -> &'static str {
    std::any::type_name::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CustomerService;

    #[test]
    fn test_target_name_is_fully_qualified() {
        assert_eq!(
            target_name::<CustomerService>(),
            "cache_layer::cache::key::tests::CustomerService"
        );
    }

    #[test]
    fn test_key_with_arguments() {
        let args = KeyArgs::new().arg(&42).arg("gold");
        let key = QualifiedKeyGenerator.generate("svc::Customers", "find", args.as_slice());
        assert_eq!(key, "svc::Customers.find(42,gold)");
    }

    #[test]
    fn test_zero_arguments() {
        assert_eq!(derive_key("svc::Customers", "find_all", &[]), "svc::Customers.find_all()");
    }

    #[test]
    fn test_all_null_arguments_match_zero_arguments() {
        let args = KeyArgs::new().opt(None::<u32>).opt(None::<&str>);
        assert_eq!(
            derive_key("T", "m", args.as_slice()),
            derive_key("T", "m", &[])
        );
    }

    #[test]
    fn test_null_in_the_middle_is_elided() {
        let with_null = KeyArgs::new().arg("a").opt(None::<&str>).arg("b");
        let without = KeyArgs::new().arg("a").arg("b");
        assert_eq!(
            derive_key("T", "m", with_null.as_slice()),
            derive_key("T", "m", without.as_slice())
        );
        assert_eq!(derive_key("T", "m", with_null.as_slice()), "T.m(a,b)");
    }

    #[test]
    fn test_argument_order_matters() {
        let ab = KeyArgs::new().arg("a").arg("b");
        let ba = KeyArgs::new().arg("b").arg("a");
        assert_ne!(derive_key("T", "m", ab.as_slice()), derive_key("T", "m", ba.as_slice()));
    }

    #[test]
    fn test_present_optional_is_rendered() {
        let args = KeyArgs::new().opt(Some(7));
        assert_eq!(derive_key("T", "m", args.as_slice()), "T.m(7)");
    }
}
