use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// A callable stored in the carrier's data space.
///
/// Callables receive the argument list they were invoked with and produce a
/// JSON value. They are shared, so a cloned slot invokes the same function.
pub type Callable = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// A single entry in the carrier's user-data space.
///
/// Most entries are plain JSON values. Callables get their own variant
/// because they have no JSON representation; the merge engine treats them as
/// leaves, overwritten wholesale like any scalar.
#[derive(Clone)]
pub enum Slot {
    Value(Value),
    Callable(Callable),
}

impl Slot {
    /// The JSON value held by this slot, if it is not a callable.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Slot::Value(value) => Some(value),
            Slot::Callable(_) => None,
        }
    }

    /// The callable held by this slot, if any.
    pub fn as_callable(&self) -> Option<&Callable> {
        match self {
            Slot::Value(_) => None,
            Slot::Callable(callable) => Some(callable),
        }
    }

    /// Returns `true` if this slot holds a keyed record (a JSON object).
    pub fn is_record(&self) -> bool {
        matches!(self, Slot::Value(Value::Object(_)))
    }
}

impl From<Value> for Slot {
    fn from(value: Value) -> Self {
        Slot::Value(value)
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Value(value) => fmt::Debug::fmt(value, f),
            Slot::Callable(_) => f.write_str("<callable>"),
        }
    }
}

// Callables have no meaningful equality; two slots compare equal only when
// both hold equal JSON values.
impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Slot::Value(a), Slot::Value(b)) => a == b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn value_slot_roundtrip() {
        let slot = Slot::from(json!({"a": 1}));
        assert!(slot.is_record());
        assert_eq!(slot.as_value(), Some(&json!({"a": 1})));
        assert!(slot.as_callable().is_none());
    }

    #[test]
    fn callable_slot_invokes() {
        let slot = Slot::Callable(Arc::new(|args| json!(args.len())));
        let f = slot.as_callable().unwrap();
        assert_eq!(f(&[json!(1), json!(2)]), json!(2));
        assert!(!slot.is_record());
    }

    #[test]
    fn callables_never_compare_equal() {
        let a = Slot::Callable(Arc::new(|_| Value::Null));
        let b = a.clone();
        assert_ne!(a, b);
        assert_eq!(Slot::from(json!(1)), Slot::from(json!(1)));
    }
}
