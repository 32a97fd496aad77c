//! Truthiness for the closed dynamic value set.
//!
//! Deferred handles forward truthiness evaluation to their resolved value,
//! so the workspace needs a single definition of "truthy" that covers
//! scalars, strings, containers and `serde_json::Value`. Empty containers,
//! empty strings, zero and null are falsy; everything else is truthy.

use serde_json::Value;
use std::collections::HashMap;

/// Types that can be evaluated for truthiness without consuming the value
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

macro_rules! impl_truthy_int {
    ($($t:ty),*) => {
        $(impl Truthy for $t {
            fn is_truthy(&self) -> bool {
                *self != 0
            }
        })*
    };
}

impl_truthy_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Truthy for f32 {
    fn is_truthy(&self) -> bool {
        *self != 0.0
    }
}

impl Truthy for f64 {
    fn is_truthy(&self) -> bool {
        *self != 0.0
    }
}

impl Truthy for str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Truthy for Vec<T> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<K, V> Truthy for HashMap<K, V> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::is_truthy)
    }
}

impl Truthy for Value {
    fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_truthiness() {
        assert!(5_i64.is_truthy());
        assert!(!0_i64.is_truthy());
        assert!(3.14_f64.is_truthy());
        assert!("x".is_truthy());
        assert!(!"".is_truthy());
        assert!(!false.is_truthy());
    }

    #[test]
    fn test_value_truthiness() {
        assert!(!json!(null).is_truthy());
        assert!(!json!(0).is_truthy());
        assert!(!json!([]).is_truthy());
        assert!(!json!({}).is_truthy());
        assert!(json!({"a": 1}).is_truthy());
        assert!(json!([0]).is_truthy());
    }

    #[test]
    fn test_option_truthiness() {
        assert!(!None::<i64>.is_truthy());
        assert!(!Some(0_i64).is_truthy());
        assert!(Some(1_i64).is_truthy());
    }
}
