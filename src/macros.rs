/// Builds a [`PhpValue`](crate::PhpValue) from a JSON-like literal.
///
/// `{ ... }` builds an array with explicit keys (string or integer
/// literals), `[ ... ]` builds an array with sequential integer keys, and
/// scalars convert via `From`. An expression in parentheses is taken as-is,
/// which allows embedding pre-built values such as
/// [`PhpValue::ClassRef`](crate::PhpValue::ClassRef).
///
/// # Examples
///
/// ```rust
/// use serde_phparray::{php_array, PhpValue};
///
/// let config = php_array!({
///     "test": "foo",
///     "bar": ["baz", "foo"],
///     "emptyArray": {}
/// });
///
/// let map = config.as_array().unwrap();
/// assert_eq!(map.get("test").and_then(|v| v.as_str()), Some("foo"));
/// ```
#[macro_export]
macro_rules! php_array {
    // Handle null
    (null) => {
        $crate::PhpValue::Null
    };

    // Handle true
    (true) => {
        $crate::PhpValue::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::PhpValue::Bool(false)
    };

    // Handle empty positional array
    ([]) => {
        $crate::PhpValue::Array($crate::PhpMap::new())
    };

    // Handle non-empty positional array
    ([ $($elem:tt),* $(,)? ]) => {{
        let mut map = $crate::PhpMap::new();
        $(
            map.push($crate::php_array!($elem));
        )*
        $crate::PhpValue::Array(map)
    }};

    // Handle empty keyed array
    ({}) => {
        $crate::PhpValue::Array($crate::PhpMap::new())
    };

    // Handle non-empty keyed array
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut map = $crate::PhpMap::new();
        $(
            map.insert($crate::PhpKey::from($key), $crate::php_array!($value));
        )*
        $crate::PhpValue::Array(map)
    }};

    // Fallback for any expression convertible into a PhpValue
    ($v:expr) => {
        $crate::PhpValue::from($v)
    };
}

#[cfg(test)]
mod tests {
    use crate::{PhpKey, PhpMap, PhpValue};

    #[test]
    fn test_php_array_macro_primitives() {
        assert_eq!(php_array!(null), PhpValue::Null);
        assert_eq!(php_array!(true), PhpValue::Bool(true));
        assert_eq!(php_array!(false), PhpValue::Bool(false));
        assert_eq!(php_array!(42), PhpValue::Int(42));
        assert_eq!(php_array!(3.5), PhpValue::Float(3.5));
        assert_eq!(php_array!("hello"), PhpValue::String("hello".to_string()));
    }

    #[test]
    fn test_php_array_macro_positional() {
        assert_eq!(php_array!([]), PhpValue::Array(PhpMap::new()));

        let arr = php_array!(["baz", "foo"]);
        let map = arr.as_array().unwrap();
        assert!(map.is_list());
        assert_eq!(map.get(0).and_then(|v| v.as_str()), Some("baz"));
        assert_eq!(map.get(1).and_then(|v| v.as_str()), Some("foo"));
    }

    #[test]
    fn test_php_array_macro_keyed() {
        assert_eq!(php_array!({}), PhpValue::Array(PhpMap::new()));

        let obj = php_array!({
            "name": "Alice",
            0: "positional",
            "nested": { "deep": true }
        });

        let map = obj.as_array().unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
        assert_eq!(map.get(PhpKey::Int(0)).and_then(|v| v.as_str()), Some("positional"));
        assert!(map.get("nested").unwrap().is_array());
    }

    #[test]
    fn test_php_array_macro_embedded_value() {
        let value = php_array!({ "ref": (PhpValue::ClassRef("App\\Kernel".to_string())) });
        let map = value.as_array().unwrap();
        assert!(map.get("ref").unwrap().is_class_ref());
    }
}
