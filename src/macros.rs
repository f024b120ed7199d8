#[macro_export]
macro_rules! qs {
    // Handle null
    (null) => {
        $crate::Value::Null
    };

    // Handle true
    (true) => {
        $crate::Value::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::Value::Bool(false)
    };

    // Handle empty array
    ([]) => {
        $crate::Value::Array(vec![])
    };

    // Handle non-empty array
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::qs!($elem)),*])
    };

    // Handle empty object
    ({}) => {
        $crate::Value::Object($crate::QsMap::new())
    };

    // Handle non-empty object
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::QsMap::new();
        $(
            object.insert($key.to_string(), $crate::qs!($value));
        )*
        $crate::Value::Object(object)
    }};

    // Fallback for any expression with a From impl
    ($other:expr) => {
        $crate::Value::from($other)
    };
}
