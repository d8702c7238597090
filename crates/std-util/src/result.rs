/// Unwraps an `Err`, panicking with the `Ok` value otherwise. Extra
/// arguments are formatted into the panic message.
#[macro_export]
macro_rules! assert_err {
    ($e:expr $(, $($t:tt)* )?) => {
        match $e {
            Err(e) => e,
            actual => {
                use std::fmt::Write;
                let mut msg = format!("expected `Err`; actual={:?}", actual);

                $(
                    write!(msg, ", ").unwrap();
                    write!(msg, $($t)*).unwrap();
                )?

                panic!("{}", msg);
            }
        }
    };
}

#[macro_export]
macro_rules! assert_ok {
    ($e:expr) => {
        match $e {
            Ok(v) => v,
            Err(err) => panic!("expected `Ok`; error={}", err),
        }
    };
}

/// Asserts that an iterator yields no item twice.
#[macro_export]
macro_rules! assert_unique {
    ($e:expr) => {{
        let mut seen = std::collections::HashSet::new();
        for item in $e {
            if !seen.insert(item.clone()) {
                panic!("expected unique items; duplicate={:?}", item);
            }
        }
    }};
}
