//! Macros for reducing boilerplate in key name tables.
//!
//! `key_table!` turns a list of `KeyCode` variant names into a static slice
//! pairing each variant with its name, so configuration files can spell keys
//! exactly as Bevy does.

/// Builds a `&[(&str, KeyCode)]` from `KeyCode` variant identifiers.
macro_rules! key_table {
    ($($variant:ident),* $(,)?) => {
        &[$((stringify!($variant), ::bevy_input::keyboard::KeyCode::$variant)),*]
    };
}

pub(crate) use key_table;
