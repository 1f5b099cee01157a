pub mod fields;
#[cfg(feature = "inspect")]
pub mod inspect;
pub mod schema;
