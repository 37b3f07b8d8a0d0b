pub mod alignment;
pub mod identifiers;
