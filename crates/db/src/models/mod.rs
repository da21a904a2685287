//! Row structs and DTOs for the annotations table.

pub mod annotation;
