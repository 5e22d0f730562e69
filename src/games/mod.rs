//! Game implementations.

pub mod crazy_eights;
