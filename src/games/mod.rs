//! Concrete rule sets and their default tactics.

pub mod crazy_eights;
pub mod monster;
