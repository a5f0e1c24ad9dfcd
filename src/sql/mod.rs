//! Parameterized SQL for the `student` table: identifiers are fixed, values are always parameters.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
