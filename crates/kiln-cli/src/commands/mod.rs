//! Command implementations.
//!
//! Each command is synchronous and returns [`crate::Result`].

pub mod check;
pub mod inspect;

pub use check::execute as check_execute;
pub use inspect::execute as inspect_execute;
