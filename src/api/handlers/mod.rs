//! HTTP handlers, one module per managed table.

mod attendance;
mod records;
mod students;
mod system;
mod transactions;

#[cfg(test)]
mod attendance_test;

pub use attendance::*;
pub use students::*;
pub use system::*;
pub use transactions::*;
