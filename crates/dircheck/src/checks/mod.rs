//! Checks run against a directory snapshot.

pub mod covid;

pub use covid::CovidCheck;
