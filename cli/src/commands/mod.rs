//! Command implementations

pub mod apply;
pub mod check;
pub mod containers;
pub mod delete;
pub mod serve;
pub mod version;
