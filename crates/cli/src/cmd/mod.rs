//! Command implementations

pub mod cart;
pub mod config;
pub mod replay;
pub mod search;
