//! pg_gateway library - read-only PostgreSQL access gateway
//!
//! Provides the database access layer, the gateway operations, command
//! execution, and output formatting for inspecting a PostgreSQL database
//! without ever modifying it.

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod gateway;
pub mod output;

#[macro_use]
pub mod test_macros;

#[cfg(test)]
pub mod test_utils;
