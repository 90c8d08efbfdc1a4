//! Bistro API — library crate for the assistant's HTTP front-end.
//!
//! Re-exports all modules so the binary (`main.rs`) and external crates
//! (e.g. `bistro-e2e-tests`) can build the router around their own state.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
