//! Shared service plumbing: tracing setup, request-id middleware, health
//! endpoints. Application logic lives in the service crates.

pub mod health;
pub mod middleware;
pub mod tracing;
