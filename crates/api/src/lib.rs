//! Deposit address API server.
//!
//! Endpoints:
//! - POST /api/v1/users/{user_id}/wallets/{currency}/addresses — Generate a deposit address
//! - GET  /health — Liveness check

pub mod routes;
pub mod state;
