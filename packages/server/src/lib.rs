//! Agora: a minimal real-time chat relay.
//!
//! Clients connect over WebSocket, join a named room and exchange messages
//! with the other members of that room. Membership lives in memory only.

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
