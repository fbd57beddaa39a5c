//! Utilities shared between the Agora server binary and its tests.

pub mod logger;
pub mod time;
