//! サーバーAPI連携

pub mod client;
