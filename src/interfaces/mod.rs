//! Interface adapters — transport-facing layers

pub mod http;
