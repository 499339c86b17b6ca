//! Application layer - Ports and services over the domain model

pub mod ports;
pub mod services;
