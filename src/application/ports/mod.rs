//! Ports - Boundary interfaces between the engine and the host runtime

pub mod outbound;
