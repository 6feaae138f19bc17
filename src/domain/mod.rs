// Domain layer: submission and content models plus the ports adapters implement.

pub mod model;
pub mod ports;
