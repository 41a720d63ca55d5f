// Domain layer: QR session and access token entities, errors, and ports.

pub mod entities;
pub mod errors;
pub mod ports;
