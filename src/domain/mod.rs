//! Domain types for the gift certificate purchase flow and the ports through
//! which the application layer reaches checkout and payment verification.

pub mod certificate;
pub mod nominal;
pub mod order;
pub mod ports;
pub mod verification;
