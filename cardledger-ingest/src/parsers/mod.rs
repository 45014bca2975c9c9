//! Issuer-specific row handling.

pub mod rbc_visa;
