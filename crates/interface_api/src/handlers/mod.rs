//! Request handlers

pub mod health;
pub mod session;
pub mod capture;
pub mod claims;
pub mod export;
