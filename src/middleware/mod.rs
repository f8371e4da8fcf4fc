//! Middleware module
//!
//! Request-scoped logging wrapped around every route

pub mod logging;
