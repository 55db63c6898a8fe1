//! Routes behind the role gate. Each handler reads the caller from the
//! `AuthUser` extension the gate inserted.

pub mod news;
pub mod schools;
pub mod subscriptions;
