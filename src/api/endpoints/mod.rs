//! API endpoint handlers.
//!
//! Each module corresponds to a view of the tool. Handlers delegate to
//! `CoreState`; none of them hold business logic.

pub mod assessment;
pub mod form;
pub mod health;
