//! Value Object Module

pub mod event;
pub mod filters;
pub mod stage;
