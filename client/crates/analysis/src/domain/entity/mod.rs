//! Entity Module

pub mod article;
pub mod chat;
pub mod preferences;
