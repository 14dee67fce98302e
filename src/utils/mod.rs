//! Helpers shared by the handlers

pub mod links;
pub mod text;
