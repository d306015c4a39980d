pub mod decorate;
pub mod user;
