// handlers/mod.rs - Route handlers grouped by audience
//
// admin: back-office console under /api
// front: mobile and PC client under /front

pub mod admin;
pub mod front;
pub mod health;

pub use health::health;
