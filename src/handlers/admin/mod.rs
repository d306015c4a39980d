// handlers/admin/mod.rs - Back-office console handlers

pub mod decorate; // /api/decorate/*
pub mod user;     // /api/user/*

pub use decorate::{tabbar_detail, tabbar_save};
pub use user::{user_detail, user_edit, user_list};
