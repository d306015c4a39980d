// handlers/front/mod.rs - Client-facing handlers
//
// Everything except registration needs a signed-in user (`CurrentUser`).

pub mod login; // /front/register
pub mod user;  // /front/user/*

pub use login::register;
pub use user::{user_center, user_change_pwd, user_edit, user_info};
