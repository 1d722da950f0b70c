//! Route handlers

pub mod auth;
pub mod contests;
pub mod health;
pub mod home;
pub mod settings;
pub mod user_bind;
pub mod users;
