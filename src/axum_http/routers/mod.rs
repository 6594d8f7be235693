pub mod admin;
pub mod auth;
pub mod contact;
pub mod image_generation;
pub mod payments;
