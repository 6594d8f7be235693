pub mod auth;
pub mod contact;
pub mod credit_ledger;
pub mod image_generation;
pub mod payment_queue;
