pub mod generations;
pub mod payment_requests;
pub mod users;
