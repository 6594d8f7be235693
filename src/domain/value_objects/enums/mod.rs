pub mod credit_directions;
pub mod payment_decisions;
pub mod payment_statuses;
pub mod user_roles;
