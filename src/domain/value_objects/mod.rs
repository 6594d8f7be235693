pub mod contact;
pub mod credits;
pub mod enums;
pub mod generations;
pub mod payments;
pub mod plans;
