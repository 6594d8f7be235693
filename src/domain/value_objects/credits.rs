use crate::domain::entities::users::UserEntity;

/// Result of a credit mutation. `clamped` is true when a deduction would have
/// driven the balance negative and was floored at zero instead.
#[derive(Debug, Clone)]
pub struct CreditAdjustment {
    pub user: UserEntity,
    pub clamped: bool,
}
