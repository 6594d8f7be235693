use crate::domain::entities::payment_requests::PaymentRequestEntity;

/// Outcome of a compare-and-swap transition on a payment request.
///
/// A request leaves `Pending` exactly once; `AlreadyDecided` carries the
/// current record so callers can log the prior verdict without a second read.
#[derive(Debug, Clone)]
pub enum TransitionOutcome {
    Applied(PaymentRequestEntity),
    AlreadyDecided(PaymentRequestEntity),
    NotFound,
}
