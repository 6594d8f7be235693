use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    entities::{
        generations::GenerationEntity, payment_requests::PaymentRequestEntity, users::UserEntity,
    },
    value_objects::enums::{payment_statuses::PaymentStatus, user_roles::UserRole},
};

/// The process-wide in-memory database. Each table sits behind its own
/// `RwLock`; payment and generation ids come from monotonic counters so they
/// stay unique regardless of what ever happens to the collections.
pub struct MemoryStore {
    pub(super) users: RwLock<Vec<UserEntity>>,
    pub(super) payment_requests: RwLock<Vec<PaymentRequestEntity>>,
    pub(super) generations: RwLock<Vec<GenerationEntity>>,
    next_payment_request_id: AtomicI64,
    next_generation_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            payment_requests: RwLock::new(Vec::new()),
            generations: RwLock::new(Vec::new()),
            next_payment_request_id: AtomicI64::new(1),
            next_generation_id: AtomicI64::new(1),
        }
    }

    /// Store preloaded with the demo accounts and one already-approved top-up
    /// request, matching what the storefront ships with.
    pub fn seeded() -> Self {
        let now = Utc::now();

        let admin = UserEntity {
            id: Uuid::new_v4(),
            name: "Admin".to_string(),
            email: "admin@calmivox.example".to_string(),
            password: "admin".to_string(),
            credits: 999_999,
            role: UserRole::Admin,
            created_at: now,
        };
        let demo_user = UserEntity {
            id: Uuid::new_v4(),
            name: "User".to_string(),
            email: "user@example.com".to_string(),
            password: "user".to_string(),
            credits: 25,
            role: UserRole::User,
            created_at: now,
        };
        let client = UserEntity {
            id: Uuid::new_v4(),
            name: "Active Client".to_string(),
            email: "client@example.com".to_string(),
            password: "password".to_string(),
            credits: 50,
            role: UserRole::User,
            created_at: now,
        };

        let approved_request = PaymentRequestEntity {
            id: 1,
            user_id: client.id,
            user_name: client.name.clone(),
            plan: "40 Credits".to_string(),
            amount: 299,
            credits: 40,
            transaction_id: "mock-txn-client-approved".to_string(),
            date: now - Duration::days(1),
            status: PaymentStatus::Approved,
        };

        Self {
            users: RwLock::new(vec![admin, demo_user, client]),
            payment_requests: RwLock::new(vec![approved_request]),
            generations: RwLock::new(Vec::new()),
            next_payment_request_id: AtomicI64::new(2),
            next_generation_id: AtomicI64::new(1),
        }
    }

    pub(super) fn next_payment_request_id(&self) -> i64 {
        self.next_payment_request_id.fetch_add(1, Ordering::Relaxed)
    }

    pub(super) fn next_generation_id(&self) -> i64 {
        self.next_generation_id.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
