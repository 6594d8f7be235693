pub mod memory_store;
pub mod repositories;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use uuid::Uuid;

    use super::memory_store::MemoryStore;
    use super::repositories::{
        generations::GenerationMemory, payment_requests::PaymentRequestMemory, users::UserMemory,
    };
    use crate::domain::{
        entities::{
            generations::InsertGenerationEntity, payment_requests::InsertPaymentRequestEntity,
            users::InsertUserEntity,
        },
        repositories::{
            generations::GenerationRepository, payment_requests::PaymentRequestRepository,
            users::UserRepository,
        },
        value_objects::{
            enums::{
                credit_directions::CreditDirection, payment_statuses::PaymentStatus,
                user_roles::UserRole,
            },
            payments::TransitionOutcome,
        },
    };

    fn insert_user(name: &str, email: &str, credits: i64) -> InsertUserEntity {
        InsertUserEntity {
            name: name.to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
            credits,
            role: UserRole::User,
        }
    }

    fn insert_request(user_id: Uuid, credits: i64) -> InsertPaymentRequestEntity {
        InsertPaymentRequestEntity {
            user_id,
            user_name: "Someone".to_string(),
            plan: format!("{} Credits", credits),
            amount: 299,
            credits,
            transaction_id: "txn-123".to_string(),
        }
    }

    #[tokio::test]
    async fn seeded_store_contains_demo_accounts_and_approved_request() {
        let store = Arc::new(MemoryStore::seeded());
        let users = UserMemory::new(Arc::clone(&store));
        let requests = PaymentRequestMemory::new(Arc::clone(&store));

        let admin = users
            .find_by_email("ADMIN@CALMIVOX.EXAMPLE")
            .await
            .unwrap()
            .expect("admin account seeded");
        assert_eq!(admin.role, UserRole::Admin);

        let client = users
            .find_by_email("client@example.com")
            .await
            .unwrap()
            .expect("client account seeded");
        assert_eq!(client.credits, 50);

        let all = requests.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status, PaymentStatus::Approved);
        assert_eq!(all[0].user_id, client.id);
    }

    #[tokio::test]
    async fn credits_never_go_negative_across_mixed_operations() {
        let store = Arc::new(MemoryStore::new());
        let users = UserMemory::new(Arc::clone(&store));
        let user = users.insert(insert_user("A", "a@example.com", 5)).await.unwrap();

        let steps = [
            (3, CreditDirection::Deduct),
            (10, CreditDirection::Deduct),
            (7, CreditDirection::Add),
            (100, CreditDirection::Deduct),
            (1, CreditDirection::Add),
        ];

        for (amount, direction) in steps {
            let adjusted = users
                .adjust_credits(user.id, amount, direction)
                .await
                .unwrap()
                .expect("user exists");
            assert!(adjusted.user.credits >= 0);
        }

        let final_user = users.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(final_user.credits, 1);
    }

    #[tokio::test]
    async fn deduct_beyond_balance_clamps_and_reports_it() {
        let store = Arc::new(MemoryStore::new());
        let users = UserMemory::new(Arc::clone(&store));
        let user = users.insert(insert_user("B", "b@example.com", 2)).await.unwrap();

        let adjusted = users
            .adjust_credits(user.id, 3, CreditDirection::Deduct)
            .await
            .unwrap()
            .unwrap();

        assert!(adjusted.clamped);
        assert_eq!(adjusted.user.credits, 0);
    }

    #[tokio::test]
    async fn adjusting_an_unknown_user_is_a_no_op() {
        let store = Arc::new(MemoryStore::new());
        let users = UserMemory::new(Arc::clone(&store));

        let adjusted = users
            .adjust_credits(Uuid::new_v4(), 10, CreditDirection::Add)
            .await
            .unwrap();

        assert!(adjusted.is_none());
    }

    #[tokio::test]
    async fn payment_requests_list_newest_first_with_monotonic_ids() {
        let store = Arc::new(MemoryStore::new());
        let requests = PaymentRequestMemory::new(Arc::clone(&store));
        let user_id = Uuid::new_v4();

        let first = requests.insert(insert_request(user_id, 40)).await.unwrap();
        let second = requests.insert(insert_request(user_id, 90)).await.unwrap();

        assert!(second.id > first.id);

        let listed = requests.list_by_user(user_id).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }

    #[tokio::test]
    async fn transition_from_pending_applies_exactly_once() {
        let store = Arc::new(MemoryStore::new());
        let requests = PaymentRequestMemory::new(Arc::clone(&store));
        let request = requests
            .insert(insert_request(Uuid::new_v4(), 40))
            .await
            .unwrap();

        let first = requests
            .transition_from_pending(request.id, PaymentStatus::Approved)
            .await
            .unwrap();
        assert!(matches!(first, TransitionOutcome::Applied(ref r) if r.status == PaymentStatus::Approved));

        let second = requests
            .transition_from_pending(request.id, PaymentStatus::Rejected)
            .await
            .unwrap();
        match second {
            TransitionOutcome::AlreadyDecided(r) => assert_eq!(r.status, PaymentStatus::Approved),
            other => panic!("expected AlreadyDecided, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn transition_on_unknown_id_reports_not_found() {
        let store = Arc::new(MemoryStore::new());
        let requests = PaymentRequestMemory::new(Arc::clone(&store));

        let outcome = requests
            .transition_from_pending(404, PaymentStatus::Rejected)
            .await
            .unwrap();
        assert!(matches!(outcome, TransitionOutcome::NotFound));
    }

    #[tokio::test]
    async fn generation_history_is_per_user_and_newest_first() {
        let store = Arc::new(MemoryStore::new());
        let generations = GenerationMemory::new(Arc::clone(&store));
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let older = generations
            .insert(InsertGenerationEntity {
                user_id: alice,
                prompt: "a red jacket".to_string(),
                images: vec!["data:image/jpeg;base64,aaa".to_string()],
            })
            .await
            .unwrap();
        generations
            .insert(InsertGenerationEntity {
                user_id: bob,
                prompt: "a hat".to_string(),
                images: vec!["data:image/jpeg;base64,bbb".to_string()],
            })
            .await
            .unwrap();
        let newer = generations
            .insert(InsertGenerationEntity {
                user_id: alice,
                prompt: "a blue jacket".to_string(),
                images: vec!["data:image/jpeg;base64,ccc".to_string()],
            })
            .await
            .unwrap();

        let history = generations.list_by_user(alice).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, newer.id);
        assert_eq!(history[1].id, older.id);
    }
}
