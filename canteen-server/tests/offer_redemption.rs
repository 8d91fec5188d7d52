//! Offer redemption under concurrency
//!
//! Exercises the single-transaction usage increment at the repository
//! layer: the counter never exceeds the cap, duplicates roll back, and
//! an exhausted offer deactivates.

mod common;

use canteen_server::db::models::{DiscountType, OfferCreate};
use canteen_server::db::repository::{OfferRepository, RepoError};

fn offer_data(code: &str, max_uses: i64) -> OfferCreate {
    let now = chrono::Utc::now().timestamp_millis();
    OfferCreate {
        code: code.to_string(),
        description: format!("{} offer", code),
        discount_type: DiscountType::Flat,
        discount_value: 50,
        min_order_value: 0,
        start_date: now - 1_000,
        end_date: now + 3_600_000,
        active: true,
        max_uses,
    }
}

#[tokio::test]
async fn test_concurrent_redemptions_never_exceed_cap() {
    let (_dir, state) = common::setup().await;
    let repo = OfferRepository::new(state.db.clone());
    repo.create(offer_data("LAST1", 1), 0).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..8i64 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            repo.record_usage(
                "LAST1",
                &format!("user-{i}"),
                &format!("order-{i}"),
                1_000 + i,
            )
            .await
        }));
    }

    let mut wins = 0;
    for handle in handles {
        // A commit conflict counts as a refusal, not a win
        if let Ok(Ok(true)) = handle.await {
            wins += 1;
        }
    }
    assert_eq!(wins, 1);

    let offer = repo.find_by_code("LAST1").await.unwrap().unwrap();
    assert_eq!(offer.uses, 1);
    assert!(!offer.active);
}

#[tokio::test]
async fn test_cap_refuses_after_limit() {
    let (_dir, state) = common::setup().await;
    let repo = OfferRepository::new(state.db.clone());
    repo.create(offer_data("CAP2", 2), 0).await.unwrap();

    assert!(repo.record_usage("CAP2", "u1", "o1", 1).await.unwrap());
    assert!(repo.record_usage("CAP2", "u2", "o2", 2).await.unwrap());
    assert!(!repo.record_usage("CAP2", "u3", "o3", 3).await.unwrap());

    let offer = repo.find_by_code("CAP2").await.unwrap().unwrap();
    assert_eq!(offer.uses, 2);
    assert!(!offer.active);
}

#[tokio::test]
async fn test_duplicate_order_rolls_back_increment() {
    let (_dir, state) = common::setup().await;
    let repo = OfferRepository::new(state.db.clone());
    repo.create(offer_data("FREE", 0), 0).await.unwrap();

    assert!(repo.record_usage("FREE", "u1", "o1", 1).await.unwrap());

    let err = repo.record_usage("FREE", "u1", "o1", 2).await.unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));

    // The counter rolled back with the transaction
    let offer = repo.find_by_code("FREE").await.unwrap().unwrap();
    assert_eq!(offer.uses, 1);
    assert!(offer.active);

    // A different order can still redeem
    assert!(repo.record_usage("FREE", "u2", "o2", 3).await.unwrap());
}

#[tokio::test]
async fn test_unlimited_offer_keeps_ledger() {
    let (_dir, state) = common::setup().await;
    let repo = OfferRepository::new(state.db.clone());
    let created = repo.create(offer_data("OPEN", 0), 0).await.unwrap();
    let offer_id = created.id.unwrap();

    for i in 0..5i64 {
        assert!(
            repo.record_usage("OPEN", "u1", &format!("order-{i}"), 10 + i)
                .await
                .unwrap()
        );
    }

    let offer = repo.find_by_code("OPEN").await.unwrap().unwrap();
    assert_eq!(offer.uses, 5);
    assert!(offer.active);

    assert!(repo.has_usage(&offer_id, "order-0").await.unwrap());
    assert!(!repo.has_usage(&offer_id, "order-99").await.unwrap());

    let usages = repo.find_usages(&offer_id).await.unwrap();
    assert_eq!(usages.len(), 5);
    // Newest first
    assert_eq!(usages[0].order_id, "order-4");
    assert_eq!(usages[0].used_at, 14);
}
