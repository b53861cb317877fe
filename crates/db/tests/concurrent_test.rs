//! Concurrent filing stress tests.
//!
//! These tests verify that:
//! - Concurrent saves of the same verification store it exactly once
//! - Every losing save gets the stored verification back
//! - Distinct verifications saved concurrently all get unique ids

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use futures::future::join_all;
use rust_decimal_macros::dec;
use tokio::sync::Barrier;

use kassabok_core::clock::FixedClock;
use kassabok_core::fiscal::FiscalYear;
use kassabok_core::ledger::{
    CustomTransactionInput, CustomTransactionLine, CustomVerification, SaveOutcome,
    VerificationService,
};
use kassabok_core::validation::ValidationContext;
use kassabok_db::{
    MemoryFiscalYearStore, MemoryUserDirectory, MemoryVerificationStore, StaticExchangeRates,
};
use kassabok_shared::types::{CurrencyCode, Id};

const TASKS: usize = 64;

async fn setup() -> (Arc<VerificationService>, Arc<MemoryVerificationStore>) {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

    let store = Arc::new(MemoryVerificationStore::new());
    let years = Arc::new(MemoryFiscalYearStore::new());
    years
        .insert(
            FiscalYear::calendar_year("fy2020", 1, 2020).unwrap(),
            &ValidationContext::at(now),
        )
        .await
        .unwrap();
    let users = Arc::new(MemoryUserDirectory::new());
    users.insert(Id::from(1), "SEK").await;

    let service = VerificationService::new(
        store.clone(),
        years,
        Arc::new(StaticExchangeRates::new()),
        users,
    )
    .with_clock(Arc::new(FixedClock(now)));

    (Arc::new(service), store)
}

fn input(name: String) -> CustomTransactionInput {
    CustomTransactionInput {
        user_id: Id::from(1),
        verification: CustomVerification {
            name,
            date: "2020-04-01".to_string(),
            description: None,
            files: Vec::new(),
            transactions: vec![
                CustomTransactionLine {
                    account_number: 6540,
                    amount: dec!(349),
                    currency_code: CurrencyCode::Sek,
                },
                CustomTransactionLine {
                    account_number: 1930,
                    amount: dec!(-349),
                    currency_code: CurrencyCode::Sek,
                },
            ],
        },
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_duplicates_stored_once() {
    let (service, store) = setup().await;
    let barrier = Arc::new(Barrier::new(TASKS));

    let handles = (0..TASKS).map(|_| {
        let service = service.clone();
        let barrier = barrier.clone();
        tokio::spawn(async move {
            let verification = service
                .new_custom_transaction(input("IT services".to_string()))
                .await?;
            barrier.wait().await;
            service.save(verification).await
        })
    });

    let outcomes: Vec<SaveOutcome> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked").expect("save failed"))
        .collect();

    let created = outcomes.iter().filter(|o| !o.is_duplicate()).count();
    assert_eq!(created, 1);
    assert_eq!(store.len().await, 1);

    let ids: HashSet<_> = outcomes
        .iter()
        .map(|o| o.verification().entity.id.clone())
        .collect();
    assert_eq!(ids, HashSet::from([Some(Id::Number(1))]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_distinct_verifications_get_unique_ids() {
    let (service, store) = setup().await;
    let barrier = Arc::new(Barrier::new(TASKS));

    let handles = (0..TASKS).map(|i| {
        let service = service.clone();
        let barrier = barrier.clone();
        tokio::spawn(async move {
            let verification = service
                .new_custom_transaction(input(format!("Invoice {i}")))
                .await?;
            barrier.wait().await;
            service.save(verification).await
        })
    });

    let outcomes: Vec<SaveOutcome> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked").expect("save failed"))
        .collect();

    assert!(outcomes.iter().all(|o| !o.is_duplicate()));
    let ids: HashSet<_> = outcomes
        .iter()
        .map(|o| o.verification().entity.id.clone())
        .collect();
    assert_eq!(ids.len(), TASKS);
    assert_eq!(store.len().await, TASKS);

    let listed = service
        .get_all(&Id::from(1), &Id::from("fy2020"))
        .await
        .unwrap();
    assert_eq!(listed.len(), TASKS);
}
