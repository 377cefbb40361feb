//! Integration tests for the atomic sign write.

use assert_matches::assert_matches;
use chrono::NaiveDate;
use contractly_core::amount::Amount;
use contractly_core::contract::{ContractFields, ContractStatus};
use contractly_core::signature::{SignatureMode, SignaturePayload};
use contractly_core::types::DbId;
use contractly_core::vendor::VendorType;
use contractly_db::models::contract::Contract;
use contractly_db::models::user::CreateUser;
use contractly_db::repositories::{ContractRepo, SignatureRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn vendor_with_contract(pool: &PgPool, status: ContractStatus) -> (DbId, Contract) {
    let vendor = UserRepo::create(
        pool,
        &CreateUser {
            email: "signer@test.com".to_string(),
            password_hash: "x".to_string(),
            name: "Signer".to_string(),
            vendor_type: VendorType::Florist,
        },
    )
    .await
    .unwrap();
    let fields = ContractFields {
        client_name: "Alice".to_string(),
        event_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
        venue: String::new(),
        service_package: "Bouquets".to_string(),
        amount: Amount::from_cents(90_000).unwrap(),
        content: String::new(),
    };
    let contract = ContractRepo::create(pool, vendor.id, &fields, status).await.unwrap();
    (vendor.id, contract)
}

fn typed(name: &str) -> SignaturePayload {
    SignaturePayload {
        mode: SignatureMode::Typed,
        data: name.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn sign_flips_status_and_stores_signature(pool: PgPool) {
    let (vendor_id, contract) = vendor_with_contract(&pool, ContractStatus::Final).await;

    let signature = SignatureRepo::sign(&pool, contract.id, vendor_id, &typed("Alice Smith"))
        .await
        .unwrap()
        .expect("final contract should sign");
    assert_eq!(signature.contract_id, contract.id);
    assert_eq!(signature.mode, "typed");
    assert_eq!(signature.data, "Alice Smith");

    let stored = ContractRepo::find_owned(&pool, contract.id, vendor_id).await.unwrap().unwrap();
    assert_eq!(stored.status().unwrap(), ContractStatus::Signed);

    let found = SignatureRepo::find_by_contract(&pool, contract.id).await.unwrap();
    assert_eq!(found.map(|s| s.id), Some(signature.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sign_on_draft_writes_nothing(pool: PgPool) {
    let (vendor_id, contract) = vendor_with_contract(&pool, ContractStatus::Draft).await;

    let result = SignatureRepo::sign(&pool, contract.id, vendor_id, &typed("Alice")).await.unwrap();
    assert!(result.is_none());
    assert!(SignatureRepo::find_by_contract(&pool, contract.id).await.unwrap().is_none());

    let stored = ContractRepo::find_owned(&pool, contract.id, vendor_id).await.unwrap().unwrap();
    assert_eq!(stored.status().unwrap(), ContractStatus::Draft);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sign_by_non_owner_writes_nothing(pool: PgPool) {
    let (_vendor_id, contract) = vendor_with_contract(&pool, ContractStatus::Final).await;

    let result = SignatureRepo::sign(&pool, contract.id, 999_999, &typed("Mallory")).await.unwrap();
    assert!(result.is_none());
    assert!(SignatureRepo::find_by_contract(&pool, contract.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_sign_matches_nothing(pool: PgPool) {
    let (vendor_id, contract) = vendor_with_contract(&pool, ContractStatus::Final).await;

    SignatureRepo::sign(&pool, contract.id, vendor_id, &typed("First")).await.unwrap().unwrap();
    let second = SignatureRepo::sign(&pool, contract.id, vendor_id, &typed("Second")).await.unwrap();
    assert!(second.is_none());

    let stored = SignatureRepo::find_by_contract(&pool, contract.id).await.unwrap().unwrap();
    assert_eq!(stored.data, "First");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_signature_violates_unique_constraint(pool: PgPool) {
    let (vendor_id, contract) = vendor_with_contract(&pool, ContractStatus::Final).await;
    SignatureRepo::sign(&pool, contract.id, vendor_id, &typed("First")).await.unwrap().unwrap();

    let err = sqlx::query("INSERT INTO signatures (contract_id, mode, data) VALUES ($1, 'typed', 'X')")
        .bind(contract.id)
        .execute(&pool)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        sqlx::Error::Database(ref db) if db.constraint() == Some("uq_signatures_contract_id")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_signers_produce_exactly_one_signature(pool: PgPool) {
    let (vendor_id, contract) = vendor_with_contract(&pool, ContractStatus::Final).await;

    let a = typed("Signer A");
    let b = typed("Signer B");
    let (first, second) = tokio::join!(
        SignatureRepo::sign(&pool, contract.id, vendor_id, &a),
        SignatureRepo::sign(&pool, contract.id, vendor_id, &b),
    );

    let outcomes = [first.unwrap(), second.unwrap()];
    let winners = outcomes.iter().filter(|o| o.is_some()).count();
    assert_eq!(winners, 1, "exactly one signer must win");

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM signatures WHERE contract_id = $1")
        .bind(contract.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 1);
}
