//! PostgreSQL integration tests
//!
//! These tests use a shared PostgreSQL container for efficiency. Each test
//! works on its own user IDs, so they can run in parallel:
//!
//! ```bash
//! cargo test -p booking-store --test postgres_integration
//! ```

use std::sync::Arc;

use booking_store::{BookingStore, PostgresBookingStore, StoreError, UpdateOptions};
use chrono::{NaiveDate, Utc};
use common::{BookingId, FlightId, HotelId, UserId};
use domain::{Booking, BookingStatus, CostBreakdown, CreateBooking};
use sqlx::PgPool;
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;
use uuid::Uuid;

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

/// Global shared container
static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            let temp_pool = PgPool::connect(&connection_string).await.unwrap();
            PostgresBookingStore::new(temp_pool.clone())
                .run_migrations()
                .await
                .unwrap();
            temp_pool.close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

async fn get_test_store() -> PostgresBookingStore {
    let info = get_container_info().await;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&info.connection_string)
        .await
        .unwrap();

    PostgresBookingStore::new(pool)
}

fn unique_user() -> UserId {
    UserId::new((Uuid::new_v4().as_u128() >> 66) as i64)
}

fn create_test_booking(user_id: UserId) -> Booking {
    let request = CreateBooking::new(
        user_id,
        FlightId::new(101),
        HotelId::new(202),
        NaiveDate::from_ymd_opt(2033, 8, 20).unwrap(),
        3,
        2,
    );
    Booking::pending(&request, CostBreakdown::quote(100.0, 2, 50.0, 3), Utc::now())
}

#[tokio::test]
async fn create_and_retrieve_booking() {
    let store = get_test_store().await;
    let booking = create_test_booking(unique_user());

    store.create(&booking).await.unwrap();

    let loaded = store.get(booking.id()).await.unwrap().unwrap();
    assert_eq!(loaded.id(), booking.id());
    assert_eq!(loaded.user_id(), booking.user_id());
    assert_eq!(loaded.travel_date(), booking.travel_date());
    assert_eq!(loaded.nights(), 3);
    assert_eq!(loaded.passengers(), 2);
    assert_eq!(loaded.flight_cost(), 200.0);
    assert_eq!(loaded.hotel_cost(), 150.0);
    assert_eq!(loaded.total_cost(), 350.0);
    assert_eq!(loaded.status(), BookingStatus::Pending);
    assert!(loaded.confirmed_at().is_none());
}

#[tokio::test]
async fn get_missing_booking_returns_none() {
    let store = get_test_store().await;
    assert!(store.get(BookingId::new()).await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_create_is_rejected() {
    let store = get_test_store().await;
    let booking = create_test_booking(unique_user());

    store.create(&booking).await.unwrap();
    let result = store.create(&booking).await;

    assert!(matches!(result, Err(StoreError::DuplicateId(id)) if id == booking.id()));
}

#[tokio::test]
async fn get_by_user_returns_insertion_order() {
    let store = get_test_store().await;
    let user = unique_user();

    let first = create_test_booking(user);
    let second = create_test_booking(user);
    let unrelated = create_test_booking(unique_user());
    let third = create_test_booking(user);

    for booking in [&first, &second, &unrelated, &third] {
        store.create(booking).await.unwrap();
    }

    let ids: Vec<_> = store
        .get_by_user(user)
        .await
        .unwrap()
        .iter()
        .map(Booking::id)
        .collect();
    assert_eq!(ids, vec![first.id(), second.id(), third.id()]);
}

#[tokio::test]
async fn conditional_update_confirms_pending_booking() {
    let store = get_test_store().await;
    let mut booking = create_test_booking(unique_user());
    store.create(&booking).await.unwrap();

    booking.confirm(Utc::now()).unwrap();
    store
        .update(&booking, UpdateOptions::expect_status(BookingStatus::Pending))
        .await
        .unwrap();

    let loaded = store.get(booking.id()).await.unwrap().unwrap();
    assert_eq!(loaded.status(), BookingStatus::Confirmed);
    assert!(loaded.confirmed_at().is_some());
    assert_eq!(loaded.total_cost(), 350.0);
}

#[tokio::test]
async fn conditional_update_detects_status_conflict() {
    let store = get_test_store().await;
    let booking = create_test_booking(unique_user());
    store.create(&booking).await.unwrap();

    let mut failed = booking.clone();
    failed.fail().unwrap();
    store
        .update(&failed, UpdateOptions::expect_status(BookingStatus::Pending))
        .await
        .unwrap();

    let mut confirmed = booking.clone();
    confirmed.confirm(Utc::now()).unwrap();
    let result = store
        .update(&confirmed, UpdateOptions::expect_status(BookingStatus::Pending))
        .await;

    assert!(matches!(
        result,
        Err(StoreError::StatusConflict {
            expected: BookingStatus::Pending,
            actual: BookingStatus::Failed,
            ..
        })
    ));
}

#[tokio::test]
async fn update_missing_booking_is_not_found() {
    let store = get_test_store().await;
    let booking = create_test_booking(unique_user());

    let result = store
        .update(&booking, UpdateOptions::expect_status(BookingStatus::Pending))
        .await;

    assert!(matches!(result, Err(StoreError::NotFound(_))));
}
