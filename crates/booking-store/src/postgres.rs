use async_trait::async_trait;
use common::{BookingId, FlightId, HotelId, UserId};
use domain::{Booking, BookingRecord, BookingStatus};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{
    Result, StoreError,
    store::{BookingStore, UpdateOptions},
};

const SELECT_COLUMNS: &str = r#"
    SELECT id, user_id, flight_id, hotel_id, travel_date, number_of_nights,
           number_of_passengers, flight_cost, hotel_cost, total_cost, status,
           created_at, confirmed_at
    FROM bookings
"#;

/// PostgreSQL-backed booking store implementation.
#[derive(Clone)]
pub struct PostgresBookingStore {
    pool: PgPool,
}

impl PostgresBookingStore {
    /// Creates a new PostgreSQL booking store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_booking(row: PgRow) -> Result<Booking> {
        let status: String = row.try_get("status")?;

        let record = BookingRecord {
            id: BookingId::from_uuid(row.try_get::<Uuid, _>("id")?),
            user_id: UserId::new(row.try_get("user_id")?),
            flight_id: FlightId::new(row.try_get("flight_id")?),
            hotel_id: HotelId::new(row.try_get("hotel_id")?),
            travel_date: row.try_get("travel_date")?,
            nights: column_to_u32(row.try_get("number_of_nights")?, "number_of_nights")?,
            passengers: column_to_u32(
                row.try_get("number_of_passengers")?,
                "number_of_passengers",
            )?,
            flight_cost: row.try_get("flight_cost")?,
            hotel_cost: row.try_get("hotel_cost")?,
            total_cost: row.try_get("total_cost")?,
            status: parse_status(&status)?,
            created_at: row.try_get("created_at")?,
            confirmed_at: row.try_get("confirmed_at")?,
        };

        Ok(record.into())
    }
}

fn column_to_u32(value: i32, column: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| StoreError::Corrupt(format!("{column} is negative: {value}")))
}

fn u32_to_column(value: u32, column: &str) -> Result<i32> {
    i32::try_from(value).map_err(|_| StoreError::Corrupt(format!("{column} out of range: {value}")))
}

fn parse_status(status: &str) -> Result<BookingStatus> {
    status
        .parse()
        .map_err(|e: domain::DomainError| StoreError::Corrupt(e.to_string()))
}

#[async_trait]
impl BookingStore for PostgresBookingStore {
    #[tracing::instrument(skip(self, booking), fields(booking_id = %booking.id()))]
    async fn create(&self, booking: &Booking) -> Result<()> {
        let record = BookingRecord::from(booking);

        sqlx::query(
            r#"
            INSERT INTO bookings (id, user_id, flight_id, hotel_id, travel_date, number_of_nights,
                                  number_of_passengers, flight_cost, hotel_cost, total_cost,
                                  status, created_at, confirmed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.user_id.value())
        .bind(record.flight_id.value())
        .bind(record.hotel_id.value())
        .bind(record.travel_date)
        .bind(u32_to_column(record.nights, "number_of_nights")?)
        .bind(u32_to_column(record.passengers, "number_of_passengers")?)
        .bind(record.flight_cost)
        .bind(record.hotel_cost)
        .bind(record.total_cost)
        .bind(record.status.as_str())
        .bind(record.created_at)
        .bind(record.confirmed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.constraint() == Some("bookings_pkey")
            {
                return StoreError::DuplicateId(record.id);
            }
            StoreError::Database(e)
        })?;

        Ok(())
    }

    async fn get(&self, id: BookingId) -> Result<Option<Booking>> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_booking).transpose()
    }

    async fn get_by_user(&self, user_id: UserId) -> Result<Vec<Booking>> {
        let rows = sqlx::query(&format!(
            "{SELECT_COLUMNS} WHERE user_id = $1 ORDER BY seq ASC"
        ))
        .bind(user_id.value())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_booking).collect()
    }

    #[tracing::instrument(skip(self, booking), fields(booking_id = %booking.id(), status = %booking.status()))]
    async fn update(&self, booking: &Booking, options: UpdateOptions) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET status = $2, confirmed_at = $3
            WHERE id = $1 AND ($4::VARCHAR IS NULL OR status = $4)
            "#,
        )
        .bind(booking.id().as_uuid())
        .bind(booking.status().as_str())
        .bind(booking.confirmed_at())
        .bind(options.expected_status.map(|s| s.as_str()))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        // Nothing matched: either the booking is gone or its status moved on.
        let current: Option<String> =
            sqlx::query_scalar("SELECT status FROM bookings WHERE id = $1")
                .bind(booking.id().as_uuid())
                .fetch_optional(&self.pool)
                .await?;

        match (current, options.expected_status) {
            (None, _) => Err(StoreError::NotFound(booking.id())),
            (Some(actual), Some(expected)) => Err(StoreError::StatusConflict {
                booking_id: booking.id(),
                expected,
                actual: parse_status(&actual)?,
            }),
            (Some(_), None) => Ok(()),
        }
    }
}
