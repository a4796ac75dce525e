use booking_store::InMemoryBookingStore;
use chrono::{Days, Utc};
use common::{FlightId, HotelId, UserId};
use criterion::{Criterion, criterion_group, criterion_main};
use domain::CreateBooking;
use orchestrator::{
    BookingOrchestrator, InMemoryIdentityGateway, InMemoryInventoryGateway,
    InMemoryNotificationGateway, OrchestratorConfig,
};

type BenchOrchestrator = BookingOrchestrator<
    InMemoryBookingStore,
    InMemoryInventoryGateway,
    InMemoryIdentityGateway,
    InMemoryNotificationGateway,
>;

fn request() -> CreateBooking {
    let travel_date = Utc::now()
        .date_naive()
        .checked_add_days(Days::new(30))
        .unwrap();
    CreateBooking::new(
        UserId::new(1),
        FlightId::new(1),
        HotelId::new(1),
        travel_date,
        3,
        2,
    )
}

async fn setup() -> BenchOrchestrator {
    let inventory = InMemoryInventoryGateway::new();
    inventory
        .add_flight(FlightId::new(1), "BN-001", u32::MAX, 100.0)
        .await;
    inventory
        .add_hotel(HotelId::new(1), "Bench Hotel", u32::MAX, 50.0)
        .await;
    let identity = InMemoryIdentityGateway::new();
    identity.register_user(UserId::new(1));

    BookingOrchestrator::new(
        InMemoryBookingStore::new(),
        inventory,
        identity,
        InMemoryNotificationGateway::new(),
        OrchestratorConfig::default(),
    )
}

fn bench_create_booking(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let orchestrator = rt.block_on(setup());

    c.bench_function("orchestrator/create_booking", |b| {
        b.iter(|| {
            rt.block_on(async {
                orchestrator.create_booking(request()).await.unwrap();
            });
        });
    });
}

fn bench_create_and_confirm(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let orchestrator = rt.block_on(setup());

    c.bench_function("orchestrator/create_and_confirm", |b| {
        b.iter(|| {
            rt.block_on(async {
                let booking = orchestrator.create_booking(request()).await.unwrap();
                orchestrator.confirm_booking(booking.id()).await.unwrap();
            });
        });
    });
}

fn bench_confirm_noop(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let orchestrator = rt.block_on(setup());
    let booking_id = rt.block_on(async {
        let booking = orchestrator.create_booking(request()).await.unwrap();
        orchestrator.confirm_booking(booking.id()).await.unwrap();
        booking.id()
    });

    c.bench_function("orchestrator/confirm_already_confirmed", |b| {
        b.iter(|| {
            rt.block_on(async {
                orchestrator.confirm_booking(booking_id).await.unwrap();
            });
        });
    });
}

criterion_group!(
    benches,
    bench_create_booking,
    bench_create_and_confirm,
    bench_confirm_noop
);
criterion_main!(benches);
