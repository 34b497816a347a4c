//! Inserts a batch of random historical bookings for demoing the admin
//! statistics. Wipes any existing bookings first.

use chrono::{Duration, Utc};
use rand::Rng;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use car_rental_backend::config::Config;
use car_rental_backend::db;
use car_rental_backend::entities::{booking, car};

const SAMPLE_CUSTOMERS: &[(&str, &str, &str)] = &[
    ("Alice Dubois", "699112233", "alice.d@example.com"),
    ("Bernard Talla", "677445566", "bernard.t@example.com"),
    ("Céline Ngassa", "655778899", "celine.n@example.com"),
    ("David Kamga", "698123456", "david.k@example.com"),
    ("Émilie Fotso", "676543210", "emilie.f@example.com"),
    ("Fabrice Wouansi", "654987654", "fabrice.w@example.com"),
];

const NUMBER_OF_BOOKINGS: usize = 80;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    let db = db::connect(&config)
        .await
        .expect("Failed to connect to database");

    let cars = car::Entity::find()
        .all(&db)
        .await
        .expect("Failed to load cars");
    if cars.is_empty() {
        tracing::error!("No cars found. Start the server once to seed the catalog.");
        return;
    }
    tracing::info!("{} cars found", cars.len());

    // Clear old bookings to avoid piling up duplicates
    booking::Entity::delete_many()
        .exec(&db)
        .await
        .expect("Failed to clear bookings");
    tracing::info!("Old bookings removed");

    let mut rng = rand::thread_rng();
    let today = Utc::now().date_naive();

    for _ in 0..NUMBER_OF_BOOKINGS {
        let car = &cars[rng.gen_range(0..cars.len())];
        let (name, phone, email) = SAMPLE_CUSTOMERS[rng.gen_range(0..SAMPLE_CUSTOMERS.len())];

        let start_date = today - Duration::days(rng.gen_range(1..=365));
        let end_date = start_date + Duration::days(rng.gen_range(1..=15));

        let new_booking = booking::ActiveModel {
            car_id: Set(car.id),
            start_date: Set(start_date),
            end_date: Set(end_date),
            customer_name: Set(name.to_string()),
            customer_phone: Set(Some(phone.to_string())),
            customer_email: Set(Some(email.to_string())),
            ..Default::default()
        };

        new_booking
            .insert(&db)
            .await
            .expect("Failed to insert booking");
    }

    tracing::info!("{} demo bookings inserted", NUMBER_OF_BOOKINGS);
}
