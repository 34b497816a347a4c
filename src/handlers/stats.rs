use std::collections::BTreeMap;

use axum::{extract::State, Json};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde::Serialize;

use crate::entities::{booking, car};
use crate::error::AppResult;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub success: bool,
    pub total_cars: u64,
    pub total_bookings: u64,
}

/// Overview counts: total cars, total bookings
pub async fn overview(State(state): State<AppState>) -> AppResult<Json<OverviewResponse>> {
    let total_cars = car::Entity::find().count(&state.db).await?;
    let total_bookings = booking::Entity::find().count(&state.db).await?;

    Ok(Json(OverviewResponse {
        success: true,
        total_cars,
        total_bookings,
    }))
}

#[derive(Debug, PartialEq, Serialize)]
pub struct CarBookingCount {
    pub car_name: String,
    pub booking_count: u64,
}

#[derive(Debug, Serialize)]
pub struct RankingResponse {
    pub success: bool,
    pub cars: Vec<CarBookingCount>,
}

/// Top 5 cars by booking count, descending
pub async fn most_requested_cars(
    State(state): State<AppState>,
) -> AppResult<Json<RankingResponse>> {
    let cars = car::Entity::find().all(&state.db).await?;
    let bookings = booking::Entity::find().all(&state.db).await?;

    let mut ranking = rank_by_bookings(&cars, &bookings);
    ranking.truncate(5);

    Ok(Json(RankingResponse {
        success: true,
        cars: ranking,
    }))
}

/// Full booking-count ranking, descending
pub async fn car_popularity(State(state): State<AppState>) -> AppResult<Json<RankingResponse>> {
    let cars = car::Entity::find().all(&state.db).await?;
    let bookings = booking::Entity::find().all(&state.db).await?;

    Ok(Json(RankingResponse {
        success: true,
        cars: rank_by_bookings(&cars, &bookings),
    }))
}

#[derive(Debug, PartialEq, Serialize)]
pub struct MonthlyCount {
    pub month: String,
    pub booking_count: u64,
}

#[derive(Debug, Serialize)]
pub struct BookingsPerMonthResponse {
    pub success: bool,
    pub months: Vec<MonthlyCount>,
}

/// Bookings bucketed by calendar month of start date, chronological
pub async fn bookings_per_month(
    State(state): State<AppState>,
) -> AppResult<Json<BookingsPerMonthResponse>> {
    let bookings = booking::Entity::find().all(&state.db).await?;

    Ok(Json(BookingsPerMonthResponse {
        success: true,
        months: month_buckets(&bookings),
    }))
}

#[derive(Debug, PartialEq, Serialize)]
pub struct CarUtilization {
    pub car_name: String,
    pub total_quantity: i32,
    pub booking_count: u64,
}

#[derive(Debug, Serialize)]
pub struct UtilizationResponse {
    pub success: bool,
    pub cars: Vec<CarUtilization>,
}

/// Per-car quantity vs booking count, including cars with zero bookings
pub async fn utilization(State(state): State<AppState>) -> AppResult<Json<UtilizationResponse>> {
    let cars = car::Entity::find().all(&state.db).await?;
    let bookings = booking::Entity::find().all(&state.db).await?;

    Ok(Json(UtilizationResponse {
        success: true,
        cars: utilization_rows(&cars, &bookings),
    }))
}

// ============ Aggregation ============

fn bookings_for(car_id: i32, bookings: &[booking::Model]) -> u64 {
    bookings.iter().filter(|b| b.car_id == car_id).count() as u64
}

/// Booking-count ranking. Cars without bookings are excluded, like the
/// inner join it replaces.
fn rank_by_bookings(cars: &[car::Model], bookings: &[booking::Model]) -> Vec<CarBookingCount> {
    let mut rows: Vec<CarBookingCount> = cars
        .iter()
        .filter_map(|c| {
            let count = bookings_for(c.id, bookings);
            (count > 0).then(|| CarBookingCount {
                car_name: c.name.clone(),
                booking_count: count,
            })
        })
        .collect();

    rows.sort_by(|a, b| b.booking_count.cmp(&a.booking_count));
    rows
}

fn month_buckets(bookings: &[booking::Model]) -> Vec<MonthlyCount> {
    let mut buckets: BTreeMap<String, u64> = BTreeMap::new();
    for b in bookings {
        *buckets
            .entry(b.start_date.format("%Y-%m").to_string())
            .or_default() += 1;
    }

    buckets
        .into_iter()
        .map(|(month, booking_count)| MonthlyCount {
            month,
            booking_count,
        })
        .collect()
}

/// Left-join equivalent: every car appears, zero-booking cars included.
fn utilization_rows(cars: &[car::Model], bookings: &[booking::Model]) -> Vec<CarUtilization> {
    let mut rows: Vec<CarUtilization> = cars
        .iter()
        .map(|c| CarUtilization {
            car_name: c.name.clone(),
            total_quantity: c.quantity,
            booking_count: bookings_for(c.id, bookings),
        })
        .collect();

    rows.sort_by(|a, b| b.booking_count.cmp(&a.booking_count));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::car::StringList;
    use chrono::{DateTime, NaiveDate};

    fn test_car(id: i32, name: &str, quantity: i32) -> car::Model {
        car::Model {
            id,
            name: name.to_string(),
            category: None,
            price: None,
            image: None,
            features: StringList::default(),
            details: StringList::default(),
            quantity,
            tags: StringList::default(),
        }
    }

    fn test_booking(id: i32, car_id: i32, start: &str, end: &str) -> booking::Model {
        booking::Model {
            id,
            car_id,
            start_date: start.parse::<NaiveDate>().unwrap(),
            end_date: end.parse::<NaiveDate>().unwrap(),
            customer_name: "Alice Dubois".to_string(),
            customer_phone: None,
            customer_email: None,
            created_at: DateTime::parse_from_rfc3339("2024-01-01T00:00:00+00:00").unwrap(),
        }
    }

    #[test]
    fn test_ranking_orders_desc_and_skips_zero() {
        let cars = vec![
            test_car(1, "JETOUR T2", 5),
            test_car(2, "JETOUR X50", 3),
            test_car(3, "JMC GRAND AVENUE", 4),
        ];
        let bookings = vec![
            test_booking(1, 2, "2024-03-05", "2024-03-08"),
            test_booking(2, 2, "2024-04-01", "2024-04-03"),
            test_booking(3, 1, "2024-03-20", "2024-03-25"),
        ];

        let ranking = rank_by_bookings(&cars, &bookings);
        assert_eq!(
            ranking,
            vec![
                CarBookingCount {
                    car_name: "JETOUR X50".to_string(),
                    booking_count: 2,
                },
                CarBookingCount {
                    car_name: "JETOUR T2".to_string(),
                    booking_count: 1,
                },
            ]
        );
    }

    #[test]
    fn test_month_buckets_groups_by_start_month() {
        let bookings = vec![
            test_booking(1, 1, "2024-03-05", "2024-03-08"),
            test_booking(2, 1, "2024-03-20", "2024-03-25"),
            test_booking(3, 1, "2024-01-10", "2024-01-12"),
        ];

        assert_eq!(
            month_buckets(&bookings),
            vec![
                MonthlyCount {
                    month: "2024-01".to_string(),
                    booking_count: 1,
                },
                MonthlyCount {
                    month: "2024-03".to_string(),
                    booking_count: 2,
                },
            ]
        );
    }

    #[test]
    fn test_utilization_includes_idle_cars() {
        let cars = vec![test_car(1, "JETOUR T2", 5), test_car(2, "JETOUR X50", 3)];
        let bookings = vec![test_booking(1, 1, "2024-03-05", "2024-03-08")];

        let rows = utilization_rows(&cars, &bookings);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].car_name, "JETOUR T2");
        assert_eq!(rows[0].booking_count, 1);
        assert_eq!(rows[1].car_name, "JETOUR X50");
        assert_eq!(rows[1].total_quantity, 3);
        assert_eq!(rows[1].booking_count, 0);
    }
}
