use std::collections::BTreeSet;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};

use crate::entities::{booking, car, comment};
use crate::error::{AppError, AppResult};
use crate::utils::availability::{consume_unit, has_free_unit, ranges_overlap};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct CarsResponse {
    pub success: bool,
    pub cars: Vec<car::Model>,
}

#[derive(Debug, Deserialize)]
pub struct ListCarsQuery {
    pub tag: Option<String>,
}

/// List the catalog, optionally filtered by exact tag membership
pub async fn list_cars(
    State(state): State<AppState>,
    Query(query): Query<ListCarsQuery>,
) -> AppResult<Json<CarsResponse>> {
    let mut cars = car::Entity::find().all(&state.db).await?;

    if let Some(tag) = query.tag {
        cars.retain(|c| c.tags.0.iter().any(|t| t == &tag));
    }

    Ok(Json(CarsResponse {
        success: true,
        cars,
    }))
}

#[derive(Debug, Serialize)]
pub struct TagsResponse {
    pub success: bool,
    pub tags: Vec<String>,
}

/// List the distinct tags across the whole catalog
pub async fn list_tags(State(state): State<AppState>) -> AppResult<Json<TagsResponse>> {
    let cars = car::Entity::find().all(&state.db).await?;

    Ok(Json(TagsResponse {
        success: true,
        tags: distinct_tags(&cars),
    }))
}

fn distinct_tags(cars: &[car::Model]) -> Vec<String> {
    let tags: BTreeSet<String> = cars
        .iter()
        .flat_map(|c| c.tags.0.iter().cloned())
        .collect();
    tags.into_iter().collect()
}

// ============ Comments ============

#[derive(Debug, Deserialize)]
pub struct CommentsQuery {
    pub car_id: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct CarSummary {
    pub id: i32,
    pub name: String,
    pub category: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CommentView {
    pub author: String,
    pub rating: i32,
    pub comment_text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CarCommentsResponse {
    pub success: bool,
    pub car: CarSummary,
    pub comments: Vec<CommentView>,
}

/// Get a car's summary plus its comments, newest first
pub async fn car_comments(
    State(state): State<AppState>,
    Query(query): Query<CommentsQuery>,
) -> AppResult<Json<CarCommentsResponse>> {
    let car_id = query
        .car_id
        .ok_or_else(|| AppError::BadRequest("Car id is required.".to_string()))?;

    let car = car::Entity::find_by_id(car_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Car not found.".to_string()))?;

    let comments = comment::Entity::find()
        .filter(comment::Column::CarId.eq(car.id))
        .order_by_desc(comment::Column::CreatedAt)
        .all(&state.db)
        .await?;

    Ok(Json(CarCommentsResponse {
        success: true,
        car: CarSummary {
            id: car.id,
            name: car.name,
            category: car.category,
            image: car.image,
        },
        comments: comments
            .into_iter()
            .map(|c| CommentView {
                author: c.author,
                rating: c.rating,
                comment_text: c.comment_text,
                created_at: c.created_at.with_timezone(&Utc),
            })
            .collect(),
    }))
}

// ============ Booking ============

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub car_id: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Create a booking
///
/// The availability check and both writes run inside one transaction with
/// the car row locked, so two requests racing for the last unit resolve to
/// exactly one acceptance.
pub async fn create_booking(
    State(state): State<AppState>,
    Json(payload): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let missing = || AppError::BadRequest("Missing booking information.".to_string());
    let car_id = payload.car_id.ok_or_else(missing)?;
    let start_date = payload.start_date.ok_or_else(missing)?;
    let end_date = payload.end_date.ok_or_else(missing)?;
    let name = payload
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(missing)?;

    let txn = state.db.begin().await?;

    let car = car::Entity::find_by_id(car_id)
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Car not found.".to_string()))?;

    if car.quantity <= 0 {
        return Err(AppError::Conflict(
            "Sorry, this vehicle model is no longer available.".to_string(),
        ));
    }

    // Bookings sharing an endpoint date with the request count as
    // overlapping.
    let existing = booking::Entity::find()
        .filter(booking::Column::CarId.eq(car.id))
        .all(&txn)
        .await?;
    let overlapping = existing
        .iter()
        .filter(|b| ranges_overlap(b.start_date, b.end_date, start_date, end_date))
        .count() as u64;

    if !has_free_unit(car.quantity, overlapping) {
        return Err(AppError::Conflict(
            "Sorry, all units of this vehicle are already booked for the selected period. \
             Please choose other dates."
                .to_string(),
        ));
    }

    let new_booking = booking::ActiveModel {
        car_id: Set(car.id),
        start_date: Set(start_date),
        end_date: Set(end_date),
        customer_name: Set(name),
        customer_phone: Set(payload.phone),
        customer_email: Set(payload.email),
        ..Default::default()
    };
    new_booking.insert(&txn).await?;

    let quantity = car.quantity;
    let mut active: car::ActiveModel = car.into();
    active.quantity = Set(consume_unit(quantity));
    active.update(&txn).await?;

    txn.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "message": "Booking confirmed! You will receive a confirmation email shortly.",
        })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::car::StringList;

    fn car_with_tags(id: i32, tags: &[&str]) -> car::Model {
        car::Model {
            id,
            name: format!("Car {}", id),
            category: None,
            price: None,
            image: None,
            features: StringList::default(),
            details: StringList::default(),
            quantity: 1,
            tags: StringList(tags.iter().map(|t| t.to_string()).collect()),
        }
    }

    #[test]
    fn test_distinct_tags_deduplicates_and_sorts() {
        let cars = vec![
            car_with_tags(1, &["SUV", "Luxe"]),
            car_with_tags(2, &["SUV", "Famille"]),
            car_with_tags(3, &[]),
        ];

        assert_eq!(distinct_tags(&cars), vec!["Famille", "Luxe", "SUV"]);
    }

    #[test]
    fn test_distinct_tags_empty_catalog() {
        assert!(distinct_tags(&[]).is_empty());
    }
}
