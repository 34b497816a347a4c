use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};

use crate::entities::car::{self, StringList};
use crate::entities::booking;
use crate::error::{AppError, AppResult};
use crate::handlers::public::CarsResponse;
use crate::utils::availability::{deletion_blocked, restore_unit};
use crate::AppState;

// ============ Car Management ============

#[derive(Debug, Deserialize)]
pub struct CarPayload {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
    pub features: Option<Vec<String>>,
    pub details: Option<Vec<String>>,
    pub quantity: Option<i32>,
    pub tags: Option<Vec<String>>,
}

struct ValidatedCar {
    name: String,
    category: Option<String>,
    price: String,
    image: String,
    features: StringList,
    details: StringList,
    quantity: i32,
    tags: StringList,
}

/// Name, price, image and quantity are required; list fields default to
/// empty. Quantity is stored as given.
fn validate_car(payload: CarPayload) -> AppResult<ValidatedCar> {
    let missing =
        || AppError::BadRequest("Name, price, image and quantity are required.".to_string());

    Ok(ValidatedCar {
        name: payload
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(missing)?,
        category: payload.category,
        price: payload
            .price
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(missing)?,
        image: payload
            .image
            .filter(|i| !i.trim().is_empty())
            .ok_or_else(missing)?,
        features: StringList(payload.features.unwrap_or_default()),
        details: StringList(payload.details.unwrap_or_default()),
        quantity: payload.quantity.ok_or_else(missing)?,
        tags: StringList(payload.tags.unwrap_or_default()),
    })
}

/// List all cars (admin)
pub async fn list_cars(State(state): State<AppState>) -> AppResult<Json<CarsResponse>> {
    let cars = car::Entity::find().all(&state.db).await?;

    Ok(Json(CarsResponse {
        success: true,
        cars,
    }))
}

/// Add a new car (admin)
pub async fn create_car(
    State(state): State<AppState>,
    Json(payload): Json<CarPayload>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let validated = validate_car(payload)?;

    let new_car = car::ActiveModel {
        name: Set(validated.name),
        category: Set(validated.category),
        price: Set(Some(validated.price)),
        image: Set(Some(validated.image)),
        features: Set(validated.features),
        details: Set(validated.details),
        quantity: Set(validated.quantity),
        tags: Set(validated.tags),
        ..Default::default()
    };

    let inserted = new_car.insert(&state.db).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "message": "Car added successfully.",
            "id": inserted.id,
        })),
    ))
}

/// Update an existing car (admin)
pub async fn update_car(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CarPayload>,
) -> AppResult<Json<serde_json::Value>> {
    let validated = validate_car(payload)?;

    let existing = car::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Car not found.".to_string()))?;

    let mut active: car::ActiveModel = existing.into();
    active.name = Set(validated.name);
    active.category = Set(validated.category);
    active.price = Set(Some(validated.price));
    active.image = Set(Some(validated.image));
    active.features = Set(validated.features);
    active.details = Set(validated.details);
    active.quantity = Set(validated.quantity);
    active.tags = Set(validated.tags);
    active.update(&state.db).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Car updated successfully.",
    })))
}

/// Delete a car (admin). Refused while any booking references it.
pub async fn delete_car(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    let dependent = booking::Entity::find()
        .filter(booking::Column::CarId.eq(id))
        .count(&state.db)
        .await?;

    if deletion_blocked(dependent) {
        return Err(AppError::Conflict(
            "Cannot delete this car because it has existing bookings.".to_string(),
        ));
    }

    let result = car::Entity::delete_by_id(id).exec(&state.db).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Car not found.".to_string()));
    }

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Car deleted successfully.",
    })))
}

// ============ Booking Management ============

#[derive(Debug, Serialize)]
pub struct BookingInfo {
    pub id: i32,
    pub car_id: i32,
    pub car_name: String,
    pub car_image: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct BookingsResponse {
    pub success: bool,
    pub bookings: Vec<BookingInfo>,
}

/// List all bookings joined with car name/image, newest start date first
pub async fn list_bookings(State(state): State<AppState>) -> AppResult<Json<BookingsResponse>> {
    let bookings = booking::Entity::find()
        .order_by_desc(booking::Column::StartDate)
        .all(&state.db)
        .await?;
    let cars = car::Entity::find().all(&state.db).await?;

    let responses: Vec<BookingInfo> = bookings
        .into_iter()
        .map(|b| {
            let car = cars.iter().find(|c| c.id == b.car_id);
            BookingInfo {
                id: b.id,
                car_id: b.car_id,
                car_name: car.map(|c| c.name.clone()).unwrap_or_default(),
                car_image: car.and_then(|c| c.image.clone()),
                start_date: b.start_date,
                end_date: b.end_date,
                customer_name: b.customer_name,
                customer_phone: b.customer_phone,
                customer_email: b.customer_email,
                created_at: b.created_at.with_timezone(&Utc),
            }
        })
        .collect();

    Ok(Json(BookingsResponse {
        success: true,
        bookings: responses,
    }))
}

/// Cancel a booking (admin), restoring one unit to the car
///
/// Delete and restore run inside one transaction with the car row locked,
/// mirroring the creation path.
pub async fn cancel_booking(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    let txn = state.db.begin().await?;

    let booking = booking::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found.".to_string()))?;

    let car = car::Entity::find_by_id(booking.car_id)
        .lock_exclusive()
        .one(&txn)
        .await?;

    // The row may have been cancelled concurrently between the lookup and
    // the car lock; restoring a unit for a no-op delete would inflate
    // quantity.
    let result = booking::Entity::delete_by_id(id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Booking not found.".to_string()));
    }

    if let Some(car) = car {
        let quantity = car.quantity;
        let mut active: car::ActiveModel = car.into();
        active.quantity = Set(restore_unit(quantity));
        active.update(&txn).await?;
    }

    txn.commit().await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Booking cancelled successfully.",
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_payload() -> CarPayload {
        CarPayload {
            name: Some("JETOUR X50".to_string()),
            category: Some("SUV".to_string()),
            price: Some("130 000 FCFA/day".to_string()),
            image: Some("assets/x50.jpg".to_string()),
            features: Some(vec!["Compact".to_string()]),
            details: None,
            quantity: Some(3),
            tags: Some(vec!["SUV".to_string()]),
        }
    }

    #[test]
    fn test_validate_car_accepts_full_payload() {
        let validated = validate_car(full_payload()).unwrap();
        assert_eq!(validated.name, "JETOUR X50");
        assert_eq!(validated.quantity, 3);
        // Absent list fields normalize to empty lists, not nulls.
        assert!(validated.details.0.is_empty());
    }

    #[test]
    fn test_validate_car_rejects_missing_required_fields() {
        let mut payload = full_payload();
        payload.quantity = None;
        assert!(matches!(
            validate_car(payload),
            Err(AppError::BadRequest(_))
        ));

        let mut payload = full_payload();
        payload.name = Some("   ".to_string());
        assert!(matches!(
            validate_car(payload),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_validate_car_keeps_quantity_as_given() {
        // Negative quantities are stored untouched; only presence is checked.
        let mut payload = full_payload();
        payload.quantity = Some(-2);
        assert_eq!(validate_car(payload).unwrap().quantity, -2);
    }
}
