use crate::model::stats::{RoomStatsResponse, StatsResponse};
use axum::{extract::State, Json};
use kernel::model::booking::BookingStatus;
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn show_stats(State(registry): State<AppRegistry>) -> AppResult<Json<StatsResponse>> {
    let bookings = registry.booking_repository().find_all().await?;
    let catalog = registry.room_catalog();

    let active_bookings = bookings.iter().filter(|b| b.is_active()).count();
    let cancelled_bookings = bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Cancelled)
        .count();

    let rooms = catalog
        .rooms()
        .iter()
        .map(|room| RoomStatsResponse {
            id: room.id.clone(),
            name: room.name.clone(),
            active: bookings
                .iter()
                .filter(|b| b.room_id == room.id && b.is_active())
                .count(),
            cancelled: bookings
                .iter()
                .filter(|b| b.room_id == room.id && b.status == BookingStatus::Cancelled)
                .count(),
        })
        .collect();

    Ok(Json(StatsResponse {
        total_bookings: bookings.len(),
        active_bookings,
        cancelled_bookings,
        rooms,
    }))
}
