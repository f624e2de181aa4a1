use crate::model::room::{
    AvailabilityQuery, AvailabilityResponse, RoomAvailabilityResponse, RoomResponse,
    RoomsResponse, SlotAvailabilityResponse,
};
use axum::{
    extract::{Query, State},
    Json,
};
use garde::Validate;
use kernel::{
    availability,
    model::{booking::DateBookingView, slot::format_time},
};
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn show_room_list(State(registry): State<AppRegistry>) -> Json<RoomsResponse> {
    let items = registry
        .room_catalog()
        .rooms()
        .iter()
        .map(RoomResponse::from)
        .collect();
    Json(RoomsResponse { items })
}

/// 指定日の全室・全スロットの空き状況を返す
pub async fn show_availability(
    Query(query): Query<AvailabilityQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<AvailabilityResponse>> {
    query.validate(&())?;

    let grid = registry.slot_grid();
    let catalog = registry.room_catalog();
    let bookings = registry.booking_repository().find_by_date(query.date).await?;
    let view = DateBookingView::new(query.date, bookings);

    let mut rooms = Vec::with_capacity(catalog.rooms().len());
    for room in catalog.rooms() {
        let mut slots = Vec::with_capacity(grid.last_index());
        for start in grid.bookable_starts() {
            let end = grid
                .next_slot(start)
                .unwrap_or_else(|| grid.close());
            let conflict = availability::find_conflict(&view, &room.id, start, end, &grid)?;
            slots.push(SlotAvailabilityResponse {
                start: format_time(start),
                end: format_time(end),
                available: conflict.is_none(),
                booked_by: conflict.map(|b| b.user.full_name.clone()),
                purpose: conflict.map(|b| b.user.purpose.clone()),
            });
        }
        rooms.push(RoomAvailabilityResponse {
            id: room.id.clone(),
            name: room.name.clone(),
            capacity: room.capacity,
            slots,
        });
    }

    Ok(Json(AvailabilityResponse {
        date: query.date,
        rooms,
    }))
}
