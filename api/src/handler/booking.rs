use crate::model::booking::{
    BookingListQuery, BookingResponse, BookingsResponse, CreateBookingRequest,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::{
    availability,
    model::{
        booking::{event::CancelBooking, BookingStatus, DateBookingView},
        id::BookingId,
    },
    notifier::{BookingChange, ChangeKind},
    validator,
};
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn register_booking(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    req.validate(&())?;

    // 事前検証。検証エラーはすべてストアへの書き込み前に検出される
    let event = validator::validate(
        req.into(),
        &registry.room_catalog(),
        &registry.slot_grid(),
    )?;

    // 空き確認。リポジトリはコミット直前にもう一度確認するが、
    // 大半の競合はここで弾ける
    let bookings = registry.booking_repository().find_by_date(event.date).await?;
    let view = DateBookingView::new(event.date, bookings);
    availability::ensure_available(
        &view,
        &event.room_id,
        event.slot.start,
        event.slot.end,
        &registry.slot_grid(),
    )?;

    let booking = registry.booking_repository().create(event).await?;

    registry.notifier().publish(
        booking.date,
        BookingChange::from_booking(ChangeKind::Created, &booking),
    );

    Ok((StatusCode::CREATED, Json(booking.into())))
}

pub async fn show_booking_list(
    Query(query): Query<BookingListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingsResponse>> {
    query.validate(&())?;

    let bookings = registry
        .booking_repository()
        .find_by_date(query.date)
        .await?
        .into_iter()
        .filter(|b| b.is_active())
        .collect::<Vec<_>>();
    Ok(Json(bookings.into()))
}

pub async fn show_booking(
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingResponse>> {
    registry
        .booking_repository()
        .find_by_id(booking_id)
        .await
        .map(BookingResponse::from)
        .map(Json)
}

pub async fn cancel_booking(
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    let booking = registry.booking_repository().find_by_id(booking_id).await?;

    // キャンセル済みへの再キャンセルは何もしない（イベントも流さない）
    if booking.status == BookingStatus::Cancelled {
        return Ok(StatusCode::OK);
    }

    registry
        .booking_repository()
        .cancel(CancelBooking::new(booking_id))
        .await?;

    registry.notifier().publish(
        booking.date,
        BookingChange::from_booking(ChangeKind::Cancelled, &booking),
    );

    Ok(StatusCode::OK)
}
