use crate::sheet::SheetClient;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use derive_new::new;
use kernel::{
    availability,
    model::{
        booking::{
            event::{CancelBooking, CreateBooking},
            Booking, BookingStatus, DateBookingView,
        },
        id::BookingId,
        slot::SlotGrid,
    },
    repository::booking::BookingRepository,
};
use shared::error::AppResult;
use std::sync::Arc;

#[derive(new)]
pub struct BookingRepositoryImpl {
    client: SheetClient,
    grid: Arc<SlotGrid>,
}

#[async_trait]
impl BookingRepository for BookingRepositoryImpl {
    async fn create(&self, event: CreateBooking) -> AppResult<Booking> {
        // コミット直前にその日の予約を取り直して再確認する（check-then-act）。
        // これで競合の窓は狭まるが消えはしないので、最終的な判定は
        // ストア側の楽観的並行性制御に委ねる。
        let bookings = self.client.fetch_rows(Some(event.date)).await?;
        let view = DateBookingView::new(event.date, bookings);
        availability::ensure_available(
            &view,
            &event.room_id,
            event.slot.start,
            event.slot.end,
            &self.grid,
        )?;

        let booking = Booking {
            booking_id: BookingId::new(),
            room_id: event.room_id,
            date: event.date,
            slot: event.slot,
            status: BookingStatus::Active,
            user: event.user,
            created_at: Utc::now(),
        };
        // ストアが 409 を返した場合は SlotConflict がそのまま伝播する
        self.client.append_row(&booking).await?;

        tracing::info!(
            booking_id = %booking.booking_id,
            room_id = %booking.room_id,
            date = %booking.date,
            "booking committed"
        );
        Ok(booking)
    }

    async fn cancel(&self, event: CancelBooking) -> AppResult<()> {
        self.client
            .update_status(event.booking_id, BookingStatus::Cancelled)
            .await
    }

    async fn find_by_date(&self, date: NaiveDate) -> AppResult<Vec<Booking>> {
        self.client.fetch_rows(Some(date)).await
    }

    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Booking> {
        self.client.fetch_row(booking_id).await
    }

    async fn find_all(&self) -> AppResult<Vec<Booking>> {
        self.client.fetch_rows(None).await
    }
}
