use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
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
    repository::{booking::BookingRepository, health::HealthCheckRepository},
};
use shared::error::{AppError, AppResult};
use std::sync::Arc;
use tokio::sync::Mutex;

/// インメモリのストア実装。外部サービスなしのローカル起動とテストで使う。
/// ひとつのロックの中で再確認と書き込みを行うため、外部ストアの
/// 「コミット時に競合を拒否する」契約を決定的に再現できる。
pub struct InMemoryBookingRepository {
    bookings: Arc<Mutex<Vec<Booking>>>,
    grid: Arc<SlotGrid>,
}

impl InMemoryBookingRepository {
    pub fn new(grid: Arc<SlotGrid>) -> Self {
        Self {
            bookings: Arc::new(Mutex::new(Vec::new())),
            grid,
        }
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn create(&self, event: CreateBooking) -> AppResult<Booking> {
        let mut bookings = self.bookings.lock().await;

        let day: Vec<Booking> = bookings
            .iter()
            .filter(|b| b.date == event.date)
            .cloned()
            .collect();
        let view = DateBookingView::new(event.date, day);
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
        bookings.push(booking.clone());
        Ok(booking)
    }

    async fn cancel(&self, event: CancelBooking) -> AppResult<()> {
        let mut bookings = self.bookings.lock().await;
        let booking = bookings
            .iter_mut()
            .find(|b| b.booking_id == event.booking_id)
            .ok_or_else(|| {
                AppError::EntityNotFound(format!("booking not found: {}", event.booking_id))
            })?;
        // レコードは消さない（ソフトキャンセル）
        booking.status = BookingStatus::Cancelled;
        Ok(())
    }

    async fn find_by_date(&self, date: NaiveDate) -> AppResult<Vec<Booking>> {
        let bookings = self.bookings.lock().await;
        Ok(bookings.iter().filter(|b| b.date == date).cloned().collect())
    }

    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Booking> {
        let bookings = self.bookings.lock().await;
        bookings
            .iter()
            .find(|b| b.booking_id == booking_id)
            .cloned()
            .ok_or_else(|| AppError::EntityNotFound(format!("booking not found: {booking_id}")))
    }

    async fn find_all(&self) -> AppResult<Vec<Booking>> {
        let bookings = self.bookings.lock().await;
        Ok(bookings.clone())
    }
}

/// インメモリ構成のヘルスチェック。ストアはプロセス内にあるので常に健康。
pub struct InMemoryHealthCheckRepository;

#[async_trait]
impl HealthCheckRepository for InMemoryHealthCheckRepository {
    async fn check_store(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::{
        booking::UserDetails,
        id::RoomId,
        slot::{parse_time, SlotRange},
    };
    use shared::config::ScheduleConfig;

    fn grid() -> Arc<SlotGrid> {
        Arc::new(
            SlotGrid::from_config(&ScheduleConfig {
                open: "09:00".into(),
                close: "17:00".into(),
                slot_minutes: 30,
            })
            .unwrap(),
        )
    }

    fn create_event(room: &str, start: &str, end: &str) -> CreateBooking {
        CreateBooking::new(
            RoomId::new(room),
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            SlotRange::new(parse_time(start).unwrap(), parse_time(end).unwrap()),
            UserDetails {
                full_name: "Taro Yamada".into(),
                employee_id: "E-1001".into(),
                phone_number: "080-0000-0000".into(),
                purpose: "Weekly sync".into(),
            },
        )
    }

    #[tokio::test]
    async fn create_then_list_then_cancel() -> anyhow::Result<()> {
        let repo = InMemoryBookingRepository::new(grid());

        let booking = repo.create(create_event("conference-a", "10:00", "10:30")).await?;
        assert_eq!(booking.status, BookingStatus::Active);

        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let day = repo.find_by_date(date).await?;
        assert_eq!(day.len(), 1);

        repo.cancel(CancelBooking::new(booking.booking_id)).await?;
        // ソフトキャンセル：レコードは残り、status だけ変わる
        let day = repo.find_by_date(date).await?;
        assert_eq!(day.len(), 1);
        assert_eq!(day[0].status, BookingStatus::Cancelled);
        Ok(())
    }

    #[tokio::test]
    async fn second_commit_for_the_same_slot_gets_conflict() -> anyhow::Result<()> {
        let repo = InMemoryBookingRepository::new(grid());

        repo.create(create_event("conference-a", "10:00", "10:30")).await?;
        let err = repo
            .create(create_event("conference-a", "10:00", "10:30"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::SlotConflict(_)));
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_commits_for_the_same_slot_let_exactly_one_through() -> anyhow::Result<()> {
        let repo = Arc::new(InMemoryBookingRepository::new(grid()));

        let a = {
            let repo = Arc::clone(&repo);
            tokio::spawn(
                async move { repo.create(create_event("conference-a", "11:00", "11:30")).await },
            )
        };
        let b = {
            let repo = Arc::clone(&repo);
            tokio::spawn(
                async move { repo.create(create_event("conference-a", "11:00", "11:30")).await },
            )
        };

        let results = [a.await?, b.await?];
        let committed = results.iter().filter(|r| r.is_ok()).count();
        let conflicted = results
            .iter()
            .filter(|r| matches!(r, Err(AppError::SlotConflict(_))))
            .count();
        assert_eq!(committed, 1);
        assert_eq!(conflicted, 1);
        Ok(())
    }

    #[tokio::test]
    async fn cancelled_slot_can_be_rebooked() -> anyhow::Result<()> {
        let repo = InMemoryBookingRepository::new(grid());

        let first = repo.create(create_event("conference-a", "14:00", "14:30")).await?;
        repo.cancel(CancelBooking::new(first.booking_id)).await?;
        // キャンセル済み予約は新規予約の競合にならない
        let second = repo.create(create_event("conference-a", "14:00", "14:30")).await?;
        assert_ne!(first.booking_id, second.booking_id);
        Ok(())
    }

    #[tokio::test]
    async fn cancel_unknown_booking_is_not_found() {
        let repo = InMemoryBookingRepository::new(grid());
        let err = repo
            .cancel(CancelBooking::new(BookingId::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EntityNotFound(_)));
    }
}
