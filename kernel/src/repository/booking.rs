use crate::model::{
    booking::{
        event::{CancelBooking, CreateBooking},
        Booking,
    },
    id::BookingId,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::error::AppResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// 予約を作成する。コミット直前に空き状況を再確認し（check-then-act）、
    /// 先に競合予約が書き込まれていた場合は SlotConflict を返す。
    /// リトライはしない。成功時は採番・実効終了時刻込みの予約を返す。
    async fn create(&self, event: CreateBooking) -> AppResult<Booking>;
    /// ソフトキャンセル。レコードは削除せず status のみ遷移させる。
    async fn cancel(&self, event: CancelBooking) -> AppResult<()>;
    /// 指定日の全予約（キャンセル済み含む）を取得する
    async fn find_by_date(&self, date: NaiveDate) -> AppResult<Vec<Booking>>;
    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Booking>;
    /// 統計用に全予約を取得する
    async fn find_all(&self) -> AppResult<Vec<Booking>>;
}
