use crate::model::{
    booking::UserDetails,
    id::{BookingId, RoomId},
    slot::SlotRange,
};
use chrono::NaiveDate;
use derive_new::new;

/// 検証済み・正規化済みの予約作成イベント。
/// slot.end は切り詰め後の実効終了時刻。
#[derive(Debug, Clone, new)]
pub struct CreateBooking {
    pub room_id: RoomId,
    pub date: NaiveDate,
    pub slot: SlotRange,
    pub user: UserDetails,
}

#[derive(Debug, Clone, Copy, new)]
pub struct CancelBooking {
    pub booking_id: BookingId,
}
