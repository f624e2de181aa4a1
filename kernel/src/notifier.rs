use crate::model::{booking::Booking, id::RoomId, slot::format_time};
use chrono::NaiveDate;
use serde::Serialize;
use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Created,
    Cancelled,
}

/// 日付チャンネルへ流す変更イベント。購読中のクライアントは
/// これを合図に表示を更新する。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingChange {
    pub kind: ChangeKind,
    pub room_id: RoomId,
    pub start: String,
    pub end: String,
}

impl BookingChange {
    pub fn from_booking(kind: ChangeKind, booking: &Booking) -> Self {
        Self {
            kind,
            room_id: booking.room_id.clone(),
            start: format_time(booking.slot.start),
            end: format_time(booking.slot.end),
        }
    }
}

/// 日付ごとの publish/subscribe 境界。配送方式（Socket.io、SSE など）に
/// ついてはここでは関知しない。
pub trait Notifier: Send + Sync {
    fn publish(&self, date: NaiveDate, change: BookingChange);
    fn subscribe(&self, date: NaiveDate) -> broadcast::Receiver<BookingChange>;
}
