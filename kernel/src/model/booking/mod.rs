use crate::model::{
    id::{BookingId, RoomId},
    slot::SlotRange,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub mod event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Active,
    Cancelled,
}

/// 予約フォームの利用者情報。検証後はすべて trim 済みの非空文字列。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    pub full_name: String,
    pub employee_id: String,
    pub phone_number: String,
    pub purpose: String,
}

/// 予約レコード。物理削除はせず、キャンセルは Active → Cancelled の
/// 状態遷移のみ（ソフトキャンセル）。
#[derive(Debug, Clone)]
pub struct Booking {
    pub booking_id: BookingId,
    pub room_id: RoomId,
    pub date: NaiveDate,
    pub slot: SlotRange,
    pub status: BookingStatus,
    pub user: UserDetails,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn is_active(&self) -> bool {
        self.status == BookingStatus::Active
    }
}

/// ある 1 日分の予約を集約した読み取り専用ビュー。
/// 永続化はせず、空き状況の問い合わせのたびに再構築する。
#[derive(Debug, Clone)]
pub struct DateBookingView {
    pub date: NaiveDate,
    bookings: Vec<Booking>,
}

impl DateBookingView {
    pub fn new(date: NaiveDate, bookings: Vec<Booking>) -> Self {
        Self { date, bookings }
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// 指定した会議室のアクティブな予約のみ。キャンセル済みは
    /// 空き状況に一切影響しない。
    pub fn active_for_room<'a>(
        &'a self,
        room_id: &'a RoomId,
    ) -> impl Iterator<Item = &'a Booking> {
        self.bookings
            .iter()
            .filter(move |b| b.is_active() && &b.room_id == room_id)
    }
}
