use chrono::{DateTime, NaiveDate, Utc};
use garde::Validate;
use kernel::model::{
    booking::{Booking, BookingStatus, UserDetails},
    id::{BookingId, RoomId},
    slot::format_time,
};
use kernel::validator::BookingDraft;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TimeSlotPayload {
    #[garde(skip)]
    pub start: String,
    #[garde(skip)]
    pub end: String,
}

/// 予約作成リクエスト。元のフロントエンドが送る JSON と同じ形。
/// 必須フィールドの空チェックはカーネルのバリデータが一括で行うため、
/// ここでは形のみを受け取る。
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[garde(skip)]
    pub full_name: String,
    #[garde(skip)]
    pub employee_id: String,
    #[garde(skip)]
    pub phone_number: String,
    #[garde(skip)]
    pub purpose: String,
    #[garde(length(min = 1))]
    pub room_id: String,
    #[garde(skip)]
    pub date: NaiveDate,
    #[garde(dive)]
    pub time_slot: TimeSlotPayload,
}

impl From<CreateBookingRequest> for BookingDraft {
    fn from(value: CreateBookingRequest) -> Self {
        let CreateBookingRequest {
            full_name,
            employee_id,
            phone_number,
            purpose,
            room_id,
            date,
            time_slot,
        } = value;
        BookingDraft {
            full_name,
            employee_id,
            phone_number,
            purpose,
            room_id: RoomId::new(room_id),
            date,
            start: time_slot.start,
            end: time_slot.end,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct BookingListQuery {
    #[garde(skip)]
    pub date: NaiveDate,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingsResponse {
    pub items: Vec<BookingResponse>,
}

impl From<Vec<Booking>> for BookingsResponse {
    fn from(value: Vec<Booking>) -> Self {
        Self {
            items: value.into_iter().map(BookingResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub booking_id: BookingId,
    pub room_id: RoomId,
    pub date: NaiveDate,
    /// 切り詰めが起きた場合もここには実際に確保された終了時刻が入る
    pub time_slot: TimeSlotPayload,
    pub status: BookingStatus,
    pub user_details: UserDetails,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(value: Booking) -> Self {
        let Booking {
            booking_id,
            room_id,
            date,
            slot,
            status,
            user,
            created_at,
        } = value;
        Self {
            booking_id,
            room_id,
            date,
            time_slot: TimeSlotPayload {
                start: format_time(slot.start),
                end: format_time(slot.end),
            },
            status,
            user_details: user,
            created_at,
        }
    }
}
