use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use kernel::model::{
    booking::{Booking, BookingStatus, UserDetails},
    id::{BookingId, RoomId},
    slot::SlotRange,
};
use serde::{Deserialize, Serialize};

/// ストアサービスとやり取りする行の形。時刻は "HH:MM"、日付は
/// "YYYY-MM-DD" で運ぶ。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRow {
    pub booking_id: BookingId,
    pub room_id: RoomId,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
    pub status: BookingStatus,
    pub full_name: String,
    pub employee_id: String,
    pub phone_number: String,
    pub purpose: String,
    pub created_at: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(value: BookingRow) -> Self {
        let BookingRow {
            booking_id,
            room_id,
            date,
            start,
            end,
            status,
            full_name,
            employee_id,
            phone_number,
            purpose,
            created_at,
        } = value;
        Booking {
            booking_id,
            room_id,
            date,
            slot: SlotRange::new(start, end),
            status,
            user: UserDetails {
                full_name,
                employee_id,
                phone_number,
                purpose,
            },
            created_at,
        }
    }
}

impl From<&Booking> for BookingRow {
    fn from(value: &Booking) -> Self {
        BookingRow {
            booking_id: value.booking_id,
            room_id: value.room_id.clone(),
            date: value.date,
            start: value.slot.start,
            end: value.slot.end,
            status: value.status,
            full_name: value.user.full_name.clone(),
            employee_id: value.user.employee_id.clone(),
            phone_number: value.user.phone_number.clone(),
            purpose: value.user.purpose.clone(),
            created_at: value.created_at,
        }
    }
}

/// "HH:MM" 表現での NaiveTime の serde
mod hhmm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn row_serializes_times_as_hhmm() {
        let row = BookingRow {
            booking_id: BookingId::new(),
            room_id: RoomId::new("conference-a"),
            date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            start: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            status: BookingStatus::Active,
            full_name: "Taro Yamada".into(),
            employee_id: "E-1001".into(),
            phone_number: "080-0000-0000".into(),
            purpose: "Weekly sync".into(),
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["start"], "10:00");
        assert_eq!(json["end"], "10:30");
        assert_eq!(json["status"], "active");
        assert_eq!(json["roomId"], "conference-a");
    }
}
