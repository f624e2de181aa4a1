use chrono::NaiveDate;
use garde::Validate;
use kernel::model::{id::RoomId, room::Room};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomsResponse {
    pub items: Vec<RoomResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub id: RoomId,
    pub name: String,
    pub capacity: u32,
}

impl From<&Room> for RoomResponse {
    fn from(value: &Room) -> Self {
        Self {
            id: value.id.clone(),
            name: value.name.clone(),
            capacity: value.capacity,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct AvailabilityQuery {
    #[garde(skip)]
    pub date: NaiveDate,
}

/// 指定日の全室・全スロットの空き状況（フロントエンドのグリッド表示の
/// バックエンド版）
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub date: NaiveDate,
    pub rooms: Vec<RoomAvailabilityResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomAvailabilityResponse {
    pub id: RoomId,
    pub name: String,
    pub capacity: u32,
    pub slots: Vec<SlotAvailabilityResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotAvailabilityResponse {
    pub start: String,
    pub end: String,
    pub available: bool,
    /// 埋まっている場合は予約者名と目的を添える（元 UI の表示項目）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booked_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}
