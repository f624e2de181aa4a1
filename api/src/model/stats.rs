use kernel::model::id::RoomId;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_bookings: usize,
    pub active_bookings: usize,
    pub cancelled_bookings: usize,
    pub rooms: Vec<RoomStatsResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomStatsResponse {
    pub id: RoomId,
    pub name: String,
    pub active: usize,
    pub cancelled: usize,
}
