use crate::model::id::RoomId;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub capacity: u32,
}

/// 会議室のカタログ。起動時に一度だけ構築し、以降は不変。
/// グローバル定数ではなく、使う側へ明示的に渡す。
#[derive(Debug, Clone)]
pub struct RoomCatalog {
    rooms: Vec<Room>,
}

impl RoomCatalog {
    pub fn new(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    /// 元のフロントエンドの MEETING_ROOMS に対応する既定カタログ
    pub fn standard() -> Self {
        let room = |id: &str, name: &str, capacity: u32| Room {
            id: RoomId::new(id),
            name: name.to_string(),
            capacity,
        };
        Self::new(vec![
            room("conference-a", "Conference Room A", 12),
            room("conference-b", "Conference Room B", 8),
            room("meeting-1", "Meeting Room 1", 6),
            room("meeting-2", "Meeting Room 2", 4),
        ])
    }

    pub fn find(&self, id: &RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| &r.id == id)
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }
}
