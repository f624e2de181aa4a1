use crate::model::{
    booking::{Booking, DateBookingView},
    id::RoomId,
    slot::{SlotGrid, SlotRange},
};
use chrono::NaiveTime;
use shared::error::{AppError, AppResult};

/// 指定した会議室の 1 スロット [start, next_slot(start)) が空いているか。
/// 元の UI は開始時刻の完全一致で判定していたが、複数スロット予約を
/// 正しく塞ぐため、区間の重なり判定に統一している（開始一致は
/// 1 スロットグリッドにおける特殊ケース）。
pub fn is_available(
    view: &DateBookingView,
    room_id: &RoomId,
    start: NaiveTime,
    grid: &SlotGrid,
) -> AppResult<bool> {
    let idx = grid.bookable_index(start)?;
    let end = grid.clamp_end(idx, 1);
    Ok(find_conflict(view, room_id, start, end, grid)?.is_none())
}

/// [start, end) と重なる最初のアクティブ予約を返す。
/// 重なり判定は半開区間: a.start < b.end && b.start < a.end。
///
/// 不変条件の下では同室同日の重複は存在しないはずだが、外部ストア由来の
/// 古いデータで複数件が重なった場合は created_at が最も古いものを返す。
pub fn find_conflict<'a>(
    view: &'a DateBookingView,
    room_id: &'a RoomId,
    start: NaiveTime,
    end: NaiveTime,
    grid: &SlotGrid,
) -> AppResult<Option<&'a Booking>> {
    if end <= start {
        return Err(AppError::InvalidDuration);
    }
    grid.bookable_index(start)?;

    let candidate = SlotRange::new(start, end);
    let conflict = view
        .active_for_room(room_id)
        .filter(|b| b.slot.overlaps(&candidate))
        .min_by_key(|b| b.created_at);
    Ok(conflict)
}

/// [start, end) に競合がなければ Ok、あれば SlotConflict を返す。
pub fn ensure_available(
    view: &DateBookingView,
    room_id: &RoomId,
    start: NaiveTime,
    end: NaiveTime,
    grid: &SlotGrid,
) -> AppResult<()> {
    match find_conflict(view, room_id, start, end, grid)? {
        None => Ok(()),
        Some(conflict) => Err(AppError::SlotConflict(format!(
            "room {} is already booked {} - {} on {}",
            conflict.room_id,
            crate::model::slot::format_time(conflict.slot.start),
            crate::model::slot::format_time(conflict.slot.end),
            view.date
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        booking::{BookingStatus, UserDetails},
        id::BookingId,
        slot::parse_time,
    };
    use chrono::{NaiveDate, TimeZone, Utc};
    use shared::config::ScheduleConfig;

    fn grid() -> SlotGrid {
        SlotGrid::from_config(&ScheduleConfig {
            open: "09:00".into(),
            close: "17:00".into(),
            slot_minutes: 30,
        })
        .unwrap()
    }

    fn user() -> UserDetails {
        UserDetails {
            full_name: "Taro Yamada".into(),
            employee_id: "E-1001".into(),
            phone_number: "080-0000-0000".into(),
            purpose: "Weekly sync".into(),
        }
    }

    fn booking(
        room: &str,
        start: &str,
        end: &str,
        status: BookingStatus,
        created_secs: i64,
    ) -> Booking {
        Booking {
            booking_id: BookingId::new(),
            room_id: room.into(),
            date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            slot: SlotRange::new(parse_time(start).unwrap(), parse_time(end).unwrap()),
            status,
            user: user(),
            created_at: Utc.timestamp_opt(created_secs, 0).unwrap(),
        }
    }

    fn view(bookings: Vec<Booking>) -> DateBookingView {
        DateBookingView::new(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(), bookings)
    }

    #[test]
    fn booked_slot_is_busy_and_next_slot_is_free() {
        let grid = grid();
        let view = view(vec![booking(
            "conference-a",
            "10:00",
            "10:30",
            BookingStatus::Active,
            0,
        )]);
        let room = "conference-a".into();
        assert!(!is_available(&view, &room, parse_time("10:00").unwrap(), &grid).unwrap());
        assert!(is_available(&view, &room, parse_time("10:30").unwrap(), &grid).unwrap());
    }

    #[test]
    fn multi_slot_booking_blocks_every_covered_slot() {
        let grid = grid();
        let view = view(vec![booking(
            "conference-a",
            "10:00",
            "11:30",
            BookingStatus::Active,
            0,
        )]);
        let room = "conference-a".into();
        for busy in ["10:00", "10:30", "11:00"] {
            assert!(
                !is_available(&view, &room, parse_time(busy).unwrap(), &grid).unwrap(),
                "{busy} should be busy"
            );
        }
        assert!(is_available(&view, &room, parse_time("11:30").unwrap(), &grid).unwrap());
        assert!(is_available(&view, &room, parse_time("09:30").unwrap(), &grid).unwrap());
    }

    #[test]
    fn other_rooms_are_unaffected() {
        let grid = grid();
        let view = view(vec![booking(
            "conference-a",
            "10:00",
            "10:30",
            BookingStatus::Active,
            0,
        )]);
        let other = "meeting-1".into();
        assert!(is_available(&view, &other, parse_time("10:00").unwrap(), &grid).unwrap());
    }

    #[test]
    fn cancelled_bookings_never_conflict() {
        let grid = grid();
        let view = view(vec![booking(
            "conference-a",
            "10:00",
            "10:30",
            BookingStatus::Cancelled,
            0,
        )]);
        let room = "conference-a".into();
        assert!(is_available(&view, &room, parse_time("10:00").unwrap(), &grid).unwrap());
        let conflict = find_conflict(
            &view,
            &room,
            parse_time("10:00").unwrap(),
            parse_time("10:30").unwrap(),
            &grid,
        )
        .unwrap();
        assert!(conflict.is_none());
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = SlotRange::new(parse_time("10:00").unwrap(), parse_time("11:00").unwrap());
        let b = SlotRange::new(parse_time("10:30").unwrap(), parse_time("12:00").unwrap());
        let c = SlotRange::new(parse_time("11:00").unwrap(), parse_time("11:30").unwrap());
        assert_eq!(a.overlaps(&b), b.overlaps(&a));
        assert!(a.overlaps(&b));
        // 半開区間なので端点の接触は重なりではない
        assert!(!a.overlaps(&c));
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn earliest_created_conflict_wins() {
        let grid = grid();
        let older = booking("conference-a", "10:00", "11:00", BookingStatus::Active, 100);
        let newer = booking("conference-a", "10:30", "11:30", BookingStatus::Active, 200);
        let older_id = older.booking_id;
        let view = view(vec![newer, older]);
        let room = "conference-a".into();
        let conflict = find_conflict(
            &view,
            &room,
            parse_time("10:30").unwrap(),
            parse_time("11:00").unwrap(),
            &grid,
        )
        .unwrap()
        .expect("must conflict");
        assert_eq!(conflict.booking_id, older_id);
    }

    #[test]
    fn zero_length_and_unaligned_requests_are_rejected() {
        let grid = grid();
        let view = view(vec![]);
        let room = "conference-a".into();
        let t = parse_time("10:00").unwrap();
        assert!(matches!(
            find_conflict(&view, &room, t, t, &grid),
            Err(AppError::InvalidDuration)
        ));
        assert!(matches!(
            is_available(&view, &room, parse_time("16:45").unwrap(), &grid),
            Err(AppError::UnalignedSlot(_))
        ));
    }
}
