use crate::model::{
    booking::{event::CreateBooking, UserDetails},
    id::RoomId,
    room::RoomCatalog,
    slot::{parse_time, SlotGrid, SlotRange},
};
use chrono::NaiveDate;
use shared::error::{AppError, AppResult};

/// API 層から渡される未検証の予約リクエスト。時刻は "HH:MM" 文字列のまま
/// 持ち、パースと正規化はすべてここで行う。
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub full_name: String,
    pub employee_id: String,
    pub phone_number: String,
    pub purpose: String,
    pub room_id: RoomId,
    pub date: NaiveDate,
    pub start: String,
    pub end: String,
}

/// 予約リクエストの事前検証。ストアへ渡す前にすべての検証エラーを
/// 検出する。成功時は trim 済み文字列と切り詰め済みの実効終了時刻を
/// 持つ正規化イベントを返す。
pub fn validate(
    draft: BookingDraft,
    catalog: &RoomCatalog,
    grid: &SlotGrid,
) -> AppResult<CreateBooking> {
    // 必須フィールドの空チェックは最初のひとつで止めず、
    // 欠けているものをまとめて報告する
    let mut missing = Vec::new();
    for (name, value) in [
        ("fullName", &draft.full_name),
        ("employeeId", &draft.employee_id),
        ("phoneNumber", &draft.phone_number),
        ("purpose", &draft.purpose),
    ] {
        if value.trim().is_empty() {
            missing.push(name.to_string());
        }
    }
    if !missing.is_empty() {
        return Err(AppError::MissingFields(missing));
    }

    if catalog.find(&draft.room_id).is_none() {
        return Err(AppError::RoomNotFound(draft.room_id.to_string()));
    }

    let start = parse_time(&draft.start)?;
    let start_index = grid.bookable_index(start)?;

    let requested_end = parse_time(&draft.end)?;
    if requested_end <= start {
        return Err(AppError::InvalidDuration);
    }
    // 閉店境界を超える終了時刻は最終境界扱い。グリッド内なら境界に
    // 揃っていなければならない。
    let slots = if requested_end >= grid.close() {
        grid.last_index() - start_index
    } else {
        match grid.slot_index(requested_end) {
            Some(end_index) => end_index - start_index,
            None => {
                return Err(AppError::UnalignedSlot(draft.end.clone()));
            }
        }
    };
    if slots == 0 {
        return Err(AppError::InvalidDuration);
    }
    let effective_end = grid.clamp_end(start_index, slots);

    let user = UserDetails {
        full_name: draft.full_name.trim().to_string(),
        employee_id: draft.employee_id.trim().to_string(),
        phone_number: draft.phone_number.trim().to_string(),
        purpose: draft.purpose.trim().to_string(),
    };

    Ok(CreateBooking::new(
        draft.room_id,
        draft.date,
        SlotRange::new(start, effective_end),
        user,
    ))
}
