use chrono::NaiveTime;
use shared::{
    config::ScheduleConfig,
    error::{AppError, AppResult},
};

/// "HH:MM" 形式の文字列をパースする。それ以外の形式は受け付けない。
pub fn parse_time(value: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| AppError::InvalidTimeFormat(value.to_string()))
}

pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// 半開区間 [start, end) のスロット範囲
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl SlotRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// 半開区間同士の重なり判定。対称である。
    pub fn overlaps(&self, other: &SlotRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// 営業日のスロットグリッド。既定では 09:00 から 17:00 までの
/// 30 分刻みで 17 個の境界を持つ。境界列は昇順で不変。
#[derive(Debug, Clone)]
pub struct SlotGrid {
    boundaries: Vec<NaiveTime>,
}

impl SlotGrid {
    pub fn from_config(cfg: &ScheduleConfig) -> AppResult<Self> {
        let open = parse_time(&cfg.open)?;
        let close = parse_time(&cfg.close)?;
        if close <= open || cfg.slot_minutes == 0 {
            return Err(AppError::UnprocessableEntity(format!(
                "invalid schedule: open={}, close={}, slot_minutes={}",
                cfg.open, cfg.close, cfg.slot_minutes
            )));
        }

        let step = chrono::Duration::minutes(i64::from(cfg.slot_minutes));
        let mut boundaries = Vec::new();
        let mut t = open;
        while t <= close {
            boundaries.push(t);
            let (next, wrapped) = t.overflowing_add_signed(step);
            if wrapped != 0 {
                break;
            }
            t = next;
        }
        Ok(Self { boundaries })
    }

    pub fn boundaries(&self) -> &[NaiveTime] {
        &self.boundaries
    }

    pub fn open(&self) -> NaiveTime {
        self.boundaries[0]
    }

    pub fn close(&self) -> NaiveTime {
        self.boundaries[self.last_index()]
    }

    pub fn last_index(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// グリッド境界上にある時刻のインデックス。境界外は None。
    pub fn slot_index(&self, time: NaiveTime) -> Option<usize> {
        self.boundaries.binary_search(&time).ok()
    }

    /// 次のスロット境界。最終境界では None。
    pub fn next_slot(&self, time: NaiveTime) -> Option<NaiveTime> {
        let idx = self.slot_index(time)?;
        self.boundaries.get(idx + 1).copied()
    }

    /// start から end までに含まれるスロット数。
    /// どちらかが境界外の場合は 0 とみなす。
    pub fn slots_between(&self, start: NaiveTime, end: NaiveTime) -> usize {
        match (self.slot_index(start), self.slot_index(end)) {
            (Some(s), Some(e)) => e.saturating_sub(s),
            _ => 0,
        }
    }

    /// 予約開始として使える境界のインデックスを返す。
    /// 営業時間外は SlotOutOfRange、時間内だが境界に揃っていなければ
    /// UnalignedSlot とし、ふたつのエラーを区別する。
    pub fn bookable_index(&self, start: NaiveTime) -> AppResult<usize> {
        if start < self.open() || start >= self.close() {
            return Err(AppError::SlotOutOfRange(format_time(start)));
        }
        match self.slot_index(start) {
            Some(idx) => Ok(idx),
            None => Err(AppError::UnalignedSlot(format_time(start))),
        }
    }

    /// 要求スロット数ぶん進めた実効終了境界。グリッド末尾を超える要求は
    /// 最終境界へ切り詰める。切り詰めた結果は呼び出し側へそのまま返り、
    /// 予約レコードにも実効終了時刻が入る（暗黙の切り捨てにしない）。
    pub fn clamp_end(&self, start_index: usize, slots: usize) -> NaiveTime {
        let end_index = (start_index + slots).min(self.last_index());
        self.boundaries[end_index]
    }

    /// 予約開始として選べる境界（最終境界を除く）
    pub fn bookable_starts(&self) -> impl Iterator<Item = NaiveTime> + '_ {
        self.boundaries[..self.last_index()].iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> SlotGrid {
        SlotGrid::from_config(&ScheduleConfig {
            open: "09:00".into(),
            close: "17:00".into(),
            slot_minutes: 30,
        })
        .unwrap()
    }

    #[test]
    fn builds_seventeen_boundaries() {
        let grid = grid();
        assert_eq!(grid.boundaries().len(), 17);
        assert_eq!(format_time(grid.open()), "09:00");
        assert_eq!(format_time(grid.close()), "17:00");
    }

    #[test]
    fn parse_rejects_malformed_times() {
        assert!(matches!(
            parse_time("9 o'clock"),
            Err(AppError::InvalidTimeFormat(_))
        ));
        assert!(matches!(parse_time("25:00"), Err(AppError::InvalidTimeFormat(_))));
        assert!(parse_time("09:30").is_ok());
    }

    #[test]
    fn slot_index_and_next_slot() {
        let grid = grid();
        let t = parse_time("10:00").unwrap();
        assert_eq!(grid.slot_index(t), Some(2));
        assert_eq!(grid.next_slot(t), Some(parse_time("10:30").unwrap()));
        // 最終境界に次はない
        assert_eq!(grid.next_slot(grid.close()), None);
        // 境界外の時刻はインデックスを持たない
        assert_eq!(grid.slot_index(parse_time("10:15").unwrap()), None);
    }

    #[test]
    fn slots_between_counts_grid_steps() {
        let grid = grid();
        let s = parse_time("09:00").unwrap();
        let e = parse_time("11:00").unwrap();
        assert_eq!(grid.slots_between(s, e), 4);
        assert_eq!(grid.slots_between(e, s), 0);
    }

    #[test]
    fn clamp_end_stops_at_final_boundary() {
        let grid = grid();
        // 最終境界の 2 つ手前（16:00）から 10 スロット要求しても 17:00 まで
        let start_index = grid.slot_index(parse_time("16:00").unwrap()).unwrap();
        let end = grid.clamp_end(start_index, 10);
        assert_eq!(format_time(end), "17:00");
    }

    #[test]
    fn bookable_index_distinguishes_out_of_range_from_unaligned() {
        let grid = grid();
        assert!(matches!(
            grid.bookable_index(parse_time("08:00").unwrap()),
            Err(AppError::SlotOutOfRange(_))
        ));
        // 閉店境界ちょうどから始まるスロットは存在しない
        assert!(matches!(
            grid.bookable_index(parse_time("17:00").unwrap()),
            Err(AppError::SlotOutOfRange(_))
        ));
        assert!(matches!(
            grid.bookable_index(parse_time("16:45").unwrap()),
            Err(AppError::UnalignedSlot(_))
        ));
        assert_eq!(grid.bookable_index(parse_time("16:30").unwrap()).unwrap(), 15);
    }
}
