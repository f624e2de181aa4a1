use chrono::NaiveDate;
use kernel::notifier::{BookingChange, Notifier};
use std::{collections::HashMap, sync::RwLock};
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 32;

/// 日付ごとの broadcast チャンネルを束ねた Notifier。
/// 元システムの Socket.io の date ルーム（join_date / leave_date）に相当する。
#[derive(Default)]
pub struct ChannelNotifier {
    channels: RwLock<HashMap<NaiveDate, broadcast::Sender<BookingChange>>>,
}

impl ChannelNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Notifier for ChannelNotifier {
    fn publish(&self, date: NaiveDate, change: BookingChange) {
        let mut channels = self.channels.write().expect("notifier lock poisoned");
        // Err は購読者ゼロを意味するだけなので、チャンネルを片付けて終わる
        let dropped = match channels.get(&date) {
            Some(tx) => tx.send(change).is_err(),
            None => false,
        };
        if dropped {
            channels.remove(&date);
        }
    }

    fn subscribe(&self, date: NaiveDate) -> broadcast::Receiver<BookingChange> {
        let mut channels = self.channels.write().expect("notifier lock poisoned");
        channels
            .entry(date)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::notifier::ChangeKind;

    fn change(kind: ChangeKind) -> BookingChange {
        BookingChange {
            kind,
            room_id: "conference-a".into(),
            start: "10:00".into(),
            end: "10:30".into(),
        }
    }

    #[tokio::test]
    async fn publish_reaches_subscribers_of_that_date_only() {
        let notifier = ChannelNotifier::new();
        let monday = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();

        let mut on_monday = notifier.subscribe(monday);
        let mut on_tuesday = notifier.subscribe(tuesday);

        notifier.publish(monday, change(ChangeKind::Created));

        let received = on_monday.recv().await.unwrap();
        assert_eq!(received.kind, ChangeKind::Created);
        assert!(on_tuesday.try_recv().is_err());
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_a_no_op() {
        let notifier = ChannelNotifier::new();
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        // パニックせず何も起きないこと
        notifier.publish(date, change(ChangeKind::Cancelled));
    }
}
