use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use chrono::NaiveDate;
use registry::AppRegistry;
use std::convert::Infallible;
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};

/// 日付チャンネルの購読。元システムの Socket.io の join_date に相当し、
/// 予約の作成・キャンセルが Server-Sent Events として流れてくる。
pub async fn subscribe_date_events(
    Path(date): Path<NaiveDate>,
    State(registry): State<AppRegistry>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = registry.notifier().subscribe(date);

    let stream = BroadcastStream::new(rx).filter_map(|change| {
        // Lagged で落ちた分は飛ばして以降のイベントを流し続ける
        let change = change.ok()?;
        let event = Event::default()
            .event("bookings_changed")
            .json_data(&change)
            .ok()?;
        Some(Ok(event))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
