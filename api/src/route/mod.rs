use axum::Router;
use registry::AppRegistry;

pub mod booking;
pub mod events;
pub mod health;
pub mod room;
pub mod stats;

/// すべてのルーターを /api の下に束ねる
pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(health::build_health_check_routers())
        .merge(booking::build_booking_routers())
        .merge(room::build_room_routers())
        .merge(stats::build_stats_routers())
        .merge(events::build_event_routers());
    Router::new().nest("/api", router)
}
