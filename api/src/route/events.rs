use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::events::subscribe_date_events;

pub fn build_event_routers() -> Router<AppRegistry> {
    Router::new().route("/events/:date", get(subscribe_date_events))
}
