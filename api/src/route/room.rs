use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::room::{show_availability, show_room_list};

pub fn build_room_routers() -> Router<AppRegistry> {
    let room_routers = Router::new()
        .route("/", get(show_room_list))
        .route("/availability", get(show_availability));

    Router::new().nest("/rooms", room_routers)
}
