use axum::{
    routing::{get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::booking::{move_booking, register_booking, show_booking};

pub fn build_booking_routers() -> Router<AppRegistry> {
    let booking_routers = Router::new()
        .route("/", get(show_booking))
        .route("/", post(register_booking))
        .route("/:booking_id", put(move_booking));

    Router::new().nest("/booking", booking_routers)
}
