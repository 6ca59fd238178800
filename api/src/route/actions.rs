use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::availability::{check_availability, reserve};

pub fn build_action_routers() -> Router<AppRegistry> {
    // 末尾スラッシュ付きのパスが公開仕様
    let action_routers = Router::new()
        .route("/check_availability/", get(check_availability))
        .route("/reserve/", get(reserve));

    Router::new().nest("/actions", action_routers)
}
