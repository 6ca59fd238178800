use axum::Router;
use registry::AppRegistry;

pub mod actions;
pub mod facility;
pub mod health;
pub mod reservation;

pub fn routes() -> Router<AppRegistry> {
    // /actions/... のパスを固定で公開するため、プレフィックスは付けずに束ねる
    Router::new()
        .merge(health::build_health_check_routers())
        .merge(actions::build_action_routers())
        .merge(facility::build_facility_routers())
        .merge(reservation::build_reservation_routers())
}
