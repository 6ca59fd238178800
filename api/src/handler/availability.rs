use axum::{
    extract::{Query, State},
    Json,
};
use kernel::model::reservation::BookingWindow;
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{
    extractor::AuthorizedUser,
    model::availability::{CheckAvailabilityQuery, CheckResultResponse, ReserveQuery},
};

/// 指定の施設・日付・時間窓が予約可能かを返す。読み取りのみ
pub async fn check_availability(
    _user: AuthorizedUser,
    Query(query): Query<CheckAvailabilityQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<CheckResultResponse>> {
    let window = BookingWindow::new(query.date, query.start_hour, query.end_hour)?;

    let result = registry
        .availability_checker()
        .check(query.id_facility, &window)
        .await?;

    Ok(Json(CheckResultResponse { result }))
}

/// 空きがあれば予約を確定する。空きがなければ予約は作られず result: false を返す
pub async fn reserve(
    _user: AuthorizedUser,
    Query(query): Query<ReserveQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<CheckResultResponse>> {
    let window = BookingWindow::new(query.date, query.start_hour, query.end_hour)?;

    let available = registry
        .availability_checker()
        .check(query.id_facility, &window)
        .await?;
    if !available {
        return Ok(Json(CheckResultResponse { result: false }));
    }

    registry
        .reservation_creator()
        .reserve(query.id_facility, query.id_user, &window)
        .await?;

    Ok(Json(CheckResultResponse { result: true }))
}
