use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use kernel::model::{
    id::ReservationId,
    reservation::event::DeleteReservation,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::reservation::{
        ReservationListQuery, ReservationResponse, UpdateReservationRequest,
        UpdateReservationRequestWithId,
    },
};

pub async fn show_reservation_list(
    _user: AuthorizedUser,
    Query(query): Query<ReservationListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<ReservationResponse>>> {
    registry
        .reservation_repository()
        .find_all(query.into())
        .await
        .map(|reservations| {
            reservations
                .into_iter()
                .map(ReservationResponse::from)
                .collect()
        })
        .map(Json)
}

pub async fn show_reservation(
    _user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationResponse>> {
    registry
        .reservation_repository()
        .find_by_id(reservation_id)
        .await
        .and_then(|reservation| match reservation {
            Some(reservation) => Ok(Json(reservation.into())),
            None => Err(AppError::EntityNotFound(
                "No reservation with specified id in the database.".into(),
            )),
        })
}

// ステータスや時間の変更は管理者操作
pub async fn update_reservation(
    user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateReservationRequest>,
) -> AppResult<StatusCode> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation(
            "Administrator role required.".into(),
        ));
    }

    let update_reservation = UpdateReservationRequestWithId::new(reservation_id, req);
    registry
        .reservation_repository()
        .update(update_reservation.into())
        .await
        .map(|_| StatusCode::OK)
}

// 一般ユーザーは自分の予約のみ取り消せる。所有権の検査は台帳側で行う
pub async fn delete_reservation(
    user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    let delete_reservation = DeleteReservation::new(reservation_id, user.id(), user.is_admin());
    registry
        .reservation_repository()
        .delete(delete_reservation)
        .await
        .map(|_| StatusCode::OK)
}
