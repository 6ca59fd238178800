use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{facility::event::DeleteFacility, id::FacilityId};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::facility::{
        CreateFacilityRequest, FacilityResponse, UpdateFacilityRequest, UpdateFacilityRequestWithId,
    },
};

// 施設の登録・変更・削除は管理者のみ
fn require_admin(user: &AuthorizedUser) -> AppResult<()> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation(
            "Administrator role required.".into(),
        ));
    }
    Ok(())
}

pub async fn register_facility(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateFacilityRequest>,
) -> AppResult<StatusCode> {
    require_admin(&user)?;
    req.validate(&())?;

    registry
        .facility_repository()
        .create(req.try_into()?)
        .await
        .map(|_| StatusCode::CREATED)
}

pub async fn show_facility_list(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<FacilityResponse>>> {
    registry
        .facility_repository()
        .find_all()
        .await
        .map(|facilities| facilities.into_iter().map(FacilityResponse::from).collect())
        .map(Json)
}

pub async fn show_facility(
    _user: AuthorizedUser,
    Path(facility_id): Path<FacilityId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<FacilityResponse>> {
    registry
        .facility_repository()
        .find_by_id(facility_id)
        .await
        .and_then(|facility| match facility {
            Some(facility) => Ok(Json(facility.into())),
            None => Err(AppError::EntityNotFound(
                "No facility with specified id in the database.".into(),
            )),
        })
}

pub async fn update_facility(
    user: AuthorizedUser,
    Path(facility_id): Path<FacilityId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateFacilityRequest>,
) -> AppResult<StatusCode> {
    require_admin(&user)?;
    req.validate(&())?;

    let update_facility = UpdateFacilityRequestWithId::new(facility_id, req);
    registry
        .facility_repository()
        .update(update_facility.try_into()?)
        .await
        .map(|_| StatusCode::OK)
}

pub async fn delete_facility(
    user: AuthorizedUser,
    Path(facility_id): Path<FacilityId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    require_admin(&user)?;

    registry
        .facility_repository()
        .delete(DeleteFacility { facility_id })
        .await
        .map(|_| StatusCode::OK)
}
