use std::sync::Arc;

use derive_new::new;
use shared::error::{AppError, AppResult};

use crate::model::{
    id::{FacilityId, ReservationId, UserId},
    reservation::{event::CreateReservation, BookingWindow},
};
use crate::repository::{
    facility::FacilityRepository, reservation::ReservationRepository, user::UserRepository,
};

/// 確定ステータス名。参照テーブルにこの行が存在することはデプロイ時の前提
const CONFIRMED_STATUS: &str = "Confirmed";

/// 空き確認済みの時間窓に対して予約を確定する。
///
/// このサービス自身は空き確認を行わない。呼び出し側（API 層）が
/// AvailabilityChecker の結果を見て呼び分ける契約になっている。
#[derive(new)]
pub struct ReservationCreator {
    facility_repository: Arc<dyn FacilityRepository>,
    user_repository: Arc<dyn UserRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
}

impl ReservationCreator {
    pub async fn reserve(
        &self,
        facility_id: FacilityId,
        user_id: UserId,
        window: &BookingWindow,
    ) -> AppResult<ReservationId> {
        let facility = self
            .facility_repository
            .find_by_id(facility_id)
            .await?
            .ok_or_else(|| {
                AppError::EntityNotFound(
                    "No facility with specified id in the database.".to_string(),
                )
            })?;

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| {
                AppError::EntityNotFound("No user with specified id in the database.".to_string())
            })?;

        let status = self
            .reservation_repository
            .find_status_by_name(CONFIRMED_STATUS)
            .await?
            .ok_or_else(|| {
                AppError::EntityNotFound(
                    "No status with name 'Confirmed' in the database.".to_string(),
                )
            })?;

        // 最終金額は 経過時間（小数時間）× 時間単価 を整数に切り捨てる
        let price_final = (window.duration_hours() * facility.price_hourly) as i64;

        let event = CreateReservation::new(
            facility.facility_id,
            user.user_id,
            window.date,
            window.start_hour,
            window.end_hour,
            price_final,
            status.status_id,
        );

        self.reservation_repository.create(event).await
    }
}
