use std::sync::Arc;

use derive_new::new;
use shared::error::{AppError, AppResult};

use crate::model::{day::DayOfWeek, id::FacilityId, reservation::BookingWindow};
use crate::repository::{facility::FacilityRepository, reservation::ReservationRepository};

/// 指定の施設・日付・時間窓が予約可能かを判定する。
///
/// 読み取りのみでスロットの確保は行わない。判定と確定の間の競合は
/// ストレージ層（予約作成時の SERIALIZABLE トランザクション内の再検査）で防ぐ。
#[derive(new)]
pub struct AvailabilityChecker {
    facility_repository: Arc<dyn FacilityRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
}

impl AvailabilityChecker {
    /// 予約可否を返す。
    ///
    /// - 施設が存在しない、またはその曜日の営業時間が未設定の場合は
    ///   `EntityNotFound`（単なる「空きなし」とは区別されるデータ設定の問題）
    /// - 営業時間外、または既存予約と交差する場合は `Ok(false)`
    pub async fn check(&self, facility_id: FacilityId, window: &BookingWindow) -> AppResult<bool> {
        let facility = self
            .facility_repository
            .find_by_id(facility_id)
            .await?
            .ok_or_else(|| {
                AppError::EntityNotFound(
                    "No facility with specified id in the database.".to_string(),
                )
            })?;

        let day = DayOfWeek::from_date(window.date);
        let open_hours = self
            .facility_repository
            .find_open_hours(facility.facility_id, day)
            .await?
            .ok_or_else(|| {
                AppError::EntityNotFound(
                    "No open hours specified for that facility on that day of the week."
                        .to_string(),
                )
            })?;

        // 営業時間の前後にはみ出す窓は予約不可
        if !open_hours.contains(window.start_hour, window.end_hour) {
            return Ok(false);
        }

        // 同じ日の既存予約との衝突を調べる
        let reservations = self
            .reservation_repository
            .find_by_facility_on_date(facility.facility_id, window.date)
            .await?;
        if reservations.iter().any(|r| r.conflicts_with(window)) {
            return Ok(false);
        }

        Ok(true)
    }
}
