use async_trait::async_trait;
use chrono::NaiveDate;
use shared::error::AppResult;

use crate::model::{
    id::{FacilityId, ReservationId, UserId},
    reservation::{
        event::{CreateReservation, DeleteReservation, UpdateReservation},
        Reservation, ReservationStatus,
    },
};

/// 予約一覧の絞り込み条件
#[derive(Debug, Default, Clone, Copy)]
pub struct ReservationListOptions {
    pub facility_id: Option<FacilityId>,
    pub user_id: Option<UserId>,
    pub date: Option<NaiveDate>,
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    // 予約を確定する
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId>;
    // 条件に合致する予約一覧を取得する
    async fn find_all(&self, options: ReservationListOptions) -> AppResult<Vec<Reservation>>;
    // reservation_id から予約を取得する
    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>>;
    // 施設 ID と日付に紐づく予約一覧を取得する（空き確認用）
    async fn find_by_facility_on_date(
        &self,
        facility_id: FacilityId,
        date: NaiveDate,
    ) -> AppResult<Vec<Reservation>>;
    // ステータス名から参照データを引く（"Confirmed" など）
    async fn find_status_by_name(&self, name: &str) -> AppResult<Option<ReservationStatus>>;
    async fn update(&self, event: UpdateReservation) -> AppResult<()>;
    async fn delete(&self, event: DeleteReservation) -> AppResult<()>;
}
