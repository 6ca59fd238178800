use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    day::DayOfWeek,
    facility::{
        event::{CreateFacility, DeleteFacility, UpdateFacility},
        Facility, OpenHours,
    },
    id::FacilityId,
};

#[async_trait]
pub trait FacilityRepository: Send + Sync {
    async fn create(&self, event: CreateFacility) -> AppResult<FacilityId>;
    async fn find_all(&self) -> AppResult<Vec<Facility>>;
    async fn find_by_id(&self, facility_id: FacilityId) -> AppResult<Option<Facility>>;
    // 指定曜日の営業時間を取得する。施設にその曜日の設定がない場合は None
    async fn find_open_hours(
        &self,
        facility_id: FacilityId,
        day: DayOfWeek,
    ) -> AppResult<Option<OpenHours>>;
    async fn update(&self, event: UpdateFacility) -> AppResult<()>;
    // 予約が残っている施設の削除は整合性違反として拒否する
    async fn delete(&self, event: DeleteFacility) -> AppResult<()>;
}
