use crate::model::{day::DayOfWeek, id::FacilityId};
use chrono::NaiveTime;
use derive_new::new;

#[derive(new, Debug)]
pub struct CreateFacility {
    pub name: String,
    pub description: String,
    pub price_hourly: f64,
    pub id_facility_type: i64,
    pub id_address: i64,
    pub id_company: i64,
    pub open_hours: Vec<OpenHoursSpec>,
}

/// 施設登録・更新時に受け取る営業時間の指定
/// start_hour < end_hour は API 層の検証で保証される
#[derive(new, Debug, Clone)]
pub struct OpenHoursSpec {
    pub day: DayOfWeek,
    pub start_hour: NaiveTime,
    pub end_hour: NaiveTime,
}

// 動的な属性代入ではなく、Option フィールドのパッチ構造体で
// 更新対象の項目を明示する
#[derive(Debug)]
pub struct UpdateFacility {
    pub facility_id: FacilityId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_hourly: Option<f64>,
    pub id_facility_type: Option<i64>,
    pub id_address: Option<i64>,
    pub id_company: Option<i64>,
    /// Some の場合は営業時間の組を丸ごと入れ替える
    pub open_hours: Option<Vec<OpenHoursSpec>>,
}

#[derive(Debug)]
pub struct DeleteFacility {
    pub facility_id: FacilityId,
}
