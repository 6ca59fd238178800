use crate::model::id::{FacilityId, ReservationId, ReservationStatusId, UserId};
use chrono::{NaiveDate, NaiveTime};
use derive_new::new;

#[derive(new, Debug)]
pub struct CreateReservation {
    pub facility_id: FacilityId,
    pub reserved_by: UserId,
    pub date: NaiveDate,
    pub start_hour: NaiveTime,
    pub end_hour: NaiveTime,
    pub price_final: i64,
    pub status_id: ReservationStatusId,
}

// 管理者による部分更新。未指定の項目は変更しない
#[derive(Debug)]
pub struct UpdateReservation {
    pub reservation_id: ReservationId,
    pub date: Option<NaiveDate>,
    pub start_hour: Option<NaiveTime>,
    pub end_hour: Option<NaiveTime>,
    pub price_final: Option<i64>,
    pub status_id: Option<ReservationStatusId>,
}

#[derive(new, Debug)]
pub struct DeleteReservation {
    pub reservation_id: ReservationId,
    /// 削除を要求したユーザー。管理者以外は自分の予約のみ削除できる
    pub requested_user: UserId,
    pub requested_by_admin: bool,
}
