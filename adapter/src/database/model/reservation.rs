use chrono::{NaiveDate, NaiveTime};
use kernel::model::{
    id::{FacilityId, ReservationId, ReservationStatusId, UserId},
    reservation::{Reservation, ReservationStatus},
    user::ReservationUser,
};

/// 予約一覧・取得で使う型。users / reservation_statuses と JOIN した結果を受ける
#[derive(sqlx::FromRow)]
pub struct ReservationRow {
    pub id_reservation: ReservationId,
    pub id_facility: FacilityId,
    pub id_user: UserId,
    pub user_name: String,
    pub user_lastname: String,
    pub date: NaiveDate,
    pub start_hour: NaiveTime,
    pub end_hour: NaiveTime,
    pub price_final: i64,
    pub id_reservation_status: ReservationStatusId,
    pub status: String,
}

impl From<ReservationRow> for Reservation {
    fn from(value: ReservationRow) -> Self {
        let ReservationRow {
            id_reservation,
            id_facility,
            id_user,
            user_name,
            user_lastname,
            date,
            start_hour,
            end_hour,
            price_final,
            id_reservation_status,
            status,
        } = value;
        Reservation {
            reservation_id: id_reservation,
            facility_id: id_facility,
            reserved_by: ReservationUser {
                user_id: id_user,
                name: user_name,
                lastname: user_lastname,
            },
            date,
            start_hour,
            end_hour,
            price_final,
            status: ReservationStatus {
                status_id: id_reservation_status,
                status,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct ReservationStatusRow {
    pub id_reservation_status: ReservationStatusId,
    pub status: String,
}

impl From<ReservationStatusRow> for ReservationStatus {
    fn from(value: ReservationStatusRow) -> Self {
        ReservationStatus {
            status_id: value.id_reservation_status,
            status: value.status,
        }
    }
}
