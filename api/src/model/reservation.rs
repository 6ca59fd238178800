use chrono::{NaiveDate, NaiveTime};
use derive_new::new;
use kernel::model::{
    id::{FacilityId, ReservationId, ReservationStatusId, UserId},
    reservation::{event::UpdateReservation, Reservation},
};
use kernel::repository::reservation::ReservationListOptions;
use serde::{Deserialize, Serialize};

use super::lenient_hour;

/// GET /reservations の絞り込みパラメータ
#[derive(Debug, Default, Deserialize)]
pub struct ReservationListQuery {
    pub id_facility: Option<FacilityId>,
    pub id_user: Option<UserId>,
    pub date: Option<NaiveDate>,
}

impl From<ReservationListQuery> for ReservationListOptions {
    fn from(value: ReservationListQuery) -> Self {
        ReservationListOptions {
            facility_id: value.id_facility,
            user_id: value.id_user,
            date: value.date,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateReservationRequest {
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_hour::deserialize_opt")]
    pub start_hour: Option<NaiveTime>,
    #[serde(default, deserialize_with = "lenient_hour::deserialize_opt")]
    pub end_hour: Option<NaiveTime>,
    pub price_final: Option<i64>,
    pub id_status: Option<ReservationStatusId>,
}

#[derive(new)]
pub struct UpdateReservationRequestWithId {
    reservation_id: ReservationId,
    request: UpdateReservationRequest,
}

impl From<UpdateReservationRequestWithId> for UpdateReservation {
    fn from(value: UpdateReservationRequestWithId) -> Self {
        let UpdateReservationRequestWithId {
            reservation_id,
            request,
        } = value;
        UpdateReservation {
            reservation_id,
            date: request.date,
            start_hour: request.start_hour,
            end_hour: request.end_hour,
            price_final: request.price_final,
            status_id: request.id_status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    pub id_reservation: ReservationId,
    pub id_facility: FacilityId,
    pub id_user: UserId,
    pub user_name: String,
    pub user_lastname: String,
    pub date: NaiveDate,
    pub start_hour: NaiveTime,
    pub end_hour: NaiveTime,
    pub price_final: i64,
    pub status: String,
}

impl From<Reservation> for ReservationResponse {
    fn from(value: Reservation) -> Self {
        let Reservation {
            reservation_id,
            facility_id,
            reserved_by,
            date,
            start_hour,
            end_hour,
            price_final,
            status,
        } = value;
        Self {
            id_reservation: reservation_id,
            id_facility: facility_id,
            id_user: reserved_by.user_id,
            user_name: reserved_by.name,
            user_lastname: reserved_by.lastname,
            date,
            start_hour,
            end_hour,
            price_final,
            status: status.status,
        }
    }
}
