use chrono::{NaiveDate, NaiveTime};
use kernel::model::id::{FacilityId, UserId};
use serde::{Deserialize, Serialize};

use super::lenient_hour;

/// GET /actions/check_availability/ のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct CheckAvailabilityQuery {
    pub id_facility: FacilityId,
    pub date: NaiveDate,
    #[serde(deserialize_with = "lenient_hour::deserialize")]
    pub start_hour: NaiveTime,
    #[serde(deserialize_with = "lenient_hour::deserialize")]
    pub end_hour: NaiveTime,
}

/// GET /actions/reserve/ のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct ReserveQuery {
    pub id_facility: FacilityId,
    pub id_user: UserId,
    pub date: NaiveDate,
    #[serde(deserialize_with = "lenient_hour::deserialize")]
    pub start_hour: NaiveTime,
    #[serde(deserialize_with = "lenient_hour::deserialize")]
    pub end_hour: NaiveTime,
}

#[derive(Debug, Serialize)]
pub struct CheckResultResponse {
    pub result: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    // axum の Query 抽出と同じ serde_urlencoded 経由で復元する
    #[test]
    fn query_accepts_times_without_seconds() {
        let query: CheckAvailabilityQuery = serde_urlencoded::from_str(
            "id_facility=1&date=2024-01-01&start_hour=10:00&end_hour=11:00:30",
        )
        .unwrap();
        assert_eq!(query.id_facility, FacilityId::new(1));
        assert_eq!(query.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(query.start_hour, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        assert_eq!(query.end_hour, NaiveTime::from_hms_opt(11, 0, 30).unwrap());
    }

    #[test]
    fn malformed_times_are_rejected() {
        let res = serde_urlencoded::from_str::<ReserveQuery>(
            "id_facility=1&id_user=1&date=2024-01-01&start_hour=ten&end_hour=11:00",
        );
        assert!(res.is_err());
    }
}
