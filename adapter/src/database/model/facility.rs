use chrono::NaiveTime;
use kernel::model::{
    day::DayOfWeek,
    facility::{Facility, OpenHours},
    id::{FacilityId, OpenHoursId},
};
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct FacilityRow {
    pub id_facility: FacilityId,
    pub name: String,
    pub description: String,
    pub price_hourly: f64,
    pub id_facility_type: i64,
    pub id_address: i64,
    pub id_company: i64,
}

impl From<FacilityRow> for Facility {
    fn from(value: FacilityRow) -> Self {
        let FacilityRow {
            id_facility,
            name,
            description,
            price_hourly,
            id_facility_type,
            id_address,
            id_company,
        } = value;
        Facility {
            facility_id: id_facility,
            name,
            description,
            price_hourly,
            id_facility_type,
            id_address,
            id_company,
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct OpenHoursRow {
    pub id_open_hours: OpenHoursId,
    /// days テーブル由来の曜日名（"Monday".."Sunday"）
    pub day: String,
    pub start_hour: NaiveTime,
    pub end_hour: NaiveTime,
}

impl TryFrom<OpenHoursRow> for OpenHours {
    type Error = AppError;

    fn try_from(value: OpenHoursRow) -> Result<Self, Self::Error> {
        let OpenHoursRow {
            id_open_hours,
            day,
            start_hour,
            end_hour,
        } = value;
        Ok(OpenHours {
            open_hours_id: id_open_hours,
            day: day.parse::<DayOfWeek>()?,
            start_hour,
            end_hour,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_hours_row_converts_into_the_domain_model() {
        let row = OpenHoursRow {
            id_open_hours: OpenHoursId::new(7),
            day: "Friday".into(),
            start_hour: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_hour: NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
        };
        let open_hours = OpenHours::try_from(row).unwrap();
        assert_eq!(open_hours.day, DayOfWeek::Friday);

        let row = OpenHoursRow {
            id_open_hours: OpenHoursId::new(8),
            day: "Someday".into(),
            start_hour: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_hour: NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
        };
        assert!(OpenHours::try_from(row).is_err());
    }
}
