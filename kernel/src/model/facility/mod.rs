use crate::model::{
    day::DayOfWeek,
    id::{FacilityId, OpenHoursId},
};
use chrono::NaiveTime;

pub mod event;

#[derive(Debug, Clone)]
pub struct Facility {
    pub facility_id: FacilityId,
    pub name: String,
    pub description: String,
    /// 1 時間あたりの料金。非負であることは API 層で検証する
    pub price_hourly: f64,
    pub id_facility_type: i64,
    pub id_address: i64,
    pub id_company: i64,
}

/// ある曜日の営業時間帯。施設とは多対多で紐づくが、
/// 概念上は「この施設がその曜日に開いている時間」を表す
#[derive(Debug, Clone)]
pub struct OpenHours {
    pub open_hours_id: OpenHoursId,
    pub day: DayOfWeek,
    pub start_hour: NaiveTime,
    pub end_hour: NaiveTime,
}

impl OpenHours {
    /// リクエスト窓が営業時間内に収まっているか
    pub fn contains(&self, start_hour: NaiveTime, end_hour: NaiveTime) -> bool {
        !(start_hour < self.start_hour || end_hour > self.end_hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hours(start: (u32, u32), end: (u32, u32)) -> OpenHours {
        OpenHours {
            open_hours_id: OpenHoursId::new(1),
            day: DayOfWeek::Monday,
            start_hour: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_hour: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        }
    }

    #[test]
    fn window_on_the_boundary_is_within_open_hours() {
        let open = hours((10, 0), (18, 0));
        let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();

        assert!(open.contains(t(10, 0), t(18, 0)));
        assert!(open.contains(t(11, 0), t(12, 30)));
    }

    #[test]
    fn window_outside_open_hours_is_rejected() {
        let open = hours((10, 0), (18, 0));
        let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();

        assert!(!open.contains(t(9, 59), t(11, 0)));
        assert!(!open.contains(t(17, 0), t(18, 1)));
    }
}
