use crate::model::{
    id::{FacilityId, ReservationId, ReservationStatusId},
    user::ReservationUser,
};
use chrono::{NaiveDate, NaiveTime};
use shared::error::{AppError, AppResult};

pub mod event;

#[derive(Debug, Clone)]
pub struct Reservation {
    pub reservation_id: ReservationId,
    pub facility_id: FacilityId,
    pub reserved_by: ReservationUser,
    pub date: NaiveDate,
    pub start_hour: NaiveTime,
    pub end_hour: NaiveTime,
    /// 予約確定時に 時間数 × 時間単価 から計算し、整数に切り捨てた金額
    pub price_final: i64,
    pub status: ReservationStatus,
}

impl Reservation {
    /// 同一日付のリクエスト窓と衝突するか。
    /// 判定は半開区間同士の対称な交差判定で行う
    pub fn conflicts_with(&self, window: &BookingWindow) -> bool {
        self.date == window.date
            && overlaps(
                self.start_hour,
                self.end_hour,
                window.start_hour,
                window.end_hour,
            )
    }
}

/// 予約のライフサイクルを表す参照データ（"Pending" / "Confirmed" / "Finished"）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationStatus {
    pub status_id: ReservationStatusId,
    pub status: String,
}

/// 予約希望の時間窓。start_hour < end_hour を構築時に保証する
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    pub date: NaiveDate,
    pub start_hour: NaiveTime,
    pub end_hour: NaiveTime,
}

impl BookingWindow {
    pub fn new(date: NaiveDate, start_hour: NaiveTime, end_hour: NaiveTime) -> AppResult<Self> {
        if start_hour >= end_hour {
            return Err(AppError::UnprocessableEntity(format!(
                "Reservation window must start before it ends: {start_hour} >= {end_hour}"
            )));
        }
        Ok(Self {
            date,
            start_hour,
            end_hour,
        })
    }

    /// 窓の長さを時間単位（小数）で返す
    pub fn duration_hours(&self) -> f64 {
        let t1 = self.date.and_time(self.start_hour);
        let t2 = self.date.and_time(self.end_hour);
        (t2 - t1).num_seconds() as f64 / 3600.0
    }
}

/// `[s1, e1)` と `[s2, e2)` の交差判定
pub fn overlaps(s1: NaiveTime, e1: NaiveTime, s2: NaiveTime, e2: NaiveTime) -> bool {
    s1 < e2 && s2 < e1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn partial_overlaps_are_detected_from_both_sides() {
        assert!(overlaps(t(10, 0), t(12, 0), t(11, 0), t(13, 0)));
        assert!(overlaps(t(11, 0), t(13, 0), t(10, 0), t(12, 0)));
        // 内包も交差
        assert!(overlaps(t(10, 0), t(14, 0), t(11, 0), t(12, 0)));
        assert!(overlaps(t(11, 0), t(12, 0), t(10, 0), t(14, 0)));
    }

    #[test]
    fn touching_windows_do_not_overlap() {
        assert!(!overlaps(t(10, 0), t(11, 0), t(11, 0), t(12, 0)));
        assert!(!overlaps(t(11, 0), t(12, 0), t(10, 0), t(11, 0)));
    }

    #[test]
    fn window_must_be_ordered() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(BookingWindow::new(date, t(10, 0), t(11, 0)).is_ok());
        assert!(BookingWindow::new(date, t(11, 0), t(11, 0)).is_err());
        assert!(BookingWindow::new(date, t(12, 0), t(11, 0)).is_err());
    }

    #[test]
    fn duration_handles_fractional_hours() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let window = BookingWindow::new(date, t(10, 0), t(11, 30)).unwrap();
        assert_eq!(window.duration_hours(), 1.5);
    }
}
