use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use shared::error::{AppError, AppResult};

use crate::model::{
    day::DayOfWeek,
    facility::{
        event::{CreateFacility, DeleteFacility, UpdateFacility},
        Facility, OpenHours,
    },
    id::{FacilityId, OpenHoursId, ReservationId, ReservationStatusId, UserId},
    reservation::{
        event::{CreateReservation, DeleteReservation, UpdateReservation},
        BookingWindow, Reservation, ReservationStatus,
    },
    role::Role,
    user::{ReservationUser, User},
};
use crate::repository::{
    facility::FacilityRepository,
    reservation::{ReservationListOptions, ReservationRepository},
    user::UserRepository,
};
use crate::service::{availability::AvailabilityChecker, booking::ReservationCreator};

// ---------------------------------------------------------------
// インメモリのモックリポジトリ
// ---------------------------------------------------------------

struct InMemoryFacilityRepository {
    facilities: Vec<Facility>,
    open_hours: HashMap<(FacilityId, DayOfWeek), OpenHours>,
}

#[async_trait]
impl FacilityRepository for InMemoryFacilityRepository {
    async fn create(&self, _event: CreateFacility) -> AppResult<FacilityId> {
        unreachable!("not exercised by these tests")
    }

    async fn find_all(&self) -> AppResult<Vec<Facility>> {
        Ok(self.facilities.clone())
    }

    async fn find_by_id(&self, facility_id: FacilityId) -> AppResult<Option<Facility>> {
        Ok(self
            .facilities
            .iter()
            .find(|f| f.facility_id == facility_id)
            .cloned())
    }

    async fn find_open_hours(
        &self,
        facility_id: FacilityId,
        day: DayOfWeek,
    ) -> AppResult<Option<OpenHours>> {
        Ok(self.open_hours.get(&(facility_id, day)).cloned())
    }

    async fn update(&self, _event: UpdateFacility) -> AppResult<()> {
        unreachable!("not exercised by these tests")
    }

    async fn delete(&self, _event: DeleteFacility) -> AppResult<()> {
        unreachable!("not exercised by these tests")
    }
}

struct InMemoryUserRepository {
    users: Vec<User>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.iter().find(|u| u.user_id == user_id).cloned())
    }
}

// 予約作成時の検査を一切行わない台帳。
// ReservationCreator 単体では重複予約を防がないことを観察できるようにする
struct InMemoryReservationRepository {
    reservations: Mutex<Vec<Reservation>>,
    statuses: Vec<ReservationStatus>,
    next_id: AtomicI64,
}

impl InMemoryReservationRepository {
    fn with_statuses() -> Self {
        Self {
            reservations: Mutex::new(Vec::new()),
            statuses: ["Pending", "Confirmed", "Finished"]
                .iter()
                .enumerate()
                .map(|(i, s)| ReservationStatus {
                    status_id: ReservationStatusId::new(i as i64 + 1),
                    status: (*s).to_string(),
                })
                .collect(),
            next_id: AtomicI64::new(1),
        }
    }

    fn without_statuses() -> Self {
        Self {
            statuses: Vec::new(),
            ..Self::with_statuses()
        }
    }

    fn stored(&self) -> Vec<Reservation> {
        self.reservations.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId> {
        let status = self
            .statuses
            .iter()
            .find(|s| s.status_id == event.status_id)
            .cloned()
            .ok_or_else(|| AppError::IntegrityViolation("unknown status id".into()))?;
        let reservation_id = ReservationId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.reservations.lock().unwrap().push(Reservation {
            reservation_id,
            facility_id: event.facility_id,
            reserved_by: ReservationUser {
                user_id: event.reserved_by,
                name: "Test".into(),
                lastname: "User".into(),
            },
            date: event.date,
            start_hour: event.start_hour,
            end_hour: event.end_hour,
            price_final: event.price_final,
            status,
        });
        Ok(reservation_id)
    }

    async fn find_all(&self, _options: ReservationListOptions) -> AppResult<Vec<Reservation>> {
        Ok(self.stored())
    }

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>> {
        Ok(self
            .stored()
            .into_iter()
            .find(|r| r.reservation_id == reservation_id))
    }

    async fn find_by_facility_on_date(
        &self,
        facility_id: FacilityId,
        date: NaiveDate,
    ) -> AppResult<Vec<Reservation>> {
        Ok(self
            .stored()
            .into_iter()
            .filter(|r| r.facility_id == facility_id && r.date == date)
            .collect())
    }

    async fn find_status_by_name(&self, name: &str) -> AppResult<Option<ReservationStatus>> {
        Ok(self.statuses.iter().find(|s| s.status == name).cloned())
    }

    async fn update(&self, _event: UpdateReservation) -> AppResult<()> {
        unreachable!("not exercised by these tests")
    }

    async fn delete(&self, _event: DeleteReservation) -> AppResult<()> {
        unreachable!("not exercised by these tests")
    }
}

// ---------------------------------------------------------------
// フィクスチャ
// ---------------------------------------------------------------

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

// 2024-01-01 は月曜日
fn a_monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn window(start: (u32, u32), end: (u32, u32)) -> BookingWindow {
    BookingWindow::new(a_monday(), t(start.0, start.1), t(end.0, end.1)).unwrap()
}

/// 施設 1 件（時間単価 20、月曜 10:00-11:00 営業）のディレクトリを作る
fn facility_open_monday(price_hourly: f64, open: (u32, u32), close: (u32, u32)) -> Arc<InMemoryFacilityRepository> {
    let facility_id = FacilityId::new(1);
    let mut open_hours = HashMap::new();
    open_hours.insert(
        (facility_id, DayOfWeek::Monday),
        OpenHours {
            open_hours_id: OpenHoursId::new(1),
            day: DayOfWeek::Monday,
            start_hour: t(open.0, open.1),
            end_hour: t(close.0, close.1),
        },
    );
    Arc::new(InMemoryFacilityRepository {
        facilities: vec![Facility {
            facility_id,
            name: "Court A".into(),
            description: "Indoor tennis court".into(),
            price_hourly,
            id_facility_type: 1,
            id_address: 1,
            id_company: 1,
        }],
        open_hours,
    })
}

fn a_user(id: i64) -> User {
    User {
        user_id: UserId::new(id),
        email: format!("user{id}@example.com"),
        name: "Test".into(),
        lastname: "User".into(),
        phone_number: "123456789".into(),
        role: Role::User,
    }
}

struct Fixture {
    checker: AvailabilityChecker,
    creator: ReservationCreator,
    ledger: Arc<InMemoryReservationRepository>,
}

fn fixture_with_ledger(ledger: Arc<InMemoryReservationRepository>) -> Fixture {
    let facilities = facility_open_monday(20.0, (10, 0), (18, 0));
    let users = Arc::new(InMemoryUserRepository {
        users: vec![a_user(1)],
    });
    Fixture {
        checker: AvailabilityChecker::new(facilities.clone(), ledger.clone()),
        creator: ReservationCreator::new(facilities, users, ledger.clone()),
        ledger,
    }
}

fn fixture() -> Fixture {
    fixture_with_ledger(Arc::new(InMemoryReservationRepository::with_statuses()))
}

// ---------------------------------------------------------------
// 空き確認
// ---------------------------------------------------------------

#[tokio::test]
async fn window_within_open_hours_and_no_reservations_is_available() {
    let f = fixture();
    assert!(f
        .checker
        .check(FacilityId::new(1), &window((10, 0), (11, 0)))
        .await
        .unwrap());
}

#[tokio::test]
async fn window_outside_open_hours_is_unavailable() {
    let f = fixture();
    // 営業開始前
    assert!(!f
        .checker
        .check(FacilityId::new(1), &window((9, 0), (11, 0)))
        .await
        .unwrap());
    // 営業終了後にはみ出す
    assert!(!f
        .checker
        .check(FacilityId::new(1), &window((17, 30), (18, 30)))
        .await
        .unwrap());
}

#[tokio::test]
async fn unknown_facility_is_not_found() {
    let f = fixture();
    let err = f
        .checker
        .check(FacilityId::new(99), &window((10, 0), (11, 0)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::EntityNotFound(_)));
}

#[tokio::test]
async fn missing_open_hours_for_the_day_is_not_found_not_false() {
    let f = fixture();
    // 2024-01-02 は火曜日で、営業時間の設定がない
    let tuesday = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let window = BookingWindow::new(tuesday, t(10, 0), t(11, 0)).unwrap();
    let err = f
        .checker
        .check(FacilityId::new(1), &window)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::EntityNotFound(_)));
}

#[tokio::test]
async fn overlapping_reservation_makes_the_window_unavailable() {
    let f = fixture();
    f.creator
        .reserve(FacilityId::new(1), UserId::new(1), &window((11, 0), (13, 0)))
        .await
        .unwrap();

    // 前方・後方の部分交差と完全内包のいずれも不可
    for (s, e) in [
        ((10, 0), (11, 30)),
        ((12, 30), (14, 0)),
        ((11, 30), (12, 30)),
        ((10, 0), (14, 0)),
    ] {
        assert!(
            !f.checker
                .check(FacilityId::new(1), &window(s, e))
                .await
                .unwrap(),
            "window {s:?}-{e:?} should conflict"
        );
    }

    // 境界で接するだけの窓は予約できる
    assert!(f
        .checker
        .check(FacilityId::new(1), &window((10, 0), (11, 0)))
        .await
        .unwrap());
    assert!(f
        .checker
        .check(FacilityId::new(1), &window((13, 0), (14, 0)))
        .await
        .unwrap());
}

#[tokio::test]
async fn reservation_on_another_date_does_not_conflict() {
    let f = fixture();
    f.creator
        .reserve(FacilityId::new(1), UserId::new(1), &window((10, 0), (12, 0)))
        .await
        .unwrap();

    // 翌週の月曜日なら同じ時間帯でも空いている
    let next_monday = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
    let w = BookingWindow::new(next_monday, t(10, 0), t(12, 0)).unwrap();
    assert!(f.checker.check(FacilityId::new(1), &w).await.unwrap());
}

// ---------------------------------------------------------------
// 予約確定
// ---------------------------------------------------------------

#[tokio::test]
async fn reserve_persists_a_confirmed_reservation_with_truncated_price() {
    let f = fixture();
    f.creator
        .reserve(FacilityId::new(1), UserId::new(1), &window((10, 0), (11, 0)))
        .await
        .unwrap();

    let stored = f.ledger.stored();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].price_final, 20);
    assert_eq!(stored[0].status.status, "Confirmed");

    // 1.5 時間 × 20 = 30（切り捨て計算でも丸め誤差なし）
    f.creator
        .reserve(FacilityId::new(1), UserId::new(1), &window((12, 0), (13, 30)))
        .await
        .unwrap();
    assert_eq!(f.ledger.stored()[1].price_final, 30);
}

#[tokio::test]
async fn fractional_price_is_truncated_toward_zero() {
    // 単価 25、45 分 → 18.75 は 18 に切り捨てられる
    let facilities = facility_open_monday(25.0, (8, 0), (20, 0));
    let ledger = Arc::new(InMemoryReservationRepository::with_statuses());
    let users = Arc::new(InMemoryUserRepository {
        users: vec![a_user(1)],
    });
    let creator = ReservationCreator::new(facilities, users, ledger.clone());

    creator
        .reserve(FacilityId::new(1), UserId::new(1), &window((10, 0), (10, 45)))
        .await
        .unwrap();
    assert_eq!(ledger.stored()[0].price_final, 18);
}

#[tokio::test]
async fn reserve_rejects_unknown_user_and_facility() {
    let f = fixture();
    let err = f
        .creator
        .reserve(FacilityId::new(1), UserId::new(42), &window((10, 0), (11, 0)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::EntityNotFound(_)));

    let err = f
        .creator
        .reserve(FacilityId::new(9), UserId::new(1), &window((10, 0), (11, 0)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::EntityNotFound(_)));

    assert!(f.ledger.stored().is_empty());
}

#[tokio::test]
async fn reserve_requires_the_confirmed_status_row() {
    // ステータスの参照データ未投入はデプロイ不備として NotFound になる
    let f = fixture_with_ledger(Arc::new(InMemoryReservationRepository::without_statuses()));
    let err = f
        .creator
        .reserve(FacilityId::new(1), UserId::new(1), &window((10, 0), (11, 0)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::EntityNotFound(_)));
}

#[tokio::test]
async fn reserve_alone_does_not_guard_against_double_booking() {
    // ReservationCreator は空き確認を行わない契約なので、
    // 検査を挟まず直接呼べば重複した予約が二重に作られる。
    // 実運用ではストレージ層のトランザクション内再検査がこれを防ぐ
    let f = fixture();
    let w = window((10, 0), (12, 0));
    f.creator
        .reserve(FacilityId::new(1), UserId::new(1), &w)
        .await
        .unwrap();
    f.creator
        .reserve(FacilityId::new(1), UserId::new(1), &w)
        .await
        .unwrap();
    assert_eq!(f.ledger.stored().len(), 2);
}

// ---------------------------------------------------------------
// 一連のシナリオ
// ---------------------------------------------------------------

#[tokio::test]
async fn check_then_reserve_then_check_again() {
    let f = fixture();
    let facility_id = FacilityId::new(1);
    let w = window((10, 0), (11, 0));

    assert!(f.checker.check(facility_id, &w).await.unwrap());

    f.creator
        .reserve(facility_id, UserId::new(1), &w)
        .await
        .unwrap();

    let stored = f.ledger.stored();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].price_final, 20);
    assert_eq!(stored[0].status.status, "Confirmed");

    // 同一の窓はもう空いていない
    assert!(!f.checker.check(facility_id, &w).await.unwrap());
}
