use async_trait::async_trait;
use chrono::NaiveDate;
use derive_new::new;

use kernel::model::{
    id::{FacilityId, ReservationId},
    reservation::{
        event::{CreateReservation, DeleteReservation, UpdateReservation},
        Reservation, ReservationStatus,
    },
};
use kernel::repository::reservation::{ReservationListOptions, ReservationRepository};
use shared::error::{AppError, AppResult};

use crate::database::{
    model::reservation::{ReservationRow, ReservationStatusRow},
    ConnectionPool,
};

const RESERVATION_COLUMNS: &str = r#"
    r.id_reservation,
    r.id_facility,
    r.id_user,
    u.name AS user_name,
    u.lastname AS user_lastname,
    r.date,
    r.start_hour,
    r.end_hour,
    r.price_final,
    s.id_reservation_status,
    s.status
"#;

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    // 予約を確定する
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId> {
        let mut tx = self.db.begin().await?;

        // 空き確認と確定は別リクエストで行われるため、二重予約を防ぐには
        // 確定側でも同一トランザクション内で再検査する必要がある。
        // 分離レベルを SERIALIZABLE にし、検査と INSERT を不可分にする
        self.set_transaction_serializable(&mut tx).await?;

        {
            // ① 施設の存在確認
            let facility_exists: Option<i64> =
                sqlx::query_scalar("SELECT id_facility FROM facilities WHERE id_facility = $1")
                    .bind(event.facility_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(AppError::SpecificOperationError)?;
            if facility_exists.is_none() {
                return Err(AppError::EntityNotFound(
                    "No facility with specified id in the database.".into(),
                ));
            }

            // ② 希望の時間窓が同じ日の既存予約と重なっていないか
            //    重複条件： existing.start < new.end AND new.start < existing.end
            let overlap: Option<i64> = sqlx::query_scalar(
                r#"
                    SELECT id_reservation
                    FROM reservations
                    WHERE id_facility = $1
                      AND date = $2
                      AND start_hour < $4
                      AND $3 < end_hour
                    LIMIT 1
                "#,
            )
            .bind(event.facility_id)
            .bind(event.date)
            .bind(event.start_hour)
            .bind(event.end_hour)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if overlap.is_some() {
                return Err(AppError::IntegrityViolation(format!(
                    "Facility ({}) already has a reservation overlapping that window.",
                    event.facility_id
                )));
            }
        }

        let reservation_id: i64 = sqlx::query_scalar(
            r#"
                INSERT INTO reservations
                (date, start_hour, end_hour, price_final, id_user, id_facility, id_status)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id_reservation
            "#,
        )
        .bind(event.date)
        .bind(event.start_hour)
        .bind(event.end_hour)
        .bind(event.price_final)
        .bind(event.reserved_by)
        .bind(event.facility_id)
        .bind(event.status_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(ReservationId::new(reservation_id))
    }

    async fn find_all(&self, options: ReservationListOptions) -> AppResult<Vec<Reservation>> {
        let query = format!(
            r#"
                SELECT {RESERVATION_COLUMNS}
                FROM reservations AS r
                INNER JOIN users AS u ON r.id_user = u.id_user
                INNER JOIN reservation_statuses AS s
                    ON r.id_status = s.id_reservation_status
                WHERE ($1::BIGINT IS NULL OR r.id_facility = $1)
                  AND ($2::BIGINT IS NULL OR r.id_user = $2)
                  AND ($3::DATE IS NULL OR r.date = $3)
                ORDER BY r.date ASC, r.start_hour ASC
            "#
        );
        let rows: Vec<ReservationRow> = sqlx::query_as(&query)
            .bind(options.facility_id)
            .bind(options.user_id)
            .bind(options.date)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Reservation::from).collect())
    }

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>> {
        let query = format!(
            r#"
                SELECT {RESERVATION_COLUMNS}
                FROM reservations AS r
                INNER JOIN users AS u ON r.id_user = u.id_user
                INNER JOIN reservation_statuses AS s
                    ON r.id_status = s.id_reservation_status
                WHERE r.id_reservation = $1
            "#
        );
        let row: Option<ReservationRow> = sqlx::query_as(&query)
            .bind(reservation_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Reservation::from))
    }

    // 空き確認で走査する、施設・日付に紐づく予約一覧
    async fn find_by_facility_on_date(
        &self,
        facility_id: FacilityId,
        date: NaiveDate,
    ) -> AppResult<Vec<Reservation>> {
        let query = format!(
            r#"
                SELECT {RESERVATION_COLUMNS}
                FROM reservations AS r
                INNER JOIN users AS u ON r.id_user = u.id_user
                INNER JOIN reservation_statuses AS s
                    ON r.id_status = s.id_reservation_status
                WHERE r.id_facility = $1 AND r.date = $2
                ORDER BY r.start_hour ASC
            "#
        );
        let rows: Vec<ReservationRow> = sqlx::query_as(&query)
            .bind(facility_id)
            .bind(date)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Reservation::from).collect())
    }

    async fn find_status_by_name(&self, name: &str) -> AppResult<Option<ReservationStatus>> {
        let row: Option<ReservationStatusRow> = sqlx::query_as(
            r#"
                SELECT id_reservation_status, status
                FROM reservation_statuses
                WHERE status = $1
            "#,
        )
        .bind(name)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(ReservationStatus::from))
    }

    async fn update(&self, event: UpdateReservation) -> AppResult<()> {
        // start_hour < end_hour はテーブルの CHECK 制約が最終的に守る
        let res = sqlx::query(
            r#"
                UPDATE reservations
                SET
                    date = COALESCE($2, date),
                    start_hour = COALESCE($3, start_hour),
                    end_hour = COALESCE($4, end_hour),
                    price_final = COALESCE($5, price_final),
                    id_status = COALESCE($6, id_status)
                WHERE id_reservation = $1
            "#,
        )
        .bind(event.reservation_id)
        .bind(event.date)
        .bind(event.start_hour)
        .bind(event.end_hour)
        .bind(event.price_final)
        .bind(event.status_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(
                "No reservation with specified id in the database.".into(),
            ));
        }

        Ok(())
    }

    async fn delete(&self, event: DeleteReservation) -> AppResult<()> {
        let reservation = self
            .find_by_id(event.reservation_id)
            .await?
            .ok_or_else(|| {
                AppError::EntityNotFound(
                    "No reservation with specified id in the database.".into(),
                )
            })?;

        // 一般ユーザーは自分の予約しか取り消せない
        if !event.requested_by_admin && reservation.reserved_by.user_id != event.requested_user {
            return Err(AppError::ForbiddenOperation(
                "Only the owner of a reservation may cancel it.".into(),
            ));
        }

        let res = sqlx::query("DELETE FROM reservations WHERE id_reservation = $1")
            .bind(event.reservation_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No reservation record has been deleted".into(),
            ));
        }

        Ok(())
    }
}

impl ReservationRepositoryImpl {
    // create でのトランザクション分離レベルを SERIALIZABLE にするために
    // 内部的に使うメソッド
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }
}
