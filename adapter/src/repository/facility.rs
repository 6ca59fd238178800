use async_trait::async_trait;
use derive_new::new;
use sqlx::Postgres;

use kernel::model::{
    day::DayOfWeek,
    facility::{
        event::{CreateFacility, DeleteFacility, OpenHoursSpec, UpdateFacility},
        Facility, OpenHours,
    },
    id::FacilityId,
};
use kernel::repository::facility::FacilityRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    model::facility::{FacilityRow, OpenHoursRow},
    ConnectionPool,
};

#[derive(new)]
pub struct FacilityRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl FacilityRepository for FacilityRepositoryImpl {
    async fn create(&self, event: CreateFacility) -> AppResult<FacilityId> {
        let mut tx = self.db.begin().await?;

        let facility_id: i64 = sqlx::query_scalar(
            r#"
                INSERT INTO facilities
                (name, description, price_hourly, id_facility_type, id_address, id_company)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id_facility
            "#,
        )
        .bind(&event.name)
        .bind(&event.description)
        .bind(event.price_hourly)
        .bind(event.id_facility_type)
        .bind(event.id_address)
        .bind(event.id_company)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let facility_id = FacilityId::new(facility_id);
        insert_open_hours(&mut tx, facility_id, &event.open_hours).await?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(facility_id)
    }

    async fn find_all(&self) -> AppResult<Vec<Facility>> {
        let rows: Vec<FacilityRow> = sqlx::query_as(
            r#"
                SELECT
                    id_facility,
                    name,
                    description,
                    price_hourly,
                    id_facility_type,
                    id_address,
                    id_company
                FROM facilities
                ORDER BY id_facility ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Facility::from).collect())
    }

    async fn find_by_id(&self, facility_id: FacilityId) -> AppResult<Option<Facility>> {
        let row: Option<FacilityRow> = sqlx::query_as(
            r#"
                SELECT
                    id_facility,
                    name,
                    description,
                    price_hourly,
                    id_facility_type,
                    id_address,
                    id_company
                FROM facilities
                WHERE id_facility = $1
            "#,
        )
        .bind(facility_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Facility::from))
    }

    async fn find_open_hours(
        &self,
        facility_id: FacilityId,
        day: DayOfWeek,
    ) -> AppResult<Option<OpenHours>> {
        let row: Option<OpenHoursRow> = sqlx::query_as(
            r#"
                SELECT
                    oh.id_open_hours,
                    d.day,
                    oh.start_hour,
                    oh.end_hour
                FROM facility_open_hours AS foh
                INNER JOIN open_hours AS oh ON foh.id_open_hours = oh.id_open_hours
                INNER JOIN days AS d ON oh.id_day = d.id_day
                WHERE foh.id_facility = $1 AND d.day = $2
                LIMIT 1
            "#,
        )
        .bind(facility_id)
        .bind(day.as_str())
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(OpenHours::try_from).transpose()
    }

    async fn update(&self, event: UpdateFacility) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        // パッチは COALESCE で未指定フィールドを据え置く
        let res = sqlx::query(
            r#"
                UPDATE facilities
                SET
                    name = COALESCE($2, name),
                    description = COALESCE($3, description),
                    price_hourly = COALESCE($4, price_hourly),
                    id_facility_type = COALESCE($5, id_facility_type),
                    id_address = COALESCE($6, id_address),
                    id_company = COALESCE($7, id_company)
                WHERE id_facility = $1
            "#,
        )
        .bind(event.facility_id)
        .bind(&event.name)
        .bind(&event.description)
        .bind(event.price_hourly)
        .bind(event.id_facility_type)
        .bind(event.id_address)
        .bind(event.id_company)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(
                "No facility with specified id in the database.".into(),
            ));
        }

        // 営業時間が指定された場合は組ごと入れ替える
        if let Some(open_hours) = &event.open_hours {
            delete_open_hours(&mut tx, event.facility_id).await?;
            insert_open_hours(&mut tx, event.facility_id, open_hours).await?;
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn delete(&self, event: DeleteFacility) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        // 予約が参照している施設は削除できない
        let reservation_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM reservations WHERE id_facility = $1")
                .bind(event.facility_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        if reservation_count > 0 {
            return Err(AppError::IntegrityViolation(format!(
                "Facility ({}) still has reservations and cannot be deleted.",
                event.facility_id
            )));
        }

        delete_open_hours(&mut tx, event.facility_id).await?;

        let res = sqlx::query("DELETE FROM facilities WHERE id_facility = $1")
            .bind(event.facility_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(
                "No facility with specified id in the database.".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }
}

// 営業時間の行を作り、施設との関連を張る
async fn insert_open_hours(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    facility_id: FacilityId,
    open_hours: &[OpenHoursSpec],
) -> AppResult<()> {
    for spec in open_hours {
        let id_open_hours: i64 = sqlx::query_scalar(
            r#"
                INSERT INTO open_hours (id_day, start_hour, end_hour)
                SELECT id_day, $2, $3 FROM days WHERE day = $1
                RETURNING id_open_hours
            "#,
        )
        .bind(spec.day.as_str())
        .bind(spec.start_hour)
        .bind(spec.end_hour)
        .fetch_optional(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?
        .ok_or_else(|| {
            // 曜日の参照データはデプロイ時に投入されている前提
            AppError::EntityNotFound(format!("No day named '{}' in the database.", spec.day))
        })?;

        sqlx::query(
            r#"
                INSERT INTO facility_open_hours (id_facility, id_open_hours)
                VALUES ($1, $2)
            "#,
        )
        .bind(facility_id)
        .bind(id_open_hours)
        .execute(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
    }

    Ok(())
}

async fn delete_open_hours(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    facility_id: FacilityId,
) -> AppResult<()> {
    sqlx::query(
        r#"
            DELETE FROM open_hours
            WHERE id_open_hours IN (
                SELECT id_open_hours FROM facility_open_hours WHERE id_facility = $1
            )
        "#,
    )
    .bind(facility_id)
    .execute(&mut **tx)
    .await
    .map_err(AppError::SpecificOperationError)?;

    // facility_open_hours 側は外部キーの ON DELETE CASCADE で消える
    Ok(())
}
