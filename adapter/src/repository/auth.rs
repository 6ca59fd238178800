use async_trait::async_trait;
use derive_new::new;

use kernel::model::user::User;
use kernel::repository::auth::AuthRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::user::UserRow, ConnectionPool};

#[derive(new)]
pub struct AuthRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    // トークンの発行は対象外。照合のみを担う
    async fn fetch_user_by_access_token(&self, access_token: &str) -> AppResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
                SELECT
                    u.id_user,
                    u.email,
                    u.name,
                    u.lastname,
                    u.phone_number,
                    ur.name AS role_name
                FROM access_tokens AS t
                INNER JOIN users AS u ON t.id_user = u.id_user
                INNER JOIN user_roles AS ur ON u.user_role_id = ur.id_user_role
                WHERE t.token = $1
            "#,
        )
        .bind(access_token)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(User::try_from).transpose()
    }
}
