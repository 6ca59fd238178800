use kernel::model::{id::UserId, role::Role, user::User};
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct UserRow {
    pub id_user: UserId,
    pub email: String,
    pub name: String,
    pub lastname: String,
    pub phone_number: String,
    /// user_roles テーブルとの JOIN で得るロール名
    pub role_name: String,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(value: UserRow) -> Result<Self, Self::Error> {
        let UserRow {
            id_user,
            email,
            name,
            lastname,
            phone_number,
            role_name,
        } = value;
        Ok(User {
            user_id: id_user,
            email,
            name,
            lastname,
            phone_number,
            role: role_name.parse::<Role>()?,
        })
    }
}
