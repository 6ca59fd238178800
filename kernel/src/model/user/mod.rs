use crate::model::{id::UserId, role::Role};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: UserId,
    pub email: String,
    pub name: String,
    pub lastname: String,
    pub phone_number: String,
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// 予約一覧に載せるユーザー情報の縮約形
#[derive(Debug, Clone)]
pub struct ReservationUser {
    pub user_id: UserId,
    pub name: String,
    pub lastname: String,
}
