use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::user::User;

#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// アクセストークンからユーザーを解決する。トークンの発行は対象外
    async fn fetch_user_by_access_token(&self, access_token: &str) -> AppResult<Option<User>>;
}
