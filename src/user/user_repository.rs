use super::user_models::User;
use crate::error::Result;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Resolve the recipient set for role-targeted notifications.
    pub async fn find_ids_by_roles(&self, roles: &[&str]) -> Result<Vec<Uuid>> {
        let roles: Vec<String> = roles.iter().map(|r| r.to_string()).collect();

        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM users WHERE role = ANY($1)"
        )
        .bind(&roles)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    pub async fn find_all_ids(&self) -> Result<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users")
            .fetch_all(&self.pool)
            .await?;

        Ok(ids)
    }
}
