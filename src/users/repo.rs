use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database. Health fields are nullable: a user created
/// through a federated identity has no profile until the edit flow fills one
/// in.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub age: Option<f64>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub bmi: Option<f64>,
    pub sugar_level: Option<f64>,
    pub has_diabetes: Option<bool>,
    pub has_hypertension: Option<bool>,
    pub cholesterol: Option<bool>,
    pub activity_level: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Fields for a credential sign-up.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub age: Option<f64>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub bmi: Option<f64>,
    pub sugar_level: Option<f64>,
    pub has_diabetes: bool,
    pub has_hypertension: bool,
    pub cholesterol: bool,
    pub activity_level: Option<String>,
}

/// Health fields the profile-edit flow may change. Deliberately excludes bmi.
#[derive(Debug, Clone, Copy)]
pub struct HealthUpdate {
    pub age: f64,
    pub height: f64,
    pub weight: f64,
    pub sugar_level: f64,
    pub has_diabetes: bool,
    pub has_hypertension: bool,
}

const USER_COLUMNS: &str = r#"id, email, name, password_hash, age, gender, height, weight, bmi,
       sugar_level, has_diabetes, has_hypertension, cholesterol, activity_level, created_at"#;

impl User {
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE email = $1
            "#,
        ))
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE id = $1
            "#,
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn create(db: &PgPool, new: &NewUser) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, name, password_hash, age, gender, height, weight, bmi,
                               sugar_level, has_diabetes, has_hypertension, cholesterol,
                               activity_level)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {USER_COLUMNS}
            "#,
        ))
        .bind(&new.email)
        .bind(&new.name)
        .bind(&new.password_hash)
        .bind(new.age)
        .bind(&new.gender)
        .bind(new.height)
        .bind(new.weight)
        .bind(new.bmi)
        .bind(new.sugar_level)
        .bind(new.has_diabetes)
        .bind(new.has_hypertension)
        .bind(new.cholesterol)
        .bind(&new.activity_level)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Create a bare user for a first-time federated sign-in: no password, no
    /// health profile yet.
    pub async fn create_federated(db: &PgPool, email: &str, name: &str) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, name)
            VALUES ($1, $2)
            RETURNING {USER_COLUMNS}
            "#,
        ))
        .bind(email)
        .bind(name)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    pub async fn update_health(
        db: &PgPool,
        id: Uuid,
        update: &HealthUpdate,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET age = $2, height = $3, weight = $4, sugar_level = $5,
                has_diabetes = $6, has_hypertension = $7
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(update.age)
        .bind(update.height)
        .bind(update.weight)
        .bind(update.sugar_level)
        .bind(update.has_diabetes)
        .bind(update.has_hypertension)
        .fetch_one(db)
        .await?;
        Ok(user)
    }
}
