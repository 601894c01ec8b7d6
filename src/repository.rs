//! Business-object repository: the persistence collaborator consumed by
//! the applications.
//!
//! [`BoRepository`] is the abstract contract (asynchronous fetch/save
//! returning an [`OperationResult`]); [`SqliteRepository`] is the shipped
//! adapter backed by SQLite. Criteria are evaluated linearly against the
//! loaded rows, so every operation supported by [`Criteria::matches`]
//! works uniformly across record types.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::path::Path;

use crate::criteria::{Criteria, OperationResult};
use crate::errors::RepositoryError;
use crate::models::{BusinessObject, BusinessPartnerGroup, ContactPerson, Customer};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Asynchronous repository contract for one business-object type
#[async_trait]
pub trait BoRepository<T: BusinessObject>: Send + Sync {
    /// Query records matching the given criteria
    async fn fetch(&self, criteria: &Criteria) -> Result<OperationResult<T>, RepositoryError>;

    /// Persist a record. A record with the deletion marker set is removed
    /// and the result carries zero records; otherwise the result carries
    /// exactly the persisted, clean copy.
    async fn save(&self, record: &T) -> Result<OperationResult<T>, RepositoryError>;
}

/// SQLite-backed repository for all business-partner record types
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub async fn open(database_path: &str) -> Result<Self, RepositoryError> {
        // Create database file if it doesn't exist
        if !Path::new(database_path).exists() {
            std::fs::File::create(database_path)?;
        }

        let database_url = format!("sqlite://{}", database_path);
        let pool = SqlitePool::connect(&database_url).await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS customers (
                code TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                bp_group TEXT NOT NULL,
                contact_person TEXT NOT NULL,
                telephone1 TEXT NOT NULL,
                telephone2 TEXT NOT NULL,
                mobile_phone TEXT NOT NULL,
                fax_number TEXT NOT NULL,
                activated INTEGER NOT NULL,
                created_at TEXT,
                updated_at TEXT
            )
            "#,
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS business_partner_groups (
                code TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                activated INTEGER NOT NULL,
                created_at TEXT,
                updated_at TEXT
            )
            "#,
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contact_persons (
                code TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                telephone1 TEXT NOT NULL,
                telephone2 TEXT NOT NULL,
                mobile_phone TEXT NOT NULL,
                fax TEXT NOT NULL,
                activated INTEGER NOT NULL,
                created_at TEXT,
                updated_at TEXT
            )
            "#,
        )
        .execute(&pool)
        .await?;

        Ok(SqliteRepository { pool })
    }
}

fn format_timestamp(value: Option<NaiveDateTime>) -> Option<String> {
    value.map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
}

fn parse_timestamp(
    row: &SqliteRow,
    column: &str,
) -> Result<Option<NaiveDateTime>, RepositoryError> {
    let raw: Option<String> = row.try_get(column)?;
    match raw {
        Some(text) => NaiveDateTime::parse_from_str(&text, TIMESTAMP_FORMAT)
            .map(Some)
            .map_err(|e| RepositoryError::Decode(format!("bad {} timestamp: {}", column, e))),
        None => Ok(None),
    }
}

/// Row mapping for one record type; drives the generic repository impl
#[async_trait]
pub trait SqliteRecord: BusinessObject {
    const TABLE: &'static str;

    fn from_row(row: &SqliteRow) -> Result<Self, RepositoryError>;

    /// Set updated_at, and created_at on first save
    fn stamp(&mut self, now: NaiveDateTime);

    async fn upsert(&self, pool: &SqlitePool) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl SqliteRecord for Customer {
    const TABLE: &'static str = "customers";

    fn from_row(row: &SqliteRow) -> Result<Self, RepositoryError> {
        Ok(Customer {
            code: row.try_get("code")?,
            name: row.try_get("name")?,
            group: row.try_get("bp_group")?,
            contact_person: row.try_get("contact_person")?,
            telephone1: row.try_get("telephone1")?,
            telephone2: row.try_get("telephone2")?,
            mobile_phone: row.try_get("mobile_phone")?,
            fax_number: row.try_get("fax_number")?,
            activated: row.try_get::<i64, _>("activated")? != 0,
            deleted: false,
            dirty: false,
            created_at: parse_timestamp(row, "created_at")?,
            updated_at: parse_timestamp(row, "updated_at")?,
        })
    }

    fn stamp(&mut self, now: NaiveDateTime) {
        self.created_at.get_or_insert(now);
        self.updated_at = Some(now);
    }

    async fn upsert(&self, pool: &SqlitePool) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO customers
            (code, name, bp_group, contact_person, telephone1, telephone2,
             mobile_phone, fax_number, activated, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&self.code)
        .bind(&self.name)
        .bind(&self.group)
        .bind(&self.contact_person)
        .bind(&self.telephone1)
        .bind(&self.telephone2)
        .bind(&self.mobile_phone)
        .bind(&self.fax_number)
        .bind(self.activated as i64)
        .bind(format_timestamp(self.created_at))
        .bind(format_timestamp(self.updated_at))
        .execute(pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl SqliteRecord for BusinessPartnerGroup {
    const TABLE: &'static str = "business_partner_groups";

    fn from_row(row: &SqliteRow) -> Result<Self, RepositoryError> {
        Ok(BusinessPartnerGroup {
            code: row.try_get("code")?,
            name: row.try_get("name")?,
            activated: row.try_get::<i64, _>("activated")? != 0,
            deleted: false,
            dirty: false,
            created_at: parse_timestamp(row, "created_at")?,
            updated_at: parse_timestamp(row, "updated_at")?,
        })
    }

    fn stamp(&mut self, now: NaiveDateTime) {
        self.created_at.get_or_insert(now);
        self.updated_at = Some(now);
    }

    async fn upsert(&self, pool: &SqlitePool) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO business_partner_groups
            (code, name, activated, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&self.code)
        .bind(&self.name)
        .bind(self.activated as i64)
        .bind(format_timestamp(self.created_at))
        .bind(format_timestamp(self.updated_at))
        .execute(pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl SqliteRecord for ContactPerson {
    const TABLE: &'static str = "contact_persons";

    fn from_row(row: &SqliteRow) -> Result<Self, RepositoryError> {
        Ok(ContactPerson {
            code: row.try_get("code")?,
            name: row.try_get("name")?,
            telephone1: row.try_get("telephone1")?,
            telephone2: row.try_get("telephone2")?,
            mobile_phone: row.try_get("mobile_phone")?,
            fax: row.try_get("fax")?,
            activated: row.try_get::<i64, _>("activated")? != 0,
            deleted: false,
            dirty: false,
            created_at: parse_timestamp(row, "created_at")?,
            updated_at: parse_timestamp(row, "updated_at")?,
        })
    }

    fn stamp(&mut self, now: NaiveDateTime) {
        self.created_at.get_or_insert(now);
        self.updated_at = Some(now);
    }

    async fn upsert(&self, pool: &SqlitePool) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO contact_persons
            (code, name, telephone1, telephone2, mobile_phone, fax,
             activated, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&self.code)
        .bind(&self.name)
        .bind(&self.telephone1)
        .bind(&self.telephone2)
        .bind(&self.mobile_phone)
        .bind(&self.fax)
        .bind(self.activated as i64)
        .bind(format_timestamp(self.created_at))
        .bind(format_timestamp(self.updated_at))
        .execute(pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl<T: SqliteRecord> BoRepository<T> for SqliteRepository {
    async fn fetch(&self, criteria: &Criteria) -> Result<OperationResult<T>, RepositoryError> {
        let rows = sqlx::query(&format!("SELECT * FROM {} ORDER BY code", T::TABLE))
            .fetch_all(&self.pool)
            .await?;

        let mut records = Vec::new();
        for row in &rows {
            let record = T::from_row(row)?;
            if criteria.matches(&record) {
                records.push(record);
            }
        }
        Ok(OperationResult::success(records))
    }

    async fn save(&self, record: &T) -> Result<OperationResult<T>, RepositoryError> {
        if record.is_deleted() {
            sqlx::query(&format!("DELETE FROM {} WHERE code = ?", T::TABLE))
                .bind(record.code())
                .execute(&self.pool)
                .await?;
            // Zero returned records signal a confirmed deletion
            return Ok(OperationResult::success(Vec::new()));
        }

        if record.code().is_empty() {
            return Ok(OperationResult::failure(-1, "Record code must not be empty"));
        }

        let mut saved = record.clone();
        saved.stamp(chrono::Utc::now().naive_utc());
        saved.mark_clean();
        saved.upsert(&self.pool).await?;
        Ok(OperationResult::success(vec![saved]))
    }
}
