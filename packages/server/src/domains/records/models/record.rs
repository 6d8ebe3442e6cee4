use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::common::{PageRequest, RecordId};
use crate::domains::records::models::RecordFilter;
use crate::domains::records::validation::ValidRecord;

/// A persisted student record (`records` table).
///
/// Schema (see `migrations/000001_create_records.sql`):
///
/// | column | type                             |
/// |--------|----------------------------------|
/// | id     | BIGSERIAL PRIMARY KEY            |
/// | name   | TEXT NOT NULL                    |
/// | email  | TEXT NOT NULL                    |
/// | course | TEXT NOT NULL                    |
/// | age    | INTEGER NOT NULL CHECK (age >= 18) |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub course: String,
    pub age: i32,
}

impl Record {
    /// Build a record from a storage-assigned id and validated fields.
    pub fn from_valid(id: RecordId, fields: ValidRecord) -> Self {
        Self {
            id,
            name: fields.name,
            email: fields.email,
            course: fields.course,
            age: fields.age,
        }
    }

    /// Overwrite every mutable field. The id never changes.
    pub fn apply(&mut self, fields: ValidRecord) {
        self.name = fields.name;
        self.email = fields.email;
        self.course = fields.course;
        self.age = fields.age;
    }
}

// =============================================================================
// Record Queries
// =============================================================================

impl Record {
    pub async fn create(fields: &ValidRecord, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO records (name, email, course, age)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, course, age
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(&fields.course)
        .bind(fields.age)
        .fetch_one(pool)
        .await
        .context("Failed to insert record")
    }

    pub async fn find_by_id(id: RecordId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT id, name, email, course, age FROM records WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to fetch record")
    }

    /// Write all mutable columns. Returns `None` if the row no longer exists.
    pub async fn update(&self, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE records
            SET name = $2, email = $3, course = $4, age = $5
            WHERE id = $1
            RETURNING id, name, email, course, age
            "#,
        )
        .bind(self.id)
        .bind(&self.name)
        .bind(&self.email)
        .bind(&self.course)
        .bind(self.age)
        .fetch_optional(pool)
        .await
        .context("Failed to update record")
    }

    /// Delete by id. Returns whether a row was removed.
    pub async fn delete(id: RecordId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM records WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .context("Failed to delete record")?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch one page of records matching `filter`, plus the total match count.
    pub async fn find_page(
        filter: &RecordFilter,
        request: &PageRequest,
        pool: &PgPool,
    ) -> Result<(Vec<Self>, i64)> {
        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM records");
        push_filter(&mut count_query, filter);
        let total = count_query
            .build_query_scalar::<i64>()
            .fetch_one(pool)
            .await
            .context("Failed to count records")?;

        let mut page_query =
            QueryBuilder::<Postgres>::new("SELECT id, name, email, course, age FROM records");
        push_filter(&mut page_query, filter);
        // order_by_clause only ever yields fixed column names and directions
        page_query.push(" ORDER BY ");
        page_query.push(request.sort.order_by_clause());
        page_query.push(" LIMIT ");
        page_query.push_bind(request.size);
        page_query.push(" OFFSET ");
        page_query.push_bind(request.offset());

        let records = page_query
            .build_query_as::<Self>()
            .fetch_all(pool)
            .await
            .context("Failed to fetch record page")?;

        Ok((records, total))
    }

    /// Cheap round trip used by the health check.
    pub async fn ping(pool: &PgPool) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(pool)
            .await
            .context("Database ping failed")?;
        Ok(())
    }
}

fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &RecordFilter) {
    match filter {
        RecordFilter::NameAndCourse { name, course } => {
            query.push(" WHERE name ILIKE ");
            query.push_bind(RecordFilter::contains_pattern(name));
            query.push(" ESCAPE '\\' AND course ILIKE ");
            query.push_bind(RecordFilter::contains_pattern(course));
            query.push(" ESCAPE '\\'");
        }
        RecordFilter::Name(name) => {
            query.push(" WHERE name ILIKE ");
            query.push_bind(RecordFilter::contains_pattern(name));
            query.push(" ESCAPE '\\'");
        }
        RecordFilter::Course(course) => {
            query.push(" WHERE course ILIKE ");
            query.push_bind(RecordFilter::contains_pattern(course));
            query.push(" ESCAPE '\\'");
        }
        RecordFilter::All => {}
    }
}
