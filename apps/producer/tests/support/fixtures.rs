use chrono::NaiveDate;
use sqlx::PgPool;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub async fn insert_project(pool: &PgPool, name: &str, active: bool) -> anyhow::Result<()> {
    sqlx::query("INSERT INTO project (project_name, active) VALUES ($1, $2)")
        .bind(name)
        .bind(active)
        .execute(pool)
        .await?;
    Ok(())
}

/// Specification with only the required columns set.
pub async fn insert_query(
    pool: &PgPool,
    project: &str,
    alias: &str,
    initial_date: NaiveDate,
    final_date: NaiveDate,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO google_search_query
            (query_alias, project_name, search_terms, initial_date, final_date, google_domain)
        VALUES ($1, $2, $3, $4, $5, 'google.com')
        "#,
    )
    .bind(alias)
    .bind(project)
    .bind(alias)
    .bind(initial_date)
    .bind(final_date)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn insert_attempt(
    pool: &PgPool,
    alias: &str,
    query_date: NaiveDate,
    success: bool,
) -> anyhow::Result<()> {
    sqlx::query(
        "INSERT INTO google_search_attempt (query_alias, query_date, success) VALUES ($1, $2, $3)",
    )
    .bind(alias)
    .bind(query_date)
    .bind(success)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn subquery_count(pool: &PgPool) -> anyhow::Result<i64> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM google_search_subquery")
        .fetch_one(pool)
        .await?)
}
