#![allow(unused)]
mod support;

use search_producer::db::{CredentialRepository, QueryDayRepository, QueryDaySource};
use search_producer::Error;
use support::{date, insert_attempt, insert_project, insert_query, with_test_db};

// ---------------------------------------------------------------------------
// Date-series expansion
// ---------------------------------------------------------------------------

#[tokio::test]
async fn single_day_specification_yields_one_record() -> anyhow::Result<()> {
    with_test_db(|db| {
        Box::pin(async move {
            insert_project(&db.pool, "news", true).await?;
            insert_query(&db.pool, "news", "cats", date(2023, 3, 5), date(2023, 3, 5)).await?;

            let days = QueryDayRepository::new(db.pool.clone())
                .pending_query_days()
                .await?;

            assert_eq!(days.len(), 1);
            assert_eq!(days[0].query_alias, "cats");
            assert_eq!(days[0].query_date, date(2023, 3, 5));
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn span_yields_one_record_per_day_inclusive() -> anyhow::Result<()> {
    with_test_db(|db| {
        Box::pin(async move {
            insert_project(&db.pool, "news", true).await?;
            // Crosses a leap day and a month boundary.
            insert_query(&db.pool, "news", "cats", date(2024, 2, 27), date(2024, 3, 1)).await?;

            let mut days: Vec<_> = QueryDayRepository::new(db.pool.clone())
                .pending_query_days()
                .await?
                .into_iter()
                .map(|d| d.query_date)
                .collect();
            days.sort();

            assert_eq!(
                days,
                vec![
                    date(2024, 2, 27),
                    date(2024, 2, 28),
                    date(2024, 2, 29),
                    date(2024, 3, 1)
                ]
            );
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn reversed_range_yields_nothing() -> anyhow::Result<()> {
    with_test_db(|db| {
        Box::pin(async move {
            insert_project(&db.pool, "news", true).await?;
            insert_query(&db.pool, "news", "cats", date(2023, 3, 5), date(2023, 3, 1)).await?;

            let days = QueryDayRepository::new(db.pool.clone())
                .pending_query_days()
                .await?;
            assert!(days.is_empty());
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn inactive_projects_are_not_expanded() -> anyhow::Result<()> {
    with_test_db(|db| {
        Box::pin(async move {
            insert_project(&db.pool, "live", true).await?;
            insert_project(&db.pool, "archived", false).await?;
            insert_query(&db.pool, "live", "cats", date(2023, 3, 5), date(2023, 3, 6)).await?;
            insert_query(&db.pool, "archived", "dogs", date(2023, 3, 5), date(2023, 3, 6)).await?;

            let days = QueryDayRepository::new(db.pool.clone())
                .pending_query_days()
                .await?;

            assert_eq!(days.len(), 2);
            assert!(days.iter().all(|d| d.query_alias == "cats"));
            Ok(())
        })
    })
    .await
}

// ---------------------------------------------------------------------------
// Attempt exclusion
// ---------------------------------------------------------------------------

#[tokio::test]
async fn successful_attempt_excludes_only_its_day() -> anyhow::Result<()> {
    with_test_db(|db| {
        Box::pin(async move {
            insert_project(&db.pool, "news", true).await?;
            insert_query(&db.pool, "news", "cats", date(2023, 3, 5), date(2023, 3, 7)).await?;
            insert_attempt(&db.pool, "cats", date(2023, 3, 6), true).await?;

            let mut days: Vec<_> = QueryDayRepository::new(db.pool.clone())
                .pending_query_days()
                .await?
                .into_iter()
                .map(|d| d.query_date)
                .collect();
            days.sort();

            assert_eq!(days, vec![date(2023, 3, 5), date(2023, 3, 7)]);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn failed_attempt_keeps_day_eligible() -> anyhow::Result<()> {
    with_test_db(|db| {
        Box::pin(async move {
            insert_project(&db.pool, "news", true).await?;
            insert_query(&db.pool, "news", "cats", date(2023, 3, 5), date(2023, 3, 5)).await?;
            insert_attempt(&db.pool, "cats", date(2023, 3, 5), false).await?;
            insert_attempt(&db.pool, "cats", date(2023, 3, 5), false).await?;

            let days = QueryDayRepository::new(db.pool.clone())
                .pending_query_days()
                .await?;
            assert_eq!(days.len(), 1, "failed attempts must not exclude the day");

            insert_attempt(&db.pool, "cats", date(2023, 3, 5), true).await?;
            let days = QueryDayRepository::new(db.pool.clone())
                .pending_query_days()
                .await?;
            assert!(days.is_empty(), "a later success excludes the day");
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn attempt_for_other_alias_does_not_exclude() -> anyhow::Result<()> {
    with_test_db(|db| {
        Box::pin(async move {
            insert_project(&db.pool, "news", true).await?;
            insert_query(&db.pool, "news", "cats", date(2023, 3, 5), date(2023, 3, 5)).await?;
            insert_query(&db.pool, "news", "dogs", date(2023, 3, 5), date(2023, 3, 5)).await?;
            insert_attempt(&db.pool, "dogs", date(2023, 3, 5), true).await?;

            let days = QueryDayRepository::new(db.pool.clone())
                .pending_query_days()
                .await?;
            assert_eq!(days.len(), 1);
            assert_eq!(days[0].query_alias, "cats");
            Ok(())
        })
    })
    .await
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn optional_columns_map_to_record_fields() -> anyhow::Result<()> {
    with_test_db(|db| {
        Box::pin(async move {
            insert_project(&db.pool, "news", true).await?;
            sqlx::query(
                r#"
                INSERT INTO google_search_query
                    (query_alias, project_name, search_terms, initial_date, final_date,
                     language_results, language_interface, country_results, sort_by_date,
                     geo_uule, geo_tci, google_domain)
                VALUES ('energie', 'news', 'erneuerbare energie', '2023-03-05', '2023-03-05',
                        'lang_de', 'de', 'countryDE', TRUE, 'X', 'Y', 'google.de')
                "#,
            )
            .execute(&db.pool)
            .await?;
            insert_query(&db.pool, "news", "cats", date(2023, 3, 5), date(2023, 3, 5)).await?;

            let days = QueryDayRepository::new(db.pool.clone())
                .pending_query_days()
                .await?;
            let energie = days
                .iter()
                .find(|d| d.query_alias == "energie")
                .expect("energie expanded");
            assert_eq!(energie.search_terms, "erneuerbare energie");
            assert_eq!(energie.language_results.as_deref(), Some("lang_de"));
            assert_eq!(energie.language_interface.as_deref(), Some("de"));
            assert_eq!(energie.country_results.as_deref(), Some("countryDE"));
            assert!(energie.sort_by_date);
            assert_eq!(energie.geo(), Some(("X", "Y")));
            assert_eq!(energie.google_domain, "google.de");

            let cats = days
                .iter()
                .find(|d| d.query_alias == "cats")
                .expect("cats expanded");
            assert_eq!(cats.language_results, None);
            assert_eq!(cats.country_results, None);
            assert!(!cats.sort_by_date);
            assert_eq!(cats.geo(), None);
            Ok(())
        })
    })
    .await
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_credentials_is_an_error() -> anyhow::Result<()> {
    with_test_db(|db| {
        Box::pin(async move {
            let result = CredentialRepository::new(db.pool.clone())
                .aws_credential()
                .await;
            assert!(matches!(result, Err(Error::MissingCredentials)));
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn credential_row_is_read() -> anyhow::Result<()> {
    with_test_db(|db| {
        Box::pin(async move {
            sqlx::query(
                "INSERT INTO aws_credentials (aws_access_key_id, aws_secret_access_key, region_name) \
                 VALUES ('AKIDEXAMPLE', 'secret', 'eu-central-1')",
            )
            .execute(&db.pool)
            .await?;

            let credential = CredentialRepository::new(db.pool.clone())
                .aws_credential()
                .await?;
            assert_eq!(credential.access_key_id, "AKIDEXAMPLE");
            assert_eq!(credential.secret_access_key, "secret");
            assert_eq!(credential.region_name, "eu-central-1");
            assert!(!format!("{credential:?}").contains("\"secret\""));
            Ok(())
        })
    })
    .await
}
