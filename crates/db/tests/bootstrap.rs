use sqlx::SqlitePool;

/// Connect, migrate, verify schema.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: SqlitePool) {
    trener_db::health_check(&pool).await.unwrap();

    let tables = [
        "workouts",
        "active_workouts",
        "chat_workouts",
        "equipment",
        "user_profiles",
        "achievement_unlocks",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// `create_pool` accepts plain SQLite URLs and migrations apply cleanly.
#[tokio::test]
async fn test_create_pool_in_memory() {
    let pool = trener_db::create_pool("sqlite::memory:").await.unwrap();
    trener_db::health_check(&pool).await.unwrap();
    trener_db::run_migrations(&pool).await.unwrap();
}
