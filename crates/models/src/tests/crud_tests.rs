use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

use crate::{db, todo};

/// In-memory sqlite with migrations applied. Single connection so every
/// query sees the same memory database.
async fn setup_test_db() -> Result<DatabaseConnection> {
    let cfg = configs::DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        ..Default::default()
    };
    let db = db::connect(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::test]
async fn test_todo_crud() -> Result<()> {
    let db = setup_test_db().await?;

    // Create
    let created = todo::create(&db, "buy milk", false).await?;
    assert!(created.id >= 1);
    assert_eq!(created.content, "buy milk");
    assert!(!created.is_completed);

    // Read back by id
    let found = todo::get(&db, created.id).await?;
    let found = found.expect("created todo should be readable");
    assert_eq!(found, created);

    // Update in place, id unchanged
    let updated = todo::update(&db, created.id, "buy milk and eggs", true).await?;
    let updated = updated.expect("row exists");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.content, "buy milk and eggs");
    assert!(updated.is_completed);
    let fetched = todo::get(&db, created.id).await?.expect("row exists");
    assert_eq!(fetched, updated);

    // Hard delete
    assert!(todo::delete(&db, created.id).await?);
    assert!(todo::get(&db, created.id).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_create_assigns_fresh_ids() -> Result<()> {
    let db = setup_test_db().await?;

    let mut seen = std::collections::HashSet::new();
    for i in 0..5 {
        let t = todo::create(&db, &format!("task number {i}"), false).await?;
        assert!(seen.insert(t.id), "id {} assigned twice", t.id);
    }
    Ok(())
}

#[tokio::test]
async fn test_list_contains_created_todos() -> Result<()> {
    let db = setup_test_db().await?;

    assert!(todo::list(&db).await?.is_empty());

    let a = todo::create(&db, "first task", false).await?;
    let b = todo::create(&db, "second task", true).await?;

    let all = todo::list(&db).await?;
    assert!(all.len() >= 2);
    assert!(all.iter().any(|t| t.content == a.content));
    assert!(all.iter().any(|t| t.content == b.content && t.is_completed));
    Ok(())
}

#[tokio::test]
async fn test_content_length_bounds() -> Result<()> {
    let db = setup_test_db().await?;

    // 2 chars rejected, 3 and 54 accepted, 55 rejected
    assert!(matches!(
        todo::create(&db, "ab", false).await,
        Err(crate::errors::ModelError::Validation(_))
    ));
    let min = todo::create(&db, "abc", false).await?;
    assert_eq!(min.content.chars().count(), 3);
    let max_content = "x".repeat(54);
    let max = todo::create(&db, &max_content, false).await?;
    assert_eq!(max.content.chars().count(), 54);
    assert!(matches!(
        todo::create(&db, &"x".repeat(55), false).await,
        Err(crate::errors::ModelError::Validation(_))
    ));

    // Update enforces the same bounds and leaves the row untouched on error
    assert!(matches!(
        todo::update(&db, min.id, "ab", true).await,
        Err(crate::errors::ModelError::Validation(_))
    ));
    let unchanged = todo::get(&db, min.id).await?.expect("row exists");
    assert_eq!(unchanged.content, "abc");
    Ok(())
}

#[tokio::test]
async fn test_missing_id_is_not_found() -> Result<()> {
    let db = setup_test_db().await?;

    assert!(todo::get(&db, 4242).await?.is_none());
    assert!(todo::update(&db, 4242, "does not exist", false).await?.is_none());
    assert!(!todo::delete(&db, 4242).await?);
    Ok(())
}
