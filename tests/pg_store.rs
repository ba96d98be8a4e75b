//! Postgres entity store against a live database.
//!
//! Runs only when `DATABASE_URL` is set; each test works in its own table and drops it.

use entity_service::store::EntitySql;
use entity_service::{ensure_entity_table, EntityStore, PgEntityStore, StoreErrorKind, TransportEntity};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

async fn connect(suffix: &str) -> Option<(PgPool, PgEntityStore, String)> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping postgres store test");
        return None;
    };
    let pool = PgPoolOptions::new().max_connections(2).connect(&url).await.unwrap();
    let table = format!("entities_it_{}_{}", suffix, std::process::id());
    sqlx::query(&format!("DROP TABLE IF EXISTS \"{}\"", table))
        .execute(&pool)
        .await
        .unwrap();
    ensure_entity_table(&pool, &table).await.unwrap();
    let store = PgEntityStore::new(pool.clone(), &table);
    Some((pool, store, table))
}

async fn drop_table(pool: &PgPool, table: &str) {
    sqlx::query(&format!("DROP TABLE IF EXISTS \"{}\"", table))
        .execute(pool)
        .await
        .unwrap();
}

// ---------------------------------------------------------------------------
// Test: create, find, update and delete round trip through real SQL
// ---------------------------------------------------------------------------

#[tokio::test]
async fn crud_round_trip() {
    let Some((pool, store, table)) = connect("crud").await else { return };

    let created = store.create(&TransportEntity::new("t", "n", "d")).await.unwrap();
    assert_eq!(store.find_by_id(created.id).await.unwrap(), created);

    let changed = TransportEntity::new("t2", "n2", "d2").into_persisted(created.id);
    assert_eq!(store.update(&changed).await.unwrap(), changed);
    assert_eq!(store.list_all().await.unwrap(), vec![changed.clone()]);

    assert_eq!(store.delete(created.id).await.unwrap(), changed);
    assert_eq!(store.find_by_id(created.id).await.unwrap_err().kind(), StoreErrorKind::NotFound);

    let next = store.create(&TransportEntity::new("t", "n", "d")).await.unwrap();
    assert!(next.id > created.id);

    drop_table(&pool, &table).await;
}

// ---------------------------------------------------------------------------
// Test: zero affected rows surface as NotFound
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_rows_are_not_found() {
    let Some((pool, store, table)) = connect("missing").await else { return };

    let missing = TransportEntity::new("t", "n", "d").into_persisted(4242);
    assert_eq!(store.update(&missing).await.unwrap_err().kind(), StoreErrorKind::NotFound);
    assert_eq!(store.delete(4242).await.unwrap_err().kind(), StoreErrorKind::NotFound);
    assert_eq!(store.find_by_id(4242).await.unwrap_err().kind(), StoreErrorKind::NotFound);

    drop_table(&pool, &table).await;
}

// ---------------------------------------------------------------------------
// Test: rows with an empty description are hidden from find_by_id only
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_description_is_hidden_from_lookup() {
    let Some((pool, store, table)) = connect("blank").await else { return };

    let sql = EntitySql::for_table(&table);
    let (id, _, _, _): (i32, String, String, String) = sqlx::query_as(&sql.insert)
        .bind("t")
        .bind("n")
        .bind("")
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_eq!(store.find_by_id(id).await.unwrap_err().kind(), StoreErrorKind::NotFound);
    assert_eq!(store.list_all().await.unwrap().len(), 1);

    drop_table(&pool, &table).await;
}
