mod common;

use hanzi_explain::services::CacheResolver;
use hanzi_explain::CanonicalCharacter;

fn character(c: char) -> CanonicalCharacter {
    CanonicalCharacter::new(c).unwrap()
}

#[tokio::test]
async fn test_complete_row_is_a_hit() {
    let db = common::in_memory_db().await;
    common::seed_full_record(&db, "好", "en").await;

    let cache = CacheResolver::new(db);
    let record = cache.lookup(character('好'), "en").await.unwrap();
    assert_eq!(record.character, "好");
    assert_eq!(record.locale, "en");
}

#[tokio::test]
async fn test_missing_row_is_a_miss() {
    let db = common::in_memory_db().await;
    let cache = CacheResolver::new(db);
    assert!(cache.lookup(character('好'), "en").await.is_none());
}

#[tokio::test]
async fn test_locale_scopes_the_key() {
    let db = common::in_memory_db().await;
    common::seed_full_record(&db, "好", "zh").await;

    let cache = CacheResolver::new(db);
    assert!(cache.lookup(character('好'), "en").await.is_none());
    assert!(cache.lookup(character('好'), "zh").await.is_some());
}

#[tokio::test]
async fn test_any_null_field_is_a_miss() {
    let db = common::in_memory_db().await;
    common::seed_record(
        &db,
        "好",
        "en",
        Some("hǎo"),
        None,
        Some("good"),
        Some("idioms"),
        Some("culture"),
        Some("practice"),
    )
    .await;

    let cache = CacheResolver::new(db);
    assert!(cache.lookup(character('好'), "en").await.is_none());
}

#[tokio::test]
async fn test_store_failure_is_absorbed_as_miss() {
    let db = common::in_memory_db().await;
    db.connect()
        .unwrap()
        .execute("DROP TABLE character_explanations", ())
        .await
        .unwrap();

    let cache = CacheResolver::new(db);
    // The query now fails; the resolver must swallow it, not propagate.
    assert!(cache.lookup(character('好'), "en").await.is_none());
}
