/*!
 * Integration tests for the file-backed store
 */

use tokio_test::assert_ok;

use paremia::app_config::Config;
use paremia::database::models::UsageType;
use paremia::{DatabaseConnection, ProverbFilter, Repository, SearchEngine};

use crate::common;

#[tokio::test]
async fn test_fileStore_afterReopen_shouldServeSearches() {
    let dir = common::create_temp_dir().unwrap();
    let db_path = dir.path().join("data").join("paremia.db");

    {
        let repository = Repository::new(DatabaseConnection::new(&db_path).unwrap());
        common::ingest_into(&repository, &common::fixture_corpus()).await;
    }

    let reopened = Repository::new(assert_ok!(DatabaseConnection::new(&db_path)));
    let stats = reopened.connection().stats().unwrap();
    assert_eq!(stats.proverb_count, 8);
    assert!(stats.file_size_bytes > 0);

    let engine = SearchEngine::new(reopened);
    let results = engine
        .search(&ProverbFilter::lemma("друг", &[UsageType::Value]), 0)
        .await
        .unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.category == "Дружба"));
}

#[tokio::test]
async fn test_configuredDatabasePath_shouldOpenThere() {
    let dir = common::create_temp_dir().unwrap();
    let db_path = dir.path().join("configured.db");
    let conf = serde_json::json!({ "database_path": db_path }).to_string();
    let conf_path = common::create_test_file(dir.path(), "conf.json", &conf).unwrap();

    let config = Config::from_file(&conf_path).unwrap();
    assert_ok!(config.validate());

    let connection = DatabaseConnection::new(config.resolved_database_path().unwrap()).unwrap();
    assert_eq!(connection.path(), db_path.as_path());
    assert!(db_path.exists());
}

#[tokio::test]
async fn test_listCategories_withConfiguredPageSize_shouldPage() {
    let repository = Repository::new_in_memory().unwrap();
    let mut json = String::from("{");
    for i in 0..9 {
        if i > 0 {
            json.push(',');
        }
        json.push_str(&format!(r#""Тема {}": {{}}"#, i));
    }
    json.push('}');
    common::ingest_into(&repository, &paremia::indexer::parse_corpus(&json).unwrap()).await;

    let page_size = Config::default().category_page_size;
    let first = repository.list_categories(1, page_size).await.unwrap();
    let second = repository.list_categories(2, page_size).await.unwrap();

    assert_eq!(first.categories.len(), 7);
    assert!(first.has_more);
    assert_eq!(second.categories.len(), 2);
    assert!(!second.has_more);
    assert_eq!(second.categories[1].name, "Тема 8");
}
