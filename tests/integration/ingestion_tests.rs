/*!
 * Integration tests for corpus ingestion
 */

use indexmap::IndexMap;
use std::sync::Arc;

use paremia::analysis::{Aspect, Number, PartOfSpeech, Person, Tense};
use paremia::app_config::IngestConfig;
use paremia::database::models::{UsageType, WordForm};
use paremia::indexer::{self, Indexer};
use paremia::{IngestError, Repository};

use crate::common::{self, FRIENDSHIP_CATEGORY, WORK_CATEGORY};

#[tokio::test]
async fn test_ingest_fixtureCorpus_shouldStoreEveryUnfoldedProverb() {
    let repository = common::indexed_repository().await;

    let stats = repository.connection().stats().unwrap();
    assert_eq!(stats.category_count, 2);
    assert_eq!(stats.proverb_count, 8);

    let work = repository.get_proverbs_by_category(WORK_CATEGORY).await.unwrap();
    let values: Vec<_> = work.iter().map(|p| p.value.as_str()).collect();
    assert_eq!(
        values,
        vec![
            "Без труда нема плода",
            "Хто не працює, той не їсть",
            "Діло майстра величає",
            "Хто рано встає, тому Бог дає",
            "Бджола мала, а й та працює",
            "Руки знають, що роблять",
        ]
    );
}

#[tokio::test]
async fn test_ingest_synonymEntry_shouldShareDescription() {
    let repository = common::indexed_repository().await;
    let work = repository.get_proverbs_by_category(WORK_CATEGORY).await.unwrap();

    assert_eq!(work[0].description, "старанність дає результат");
    assert_eq!(work[1].description, "старанність дає результат");
    assert_eq!(work[0].category_id, work[1].category_id);
}

#[tokio::test]
async fn test_ingest_repeatedLemma_shouldCountFrequencyInOneRow() {
    let repository = common::indexed_repository().await;
    let negation = repository.find_lemma("не").await.unwrap().unwrap();

    let usages = repository.get_lemma_usages(2).await.unwrap();
    let negation_usages: Vec<_> = usages.iter().filter(|u| u.lemma_id == negation.id).collect();

    assert_eq!(negation_usages.len(), 1);
    assert_eq!(negation_usages[0].usage_type, UsageType::Value);
    assert_eq!(negation_usages[0].frequency, 2);
}

#[tokio::test]
async fn test_ingest_lemmaSharedAcrossProverbs_shouldBeStoredOnce() {
    let repository = common::indexed_repository().await;

    let count: i64 = repository
        .connection()
        .execute(|conn| {
            Ok(conn.query_row("SELECT COUNT(*) FROM lemma WHERE value = 'той'", [], |row| row.get(0))?)
        })
        .unwrap();
    assert_eq!(count, 1);

    let lemma = repository.find_lemma("той").await.unwrap().unwrap();
    assert_eq!(lemma.pos, PartOfSpeech::Npro);
}

#[tokio::test]
async fn test_ingest_words_shouldBeLowercasedWithVerbFeatures() {
    let repository = common::indexed_repository().await;
    let words = repository.get_words(2).await.unwrap();

    let value_words: Vec<_> = words
        .iter()
        .filter(|w| w.usage_type == UsageType::Value)
        .map(|w| w.value.as_str())
        .collect();
    assert_eq!(value_words, vec!["хто", "не", "працює", "той", "їсть"]);

    let verb = words.iter().find(|w| w.value == "працює").unwrap();
    match verb.form {
        WordForm::Verb(features) => {
            assert_eq!(features.aspect, Some(Aspect::Imperfective));
            assert_eq!(features.number, Some(Number::Singular));
            assert_eq!(features.person, Some(Person::Third));
            assert_eq!(features.gender, None);
            assert_eq!(features.tense, Some(Tense::Present));
        }
        other => panic!("expected a verb form, got {:?}", other),
    }

    let description_words: Vec<_> = words
        .iter()
        .filter(|w| w.usage_type == UsageType::Description)
        .map(|w| w.value.as_str())
        .collect();
    assert_eq!(description_words, vec!["старанність", "дає", "результат"]);
}

#[tokio::test]
async fn test_ingest_unknownTokens_shouldBeDropped() {
    let repository = common::indexed_repository().await;
    let words = repository.get_words(8).await.unwrap();

    assert!(words.iter().all(|w| w.value != "двох"));
    assert!(repository.find_lemma("два").await.unwrap().is_none());
}

#[tokio::test]
async fn test_ingest_shouldMaterializeCategoryStatistics() {
    let repository = common::indexed_repository().await;
    let top = repository.top_category_lemmas(WORK_CATEGORY, 4).await.unwrap();

    let ranked: Vec<_> = top.iter().map(|r| (r.lemma_value.as_str(), r.frequency)).collect();
    assert_eq!(ranked, vec![("той", 3), ("не", 2), ("працювати", 2), ("хто", 2)]);
    assert!(top.iter().all(|r| r.category_name == "Праця"));

    let friendship = repository.top_category_lemmas(FRIENDSHIP_CATEGORY, 1).await.unwrap();
    assert_eq!(friendship[0].lemma_value, "друг");
    assert_eq!(friendship[0].frequency, 2);
}

#[tokio::test]
async fn test_ingest_statistics_shouldIgnoreDescriptionUsages() {
    let repository = common::indexed_repository().await;
    let top = repository.top_category_lemmas(WORK_CATEGORY, 100).await.unwrap();

    assert!(top.iter().all(|r| r.lemma_value != "старанність"));
}

#[tokio::test]
async fn test_ingest_duplicateCategory_shouldFailWithStoreError() {
    let repository = common::indexed_repository().await;
    let indexer = Indexer::new(
        repository.clone(),
        Arc::new(common::fixture_analyzer()),
        IngestConfig::default(),
    );

    let mut entries = IndexMap::new();
    entries.insert("Нова приказка".to_string(), "опис".to_string());
    let err = indexer.ingest_category("Праця", &entries).await.unwrap_err();

    assert!(matches!(err.downcast_ref::<IngestError>(), Some(IngestError::Store(_))));
    assert_eq!(repository.connection().stats().unwrap().proverb_count, 8);
}

#[tokio::test]
async fn test_ingest_afterReset_shouldRebuildFromScratch() {
    let repository = common::indexed_repository().await;

    repository.connection().reset().unwrap();
    common::ingest_into(&repository, &common::fixture_corpus()).await;

    let stats = repository.connection().stats().unwrap();
    assert_eq!(stats.category_count, 2);
    assert_eq!(stats.proverb_count, 8);
}

#[tokio::test]
async fn test_ingest_customMarker_shouldUnfoldWithIt() {
    let repository = Repository::new_in_memory().unwrap();
    let config = IngestConfig {
        synonym_marker: "See also:".to_string(),
        synonym_separator: " | ".to_string(),
    };
    let indexer = Indexer::new(repository.clone(), Arc::new(common::fixture_analyzer()), config);

    let corpus = indexer::parse_corpus(r#"{"Різне": {"Перше See also: Друге | Третє": "опис"}}"#).unwrap();
    let report = indexer.ingest(&corpus, None).await.unwrap();

    assert_eq!(report.categories, 1);
    assert_eq!(report.proverbs, 3);
}

#[test]
fn test_loadCorpus_withMissingFile_shouldReportUnreadable() {
    let result = indexer::load_corpus("/nonexistent/corpus.json");
    assert!(matches!(result, Err(IngestError::CorpusUnreadable(_))));
}
