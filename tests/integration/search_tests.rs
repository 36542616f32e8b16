/*!
 * Integration tests for the filter engine
 */

use std::collections::HashSet;

use paremia::database::models::UsageType;
use paremia::indexer;
use paremia::{ProverbFilter, Repository, SearchEngine, PAGE_SIZE};

use crate::common;

async fn engine() -> SearchEngine {
    SearchEngine::new(common::indexed_repository().await)
}

fn proverbs(results: &[paremia::database::models::ProverbSearchResult]) -> Vec<&str> {
    results.iter().map(|r| r.proverb.as_str()).collect()
}

#[tokio::test]
async fn test_lemmaFilter_valueSiteOnly_shouldIgnoreDescriptionMatches() {
    let engine = engine().await;

    let filter = ProverbFilter::lemma("давати", &[UsageType::Value]);
    let results = engine.search(&filter, 0).await.unwrap();

    assert_eq!(proverbs(&results), vec!["Хто рано встає, тому Бог дає"]);
}

#[tokio::test]
async fn test_lemmaFilter_descriptionSite_shouldMatchDescriptions() {
    let engine = engine().await;

    let filter = ProverbFilter::lemma("старанність", &[UsageType::Value]);
    assert!(engine.search(&filter, 0).await.unwrap().is_empty());

    let filter = ProverbFilter::lemma("старанність", &[UsageType::Description]);
    let results = engine.search(&filter, 0).await.unwrap();
    assert_eq!(results.len(), 3);
}

#[tokio::test]
async fn test_lemmaFilter_bothSites_shouldReturnDeduplicatedUnion() {
    let engine = engine().await;

    let filter = ProverbFilter::lemma("давати", &UsageType::ALL);
    let results = engine.search(&filter, 0).await.unwrap();

    assert_eq!(
        proverbs(&results),
        vec![
            "Без труда нема плода",
            "Хто не працює, той не їсть",
            "Хто рано встає, тому Бог дає",
        ]
    );
    assert_eq!(results[2].category, "Праця");
    assert_eq!(results[2].description, "старанність дає результат");
}

#[tokio::test]
async fn test_lemmaFilter_withNoSites_shouldReturnEmptyPage() {
    let engine = engine().await;
    let filter = ProverbFilter::lemma("давати", &[]);
    assert!(engine.search(&filter, 0).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_firstLetterFilter_shouldIgnoreCase() {
    let engine = engine().await;

    let lower = engine.search(&ProverbFilter::FirstLetter('х'), 0).await.unwrap();
    let upper = engine.search(&ProverbFilter::FirstLetter('Х'), 0).await.unwrap();

    assert_eq!(lower, upper);
    assert_eq!(
        proverbs(&lower),
        vec!["Хто не працює, той не їсть", "Хто рано встає, тому Бог дає"]
    );
}

#[tokio::test]
async fn test_substringFilter_shouldMatchValueOrDescription() {
    let engine = engine().await;

    let results = engine
        .search(&ProverbFilter::Substring("дає".to_string()), 0)
        .await
        .unwrap();

    assert_eq!(results.len(), 3);
}

#[tokio::test]
async fn test_substringFilter_shouldBeCaseSensitive() {
    let engine = engine().await;

    let results = engine
        .search(&ProverbFilter::Substring("Дає".to_string()), 0)
        .await
        .unwrap();

    assert!(results.is_empty());
}

#[tokio::test]
async fn test_substringFilter_withWildcardCharacters_shouldMatchLiterally() {
    let repository = Repository::new_in_memory().unwrap();
    let corpus = indexer::parse_corpus(
        r#"{"Різне": {
            "Сто відсотків правди": "повна певність",
            "На 100% правда": "жарт",
            "snake_case": "назва"
        }}"#,
    )
    .unwrap();
    common::ingest_into(&repository, &corpus).await;
    let engine = SearchEngine::new(repository);

    let percent = engine
        .search(&ProverbFilter::Substring("0%".to_string()), 0)
        .await
        .unwrap();
    assert_eq!(proverbs(&percent), vec!["На 100% правда"]);

    let lone_percent = engine
        .search(&ProverbFilter::Substring("%".to_string()), 0)
        .await
        .unwrap();
    assert_eq!(lone_percent.len(), 1);

    let underscore = engine
        .search(&ProverbFilter::Substring("e_c".to_string()), 0)
        .await
        .unwrap();
    assert_eq!(proverbs(&underscore), vec!["snake_case"]);

    let wildcard = engine
        .search(&ProverbFilter::Substring("С_о".to_string()), 0)
        .await
        .unwrap();
    assert!(wildcard.is_empty());
}

#[tokio::test]
async fn test_substringFilter_withSynonymEndingInPeriod_shouldMatchStoredText() {
    let repository = Repository::new_in_memory().unwrap();
    let corpus = indexer::parse_corpus(
        r#"{"Вчинки": {
            "Що посієш, те й пожнеш.": "Наслідки залежать від вчинків. Синонім. Як дбаєш, так і маєш.; Яке коріння, таке й насіння."
        }}"#,
    )
    .unwrap();
    common::ingest_into(&repository, &corpus).await;
    let engine = SearchEngine::new(repository);

    let results = engine
        .search(&ProverbFilter::Substring("маєш.".to_string()), 0)
        .await
        .unwrap();

    assert_eq!(proverbs(&results), vec!["Як дбаєш, так і маєш."]);
    assert_eq!(results[0].description, "Наслідки залежать від вчинків.");
}

#[tokio::test]
async fn test_search_withOffsetBeyondI64_shouldReturnEmptyPage() {
    let engine = engine().await;

    let results = engine
        .search(&ProverbFilter::FirstLetter('х'), usize::MAX)
        .await
        .unwrap();

    assert!(results.is_empty());
}

#[tokio::test]
async fn test_pagination_sevenMatches_shouldSplitFiveTwoZero() {
    let repository = Repository::new_in_memory().unwrap();
    let mut json = String::from(r#"{"Друзі": {"#);
    for i in 0..7 {
        if i > 0 {
            json.push(',');
        }
        json.push_str(&format!(r#""Старий друг номер {}": "опис {}""#, i, i));
    }
    json.push_str(r#", "Без друзів": "опис"}}"#);
    let corpus = indexer::parse_corpus(&json).unwrap();
    common::ingest_into(&repository, &corpus).await;
    let engine = SearchEngine::new(repository);

    let filter = ProverbFilter::lemma("друг", &[UsageType::Value]);
    assert_eq!(engine.search(&filter, 0).await.unwrap().len(), 5);
    assert_eq!(engine.search(&filter, 5).await.unwrap().len(), 2);
    assert_eq!(engine.search(&filter, 10).await.unwrap().len(), 0);
}

#[tokio::test]
async fn test_pagination_concatenatedPages_shouldEqualFullMatchSet() {
    let repository = Repository::new_in_memory().unwrap();
    let mut json = String::from(r#"{"Книга": {"#);
    for i in 0..12 {
        if i > 0 {
            json.push(',');
        }
        json.push_str(&format!(r#""Без труда {}": "опис""#, i));
    }
    json.push_str("}}");
    common::ingest_into(&repository, &indexer::parse_corpus(&json).unwrap()).await;
    let engine = SearchEngine::new(repository);
    let filter = ProverbFilter::FirstLetter('б');

    let mut collected = Vec::new();
    let mut offset = 0;
    loop {
        let page = engine.search(&filter, offset).await.unwrap();
        assert!(page.len() <= PAGE_SIZE);
        let done = page.len() < PAGE_SIZE;
        collected.extend(page);
        if done {
            break;
        }
        offset += PAGE_SIZE;
    }

    assert_eq!(collected.len(), 12);
    let unique: HashSet<_> = collected.iter().map(|r| r.proverb.clone()).collect();
    assert_eq!(unique.len(), 12);
    assert_eq!(collected, engine.search_all(&filter).await.unwrap());
}

#[tokio::test]
async fn test_search_sameFilterAndOffset_shouldBeDeterministic() {
    let engine = engine().await;
    let filter = ProverbFilter::Substring("а".to_string());

    let first = engine.search(&filter, 0).await.unwrap();
    let second = engine.search(&filter, 0).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_lemmasByFirstLetter_shouldBeSortedAndDistinct() {
    let engine = engine().await;

    let lemmas = engine.lemmas_by_first_letter('Д', UsageType::Value).await.unwrap();

    let mut sorted = lemmas.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(lemmas, sorted);
    assert!(lemmas.contains(&"давати".to_string()));
    assert!(lemmas.contains(&"друг".to_string()));
    assert!(lemmas.contains(&"діло".to_string()));
    assert!(!lemmas.contains(&"досвід".to_string()));
}

#[tokio::test]
async fn test_lemmasByFirstLetter_descriptionSite_shouldUseDescriptionLemmas() {
    let engine = engine().await;
    let lemmas = engine
        .lemmas_by_first_letter('с', UsageType::Description)
        .await
        .unwrap();
    assert_eq!(lemmas, vec!["справжній", "старанність"]);
}
