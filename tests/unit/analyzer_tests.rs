/*!
 * Tests for the lexicon-backed analyzer
 */

use paremia::analysis::{Aspect, MorphAnalyzer, Number, PartOfSpeech, Tense};
use paremia::analysis::tokenizer::tokenize_words;
use paremia::errors::AnalyzerError;
use paremia::DictionaryAnalyzer;

use crate::common;

#[test]
fn test_fixtureLexicon_shouldLoadAllForms() {
    let analyzer = common::fixture_analyzer();
    assert!(!analyzer.is_empty());
    assert!(analyzer.len() > 40);
}

#[test]
fn test_fixtureLexicon_verbForm_shouldCarryAgreementFeatures() {
    let analyzer = common::fixture_analyzer();
    let analysis = analyzer.analyze("Знають").unwrap();

    assert_eq!(analysis.lemma, "знати");
    assert_eq!(analysis.pos, PartOfSpeech::Verb);
    let features = analysis.verb.unwrap();
    assert_eq!(features.aspect, Some(Aspect::Imperfective));
    assert_eq!(features.number, Some(Number::Plural));
    assert_eq!(features.tense, Some(Tense::Present));
}

#[test]
fn test_fixtureLexicon_infinitive_shouldHaveNoVerbFeatures() {
    let analyzer = common::fixture_analyzer();
    let analysis = analyzer.analyze("трудитися").unwrap();
    assert_eq!(analysis.pos, PartOfSpeech::Infn);
    assert!(analysis.verb.is_none());
}

#[test]
fn test_analyze_overTokenizedProverb_shouldDropUnknownWords() {
    let analyzer = common::fixture_analyzer();
    let known: Vec<_> = tokenize_words("Старий друг краще нових двох")
        .into_iter()
        .filter_map(|token| analyzer.analyze(token))
        .map(|analysis| analysis.lemma)
        .collect();

    assert_eq!(known, vec!["старий", "друг", "добрий", "новий"]);
}

#[test]
fn test_fromPath_withMalformedFile_shouldReportMalformed() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(dir.path(), "lexicon.json", "[1, 2, 3]").unwrap();

    let result = DictionaryAnalyzer::from_path(&path);
    assert!(matches!(result, Err(AnalyzerError::LexiconMalformed(_))));
}
