/*!
 * Grammatical tags surfaced by the morphological analyzer.
 *
 * Tag strings follow the OpenCorpora notation used by the analyzer's
 * lexicon (`VERB`, `perf`, `sing`, `3per`, `femn`, `past`, ...). The same
 * strings are what the store persists.
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AnalyzerError;

/// Part of speech
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartOfSpeech {
    /// Noun
    Noun,
    /// Full adjective
    Adjf,
    /// Short adjective
    Adjs,
    /// Comparative
    Comp,
    /// Finite verb form
    Verb,
    /// Infinitive
    Infn,
    /// Full participle
    Prtf,
    /// Short participle
    Prts,
    /// Adverbial participle
    Grnd,
    /// Numeral
    Numr,
    /// Adverb
    Advb,
    /// Pronoun
    Npro,
    /// Predicative
    Pred,
    /// Preposition
    Prep,
    /// Conjunction
    Conj,
    /// Particle
    Prcl,
    /// Interjection
    Intj,
}

impl PartOfSpeech {
    /// OpenCorpora tag for this part of speech
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Noun => "NOUN",
            Self::Adjf => "ADJF",
            Self::Adjs => "ADJS",
            Self::Comp => "COMP",
            Self::Verb => "VERB",
            Self::Infn => "INFN",
            Self::Prtf => "PRTF",
            Self::Prts => "PRTS",
            Self::Grnd => "GRND",
            Self::Numr => "NUMR",
            Self::Advb => "ADVB",
            Self::Npro => "NPRO",
            Self::Pred => "PRED",
            Self::Prep => "PREP",
            Self::Conj => "CONJ",
            Self::Prcl => "PRCL",
            Self::Intj => "INTJ",
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for PartOfSpeech {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NOUN" => Ok(Self::Noun),
            "ADJF" => Ok(Self::Adjf),
            "ADJS" => Ok(Self::Adjs),
            "COMP" => Ok(Self::Comp),
            "VERB" => Ok(Self::Verb),
            "INFN" => Ok(Self::Infn),
            "PRTF" => Ok(Self::Prtf),
            "PRTS" => Ok(Self::Prts),
            "GRND" => Ok(Self::Grnd),
            "NUMR" => Ok(Self::Numr),
            "ADVB" => Ok(Self::Advb),
            "NPRO" => Ok(Self::Npro),
            "PRED" => Ok(Self::Pred),
            "PREP" => Ok(Self::Prep),
            "CONJ" => Ok(Self::Conj),
            "PRCL" => Ok(Self::Prcl),
            "INTJ" => Ok(Self::Intj),
            _ => Err(AnalyzerError::UnknownTag { kind: "pos", tag: s.to_string() }),
        }
    }
}

/// Verb aspect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Aspect {
    /// Perfective
    #[serde(rename = "perf")]
    Perfective,
    /// Imperfective
    #[serde(rename = "impf")]
    Imperfective,
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Perfective => write!(f, "perf"),
            Self::Imperfective => write!(f, "impf"),
        }
    }
}

impl FromStr for Aspect {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "perf" => Ok(Self::Perfective),
            "impf" => Ok(Self::Imperfective),
            _ => Err(AnalyzerError::UnknownTag { kind: "aspect", tag: s.to_string() }),
        }
    }
}

/// Grammatical number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Number {
    /// Singular
    #[serde(rename = "sing")]
    Singular,
    /// Plural
    #[serde(rename = "plur")]
    Plural,
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Singular => write!(f, "sing"),
            Self::Plural => write!(f, "plur"),
        }
    }
}

impl FromStr for Number {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sing" => Ok(Self::Singular),
            "plur" => Ok(Self::Plural),
            _ => Err(AnalyzerError::UnknownTag { kind: "number", tag: s.to_string() }),
        }
    }
}

/// Grammatical person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Person {
    #[serde(rename = "1per")]
    First,
    #[serde(rename = "2per")]
    Second,
    #[serde(rename = "3per")]
    Third,
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f, "1per"),
            Self::Second => write!(f, "2per"),
            Self::Third => write!(f, "3per"),
        }
    }
}

impl FromStr for Person {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1per" => Ok(Self::First),
            "2per" => Ok(Self::Second),
            "3per" => Ok(Self::Third),
            _ => Err(AnalyzerError::UnknownTag { kind: "person", tag: s.to_string() }),
        }
    }
}

/// Grammatical gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "masc")]
    Masculine,
    #[serde(rename = "femn")]
    Feminine,
    #[serde(rename = "neut")]
    Neuter,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Masculine => write!(f, "masc"),
            Self::Feminine => write!(f, "femn"),
            Self::Neuter => write!(f, "neut"),
        }
    }
}

impl FromStr for Gender {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "masc" => Ok(Self::Masculine),
            "femn" => Ok(Self::Feminine),
            "neut" => Ok(Self::Neuter),
            _ => Err(AnalyzerError::UnknownTag { kind: "gender", tag: s.to_string() }),
        }
    }
}

/// Verb tense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tense {
    #[serde(rename = "past")]
    Past,
    #[serde(rename = "pres")]
    Present,
    #[serde(rename = "futr")]
    Future,
}

impl fmt::Display for Tense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Past => write!(f, "past"),
            Self::Present => write!(f, "pres"),
            Self::Future => write!(f, "futr"),
        }
    }
}

impl FromStr for Tense {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "past" => Ok(Self::Past),
            "pres" => Ok(Self::Present),
            "futr" => Ok(Self::Future),
            _ => Err(AnalyzerError::UnknownTag { kind: "tense", tag: s.to_string() }),
        }
    }
}

/// Grammatical features carried by a finite verb form.
///
/// Any feature may be absent: present-tense forms have no gender,
/// past-tense forms have no person.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerbFeatures {
    #[serde(default)]
    pub aspect: Option<Aspect>,
    #[serde(default)]
    pub number: Option<Number>,
    #[serde(default)]
    pub person: Option<Person>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub tense: Option<Tense>,
}

impl VerbFeatures {
    /// Features two verbs must share to be interchangeable in a sentence slot.
    /// Person is not part of the key.
    pub fn agreement_key(&self) -> (Option<Aspect>, Option<Number>, Option<Gender>, Option<Tense>) {
        (self.aspect, self.number, self.gender, self.tense)
    }
}

/// Parse an optional tag column read back from the store
pub fn parse_optional<T: FromStr<Err = AnalyzerError>>(
    value: Option<String>,
) -> Result<Option<T>, AnalyzerError> {
    value.map(|v| v.parse()).transpose()
}
