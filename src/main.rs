// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{ArgGroup, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use paremia::app_config::{self, Config};
use paremia::database::models::UsageType;
use paremia::database::{DatabaseConnection, Repository};
use paremia::indexer::{self, Indexer};
use paremia::quiz::{AssembleQuiz, ChoiceQuestion, MeaningQuiz, QuizOutcome, QuizSession, VerbQuiz};
use paremia::search::{ProverbFilter, SearchEngine, PAGE_SIZE};
use paremia::DictionaryAnalyzer;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// Quiz mode
#[derive(Debug, Clone, Copy, ValueEnum)]
enum QuizMode {
    /// Pick the description of a proverb
    Meaning,
    /// Pick the verb hidden in a proverb
    Verb,
    /// Put a proverb's words back in order
    Assemble,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the store from a corpus document
    Ingest {
        /// Corpus JSON: category -> proverb -> description
        #[arg(value_name = "CORPUS_JSON")]
        corpus_path: PathBuf,

        /// Drop all existing data first
        #[arg(long)]
        reset: bool,
    },

    /// Search proverbs by lemma, first letter or substring
    #[command(group(ArgGroup::new("filter").required(true).args(["lemma", "letter", "substring"])))]
    Search {
        /// Exact lemma
        #[arg(long)]
        lemma: Option<String>,

        /// Also match the lemma inside descriptions
        #[arg(long, requires = "lemma")]
        with_descriptions: bool,

        /// First letter of the proverb, any case
        #[arg(long)]
        letter: Option<char>,

        /// Literal, case-sensitive substring of the proverb or its description
        #[arg(long)]
        substring: Option<String>,

        /// Matches to skip
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Print every page
        #[arg(long)]
        all: bool,
    },

    /// List lemmas starting with a letter
    Lemmas {
        letter: char,

        /// Include lemmas used only in descriptions
        #[arg(long)]
        with_descriptions: bool,
    },

    /// Browse categories
    Categories {
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Show store statistics
    Stats,

    /// Most frequent lemmas of a category
    TopLemmas {
        category_id: i64,

        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Play a quiz over one category
    Quiz {
        #[arg(value_enum)]
        mode: QuizMode,

        category_id: i64,

        /// Seed for a reproducible question sequence
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Generate shell completions for paremia
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Paremia - proverb index, search and quizzes
#[derive(Parser, Debug)]
#[command(name = "paremia")]
#[command(version)]
#[command(about = "Index proverbs, search them and quiz yourself")]
#[command(long_about = "Paremia indexes a corpus of proverbs with their descriptions and answers
lemma, first-letter and substring searches over it.

EXAMPLES:
    paremia ingest corpus.json --reset           # Build the store from scratch
    paremia search --lemma праця                 # Proverbs using a lemma
    paremia search --letter б --all              # Every proverb starting with б
    paremia search --substring \"50%\"              # Literal substring match
    paremia quiz verb 3 --seed 42                # Verb quiz over category 3
    paremia completions bash > paremia.bash      # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config: String,

    /// Database file, overriding the configuration
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The level is lowered or raised once the config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "paremia", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;
    log::set_max_level(config.log_level.to_level_filter());

    let db_path = config.resolved_database_path()?;
    let repository = Repository::new(DatabaseConnection::new(&db_path)?);

    match cli.command {
        Commands::Ingest { corpus_path, reset } => {
            run_ingest(&config, repository, &corpus_path, reset).await
        }
        Commands::Search {
            lemma,
            with_descriptions,
            letter,
            substring,
            offset,
            all,
        } => {
            let filter = match (lemma, letter, substring) {
                (Some(lemma), _, _) => {
                    let sites: &[UsageType] = if with_descriptions {
                        &UsageType::ALL
                    } else {
                        &[UsageType::Value]
                    };
                    ProverbFilter::lemma(lemma, sites)
                }
                (None, Some(letter), _) => ProverbFilter::FirstLetter(letter),
                (None, None, Some(substring)) => ProverbFilter::Substring(substring),
                (None, None, None) => return Err(anyhow!("A search filter is required")),
            };
            run_search(repository, &filter, offset, all).await
        }
        Commands::Lemmas {
            letter,
            with_descriptions,
        } => run_lemmas(repository, letter, with_descriptions).await,
        Commands::Categories { page } => run_categories(&config, repository, page).await,
        Commands::Stats => {
            println!("{}", repository.connection().stats()?);
            Ok(())
        }
        Commands::TopLemmas { category_id, limit } => {
            let rows = repository.top_category_lemmas(category_id, limit).await?;
            if rows.is_empty() {
                println!("No statistics for category {}", category_id);
            }
            for row in rows {
                println!("{:>5}  {}", row.frequency, row.lemma_value);
            }
            Ok(())
        }
        Commands::Quiz {
            mode,
            category_id,
            seed,
        } => run_quiz(&config, repository, mode, category_id, seed).await,
        Commands::Completions { .. } => Ok(()),
    }
}

/// Load the config file, creating a default one when missing, then apply CLI overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let config_path = Path::new(&cli.config);

    let mut config = if config_path.exists() {
        Config::from_file(config_path)?
    } else {
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path.display()
        );
        let config = Config::default();
        config.save(config_path)?;
        config
    };

    if let Some(database) = &cli.database {
        config.database_path = Some(database.clone());
    }

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    config
        .validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

async fn run_ingest(config: &Config, repository: Repository, corpus_path: &Path, reset: bool) -> Result<()> {
    let corpus = indexer::load_corpus(corpus_path)?;
    let analyzer = DictionaryAnalyzer::from_path(&config.lexicon_path)?;

    if reset {
        repository.connection().reset()?;
    } else if repository.connection().stats()?.category_count > 0 {
        return Err(anyhow!(
            "Store at {:?} already holds data; rerun with --reset to rebuild it",
            repository.connection().path()
        ));
    }

    let progress_bar = ProgressBar::new(corpus.len() as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} categories ({percent}%) {msg}")
        .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress_bar.set_style(style.progress_chars("█▓▒░"));

    let indexer = Indexer::new(repository.clone(), Arc::new(analyzer), config.ingest.clone());
    let report = indexer.ingest(&corpus, Some(&progress_bar)).await;
    progress_bar.finish_and_clear();
    let report = report?;

    info!(
        "Ingested {} categories and {} proverbs",
        report.categories, report.proverbs
    );
    println!("{}", repository.connection().stats()?);
    Ok(())
}

async fn run_search(repository: Repository, filter: &ProverbFilter, offset: usize, all: bool) -> Result<()> {
    let engine = SearchEngine::new(repository);

    let results = if all {
        engine.search_all(filter).await?
    } else {
        engine.search(filter, offset).await?
    };

    if results.is_empty() {
        if offset == 0 || all {
            println!("Nothing found");
        } else {
            println!("No more results");
        }
        return Ok(());
    }

    for result in &results {
        println!("[{}] {}\n    {}", result.category, result.proverb, result.description);
    }

    if !all && results.len() == PAGE_SIZE {
        println!("More results: --offset {}", offset + PAGE_SIZE);
    }

    Ok(())
}

async fn run_lemmas(repository: Repository, letter: char, with_descriptions: bool) -> Result<()> {
    let engine = SearchEngine::new(repository);

    let mut lemmas = engine.lemmas_by_first_letter(letter, UsageType::Value).await?;
    if with_descriptions {
        lemmas.extend(engine.lemmas_by_first_letter(letter, UsageType::Description).await?);
        lemmas.sort();
        lemmas.dedup();
    }

    if lemmas.is_empty() {
        println!("No lemmas start with '{}'", letter);
    } else {
        println!("{}", lemmas.join(", "));
    }
    Ok(())
}

async fn run_categories(config: &Config, repository: Repository, page: usize) -> Result<()> {
    let listing = repository
        .list_categories(page.max(1), config.category_page_size)
        .await?;

    for category in &listing.categories {
        println!("{:>4}  {}", category.id, category.name);
    }

    if listing.has_more {
        println!("More categories: --page {}", page.max(1) + 1);
    }
    Ok(())
}

async fn run_quiz(
    config: &Config,
    repository: Repository,
    mode: QuizMode,
    category_id: i64,
    seed: Option<u64>,
) -> Result<()> {
    let category = repository
        .get_category(category_id)
        .await?
        .ok_or_else(|| anyhow!("Unknown category: {}", category_id))?;
    println!("Category: {}", category.name);

    let mut session = QuizSession::new(category_id);

    match mode {
        QuizMode::Meaning => {
            let quiz = match seed {
                Some(seed) => MeaningQuiz::with_seed(repository, config.quiz.clone(), seed),
                None => MeaningQuiz::new(repository, config.quiz.clone()),
            };
            loop {
                match quiz.next_question(&session).await? {
                    QuizOutcome::Question(question) => {
                        let Some(next) = ask_choice(&question)? else {
                            break;
                        };
                        session = next;
                    }
                    QuizOutcome::Exhausted { correct_answers, total } => {
                        print_tally(correct_answers, total);
                        break;
                    }
                }
            }
        }
        QuizMode::Verb => {
            let quiz = match seed {
                Some(seed) => VerbQuiz::with_seed(repository, config.quiz.clone(), seed),
                None => VerbQuiz::new(repository, config.quiz.clone()),
            };
            loop {
                match quiz.next_playable_question(&session).await? {
                    QuizOutcome::Question(question) => {
                        let Some(next) = ask_choice(&question.question)? else {
                            break;
                        };
                        session = next;
                    }
                    QuizOutcome::Exhausted { correct_answers, total } => {
                        print_tally(correct_answers, total);
                        break;
                    }
                }
            }
        }
        QuizMode::Assemble => {
            let quiz = match seed {
                Some(seed) => AssembleQuiz::with_seed(repository, seed),
                None => AssembleQuiz::new(repository),
            };
            loop {
                match quiz.next_question(&session).await? {
                    QuizOutcome::Question(question) => {
                        println!("\n{}", question.words.join(" / "));
                        let Some(answer) = read_answer()? else {
                            break;
                        };
                        let correct = question.is_correct(&answer);
                        if correct {
                            println!("Correct!");
                        } else {
                            println!("Wrong. Answer: {}", question.answer);
                        }
                        session = question.session;
                        session.record_answer(correct);
                    }
                    QuizOutcome::Exhausted { correct_answers, total } => {
                        print_tally(correct_answers, total);
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}

/// Present a multiple-choice question; `None` when the player quits
fn ask_choice(question: &ChoiceQuestion) -> Result<Option<QuizSession>> {
    println!("\n{}", question.prompt);
    for (i, option) in question.options.iter().enumerate() {
        println!("  {}. {}", i + 1, option);
    }

    let Some(answer) = read_answer()? else {
        return Ok(None);
    };

    let correct = answer
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .is_some_and(|index| question.is_correct(index));

    if correct {
        println!("Correct!");
    } else {
        println!("Wrong. Answer: {}", question.correct_option());
    }

    let mut session = question.session.clone();
    session.record_answer(correct);
    Ok(Some(session))
}

/// Read one answer line; `None` on end of input or an empty line
fn read_answer() -> Result<Option<String>> {
    print!("> ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    let read = std::io::stdin().lock().read_line(&mut line)?;
    let line = line.trim().to_string();

    if read == 0 || line.is_empty() {
        return Ok(None);
    }
    Ok(Some(line))
}

fn print_tally(correct_answers: usize, total: usize) {
    println!(
        "\nCategory complete: {} correct out of {} proverbs",
        correct_answers, total
    );
}
