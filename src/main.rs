use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use termcolor::{ColorChoice, StandardStream};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use newslens::batch::{run_batch, write_report};
use newslens::config::{is_supported_language, Config};
use newslens::input::read_file;
use newslens::nlp::keywords::KeywordExtractor;
use newslens::nlp::language::StopwordLanguageDetector;
use newslens::nlp::sentiment::{SentenceSentiment, Sentiment};
use newslens::nlp::stopwords::Stopwords;
use newslens::render;
use newslens::response::{BulletList, KeywordList, LanguageList, Response};
use newslens::{analyze_article, AnalysisOption, AnalysisRequest, Error, Services};

#[derive(Parser)]
#[command(name = "newslens", about = "Summarize and analyze articles and news text")]
struct Cli {
    /// Print the JSON response envelope instead of the coloured report
    #[arg(long, global = true)]
    json: bool,
    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Detect languages locally instead of asking the translation service
    #[arg(long, global = true)]
    offline: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct InputArgs {
    /// Article text
    #[arg(long)]
    text: Option<String>,
    /// Article file (txt, md, html or pdf)
    #[arg(long)]
    file: Option<PathBuf>,
    /// Article URL
    #[arg(long)]
    url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extractive summary, optionally as bullet points
    Summarize {
        #[command(flatten)]
        input: InputArgs,
        #[arg(short = 'n', long)]
        sentences: Option<usize>,
        #[arg(long)]
        bullets: bool,
    },
    /// Overall sentiment, optionally per sentence
    Sentiment {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long)]
        sentences: bool,
    },
    /// Most frequent non-stopword terms
    Keywords {
        #[command(flatten)]
        input: InputArgs,
        #[arg(short = 'n', long)]
        count: Option<usize>,
        /// Shortest keyword length in characters
        #[arg(long)]
        min_chars: Option<usize>,
    },
    /// Word, sentence and reading-time statistics
    Stats {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Identify the language of the text
    Detect {
        #[command(flatten)]
        input: InputArgs,
    },
    Translate {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long)]
        to: String,
        #[arg(long, default_value = "auto")]
        from: String,
    },
    /// Download an article and print the extracted text
    Fetch {
        #[arg(long)]
        url: String,
    },
    /// Full analysis: detection, optional translation and the selected analyses
    Analyze {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long, value_enum, num_args = 1..)]
        options: Vec<AnalysisOption>,
        /// Translate before analysing (requires the translation option)
        #[arg(long)]
        to: Option<String>,
        #[arg(short = 'n', long)]
        sentences: Option<usize>,
        #[arg(long)]
        title: Option<String>,
    },
    /// Analyse every article file under a directory
    Batch {
        #[arg(short, long)]
        dir: PathBuf,
        /// Write the JSON report here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[arg(long, value_enum, num_args = 1..)]
        options: Vec<AnalysisOption>,
        #[arg(short = 'n', long)]
        sentences: Option<usize>,
    },
    /// List the languages available for translation
    Languages,
}

struct Input {
    text: String,
    title: Option<String>,
}

#[derive(Serialize)]
struct SentimentOutput {
    #[serde(flatten)]
    overall: Sentiment,
    #[serde(skip_serializing_if = "Option::is_none")]
    sentences: Option<Vec<SentenceSentiment>>,
}

fn read_input(services: &Services, input: &InputArgs) -> newslens::Result<Input> {
    let resolved = if let Some(text) = &input.text {
        Input {
            text: text.clone(),
            title: None,
        }
    } else if let Some(path) = &input.file {
        Input {
            text: read_file(path)?,
            title: path.file_stem().map(|s| s.to_string_lossy().to_string()),
        }
    } else if let Some(url) = &input.url {
        let article = services.fetcher.fetch(url)?;
        Input {
            title: Some(article.title).filter(|t| !t.is_empty()),
            text: article.text,
        }
    } else {
        return Err(Error::EmptyInput);
    };

    if resolved.text.trim().is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(resolved)
}

fn stdout() -> StandardStream {
    let choice = if io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

/// Print `result` as a JSON envelope or through `show`; a failure also fails the process.
fn emit<T, F>(json: bool, result: newslens::Result<T>, show: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&mut StandardStream, &T) -> io::Result<()>,
{
    if json {
        let response = Response::from(result);
        println!("{}", serde_json::to_string_pretty(&response)?);
        if let Some(err) = response.error {
            bail!(err);
        }
        return Ok(());
    }

    match result {
        Ok(data) => {
            show(&mut stdout(), &data)?;
            Ok(())
        }
        Err(e) => {
            let hint = e.user_message();
            let err = anyhow::Error::new(e);
            match hint {
                Some(message) => Err(err.context(message)),
                None => Err(err),
            }
        }
    }
}

fn analysis_request(
    services: &Services,
    text: String,
    options: Vec<AnalysisOption>,
    sentences: Option<usize>,
) -> AnalysisRequest {
    let mut request = AnalysisRequest::new(services, text);
    if !options.is_empty() {
        request.options = options;
    }
    if let Some(n) = sentences {
        request.summary_sentences = n;
    }
    request
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env().context("loading configuration")?;
    debug!("Translation service at {}", config.translate_url);

    let mut services = Services::from_config(config).context("building services")?;
    if cli.offline {
        services = services.with_detector(Arc::new(StopwordLanguageDetector::new()));
    }
    let json = cli.json;

    match cli.command {
        Commands::Summarize {
            input,
            sentences,
            bullets,
        } => {
            let input = read_input(&services, &input);
            if bullets {
                let n = sentences.unwrap_or(services.config.bullet_points);
                let result = input.map(|i| BulletList {
                    bullet_points: services.summarizer.bullet_point_summary(&i.text, n),
                });
                emit(json, result, |w, b| render::render_bullets(w, &b.bullet_points))
            } else {
                let n = sentences.unwrap_or(services.config.summary_sentences);
                let result =
                    input.and_then(|i| services.summarizer.extractive_summarize(&i.text, n));
                emit(json, result, |w, s| render::render_summary(w, s))
            }
        }
        Commands::Sentiment { input, sentences } => {
            let result = read_input(&services, &input).and_then(|i| {
                let overall = services.analyzer.analyze_sentiment(&i.text)?;
                let per_sentence =
                    sentences.then(|| services.analyzer.analyze_sentence_sentiments(&i.text));
                Ok(SentimentOutput {
                    overall,
                    sentences: per_sentence,
                })
            });
            emit(json, result, |w, out| {
                render::render_sentiment(w, &out.overall)?;
                match &out.sentences {
                    Some(s) => render::render_sentence_sentiments(w, s),
                    None => Ok(()),
                }
            })
        }
        Commands::Keywords {
            input,
            count,
            min_chars,
        } => {
            let analyzer = match min_chars {
                Some(n) => services.analyzer.clone().with_keyword_extractor(
                    KeywordExtractor::new(Stopwords::english()).with_min_chars(n),
                ),
                None => services.analyzer.clone(),
            };
            let n = count.unwrap_or(services.config.keyword_count);
            let result = read_input(&services, &input).map(|i| KeywordList {
                keywords: analyzer.extract_keywords(&i.text, n),
            });
            emit(json, result, |w, k| render::render_keywords(w, &k.keywords))
        }
        Commands::Stats { input } => {
            let result = read_input(&services, &input)
                .map(|i| services.analyzer.get_text_statistics(&i.text));
            emit(json, result, |w, s| render::render_statistics(w, s))
        }
        Commands::Detect { input } => {
            let result = read_input(&services, &input)
                .and_then(|i| services.detector.detect_language(&i.text));
            emit(json, result, |w, d| render::render_detection(w, d))
        }
        Commands::Translate { input, to, from } => {
            let result = read_input(&services, &input).and_then(|i| {
                if !is_supported_language(&to) {
                    return Err(Error::InvalidArgument(format!(
                        "unsupported target language '{}'",
                        to
                    )));
                }
                services.translator.translate(&i.text, &to, &from)
            });
            emit(json, result, |w, t| render::render_translation(w, t))
        }
        Commands::Fetch { url } => {
            let result = services.fetcher.fetch(&url);
            emit(json, result, |w, a| render::render_article(w, a))
        }
        Commands::Analyze {
            input,
            options,
            to,
            sentences,
            title,
        } => {
            let result = read_input(&services, &input).and_then(|i| {
                let mut request = analysis_request(&services, i.text, options, sentences);
                request.title = title.or(i.title);
                if let Some(lang) = to {
                    request.target_language = lang;
                }
                analyze_article(&services, &request)
            });
            emit(json, result, |w, r| render::render_report(w, r))
        }
        Commands::Batch {
            dir,
            out,
            options,
            sentences,
        } => {
            let template = analysis_request(&services, String::new(), options, sentences);
            let entries = run_batch(&services, &dir, &template, !json)
                .with_context(|| format!("analysing {}", dir.display()))?;
            match out {
                Some(path) => {
                    write_report(&entries, &path)
                        .with_context(|| format!("writing {}", path.display()))?;
                    eprintln!("Wrote {} entries to {}", entries.len(), path.display());
                }
                None => println!("{}", serde_json::to_string_pretty(&entries)?),
            }
            Ok(())
        }
        Commands::Languages => {
            let list = LanguageList::supported();
            emit(json, Ok(list), |w, l| {
                use std::io::Write;
                for lang in &l.languages {
                    writeln!(w, "{:<6} {}", lang.code, lang.name)?;
                }
                Ok(())
            })
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli)
}
