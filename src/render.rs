//! Coloured terminal output for analysis results.

use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

use crate::fetch::Article;
use crate::nlp::language::Detection;
use crate::nlp::sentiment::{SentenceSentiment, Sentiment, SentimentLabel};
use crate::nlp::statistics::TextStatistics;
use crate::nlp::summarization::Summary;
use crate::pipeline::AnalysisReport;
use crate::translate::Translation;

const GAUGE_WIDTH: usize = 40;
const BAR_WIDTH: usize = 30;
/// Keywords shown in the bar chart.
const CHART_KEYWORDS: usize = 10;

fn label_color(label: SentimentLabel) -> Color {
    match label {
        SentimentLabel::Positive => Color::Green,
        SentimentLabel::Neutral => Color::Yellow,
        SentimentLabel::Negative => Color::Red,
    }
}

/// Gauge bands: below 33 reads negative, 66 and above positive.
fn band_color(percentage: f64) -> Color {
    if percentage < 33.0 {
        Color::Red
    } else if percentage < 66.0 {
        Color::Yellow
    } else {
        Color::Green
    }
}

/// `[#####-----]` filled in proportion to a 0-100 value.
pub fn gauge_bar(percentage: f64, width: usize) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

fn heading<W: WriteColor>(w: &mut W, title: &str) -> io::Result<()> {
    w.set_color(ColorSpec::new().set_bold(true).set_fg(Some(Color::Cyan)))?;
    writeln!(w, "\n== {} ==", title)?;
    w.reset()
}

fn colored<W: WriteColor>(w: &mut W, color: Color, text: &str) -> io::Result<()> {
    w.set_color(ColorSpec::new().set_fg(Some(color)))?;
    write!(w, "{}", text)?;
    w.reset()
}

pub fn render_detection<W: WriteColor>(w: &mut W, detection: &Detection) -> io::Result<()> {
    writeln!(
        w,
        "Detected language: {} ({}), confidence {:.0}%",
        detection.language_name,
        detection.language_code,
        detection.confidence * 100.0
    )
}

pub fn render_summary<W: WriteColor>(w: &mut W, summary: &Summary) -> io::Result<()> {
    heading(w, "Summary")?;
    writeln!(w, "{}", summary.summary)?;
    writeln!(
        w,
        "Condensed from {} to {} sentences",
        summary.original_sentences, summary.summary_sentences
    )
}

pub fn render_bullets<W: WriteColor>(w: &mut W, bullets: &[String]) -> io::Result<()> {
    heading(w, "Key Points")?;
    if bullets.is_empty() {
        return writeln!(w, "No key points generated");
    }
    for bullet in bullets {
        writeln!(w, "{}", bullet)?;
    }
    Ok(())
}

pub fn render_sentiment<W: WriteColor>(w: &mut W, sentiment: &Sentiment) -> io::Result<()> {
    heading(w, "Sentiment")?;
    write!(w, "Overall: ")?;
    w.set_color(
        ColorSpec::new()
            .set_bold(true)
            .set_fg(Some(label_color(sentiment.sentiment))),
    )?;
    writeln!(w, "{}", sentiment.sentiment)?;
    w.reset()?;
    writeln!(
        w,
        "Polarity: {:.2}  Subjectivity: {:.2}",
        sentiment.polarity, sentiment.subjectivity
    )?;

    write!(w, "Gauge ")?;
    colored(
        w,
        band_color(sentiment.polarity_percentage),
        &gauge_bar(sentiment.polarity_percentage, GAUGE_WIDTH),
    )?;
    writeln!(w, " {:.0}/100", sentiment.polarity_percentage)
}

/// One line per sentence: a bar left or right of the zero line, then the sentence.
pub fn render_sentence_sentiments<W: WriteColor>(
    w: &mut W,
    sentences: &[SentenceSentiment],
) -> io::Result<()> {
    if sentences.is_empty() {
        return Ok(());
    }
    heading(w, "Sentiment Flow")?;

    let half = GAUGE_WIDTH / 4;
    for (i, s) in sentences.iter().enumerate() {
        let len = (s.polarity.abs().min(1.0) * half as f64).round() as usize;
        write!(w, "{:>3} ", i + 1)?;
        if s.polarity < 0.0 {
            write!(w, "{}", " ".repeat(half - len))?;
            colored(w, Color::Red, &"<".repeat(len))?;
            write!(w, "|{}", " ".repeat(half))?;
        } else {
            write!(w, "{}|", " ".repeat(half))?;
            let color = if len == 0 { Color::Yellow } else { Color::Green };
            colored(w, color, &">".repeat(len))?;
            write!(w, "{}", " ".repeat(half - len))?;
        }
        writeln!(w, " {:+.2} {}", s.polarity, s.sentence)?;
    }
    Ok(())
}

pub fn render_keywords<W: WriteColor>(w: &mut W, keywords: &[(String, usize)]) -> io::Result<()> {
    heading(w, "Keywords")?;
    if keywords.is_empty() {
        return writeln!(w, "No keywords extracted");
    }

    let shown = &keywords[..keywords.len().min(CHART_KEYWORDS)];
    let max = shown.iter().map(|(_, c)| *c).max().unwrap_or(1).max(1);
    let width = shown.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);

    for (keyword, count) in shown {
        let len = (*count * BAR_WIDTH).div_ceil(max);
        write!(w, "{:<width$} ", keyword, width = width)?;
        colored(w, Color::Blue, &"█".repeat(len))?;
        writeln!(w, " {}", count)?;
    }
    if keywords.len() > shown.len() {
        let rest: Vec<&str> = keywords[shown.len()..].iter().map(|(k, _)| k.as_str()).collect();
        writeln!(w, "Also: {}", rest.join(", "))?;
    }
    Ok(())
}

pub fn render_statistics<W: WriteColor>(w: &mut W, stats: &TextStatistics) -> io::Result<()> {
    heading(w, "Statistics")?;
    writeln!(w, "Words:               {}", stats.word_count)?;
    writeln!(w, "Sentences:           {}", stats.sentence_count)?;
    writeln!(w, "Characters:          {}", stats.character_count)?;
    writeln!(w, "Avg sentence length: {}", stats.avg_sentence_length)?;
    writeln!(w, "Reading time:        {} min", stats.reading_time_minutes)
}

pub fn render_translation<W: WriteColor>(w: &mut W, translation: &Translation) -> io::Result<()> {
    heading(w, "Translation")?;
    writeln!(
        w,
        "{} -> {}",
        translation.source_language, translation.target_language
    )?;
    writeln!(w, "{}", translation.translated_text)
}

pub fn render_article<W: WriteColor>(w: &mut W, article: &Article) -> io::Result<()> {
    w.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(w, "{}", article.title)?;
    w.reset()?;
    if !article.authors.is_empty() {
        writeln!(w, "By {}", article.authors.join(", "))?;
    }
    if let Some(date) = &article.publish_date {
        writeln!(w, "Published {}", date)?;
    }
    writeln!(w, "{}\n", article.url)?;
    writeln!(w, "{}", article.text)
}

/// Every section present in the report, in dashboard order.
pub fn render_report<W: WriteColor>(w: &mut W, report: &AnalysisReport) -> io::Result<()> {
    if let Some(title) = &report.title {
        w.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(w, "{}", title)?;
        w.reset()?;
    }
    if let Some(detection) = &report.detected_language {
        render_detection(w, detection)?;
    }
    if let Some(summary) = &report.summary {
        render_summary(w, summary)?;
    }
    if let Some(bullets) = &report.bullet_points {
        render_bullets(w, bullets)?;
    }
    if let Some(sentiment) = &report.sentiment {
        render_sentiment(w, sentiment)?;
    }
    if let Some(sentences) = &report.sentence_sentiments {
        render_sentence_sentiments(w, sentences)?;
    }
    if let Some(keywords) = &report.keywords {
        render_keywords(w, keywords)?;
    }
    if let Some(stats) = &report.statistics {
        render_statistics(w, stats)?;
    }
    if let Some(translation) = &report.translation {
        render_translation(w, translation)?;
    }
    w.flush()
}
