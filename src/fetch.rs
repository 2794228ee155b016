//! Article download and HTML text extraction.

use once_cell::sync::Lazy;
use reqwest::blocking::Client;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use url::Url;

use crate::config::Config;
use crate::error::{Error, Result};

static OG_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:title"]"#).unwrap());
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());
static AUTHOR: Lazy<Selector> = Lazy::new(|| Selector::parse(r#"meta[name="author"]"#).unwrap());
static PUBLISHED: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="article:published_time"]"#).unwrap());
static OG_IMAGE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:image"]"#).unwrap());
static ARTICLE_PARAGRAPHS: Lazy<Selector> = Lazy::new(|| Selector::parse("article p").unwrap());
static PARAGRAPHS: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

// Elements whose text never belongs to the article body.
const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub text: String,
    pub authors: Vec<String>,
    pub publish_date: Option<String>,
    pub top_image: Option<String>,
    pub url: String,
}

/// Somewhere articles can be downloaded from.
pub trait ArticleSource: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Article>;
}

/// Downloads articles over HTTP with a blocking client. Failures are not retried.
pub struct ArticleFetcher {
    client: Client,
}

impl ArticleFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }
}

impl ArticleSource for ArticleFetcher {
    fn fetch(&self, url: &str) -> Result<Article> {
        let parsed = validate_url(url)?;
        let start = Instant::now();

        debug!("Fetching article - url={}", parsed);

        let resp = self.client.get(parsed.as_str()).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("HTTP error {} for {}", status, url)));
        }

        let html = resp.text()?;
        let article = parse_article(&html, url)?;

        info!(
            "Article fetch completed - url={}, duration={:.2}s, chars={}",
            url,
            start.elapsed().as_secs_f32(),
            article.text.len()
        );

        Ok(article)
    }
}

/// Only absolute http(s) URLs are accepted.
pub fn validate_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url.trim()).map_err(|e| Error::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(Error::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

/// Pull title, metadata and body text out of an article page.
pub fn parse_article(html: &str, url: &str) -> Result<Article> {
    let doc = Html::parse_document(html);

    let title = meta_content(&doc, &OG_TITLE)
        .or_else(|| {
            doc.select(&TITLE)
                .next()
                .map(|t| collapse_whitespace(&t.text().collect::<String>()))
                .filter(|t| !t.is_empty())
        })
        .unwrap_or_default();

    let authors = doc
        .select(&AUTHOR)
        .filter_map(|e| e.value().attr("content"))
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .collect();

    let text = paragraph_text(&doc, &ARTICLE_PARAGRAPHS)
        .or_else(|| paragraph_text(&doc, &PARAGRAPHS))
        .unwrap_or_else(|| extract_text_from_html(html));

    if text.trim().is_empty() {
        return Err(Error::Fetch(format!("no article text found at {}", url)));
    }

    Ok(Article {
        title,
        text,
        authors,
        publish_date: meta_content(&doc, &PUBLISHED),
        top_image: meta_content(&doc, &OG_IMAGE),
        url: url.to_string(),
    })
}

/// Visible text of an HTML page with script and style content dropped and whitespace collapsed.
pub fn extract_text_from_html(html: &str) -> String {
    let doc = Html::parse_document(html);
    let mut raw = String::new();

    for node in doc.root_element().descendants() {
        if let Some(text) = node.value().as_text() {
            let hidden = node.ancestors().any(|a| {
                a.value()
                    .as_element()
                    .map_or(false, |e| SKIPPED_TAGS.contains(&e.name()))
            });
            if !hidden {
                raw.push_str(text);
            }
        }
    }

    // Strip each line, break on double spaces, keep the non-empty chunks.
    raw.lines()
        .map(str::trim)
        .flat_map(|line| line.split("  "))
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn meta_content(doc: &Html, selector: &Selector) -> Option<String> {
    doc.select(selector)
        .filter_map(|e| e.value().attr("content"))
        .map(str::trim)
        .find(|c| !c.is_empty())
        .map(str::to_string)
}

fn paragraph_text(doc: &Html, selector: &Selector) -> Option<String> {
    let paragraphs: Vec<String> = doc
        .select(selector)
        .map(|p| collapse_whitespace(&p.text().collect::<String>()))
        .filter(|p| !p.is_empty())
        .collect();

    if paragraphs.is_empty() {
        None
    } else {
        Some(paragraphs.join("\n\n"))
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Fallback title</title>
  <meta property="og:title" content="Markets Rally on Rate Cut">
  <meta name="author" content="Jane Doe">
  <meta name="author" content="  ">
  <meta property="article:published_time" content="2024-03-01T09:00:00Z">
  <meta property="og:image" content="https://example.com/lead.jpg">
  <script>var tracking = "ignore me";</script>
</head>
<body>
  <nav><p>Home | World | Business</p></nav>
  <article>
    <p>Stocks rose sharply on Friday.</p>
    <p>Investors   cheered the
       central bank decision.</p>
  </article>
</body>
</html>"#;

    #[test]
    fn test_parse_article_metadata_and_body() {
        let article = parse_article(PAGE, "https://example.com/markets").unwrap();
        assert_eq!(article.title, "Markets Rally on Rate Cut");
        assert_eq!(article.authors, vec!["Jane Doe"]);
        assert_eq!(article.publish_date.as_deref(), Some("2024-03-01T09:00:00Z"));
        assert_eq!(article.top_image.as_deref(), Some("https://example.com/lead.jpg"));
        assert_eq!(
            article.text,
            "Stocks rose sharply on Friday.\n\nInvestors cheered the central bank decision."
        );
        assert_eq!(article.url, "https://example.com/markets");
    }

    #[test]
    fn test_parse_article_falls_back_to_title_and_all_paragraphs() {
        let html = "<html><head><title> Plain  page </title></head>\
                    <body><p>Only paragraph.</p></body></html>";
        let article = parse_article(html, "https://example.com").unwrap();
        assert_eq!(article.title, "Plain page");
        assert_eq!(article.text, "Only paragraph.");
        assert!(article.authors.is_empty());
        assert!(article.publish_date.is_none());
    }

    #[test]
    fn test_parse_article_without_text_fails() {
        let html = "<html><body><script>x()</script></body></html>";
        let err = parse_article(html, "https://example.com").unwrap_err();
        assert!(matches!(err, Error::Fetch(_)));
    }

    #[test]
    fn test_extract_text_drops_scripts_and_styles() {
        let html = "<html><head><style>body { color: red; }</style></head>\
                    <body><div>Hello   world</div>\n<script>alert(1)</script>\
                    <div>  Second line  </div></body></html>";
        let text = extract_text_from_html(html);
        assert!(text.contains("Hello"));
        assert!(text.contains("world"));
        assert!(text.contains("Second line"));
        assert!(!text.contains("alert"));
        assert!(!text.contains("color"));
        assert!(!text.contains("  "));
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://example.com/a").is_ok());
        assert!(matches!(
            validate_url("not a url"),
            Err(Error::InvalidUrl { .. })
        ));
        assert!(matches!(
            validate_url("ftp://example.com/file"),
            Err(Error::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_fetch_rejects_bad_url_without_network() {
        let fetcher = ArticleFetcher::new(&Config::default()).unwrap();
        let err = fetcher.fetch("example.com/no-scheme").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
    }
}
