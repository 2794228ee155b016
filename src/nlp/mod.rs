// NLP modules for text analysis
pub mod analyzer;
pub mod frequency;
pub mod keywords;
pub mod language;
pub mod sentiment;
pub mod statistics;
pub mod stopwords;
pub mod summarization;
pub mod tokenizer;
