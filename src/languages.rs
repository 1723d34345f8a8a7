//! Language usage across a user's repositories.
//!
//! Sizes are summed per language name over every repository, turned into percentages of the
//! grand total, and the largest five are kept for the card. Each kept language also gets a
//! devicon URL.

use crate::types::{RepositoryLanguages, TopLanguage};
use std::collections::HashMap;

/// Number of languages shown on the card.
pub const TOP_LANGUAGES: usize = 5;

const FALLBACK_COLOR: &str = "#ccc";
const ICON_CDN: &str = "https://cdn.jsdelivr.net/gh/devicons/devicon/icons";

/// Devicon slugs that cannot be derived from the language name.
const ICON_SLUGS: [(&str, &str); 12] = [
    ("C++", "cplusplus"),
    ("C#", "csharp"),
    ("Jupyter Notebook", "jupyter"),
    ("CSS", "css3"),
    ("HTML", "html5"),
    ("GDScript", "godot"),
    ("Java", "java"),
    ("Python", "python"),
    ("JavaScript", "javascript"),
    ("TypeScript", "typescript"),
    ("Shell", "bash"),
    ("Vim Script", "vim"),
];

/// Resolves the icon for a language. The URL is never checked.
pub fn icon_url(language: &str) -> String {
    let slug = ICON_SLUGS
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, slug)| (*slug).to_string())
        .unwrap_or_else(|| language.to_lowercase().replace(' ', ""));

    format!("{ICON_CDN}/{slug}/{slug}-original.svg")
}

/// Accumulated size of one language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageAggregate {
    pub name: String,
    pub size: u64,
    pub color: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LanguageSummary {
    /// Largest languages first, at most [`TOP_LANGUAGES`].
    pub top: Vec<TopLanguage>,
    pub total_size: u64,
}

/// Sums sizes per language name, in first-seen order. The first colour seen for a name wins.
pub fn aggregate(repositories: &[RepositoryLanguages]) -> (Vec<LanguageAggregate>, u64) {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut aggregates: Vec<LanguageAggregate> = Vec::new();
    let mut total_size = 0u64;

    for edge in repositories.iter().flat_map(|repo| &repo.edges) {
        total_size = total_size.saturating_add(edge.size);

        match index.get(edge.name.as_str()) {
            Some(&i) => {
                aggregates[i].size = aggregates[i].size.saturating_add(edge.size);
            }
            None => {
                index.insert(edge.name.as_str(), aggregates.len());
                aggregates.push(LanguageAggregate {
                    name: edge.name.clone(),
                    size: edge.size,
                    color: edge
                        .color
                        .clone()
                        .unwrap_or_else(|| FALLBACK_COLOR.to_string()),
                });
            }
        }
    }

    (aggregates, total_size)
}

/// Rounded share of `size` in `total`. A zero total yields 0.
pub fn percent_of(size: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    (size as f64 / total as f64 * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Builds the top-language list shown on the card.
pub fn top_languages(repositories: &[RepositoryLanguages]) -> LanguageSummary {
    let (aggregates, total_size) = aggregate(repositories);

    let mut top: Vec<TopLanguage> = aggregates
        .into_iter()
        .map(|lang| TopLanguage {
            percent: percent_of(lang.size, total_size),
            icon_url: icon_url(&lang.name),
            name: lang.name,
            color: lang.color,
            size: lang.size,
        })
        .collect();

    // Stable: equal sizes keep first-seen order.
    top.sort_by(|a, b| b.size.cmp(&a.size));
    top.truncate(TOP_LANGUAGES);

    LanguageSummary { top, total_size }
}
