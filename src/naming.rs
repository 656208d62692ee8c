//! File-name casing strategies
//!
//! Export names come straight from the design file ("icons/Arrow Left", "iconHome24")
//! and are turned into file stems by one of a fixed set of casing strategies. Names are
//! split into words at non-alphanumeric runs and at case boundaries, then re-joined.
//! Letters and digits from any script count as alphanumeric; scripts without case
//! (CJK, for instance) only split at separators:
//!
//! | strategy       | `"icon home"` |
//! |----------------|---------------|
//! | `camel`        | `iconHome`    |
//! | `pascal`       | `IconHome`    |
//! | `pascalSnake`  | `Icon_Home`   |
//! | `constant`     | `ICON_HOME`   |
//! | `kebab`        | `icon-home`   |
//! | `snake`        | `icon_home`   |
//! | `train`        | `Icon-Home`   |

use serde::{Deserialize, Serialize};

/// Casing strategy applied to export names to produce file stems
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "camelCase")]
pub enum NamingStrategy {
    /// `iconHome`
    Camel,
    /// `IconHome`
    Pascal,
    /// `Icon_Home`
    #[value(name = "pascalSnake", alias = "pascal-snake")]
    PascalSnake,
    /// `ICON_HOME`
    Constant,
    /// `icon-home` (default)
    #[default]
    Kebab,
    /// `icon_home`
    Snake,
    /// `Icon-Home`
    Train,
}

impl NamingStrategy {
    /// Apply this strategy to an export name
    pub fn apply(&self, name: &str) -> String {
        let words = split_words(name);
        match self {
            NamingStrategy::Camel => words
                .iter()
                .enumerate()
                .map(|(i, w)| {
                    if i == 0 {
                        w.to_lowercase()
                    } else {
                        pascal_word(w, i)
                    }
                })
                .collect(),
            NamingStrategy::Pascal => words
                .iter()
                .enumerate()
                .map(|(i, w)| pascal_word(w, i))
                .collect(),
            NamingStrategy::PascalSnake => join_mapped(&words, "_", capitalize),
            NamingStrategy::Constant => join_mapped(&words, "_", |w| w.to_uppercase()),
            NamingStrategy::Kebab => join_mapped(&words, "-", |w| w.to_lowercase()),
            NamingStrategy::Snake => join_mapped(&words, "_", |w| w.to_lowercase()),
            NamingStrategy::Train => join_mapped(&words, "-", capitalize),
        }
    }

    /// Stable name of the strategy, as accepted on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            NamingStrategy::Camel => "camel",
            NamingStrategy::Pascal => "pascal",
            NamingStrategy::PascalSnake => "pascalSnake",
            NamingStrategy::Constant => "constant",
            NamingStrategy::Kebab => "kebab",
            NamingStrategy::Snake => "snake",
            NamingStrategy::Train => "train",
        }
    }
}

impl std::fmt::Display for NamingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split a name into alphanumeric words.
///
/// Boundaries: any non-alphanumeric run, a lower/digit followed by an upper
/// (`iconHome` → `icon`, `Home`), and the last upper of an acronym followed by a
/// lower (`SVGIcon` → `SVG`, `Icon`). Letters and digits are not split apart.
fn split_words(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_numeric()
                || (prev.is_uppercase() && next_is_lower);
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// A non-leading word that starts with a digit gets an underscore so it stays readable.
fn pascal_word(word: &str, index: usize) -> String {
    if index > 0 && word.starts_with(char::is_numeric) {
        format!("_{}", word.to_lowercase())
    } else {
        capitalize(word)
    }
}

fn join_mapped(words: &[String], sep: &str, f: impl Fn(&str) -> String) -> String {
    words.iter().map(|w| f(w)).collect::<Vec<_>>().join(sep)
}
