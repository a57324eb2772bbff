//! Reference index over the canonical title set and the redirect map.
//!
//! Eight read-only lookup views: {exact, folded, lower, lower+folded} ×
//! {titles, redirects}. Views are built once per resolution run and queried
//! in a fixed tier order, strictest first, titles before redirects.

use crate::fold::fold;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// One lookup view, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupTier {
    ExactTitle,
    ExactRedirect,
    FoldedTitle,
    FoldedRedirect,
    LowerTitle,
    LowerRedirect,
    LowerFoldedTitle,
    LowerFoldedRedirect,
}

impl LookupTier {
    /// All tiers in lookup priority order
    pub const ALL: [LookupTier; 8] = [
        Self::ExactTitle,
        Self::ExactRedirect,
        Self::FoldedTitle,
        Self::FoldedRedirect,
        Self::LowerTitle,
        Self::LowerRedirect,
        Self::LowerFoldedTitle,
        Self::LowerFoldedRedirect,
    ];

    /// Whether this tier is queried with the lower-cased candidate
    pub fn is_lower(&self) -> bool {
        matches!(
            self,
            Self::LowerTitle
                | Self::LowerRedirect
                | Self::LowerFoldedTitle
                | Self::LowerFoldedRedirect
        )
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for LookupTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::ExactTitle => "exact_title",
            Self::ExactRedirect => "exact_redirect",
            Self::FoldedTitle => "folded_title",
            Self::FoldedRedirect => "folded_redirect",
            Self::LowerTitle => "lower_title",
            Self::LowerRedirect => "lower_redirect",
            Self::LowerFoldedTitle => "lower_folded_title",
            Self::LowerFoldedRedirect => "lower_folded_redirect",
        };
        f.write_str(name)
    }
}

/// Counts surfaced by the index builder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub titles: usize,
    pub redirects_kept: usize,
    /// Redirects whose target is not a canonical title
    pub redirects_dropped: usize,
}

impl std::fmt::Display for IndexStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} titles, {} redirects kept, {} redirects not found in titles",
            self.titles, self.redirects_kept, self.redirects_dropped
        )
    }
}

/// Read-only lookup structures for one resolution run
#[derive(Debug, Clone)]
pub struct ReferenceIndex {
    views: [AHashMap<String, String>; 8],
    stats: IndexStats,
}

fn exact_key(s: &str) -> String {
    s.to_string()
}

fn lower_key(s: &str) -> String {
    s.to_lowercase()
}

fn lower_folded_key(s: &str) -> String {
    fold(&s.to_lowercase())
}

/// Key derivations for the four normalisation levels
const KEYS: [fn(&str) -> String; 4] = [exact_key, fold, lower_key, lower_folded_key];

impl ReferenceIndex {
    /// Build all eight views.
    ///
    /// Redirects pointing at a target outside `titles` are dropped and counted.
    /// When two sources normalise to the same key, the lexicographically
    /// smallest source wins so the build is independent of input order.
    pub fn build<'a, T, R>(titles: T, redirects: R) -> Self
    where
        T: IntoIterator<Item = &'a String>,
        R: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut titles: Vec<&str> = titles.into_iter().map(String::as_str).collect();
        titles.sort_unstable();
        titles.dedup();

        let mut views: [AHashMap<String, String>; 8] = Default::default();

        for (level, key_fn) in KEYS.iter().enumerate() {
            let view = &mut views[level * 2];
            view.reserve(titles.len());
            for title in &titles {
                view.entry(key_fn(*title))
                    .or_insert_with(|| (*title).to_string());
            }
        }

        let mut kept: Vec<(&str, &str)> = Vec::new();
        let mut dropped = 0;
        for (source, target) in redirects {
            if views[LookupTier::ExactTitle.slot()].contains_key(target.as_str()) {
                kept.push((source.as_str(), target.as_str()));
            } else {
                dropped += 1;
            }
        }
        kept.sort_unstable();

        for (level, key_fn) in KEYS.iter().enumerate() {
            let view = &mut views[level * 2 + 1];
            view.reserve(kept.len());
            for (source, target) in &kept {
                view.entry(key_fn(*source))
                    .or_insert_with(|| (*target).to_string());
            }
        }

        let stats = IndexStats {
            titles: titles.len(),
            redirects_kept: kept.len(),
            redirects_dropped: dropped,
        };

        Self { views, stats }
    }

    pub fn stats(&self) -> IndexStats {
        self.stats
    }

    /// Query one view. Tries the key as-is, then with spaces as underscores.
    pub fn get(&self, tier: LookupTier, key: &str, underscore_fallback: bool) -> Option<&str> {
        let view = &self.views[tier.slot()];
        if let Some(title) = view.get(key) {
            return Some(title.as_str());
        }
        if underscore_fallback && key.contains(' ') {
            return view.get(&key.replace(' ', "_")).map(String::as_str);
        }
        None
    }

    /// Walk the tiers in priority order and return the first hit.
    ///
    /// Exact and folded tiers take `formatted` verbatim; lower tiers take its
    /// lower-cased form.
    pub fn lookup(&self, formatted: &str, underscore_fallback: bool) -> Option<(LookupTier, &str)> {
        let lower = formatted.to_lowercase();
        LookupTier::ALL.iter().find_map(|&tier| {
            let key = if tier.is_lower() { lower.as_str() } else { formatted };
            self.get(tier, key, underscore_fallback)
                .map(|title| (tier, title))
        })
    }
}
