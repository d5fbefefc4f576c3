//! URL slug ↔ file name mapping.
//!
//! A document's slug is its file name with the `.mdx` suffix removed. Some
//! files have names that make poor URLs (spaces, capitals), so a fixed
//! override table maps friendlier URL slugs onto those files.

/// File extension of content documents, including the dot.
pub const MDX_EXTENSION: &str = ".mdx";

/// URL slug → on-disk file name.
///
/// Slugs not listed here resolve to `<slug>.mdx`.
pub const SLUG_OVERRIDES: &[(&str, &str)] = &[
    ("index", "index.mdx"),
    ("ens-token", "ENS Token.mdx"),
    ("constitution", "constitution.mdx"),
    ("voting", "voting.mdx"),
    ("proposals", "proposals.mdx"),
    ("working-groups", "working groups.mdx"),
];

/// Minimum normalized similarity for a slug to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.5;

/// Maximum number of suggestions returned by [`suggest`].
const MAX_SUGGESTIONS: usize = 3;

/// Derive a slug from a directory entry name.
///
/// Returns `None` for names that do not end in `.mdx`.
#[must_use]
pub fn slug_from_file_name(file_name: &str) -> Option<&str> {
    file_name.strip_suffix(MDX_EXTENSION)
}

/// Look up `slug` in the override table.
#[must_use]
pub fn override_for(slug: &str) -> Option<&'static str> {
    SLUG_OVERRIDES
        .iter()
        .find(|(key, _)| *key == slug)
        .map(|(_, file)| *file)
}

/// Resolve a URL slug to the file name it is stored under.
#[must_use]
pub fn file_name_for_slug(slug: &str) -> String {
    override_for(slug).map_or_else(|| format!("{slug}{MDX_EXTENSION}"), str::to_string)
}

/// Returns `true` if `slug` can only name a file directly inside the content
/// directory.
///
/// Empty slugs, `.`/`..`, and anything containing a path separator or NUL
/// are rejected.
#[must_use]
pub fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains(['/', '\\', '\0'])
}

/// Suggest up to three known slugs resembling `slug`, best match first.
///
/// Comparison is case-insensitive normalized Levenshtein similarity.
#[must_use]
pub fn suggest<'a, I>(slug: &str, candidates: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = slug.to_lowercase();
    let mut scored: Vec<(f64, &str)> = candidates
        .into_iter()
        .filter(|candidate| *candidate != slug)
        .map(|candidate| {
            let score = strsim::normalized_levenshtein(&needle, &candidate.to_lowercase());
            (score, candidate)
        })
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored.dedup_by(|a, b| a.1 == b.1);
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, candidate)| candidate)
        .collect()
}
