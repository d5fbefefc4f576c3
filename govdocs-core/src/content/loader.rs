//! Content loader: materializes [`Document`]s from the content directory.
//!
//! The loader holds nothing but the directory path. Every call re-reads the
//! filesystem, so records always reflect what is on disk at call time.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::document::{Document, parse_document};
use crate::content::slug::{SLUG_OVERRIDES, file_name_for_slug, is_safe_slug, slug_from_file_name};
use crate::error::ContentError;

/// Slug of the document pinned to the front of [`ContentStore::list`].
pub const WELCOME_SLUG: &str = "welcome";

/// Conventional name of the content directory.
pub const DEFAULT_CONTENT_DIR: &str = "content";

/// A directory of MDX documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentStore {
    dir: PathBuf,
}

impl ContentStore {
    /// Creates a store rooted at `dir`. Nothing is read until a query runs.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the content directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load every `.mdx` document in listing order.
    ///
    /// The `welcome` document comes first when present; the rest follow in
    /// case-sensitive lexicographic order of title, ties broken by file name.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::ReadDir`] if the directory cannot be
    /// enumerated. Any single file that cannot be read or parsed fails the
    /// whole listing.
    pub fn list(&self) -> Result<Vec<Document>, ContentError> {
        let mut documents = self
            .mdx_file_names()?
            .into_iter()
            .map(|file_name| {
                let path = self.dir.join(&file_name);
                let slug = slug_from_file_name(&file_name).unwrap_or(&file_name);
                read_document(&path, slug)
            })
            .collect::<Result<Vec<_>, _>>()?;

        documents.sort_by(listing_order);
        Ok(documents)
    }

    /// Look up a single document by URL slug.
    ///
    /// Returns `None` on any failure: unknown slug, unreadable file, or
    /// malformed frontmatter. Use [`ContentStore::try_get`] to see why.
    #[must_use]
    pub fn get(&self, slug: &str) -> Option<Document> {
        self.try_get(slug).ok()
    }

    /// Look up a single document by URL slug, reporting failures.
    ///
    /// The slug is mapped through the override table, falling back to
    /// `<slug>.mdx`. The returned record carries the requested slug, not the
    /// file-derived one.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidSlug`] for slugs that could escape the
    /// content directory, and [`ContentError::ReadFile`] or
    /// [`ContentError::Frontmatter`] if the resolved file cannot be loaded.
    pub fn try_get(&self, slug: &str) -> Result<Document, ContentError> {
        if !is_safe_slug(slug) {
            return Err(ContentError::InvalidSlug {
                slug: slug.to_string(),
            });
        }

        let path = self.dir.join(file_name_for_slug(slug));
        read_document(&path, slug)
    }

    /// Every slug that [`ContentStore::get`] can serve, sorted.
    ///
    /// This is the union of file-derived slugs and the override-table keys
    /// whose target file exists.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::ReadDir`] if the directory cannot be
    /// enumerated.
    pub fn slugs(&self) -> Result<Vec<String>, ContentError> {
        let file_names = self.mdx_file_names()?;
        let mut slugs: BTreeSet<String> = file_names
            .iter()
            .filter_map(|name| slug_from_file_name(name))
            .filter(|slug| is_safe_slug(slug))
            .map(str::to_string)
            .collect();

        for (slug, file_name) in SLUG_OVERRIDES {
            if file_names.iter().any(|name| name == file_name) {
                slugs.insert((*slug).to_string());
            }
        }

        Ok(slugs.into_iter().collect())
    }

    /// Names of the regular files in the directory ending in `.mdx`.
    ///
    /// Names that are not valid UTF-8 cannot be slugs and are skipped.
    fn mdx_file_names(&self) -> Result<Vec<String>, ContentError> {
        let read_dir_err = |source| ContentError::ReadDir {
            path: self.dir.clone(),
            source,
        };

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(read_dir_err)? {
            let entry = entry.map_err(read_dir_err)?;
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if slug_from_file_name(&name).is_none() {
                continue;
            }
            if fs::metadata(entry.path()).is_ok_and(|meta| meta.is_file()) {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }
}

fn read_document(path: &Path, slug: &str) -> Result<Document, ContentError> {
    let source = fs::read_to_string(path).map_err(|source| ContentError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_document(slug, &source).map_err(|source| ContentError::Frontmatter {
        path: path.to_path_buf(),
        source,
    })
}

/// Total order used by [`ContentStore::list`].
///
/// `welcome` sorts before everything else; the remainder compare by title
/// (byte-wise, so case-sensitive) and then by slug.
#[must_use]
pub fn listing_order(a: &Document, b: &Document) -> Ordering {
    let a_welcome = a.slug == WELCOME_SLUG;
    let b_welcome = b.slug == WELCOME_SLUG;

    b_welcome
        .cmp(&a_welcome)
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.slug.cmp(&b.slug))
}
