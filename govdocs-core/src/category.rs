//! Landing-page category index.
//!
//! Categories are a fixed declaration. Each one lists member slugs in
//! display order; grouping matches them against document slugs by exact
//! string equality. Members that match nothing are dropped, and documents no
//! category mentions are left out of the grouped view.

use serde::Serialize;

use crate::content::document::Document;

/// A named, ordered group of document slugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    /// Display label.
    pub name: &'static str,
    /// Member slugs in display order.
    pub members: &'static [&'static str],
}

/// Declared categories, in landing-page order.
///
/// Members are compared verbatim against slugs, so entries with spaces or
/// capitals only match files whose names are spelled exactly that way.
pub const CATEGORIES: &[Category] = &[
    Category {
        name: "Getting Started",
        members: &["index", "ENS Token", "constitution", "wallets"],
    },
    Category {
        name: "Voting",
        members: &["delegating", "voting", "proposals"],
    },
    Category {
        name: "Working Groups",
        members: &["working groups", "meta-governance", "ecosystem", "public goods"],
    },
    Category {
        name: "Organization",
        members: &["foundation", "endowment", "security council"],
    },
];

/// Slugs kept out of the landing accordion.
pub const EXCLUDED_FROM_LANDING: &[&str] = &["welcome"];

/// One category of the grouped landing view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup<'a> {
    /// Category label.
    pub name: &'static str,
    /// Matching documents in declared member order. Never empty.
    pub documents: Vec<&'a Document>,
}

/// A declared member string that matched no document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnmatchedMember {
    /// Category declaring the member.
    pub category: &'static str,
    /// Member string as declared.
    pub member: &'static str,
}

impl std::fmt::Display for UnmatchedMember {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "category \"{}\" lists \"{}\" but no document has that slug",
            self.category, self.member
        )
    }
}

/// Group `documents` by the declared [`CATEGORIES`].
#[must_use]
pub fn group(documents: &[Document]) -> Vec<CategoryGroup<'_>> {
    group_with(CATEGORIES, documents)
}

/// Group `documents` by an explicit category list.
///
/// Categories are emitted in declaration order, each holding the documents
/// whose slug appears in its member list, reordered to match that list.
/// Categories with no surviving members are omitted.
#[must_use]
pub fn group_with<'a>(categories: &[Category], documents: &'a [Document]) -> Vec<CategoryGroup<'a>> {
    categories
        .iter()
        .filter_map(|category| {
            let position = |doc: &Document| {
                category
                    .members
                    .iter()
                    .position(|member| *member == doc.slug)
            };

            let mut members: Vec<&Document> =
                documents.iter().filter(|doc| position(*doc).is_some()).collect();
            if members.is_empty() {
                return None;
            }
            members.sort_by_key(|doc| position(*doc));

            Some(CategoryGroup {
                name: category.name,
                documents: members,
            })
        })
        .collect()
}

/// Drop the documents listed in [`EXCLUDED_FROM_LANDING`].
#[must_use]
pub fn landing_documents(documents: Vec<Document>) -> Vec<Document> {
    documents
        .into_iter()
        .filter(|doc| !EXCLUDED_FROM_LANDING.contains(&doc.slug.as_str()))
        .collect()
}

/// Declared members of [`CATEGORIES`] that match no document slug.
#[must_use]
pub fn unmatched_members(documents: &[Document]) -> Vec<UnmatchedMember> {
    CATEGORIES
        .iter()
        .flat_map(|category| {
            category.members.iter().map(move |member| UnmatchedMember {
                category: category.name,
                member: *member,
            })
        })
        .filter(|unmatched| !documents.iter().any(|doc| doc.slug == unmatched.member))
        .collect()
}

/// Documents that no category mentions; reachable only by direct URL.
#[must_use]
pub fn ungrouped(documents: &[Document]) -> Vec<&Document> {
    documents
        .iter()
        .filter(|doc| {
            !CATEGORIES
                .iter()
                .any(|category| category.members.contains(&doc.slug.as_str()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::document::parse_document;

    fn doc(slug: &str) -> Document {
        parse_document(slug, "").unwrap()
    }

    fn slugs<'a>(group: &CategoryGroup<'a>) -> Vec<&'a str> {
        group.documents.iter().copied().map(|d| d.slug.as_str()).collect()
    }

    #[test]
    fn groups_in_declared_member_order() {
        let docs = vec![doc("voting"), doc("proposals"), doc("delegating"), doc("orphan")];
        let groups = group(&docs);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "Voting");
        assert_eq!(slugs(&groups[0]), ["delegating", "voting", "proposals"]);
    }

    #[test]
    fn categories_keep_declaration_order() {
        let docs = vec![doc("security council"), doc("wallets"), doc("ecosystem")];
        let names: Vec<&str> = group(&docs).iter().map(|g| g.name).collect();
        assert_eq!(names, ["Getting Started", "Working Groups", "Organization"]);
    }

    #[test]
    fn match_is_raw_string_equality() {
        let docs = vec![doc("ens-token"), doc("ENS Token"), doc("working-groups")];
        let groups = group(&docs);

        assert_eq!(groups.len(), 1);
        assert_eq!(slugs(&groups[0]), ["ENS Token"]);
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(group(&[]).is_empty());
    }

    #[test]
    fn custom_categories() {
        const CUSTOM: &[Category] = &[Category {
            name: "Custom",
            members: &["b", "a"],
        }];
        let docs = vec![doc("a"), doc("b"), doc("c")];
        let groups = group_with(CUSTOM, &docs);
        assert_eq!(slugs(&groups[0]), ["b", "a"]);
    }

    #[test]
    fn landing_excludes_welcome() {
        let docs = landing_documents(vec![doc("welcome"), doc("voting")]);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].slug, "voting");
    }

    #[test]
    fn reports_unmatched_members() {
        let docs = vec![doc("voting")];
        let unmatched = unmatched_members(&docs);
        assert!(unmatched.iter().all(|u| u.member != "voting"));
        assert!(unmatched.contains(&UnmatchedMember {
            category: "Getting Started",
            member: "ENS Token",
        }));
        let declared: usize = CATEGORIES.iter().map(|c| c.members.len()).sum();
        assert_eq!(unmatched.len(), declared - 1);
    }

    #[test]
    fn reports_ungrouped_documents() {
        let docs = vec![doc("voting"), doc("welcome"), doc("faq")];
        let loose: Vec<&str> = ungrouped(&docs).into_iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(loose, ["welcome", "faq"]);
    }
}
