//! The three-level category tree and slug derivation.
//!
//! Slugs are derived deterministically from display names and are only
//! unique within their parent, so lookups are always scoped by the full
//! path (`category/subcategory/sub-subcategory`).

use serde::{Deserialize, Serialize};

/// Top-level category (upstream tree level 0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub sub_categories: Vec<SubCategory>,
}

/// Second-level category (upstream tree level 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubCategory {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub sub_sub_categories: Vec<SubSubCategory>,
}

/// Leaf category (upstream tree level 2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubSubCategory {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// Derive a URL slug from a display name.
///
/// Lowercases, collapses every run of non-alphanumeric characters into a
/// single hyphen, and strips leading/trailing hyphens.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// A node found by [`find_by_path`], borrowing from the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryNode<'a> {
    Category(&'a Category),
    SubCategory(&'a SubCategory),
    SubSubCategory(&'a SubSubCategory),
}

impl CategoryNode<'_> {
    /// Upstream identifier of the node.
    #[must_use]
    pub const fn id(&self) -> &str {
        match self {
            Self::Category(c) => c.id.as_str(),
            Self::SubCategory(s) => s.id.as_str(),
            Self::SubSubCategory(s) => s.id.as_str(),
        }
    }

    /// Display name of the node.
    #[must_use]
    pub const fn name(&self) -> &str {
        match self {
            Self::Category(c) => c.name.as_str(),
            Self::SubCategory(s) => s.name.as_str(),
            Self::SubSubCategory(s) => s.name.as_str(),
        }
    }
}

/// Look up a node by slash-separated slug path, scoped at every level.
#[must_use]
pub fn find_by_path<'a>(categories: &'a [Category], path: &str) -> Option<CategoryNode<'a>> {
    let mut parts = path.split('/');
    let first = parts.next()?;
    let category = categories.iter().find(|c| c.slug == first)?;

    let Some(second) = parts.next() else {
        return Some(CategoryNode::Category(category));
    };
    let sub = category.sub_categories.iter().find(|s| s.slug == second)?;

    let Some(third) = parts.next() else {
        return Some(CategoryNode::SubCategory(sub));
    };
    let leaf = sub.sub_sub_categories.iter().find(|s| s.slug == third)?;

    // Deeper paths than the tree supports never resolve.
    if parts.next().is_some() {
        return None;
    }
    Some(CategoryNode::SubSubCategory(leaf))
}

/// Every slug path in the tree, one entry per node.
#[must_use]
pub fn all_paths(categories: &[Category]) -> Vec<String> {
    let mut paths = Vec::new();
    for category in categories {
        paths.push(category.slug.clone());
        for sub in &category.sub_categories {
            paths.push(format!("{}/{}", category.slug, sub.slug));
            for leaf in &sub.sub_sub_categories {
                paths.push(format!("{}/{}/{}", category.slug, sub.slug, leaf.slug));
            }
        }
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Vec<Category> {
        vec![Category {
            id: "1".to_string(),
            name: "Women".to_string(),
            slug: "women".to_string(),
            sub_categories: vec![SubCategory {
                id: "2".to_string(),
                name: "Clothing".to_string(),
                slug: "clothing".to_string(),
                sub_sub_categories: vec![SubSubCategory {
                    id: "3".to_string(),
                    name: "Tops & Tees".to_string(),
                    slug: slugify("Tops & Tees"),
                }],
            }],
        }]
    }

    #[test]
    fn slugify_collapses_symbol_runs() {
        assert_eq!(slugify("Tops & Tees"), "tops-tees");
        assert_eq!(slugify("T-Shirts & Tanks"), "t-shirts-tanks");
    }

    #[test]
    fn slugify_strips_edge_hyphens() {
        assert_eq!(slugify("  Bags & Purses!  "), "bags-purses");
        assert_eq!(slugify("--"), "");
    }

    #[test]
    fn slugify_is_deterministic() {
        assert_eq!(slugify("Home & Garden"), slugify("Home & Garden"));
    }

    #[test]
    fn find_by_path_resolves_each_level() {
        let tree = tree();
        assert_eq!(find_by_path(&tree, "women").map(|n| n.id().to_string()), Some("1".into()));
        assert_eq!(
            find_by_path(&tree, "women/clothing").map(|n| n.id().to_string()),
            Some("2".into())
        );
        assert_eq!(
            find_by_path(&tree, "women/clothing/tops-tees").map(|n| n.id().to_string()),
            Some("3".into())
        );
    }

    #[test]
    fn find_by_path_rejects_unknown_and_too_deep() {
        let tree = tree();
        assert!(find_by_path(&tree, "men").is_none());
        assert!(find_by_path(&tree, "women/shoes").is_none());
        assert!(find_by_path(&tree, "women/clothing/tops-tees/extra").is_none());
    }

    #[test]
    fn all_paths_lists_every_node_once() {
        let paths = all_paths(&tree());
        assert_eq!(
            paths,
            vec!["women", "women/clothing", "women/clothing/tops-tees"]
        );
    }
}
