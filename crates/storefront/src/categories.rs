//! Category tree transformation and the hardcoded fallback tree.
//!
//! The upstream tree is flattened into the three-level domain model: level
//! 0 nodes become categories, level 1 subcategories, level 2
//! sub-subcategories. Nodes at unexpected levels are skipped. When the
//! upstream is unavailable or returns nothing usable, the storefront falls
//! back to a hardcoded tree so navigation keeps working.

use lumina_core::{Category, SubCategory, SubSubCategory, slugify};

use crate::upstream::types::CategoryTreeNode;

/// Transform the upstream tree into the domain model.
///
/// Only level-0 roots are kept; children are filtered by level at each
/// step. Slugs are derived from display names.
#[must_use]
pub fn transform_tree(tree: &[CategoryTreeNode]) -> Vec<Category> {
    tree.iter()
        .filter(|node| node.level == 0)
        .map(|node| Category {
            id: node.id.to_string(),
            name: node.category_name.clone(),
            slug: slugify(&node.category_name),
            sub_categories: node
                .children
                .iter()
                .filter(|child| child.level == 1)
                .map(|child| SubCategory {
                    id: child.id.to_string(),
                    name: child.category_name.clone(),
                    slug: slugify(&child.category_name),
                    sub_sub_categories: child
                        .children
                        .iter()
                        .filter(|leaf| leaf.level == 2)
                        .map(|leaf| SubSubCategory {
                            id: leaf.id.to_string(),
                            name: leaf.category_name.clone(),
                            slug: slugify(&leaf.category_name),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

/// The hardcoded category tree used when the upstream category API is
/// unavailable or returns no usable data.
#[must_use]
pub fn fallback_tree() -> Vec<Category> {
    fn leaf(id: &str, name: &str) -> SubSubCategory {
        SubSubCategory {
            id: id.to_string(),
            name: name.to_string(),
            slug: slugify(name),
        }
    }

    fn sub(id: &str, name: &str, leaves: Vec<SubSubCategory>) -> SubCategory {
        SubCategory {
            id: id.to_string(),
            name: name.to_string(),
            slug: slugify(name),
            sub_sub_categories: leaves,
        }
    }

    fn cat(id: &str, name: &str, subs: Vec<SubCategory>) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            slug: slugify(name),
            sub_categories: subs,
        }
    }

    vec![
        cat(
            "women",
            "Women",
            vec![
                sub(
                    "women-clothing",
                    "Clothing",
                    vec![
                        leaf("women-dresses", "Dresses"),
                        leaf("women-tops", "Tops & Tees"),
                        leaf("women-bottoms", "Bottoms"),
                        leaf("women-activewear", "Activewear"),
                        leaf("women-loungewear", "Loungewear"),
                        leaf("women-outerwear", "Outerwear"),
                        leaf("women-swimwear", "Swimwear"),
                    ],
                ),
                sub(
                    "women-shoes",
                    "Shoes",
                    vec![
                        leaf("women-sneakers", "Sneakers"),
                        leaf("women-heels", "Heels"),
                        leaf("women-boots", "Boots"),
                        leaf("women-sandals", "Sandals"),
                        leaf("women-flats", "Flats"),
                    ],
                ),
                sub(
                    "women-accessories",
                    "Accessories",
                    vec![
                        leaf("women-bags", "Bags & Purses"),
                        leaf("women-jewelry", "Jewelry"),
                        leaf("women-sunglasses", "Sunglasses"),
                        leaf("women-hats", "Hats & Caps"),
                        leaf("women-belts", "Belts"),
                        leaf("women-scarves", "Scarves"),
                    ],
                ),
            ],
        ),
        cat(
            "men",
            "Men",
            vec![
                sub(
                    "men-clothing",
                    "Clothing",
                    vec![
                        leaf("men-shirts", "Shirts"),
                        leaf("men-tshirts", "T-Shirts & Tanks"),
                        leaf("men-pants", "Pants & Jeans"),
                        leaf("men-shorts", "Shorts"),
                        leaf("men-activewear", "Activewear"),
                        leaf("men-outerwear", "Outerwear"),
                    ],
                ),
                sub(
                    "men-shoes",
                    "Shoes",
                    vec![
                        leaf("men-sneakers", "Sneakers"),
                        leaf("men-dress-shoes", "Dress Shoes"),
                        leaf("men-boots", "Boots"),
                        leaf("men-sandals", "Sandals"),
                    ],
                ),
                sub(
                    "men-accessories",
                    "Accessories",
                    vec![
                        leaf("men-watches", "Watches"),
                        leaf("men-wallets", "Wallets"),
                        leaf("men-sunglasses", "Sunglasses"),
                        leaf("men-hats", "Hats & Caps"),
                        leaf("men-belts", "Belts"),
                    ],
                ),
            ],
        ),
        cat(
            "kids",
            "Kids",
            vec![
                sub(
                    "kids-girls",
                    "Girls",
                    vec![
                        leaf("girls-dresses", "Dresses"),
                        leaf("girls-tops", "Tops"),
                        leaf("girls-bottoms", "Bottoms"),
                        leaf("girls-shoes", "Shoes"),
                    ],
                ),
                sub(
                    "kids-boys",
                    "Boys",
                    vec![
                        leaf("boys-tops", "Tops"),
                        leaf("boys-bottoms", "Bottoms"),
                        leaf("boys-shoes", "Shoes"),
                    ],
                ),
                sub(
                    "kids-baby",
                    "Baby",
                    vec![
                        leaf("baby-bodysuits", "Bodysuits"),
                        leaf("baby-sets", "Sets & Outfits"),
                        leaf("baby-accessories", "Accessories"),
                    ],
                ),
            ],
        ),
        cat(
            "home",
            "Home & Living",
            vec![
                sub(
                    "home-decor",
                    "Decor",
                    vec![
                        leaf("home-wall-art", "Wall Art"),
                        leaf("home-candles", "Candles"),
                        leaf("home-vases", "Vases"),
                    ],
                ),
                sub(
                    "home-kitchen",
                    "Kitchen",
                    vec![
                        leaf("home-cookware", "Cookware"),
                        leaf("home-tableware", "Tableware"),
                        leaf("home-storage", "Storage"),
                    ],
                ),
                sub(
                    "home-bedding",
                    "Bedding",
                    vec![
                        leaf("home-sheets", "Sheets"),
                        leaf("home-duvets", "Duvets & Covers"),
                        leaf("home-pillows", "Pillows"),
                    ],
                ),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: serde_json::Value) -> CategoryTreeNode {
        serde_json::from_value(value).expect("node")
    }

    #[test]
    fn transform_maps_levels_to_tiers() {
        let tree = vec![node(json!({
            "id": 10,
            "category_name": "Women",
            "level": 0,
            "children": [{
                "id": 20,
                "category_name": "Clothing",
                "level": 1,
                "children": [
                    { "id": 30, "category_name": "Tops & Tees", "level": 2, "children": [] },
                    // Wrong level inside a level-1 node: skipped.
                    { "id": 31, "category_name": "Oddity", "level": 3, "children": [] }
                ]
            }]
        }))];

        let categories = transform_tree(&tree);
        assert_eq!(categories.len(), 1);
        let women = &categories[0];
        assert_eq!(women.id, "10");
        assert_eq!(women.slug, "women");
        assert_eq!(women.sub_categories.len(), 1);
        let clothing = &women.sub_categories[0];
        assert_eq!(clothing.sub_sub_categories.len(), 1);
        assert_eq!(clothing.sub_sub_categories[0].slug, "tops-tees");
    }

    #[test]
    fn transform_skips_non_root_top_level_nodes() {
        let tree = vec![node(json!({
            "id": 1, "category_name": "Stray", "level": 1, "children": []
        }))];
        assert!(transform_tree(&tree).is_empty());
    }

    #[test]
    fn fallback_tree_has_stable_slugs() {
        let tree = fallback_tree();
        assert!(!tree.is_empty());
        let men = tree.iter().find(|c| c.slug == "men").expect("men");
        let clothing = men
            .sub_categories
            .iter()
            .find(|s| s.slug == "clothing")
            .expect("clothing");
        assert!(
            clothing
                .sub_sub_categories
                .iter()
                .any(|s| s.slug == "t-shirts-tanks")
        );
    }
}
