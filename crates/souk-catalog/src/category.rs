use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::locale::Language;

/// One node of the marketplace category tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Category {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_l1: Option<String>,
    #[serde(rename = "externalID", default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    pub slug: String,
    #[serde(default)]
    pub level: u32,
    #[serde(rename = "parentID", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
    #[serde(rename = "displayPriority", default)]
    pub display_priority: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Category>,
}

impl Category {
    pub fn is_top_level(&self) -> bool {
        self.level == 0 && self.parent_id.is_none()
    }

    pub fn label(&self, language: Language) -> &str {
        if language == Language::Ar
            && let Some(label) = self.name_l1.as_deref()
            && !label.is_empty()
        {
            label
        } else {
            &self.name
        }
    }
}

/// Entry of the storefront navigation strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NavigationEntry {
    pub id: String,
    pub label: String,
    pub slug: String,
    pub has_dropdown: bool,
}

/// The full category tree as returned by the catalog endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct CategoryTree {
    roots: Vec<Category>,
}

impl CategoryTree {
    pub fn new(roots: Vec<Category>) -> Self {
        Self { roots }
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Depth-first traversal over every node in the tree.
    pub fn iter(&self) -> CategoryIter<'_> {
        CategoryIter {
            stack: self.roots.iter().rev().collect(),
        }
    }

    /// Root categories in display order.
    pub fn top_level(&self) -> Vec<&Category> {
        let mut roots: Vec<&Category> = self
            .roots
            .iter()
            .filter(|category| category.is_top_level())
            .collect();
        roots.sort_by_key(|category| category.display_priority);
        roots
    }

    /// Children of a category in display order. Falls back to a parent-id
    /// scan because the API omits nesting on some levels.
    pub fn children_of(&self, id: u64) -> Vec<&Category> {
        let mut children: Vec<&Category> = match self.find(id) {
            Some(parent) if !parent.children.is_empty() => parent.children.iter().collect(),
            _ => self
                .iter()
                .filter(|category| category.parent_id == Some(id))
                .collect(),
        };
        children.sort_by_key(|category| category.display_priority);
        children
    }

    pub fn find(&self, id: u64) -> Option<&Category> {
        self.iter().find(|category| category.id == id)
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<&Category> {
        self.iter().find(|category| category.slug == slug)
    }

    /// Navigation strip entries: the synthetic all-categories head followed
    /// by the top-level categories.
    pub fn navigation(&self, language: Language) -> Vec<NavigationEntry> {
        let all_label = match language {
            Language::Ar => "جميع الفئات",
            Language::En => "ALL CATEGORIES",
        };
        let mut entries = vec![NavigationEntry {
            id: "all".to_string(),
            label: all_label.to_string(),
            slug: "all".to_string(),
            has_dropdown: true,
        }];
        entries.extend(self.top_level().into_iter().map(|category| NavigationEntry {
            id: category.id.to_string(),
            label: category.label(language).to_string(),
            slug: category.slug.clone(),
            has_dropdown: !category.children.is_empty(),
        }));
        entries
    }
}

pub struct CategoryIter<'a> {
    stack: Vec<&'a Category>,
}

impl<'a> Iterator for CategoryIter<'a> {
    type Item = &'a Category;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
