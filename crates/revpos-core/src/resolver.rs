//! # Menu Item Resolver
//!
//! Turns a menu item's recipe plus a modification string into the per-unit
//! ledger charge for one component.
//!
//! ## Data Flow
//! ```text
//!   recipe (IngredientRequirement list)     "no onion, add bacon"
//!                  │                                 │
//!                  │                        parse_modifications
//!                  │                                 │
//!                  ▼                                 ▼
//!            ┌──────────────────────────────────────────┐
//!            │                resolve                   │
//!            │  working list: base recipe, then tokens  │
//!            │  applied left to right                   │
//!            └─────────────────────┬────────────────────┘
//!                                  │
//!                                  ▼
//!              Resolution { deltas, warnings }
//!                  │                   │
//!                  ▼                   ▼
//!           ledger charge        operator-visible
//!           (per unit)           warnings (non-fatal)
//! ```
//!
//! ## Why a working list?
//! Tokens act on the state left by earlier tokens, so "no cheese, add cheese"
//! nets one cheese and "add cheese, no cheese" nets zero. A removal drops the
//! ingredient entirely (none at all, not one less); an addition puts one unit
//! on top of whatever is currently there.
//!
//! Resolution is pure: it never touches storage. The caller charges the
//! resulting deltas against the ledger and freezes them as the component's
//! deduction snapshot.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::modifications::{parse_modifications, Modification};
use crate::types::{Ingredient, IngredientDelta, IngredientRequirement};

// =============================================================================
// Ingredient Index
// =============================================================================

/// Case-insensitive name lookup over the ingredient catalog.
///
/// Built once per resolution batch from the full catalog so additions can
/// name any ingredient, not only the ones already in the recipe.
#[derive(Debug, Clone, Default)]
pub struct IngredientIndex {
    /// Lowercased name → ingredient id.
    by_name: HashMap<String, String>,
    /// Ingredient id → canonical name.
    by_id: HashMap<String, String>,
}

impl IngredientIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        IngredientIndex::default()
    }

    /// Builds an index from catalog rows.
    pub fn from_catalog(ingredients: &[Ingredient]) -> Self {
        let mut index = IngredientIndex::new();
        for ingredient in ingredients {
            index.insert(&ingredient.id, &ingredient.name);
        }
        index
    }

    /// Adds one (id, name) pair to the index.
    pub fn insert(&mut self, id: &str, name: &str) {
        self.by_name.insert(name.to_lowercase(), id.to_string());
        self.by_id.insert(id.to_string(), name.to_string());
    }

    /// Looks up an ingredient id by case-insensitive name.
    pub fn id_for_name(&self, name: &str) -> Option<&str> {
        self.by_name.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Checks whether an ingredient id exists in the catalog.
    pub fn contains_id(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Returns the canonical name for an id, if known.
    pub fn name_for_id(&self, id: &str) -> Option<&str> {
        self.by_id.get(id).map(String::as_str)
    }

    /// Number of ingredients in the index.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Checks whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

// =============================================================================
// Resolution Output
// =============================================================================

/// A non-fatal problem found while resolving modifications.
///
/// Warnings ride along with the successful resolution so the operator can see
/// what was ignored; they never block the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "token", rename_all = "camelCase")]
pub enum ResolutionWarning {
    /// Token matched neither the removal nor the addition grammar.
    UnrecognizedToken(String),
    /// Addition named an ingredient that is not in the catalog.
    UnknownAddition(String),
    /// Removal named an ingredient the item does not currently contain.
    RemovalNotInRecipe(String),
}

impl fmt::Display for ResolutionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionWarning::UnrecognizedToken(token) => {
                write!(f, "unrecognized modification \"{token}\"")
            }
            ResolutionWarning::UnknownAddition(token) => {
                write!(f, "cannot add unknown ingredient \"{token}\"")
            }
            ResolutionWarning::RemovalNotInRecipe(token) => {
                write!(f, "\"{token}\" is not part of this item")
            }
        }
    }
}

/// The resolved per-unit charge for one component, plus warnings.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Per-unit deductions: base recipe order first, then additions in the
    /// order they were applied. Entries that netted to zero are dropped.
    pub deltas: Vec<IngredientDelta>,

    /// Non-fatal problems, in the order they were encountered.
    pub warnings: Vec<ResolutionWarning>,
}

// =============================================================================
// Resolver
// =============================================================================

/// One entry of the working list the resolver mutates token by token.
struct WorkingEntry {
    ingredient_id: String,
    name_lower: String,
    quantity: i64,
}

/// Resolves a recipe plus a raw modification string into per-unit deltas.
///
/// Fails with `UnknownIngredient` when a recipe line references an ingredient
/// the catalog does not know; a recipe pointing at nothing cannot be charged,
/// and charging the rest would strand the order half-deducted.
///
/// ## Arguments
/// * `requirements` - The menu item's per-unit recipe
/// * `catalog` - Name/id index over the full ingredient catalog
/// * `modifications` - Raw comma-separated modification string
///
/// ## Example
/// ```
/// use revpos_core::resolver::{resolve, IngredientIndex};
/// use revpos_core::types::IngredientRequirement;
///
/// let mut catalog = IngredientIndex::new();
/// catalog.insert("ing-bun", "Bun");
/// catalog.insert("ing-cheese", "Cheese Slice");
///
/// let recipe = vec![IngredientRequirement {
///     ingredient_id: "ing-bun".to_string(),
///     name: "Bun".to_string(),
///     quantity: 1,
/// }];
///
/// let resolution = resolve(&recipe, &catalog, "add cheese slice").unwrap();
/// assert_eq!(resolution.deltas.len(), 2);
/// ```
pub fn resolve(
    requirements: &[IngredientRequirement],
    catalog: &IngredientIndex,
    modifications: &str,
) -> CoreResult<Resolution> {
    // Recipe lines must point at real catalog entries before anything else;
    // modifications cannot repair a broken recipe.
    for requirement in requirements {
        if !catalog.contains_id(&requirement.ingredient_id) {
            return Err(CoreError::UnknownIngredient {
                ingredient_id: requirement.ingredient_id.clone(),
            });
        }
    }

    let mut working: Vec<WorkingEntry> = Vec::with_capacity(requirements.len());
    for requirement in requirements {
        let name = catalog
            .name_for_id(&requirement.ingredient_id)
            .unwrap_or(&requirement.name);
        match working
            .iter_mut()
            .find(|entry| entry.ingredient_id == requirement.ingredient_id)
        {
            // Duplicate recipe lines for one ingredient merge additively.
            Some(entry) => entry.quantity += requirement.quantity,
            None => working.push(WorkingEntry {
                ingredient_id: requirement.ingredient_id.clone(),
                name_lower: name.to_lowercase(),
                quantity: requirement.quantity,
            }),
        }
    }

    let parsed = parse_modifications(modifications);
    let mut warnings: Vec<ResolutionWarning> = parsed
        .unrecognized
        .into_iter()
        .map(ResolutionWarning::UnrecognizedToken)
        .collect();

    for modification in &parsed.modifications {
        match modification {
            Modification::Remove(target) => {
                match working
                    .iter_mut()
                    .find(|entry| entry.name_lower == *target && entry.quantity > 0)
                {
                    // Removal means none at all, not one less.
                    Some(entry) => entry.quantity = 0,
                    None => warnings
                        .push(ResolutionWarning::RemovalNotInRecipe(target.clone())),
                }
            }
            Modification::Add(target) => match catalog.id_for_name(target) {
                Some(id) => {
                    match working.iter_mut().find(|entry| entry.ingredient_id == id) {
                        Some(entry) => entry.quantity += 1,
                        None => working.push(WorkingEntry {
                            ingredient_id: id.to_string(),
                            name_lower: target.clone(),
                            quantity: 1,
                        }),
                    }
                }
                None => warnings.push(ResolutionWarning::UnknownAddition(target.clone())),
            },
        }
    }

    let deltas = working
        .into_iter()
        .filter(|entry| entry.quantity > 0)
        .map(|entry| IngredientDelta {
            ingredient_id: entry.ingredient_id,
            quantity: entry.quantity,
        })
        .collect();

    Ok(Resolution { deltas, warnings })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> IngredientIndex {
        let mut index = IngredientIndex::new();
        index.insert("ing-bun", "Bun");
        index.insert("ing-patty", "Beef Patty");
        index.insert("ing-cheese", "Cheese Slice");
        index.insert("ing-onion", "Onion");
        index.insert("ing-bacon", "Bacon");
        index
    }

    fn burger_recipe() -> Vec<IngredientRequirement> {
        vec![
            IngredientRequirement {
                ingredient_id: "ing-bun".to_string(),
                name: "Bun".to_string(),
                quantity: 1,
            },
            IngredientRequirement {
                ingredient_id: "ing-patty".to_string(),
                name: "Beef Patty".to_string(),
                quantity: 1,
            },
            IngredientRequirement {
                ingredient_id: "ing-onion".to_string(),
                name: "Onion".to_string(),
                quantity: 1,
            },
        ]
    }

    fn quantities(resolution: &Resolution) -> Vec<(&str, i64)> {
        resolution
            .deltas
            .iter()
            .map(|d| (d.ingredient_id.as_str(), d.quantity))
            .collect()
    }

    #[test]
    fn test_resolve_plain_recipe() {
        let resolution = resolve(&burger_recipe(), &catalog(), "").unwrap();
        assert_eq!(
            quantities(&resolution),
            vec![("ing-bun", 1), ("ing-patty", 1), ("ing-onion", 1)]
        );
        assert!(resolution.warnings.is_empty());
    }

    #[test]
    fn test_resolve_removal_drops_entirely() {
        let resolution = resolve(&burger_recipe(), &catalog(), "no onion").unwrap();
        assert_eq!(
            quantities(&resolution),
            vec![("ing-bun", 1), ("ing-patty", 1)]
        );
    }

    #[test]
    fn test_resolve_addition_of_new_ingredient() {
        let resolution = resolve(&burger_recipe(), &catalog(), "add bacon").unwrap();
        assert_eq!(
            quantities(&resolution),
            vec![
                ("ing-bun", 1),
                ("ing-patty", 1),
                ("ing-onion", 1),
                ("ing-bacon", 1)
            ]
        );
    }

    #[test]
    fn test_resolve_extra_increments_existing() {
        let resolution = resolve(&burger_recipe(), &catalog(), "extra beef patty").unwrap();
        assert_eq!(
            quantities(&resolution),
            vec![("ing-bun", 1), ("ing-patty", 2), ("ing-onion", 1)]
        );
    }

    #[test]
    fn test_resolve_tokens_apply_in_order() {
        // Remove-then-add nets one; add-then-remove nets zero.
        let catalog = catalog();
        let recipe = vec![IngredientRequirement {
            ingredient_id: "ing-cheese".to_string(),
            name: "Cheese Slice".to_string(),
            quantity: 1,
        }];

        let net_one = resolve(&recipe, &catalog, "no cheese slice, add cheese slice").unwrap();
        assert_eq!(quantities(&net_one), vec![("ing-cheese", 1)]);

        let net_zero = resolve(&recipe, &catalog, "add cheese slice, no cheese slice").unwrap();
        assert!(net_zero.deltas.is_empty());
    }

    #[test]
    fn test_resolve_unknown_addition_warns() {
        let resolution = resolve(&burger_recipe(), &catalog(), "add truffle oil").unwrap();
        assert_eq!(
            resolution.warnings,
            vec![ResolutionWarning::UnknownAddition(
                "truffle oil".to_string()
            )]
        );
        // Base recipe unchanged.
        assert_eq!(resolution.deltas.len(), 3);
    }

    #[test]
    fn test_resolve_removal_not_in_recipe_warns() {
        let resolution = resolve(&burger_recipe(), &catalog(), "no bacon").unwrap();
        assert_eq!(
            resolution.warnings,
            vec![ResolutionWarning::RemovalNotInRecipe("bacon".to_string())]
        );
        assert_eq!(resolution.deltas.len(), 3);
    }

    #[test]
    fn test_resolve_unrecognized_token_warns() {
        let resolution = resolve(&burger_recipe(), &catalog(), "well done").unwrap();
        assert_eq!(
            resolution.warnings,
            vec![ResolutionWarning::UnrecognizedToken("well done".to_string())]
        );
    }

    #[test]
    fn test_resolve_rejects_unknown_recipe_ingredient() {
        let recipe = vec![IngredientRequirement {
            ingredient_id: "ing-999".to_string(),
            name: String::new(),
            quantity: 1,
        }];
        let err = resolve(&recipe, &catalog(), "").unwrap_err();
        assert!(matches!(
            err,
            CoreError::UnknownIngredient { ingredient_id } if ingredient_id == "ing-999"
        ));
    }

    #[test]
    fn test_resolve_merges_duplicate_recipe_lines() {
        let recipe = vec![
            IngredientRequirement {
                ingredient_id: "ing-patty".to_string(),
                name: "Beef Patty".to_string(),
                quantity: 1,
            },
            IngredientRequirement {
                ingredient_id: "ing-patty".to_string(),
                name: "Beef Patty".to_string(),
                quantity: 1,
            },
        ];
        let resolution = resolve(&recipe, &catalog(), "").unwrap();
        assert_eq!(quantities(&resolution), vec![("ing-patty", 2)]);
    }

    #[test]
    fn test_index_lookup_is_case_insensitive() {
        let index = catalog();
        assert_eq!(index.id_for_name("CHEESE SLICE"), Some("ing-cheese"));
        assert_eq!(index.id_for_name("cheese slice"), Some("ing-cheese"));
        assert_eq!(index.id_for_name("nothing"), None);
        assert!(index.contains_id("ing-bun"));
        assert_eq!(index.len(), 5);
    }
}
