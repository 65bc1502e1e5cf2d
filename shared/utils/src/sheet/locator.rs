//! Header row discovery.
//!
//! Sheets put their table header wherever the author felt like it, usually below
//! a few rows of title and order details. The locator walks a window of rows and
//! picks the first one whose cells name every required column role.

use mebel_models::Grid;
use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::Range;

/// Bumped whenever the role keyword table changes, so imports can be traced to
/// the rules that produced them.
pub const RULE_TABLE_VERSION: u32 = 1;

/// Semantic meaning of a spreadsheet column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    Article,
    Coefficient,
    Price,
    Quantity,
    Unit,
    Category,
    Note,
    Name,
}

/// Keyword predicate for one role. A header cell matches when its trimmed,
/// lowercased text contains any of the keywords.
#[derive(Debug, Clone)]
pub struct RoleRule {
    pub role: ColumnRole,
    pub keywords: Vec<String>,
}

impl RoleRule {
    pub fn new(role: ColumnRole, keywords: &[&str]) -> Self {
        Self {
            role,
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    pub fn matches(&self, normalized: &str) -> bool {
        !normalized.is_empty() && self.keywords.iter().any(|k| normalized.contains(k.as_str()))
    }
}

/// Rules in priority order. Order matters: "Цена за ед." must resolve to the
/// price column before the unit keywords get a chance, and "Код материала" is an
/// article column, not a name column.
fn default_rules() -> Vec<RoleRule> {
    vec![
        RoleRule::new(ColumnRole::Article, &["артикул", "код", "арт.", "article", "sku"]),
        RoleRule::new(ColumnRole::Coefficient, &["коэф", "кэф", "coef"]),
        RoleRule::new(ColumnRole::Price, &["цена", "стоимость", "прайс", "руб", "price", "cost"]),
        RoleRule::new(
            ColumnRole::Quantity,
            &["кол-во", "кол.", "количество", "колич", "расход", "норма", "qty", "quantity"],
        ),
        RoleRule::new(ColumnRole::Unit, &["ед.", "ед ", "ед/", "единиц", "изм", "unit"]),
        RoleRule::new(ColumnRole::Category, &["категор", "группа", "раздел", "вид материала", "category"]),
        RoleRule::new(ColumnRole::Note, &["примеч", "комментар", "note", "comment"]),
        RoleRule::new(
            ColumnRole::Name,
            &["наимен", "материал", "название", "номенклатура", "позиция", "name"],
        ),
    ]
}

/// Role → column index mapping of a located table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnMap {
    columns: BTreeMap<ColumnRole, usize>,
}

impl ColumnMap {
    pub fn get(&self, role: ColumnRole) -> Option<usize> {
        self.columns.get(&role).copied()
    }

    pub fn contains(&self, role: ColumnRole) -> bool {
        self.columns.contains_key(&role)
    }

    /// Assigns a column unless the role already has one.
    pub fn assign(&mut self, role: ColumnRole, column: usize) {
        self.columns.entry(role).or_insert(column);
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Located header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderMatch {
    pub row: usize,
    pub columns: ColumnMap,
}

/// Header locator driven by an ordered role rule table.
#[derive(Debug, Clone)]
pub struct TableLocator {
    rules: Vec<RoleRule>,
}

impl Default for TableLocator {
    fn default() -> Self {
        Self {
            rules: default_rules(),
        }
    }
}

impl TableLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the rule table. Rules are evaluated in the given order.
    pub fn with_rules(rules: Vec<RoleRule>) -> Self {
        Self { rules }
    }

    /// First role whose keywords match the header text, if any.
    pub fn classify_header(&self, text: &str) -> Option<ColumnRole> {
        let normalized = text.trim().to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&normalized))
            .map(|rule| rule.role)
    }

    /// Scans `window` for a header row naming every `required` role.
    ///
    /// Each column is claimed by the first matching rule; claims by roles outside
    /// `required` and `optional` are discarded. When a role is named by several
    /// columns the leftmost one wins.
    pub fn locate(
        &self,
        grid: &Grid,
        window: Range<usize>,
        required: &[ColumnRole],
        optional: &[ColumnRole],
    ) -> Option<HeaderMatch> {
        let end = window.end.min(grid.row_count());
        (window.start..end).find_map(|row| {
            let columns = self.map_row(grid, row, required, optional);
            required
                .iter()
                .all(|role| columns.contains(*role))
                .then_some(HeaderMatch { row, columns })
        })
    }

    fn map_row(
        &self,
        grid: &Grid,
        row: usize,
        required: &[ColumnRole],
        optional: &[ColumnRole],
    ) -> ColumnMap {
        let mut columns = ColumnMap::default();
        for (column, cell) in grid.row(row).iter().enumerate() {
            let Some(role) = self.classify_header(&cell.normalized()) else {
                continue;
            };
            if required.contains(&role) || optional.contains(&role) {
                columns.assign(role, column);
            }
        }
        columns
    }
}
