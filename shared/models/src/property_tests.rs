//! Property-based tests for the core domain models.

use proptest::prelude::*;

use crate::{CellValue, ForexCacheEntry, Grid, TechCard, TechCardMaterialLine};

prop_compose! {
    fn arb_line()(
        name in "[А-Яа-я ]{1,20}",
        base_qty in 0.0f64..1_000.0,
        coefficient in 0.0f64..10.0,
    ) -> (String, f64, f64) {
        (name, base_qty, coefficient)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every line keeps `quantity == base_qty * coefficient * items_in_order`.
    #[test]
    fn prop_line_quantity_invariant(
        (name, base_qty, coefficient) in arb_line(),
        items in 1u32..500,
    ) {
        let line = TechCardMaterialLine::new(name, base_qty, coefficient, items);
        let expected = line.base_qty * line.coefficient * f64::from(items);
        prop_assert!((line.quantity - expected).abs() <= 1e-9 * expected.abs().max(1.0));
        prop_assert!(line.quantity >= 0.0);
    }

    /// Scaling the order size by `k` scales every line quantity by `k`.
    #[test]
    fn prop_rescaling_is_linear(
        lines in prop::collection::vec(arb_line(), 0..10),
        items in 1u32..50,
        k in 1u32..20,
    ) {
        let mut card = TechCard::new("Изделие", items);
        for (name, base_qty, coefficient) in lines {
            card.materials.push(TechCardMaterialLine::new(name, base_qty, coefficient, items));
        }
        let scaled = card.with_items_in_order(items * k);
        for (before, after) in card.materials.iter().zip(&scaled.materials) {
            let expected = before.quantity * f64::from(k);
            prop_assert!((after.quantity - expected).abs() <= 1e-6 * expected.abs().max(1.0));
        }
    }

    #[test]
    fn prop_grid_cell_lookup_never_panics(
        rows in prop::collection::vec(prop::collection::vec("[a-z0-9 ]{0,5}", 0..6), 0..6),
        row in 0usize..10,
        col in 0usize..10,
    ) {
        let grid = Grid::from_rows(rows.clone());
        let cell = grid.cell(row, col);
        match rows.get(row).and_then(|r| r.get(col)) {
            Some(text) => prop_assert_eq!(cell.as_text(), text.trim().to_string()),
            None => prop_assert_eq!(cell, &CellValue::Empty),
        }
    }

    #[test]
    fn prop_cache_entry_freshness_is_monotonic(
        stored in 0i64..1_000_000,
        elapsed in 0i64..1_000_000,
        ttl in 1i64..1_000_000,
    ) {
        let entry = ForexCacheEntry::new("EUR", stored, Default::default());
        let fresh = entry.is_fresh(stored + elapsed, ttl);
        prop_assert_eq!(fresh, elapsed < ttl);
        if !fresh {
            prop_assert!(!entry.is_fresh(stored + elapsed + 1, ttl));
        }
    }
}
