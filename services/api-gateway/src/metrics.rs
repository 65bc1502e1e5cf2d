//! Prometheus counters for imports and costing requests.

use prometheus::{IntCounterVec, Opts, Registry};

#[derive(Clone)]
pub struct ImportMetrics {
    /// Uploads by kind (`tech_card`, `catalog`) and outcome (`ok`, `empty`, `error`).
    pub imports: IntCounterVec,
    /// Price-list rows by status (`kept`, `dropped`).
    pub catalog_rows: IntCounterVec,
    /// Cost calculations by kind (`materials`, `paint`).
    pub costings: IntCounterVec,
}

impl ImportMetrics {
    pub fn new(registry: &Registry) -> prometheus::Result<Self> {
        let imports = IntCounterVec::new(
            Opts::new("mebel_imports_total", "Spreadsheet imports processed"),
            &["kind", "outcome"],
        )?;
        let catalog_rows = IntCounterVec::new(
            Opts::new("mebel_catalog_rows_total", "Price-list rows seen during import"),
            &["status"],
        )?;
        let costings = IntCounterVec::new(
            Opts::new("mebel_costings_total", "Cost calculations performed"),
            &["kind"],
        )?;

        registry.register(Box::new(imports.clone()))?;
        registry.register(Box::new(catalog_rows.clone()))?;
        registry.register(Box::new(costings.clone()))?;

        Ok(Self {
            imports,
            catalog_rows,
            costings,
        })
    }

    pub fn record_import(&self, kind: &str, outcome: &str) {
        self.imports.with_label_values(&[kind, outcome]).inc();
    }

    pub fn record_catalog_rows(&self, kept: usize, dropped: usize) {
        self.catalog_rows.with_label_values(&["kept"]).inc_by(kept as u64);
        self.catalog_rows.with_label_values(&["dropped"]).inc_by(dropped as u64);
    }

    pub fn record_costing(&self, kind: &str) {
        self.costings.with_label_values(&[kind]).inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_are_exported() {
        let registry = Registry::new();
        let metrics = ImportMetrics::new(&registry).unwrap();

        metrics.record_import("catalog", "ok");
        metrics.record_catalog_rows(3, 1);

        let families = registry.gather();
        let names: Vec<_> = families.iter().map(|f| f.get_name()).collect();
        assert!(names.contains(&"mebel_imports_total"));
        assert!(names.contains(&"mebel_catalog_rows_total"));
        assert_eq!(metrics.catalog_rows.with_label_values(&["kept"]).get(), 3);
        assert_eq!(metrics.catalog_rows.with_label_values(&["dropped"]).get(), 1);
    }

    #[test]
    fn test_double_registration_fails() {
        let registry = Registry::new();
        ImportMetrics::new(&registry).unwrap();
        assert!(ImportMetrics::new(&registry).is_err());
    }
}
