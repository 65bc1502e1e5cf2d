//! Import pipeline tests: uploaded bytes through decoding, extraction and costing.

use mebel_models::MaterialCategory;
use mebel_utils::{
    aggregate_cost, cost_lines, decode_workbook, price_map_from_catalog, FallbackColumns,
    MaterialCatalogExtractor, TechCardExtractor,
};

const TECH_CARD_CSV: &str = "\
Техническая карта;;;
Изделие:;Шкаф-купе 1600;;
Кол-во изделий:;2;;
;;;
Артикул;Наименование;Кол-во;Коэф.;Ед.
L-16;ЛДСП 16мм белая;3,2;1,1;м2
K-2;Кромка ПВХ 2мм;14;;м
;;;;
F-01;Петля накладная;8;;шт
;;;
;;;
Итого;;;
";

const PRICE_LIST_CSV: &str = "\
Прайс-лист на 01.03;;;
Наименование;Ед. изм.;Цена, руб.;Группа
ЛДСП 16мм белая;м2;1 250,00;
Кромка ПВХ 2мм;м;18,50;Кромочные материалы
Петля накладная;шт;95;
Ручка-скоба;шт;по запросу;
";

#[test]
fn test_tech_card_priced_against_price_list() {
    let card_grid = decode_workbook("card.csv", TECH_CARD_CSV.as_bytes(), None, None)
        .unwrap()
        .unwrap();
    let price_grid = decode_workbook("price.csv", PRICE_LIST_CSV.as_bytes(), None, None)
        .unwrap()
        .unwrap();

    let card = TechCardExtractor::new().extract(&card_grid);
    assert_eq!(card.product_name, "Шкаф-купе 1600");
    assert_eq!(card.items_in_order, 2);
    let names: Vec<_> = card.materials.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["ЛДСП 16мм белая", "Кромка ПВХ 2мм", "Петля накладная"]);
    assert!((card.materials[0].quantity - 3.2 * 1.1 * 2.0).abs() < 1e-9);

    let catalog = MaterialCatalogExtractor::new().extract_with_stats(&price_grid);
    assert_eq!(catalog.header_row, Some(1));
    assert_eq!(catalog.rows.len(), 3);
    assert_eq!(catalog.dropped_rows, 1);
    assert_eq!(catalog.rows[0].category.as_deref(), Some(MaterialCategory::SheetMaterials.label()));
    assert_eq!(catalog.rows[1].category.as_deref(), Some("Кромочные материалы"));

    let total = aggregate_cost(&cost_lines(&card), &price_map_from_catalog(&catalog.rows), 3000.0);
    let expected = 3.2 * 1.1 * 2.0 * 1250.0 + 14.0 * 2.0 * 18.5 + 8.0 * 2.0 * 95.0 + 3000.0;
    assert_eq!(total, f64::round(expected) as i64);
}

#[test]
fn test_headerless_price_list_with_custom_columns() {
    let csv = ";Screw M4;pcs;12,50\n;Hinge 35mm;pcs;0\n";
    let grid = decode_workbook("price.csv", csv.as_bytes(), None, None).unwrap().unwrap();

    let extraction = MaterialCatalogExtractor::new()
        .with_fallback(FallbackColumns {
            article: Some(0),
            name: 1,
            unit: Some(2),
            price: 3,
            category: None,
        })
        .extract_with_stats(&grid);

    assert!(extraction.used_fallback);
    assert_eq!(extraction.rows.len(), 1);
    assert_eq!(extraction.rows[0].name, "Screw M4");
    assert_eq!(extraction.rows[0].unit, "pcs");
    assert_eq!(extraction.rows[0].price, 12.5);
}

#[test]
fn test_missing_sheet_gives_empty_card() {
    let card = TechCardExtractor::new().extract_sheet(None);
    assert!(card.materials.is_empty());
    assert_eq!(card.items_in_order, 1);
}
