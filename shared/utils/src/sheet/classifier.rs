//! Material category assignment for price-list rows without a category column.

use mebel_models::MaterialCategory;

/// Keyword rules in evaluation order; first match wins.
///
/// Sheet stock is checked before finishing materials: "ЛДСП ламинированная"
/// and "МДФ шпонированный" are boards, not finishes.
const CATEGORY_RULES: &[(MaterialCategory, &[&str])] = &[
    (
        MaterialCategory::SheetMaterials,
        &[
            "лдсп", "дсп", "мдф", "хдф", "двп", "фанер", "плит", "щит", "столешниц", "массив",
            "osb", "осб", "hpl", "лист",
        ],
    ),
    (MaterialCategory::EdgeBanding, &["кромк", "абс", "abs", "пвх-лент", "меламин"]),
    (
        MaterialCategory::Hardware,
        &[
            "петл", "направляющ", "ручк", "саморез", "шуруп", "винт", "болт", "гайк", "шайб",
            "конфирмат", "эксцентрик", "стяжк", "опор", "ножк", "полкодерж", "газлифт",
            "доводчик", "замок", "крючок", "уголок", "шкант", "фурнитур", "профиль", "screw",
            "hinge", "handle",
        ],
    ),
    (
        MaterialCategory::Lighting,
        &["светодиод", "led", "лента свет", "светильник", "подсветк", "блок питания", "кабель", "провод", "выключател", "драйвер"],
    ),
    (MaterialCategory::Adhesives, &["клей", "клея", "герметик", "пва", "расплав"]),
    (
        MaterialCategory::Finishing,
        &["лак", "краск", "эмал", "грунт", "морилк", "масло", "воск", "пятно", "шпатлев", "растворител", "отвердител", "патин"],
    ),
    (MaterialCategory::Mirrors, &["зеркал", "стекл", "витраж"]),
];

/// Assigns a category by keyword containment on the lowercased name.
pub fn classify_material(name: &str) -> MaterialCategory {
    let normalized = name.trim().to_lowercase();
    if normalized.is_empty() {
        return MaterialCategory::Other;
    }
    CATEGORY_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| normalized.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(MaterialCategory::Other)
}
