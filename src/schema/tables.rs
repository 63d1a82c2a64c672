//! Class table and column definitions for the thrall store

use super::types::*;

/// Every class that gets its own table, in display order
pub static ALL_CLASSES: &[ThrallClass] = &[
    ThrallClass::Alchemist,
    ThrallClass::Archer,
    ThrallClass::Armorer,
    ThrallClass::Bearer,
    ThrallClass::Blacksmith,
    ThrallClass::Carpenter,
    ThrallClass::Cook,
    ThrallClass::Fighter,
    ThrallClass::Performer,
    ThrallClass::Priest,
    ThrallClass::Smelter,
    ThrallClass::Sorcerer,
    ThrallClass::Tanner,
    ThrallClass::Taskmaster,
];

/// Columns shared by every class table, in storage order
pub static COLUMNS: &[Column] = &[
    Column::key("name", "Name"),
    Column::new("id", "ID"),
    Column::new("class", "Class"),
    Column::new("health", "Health"),
    Column::new("strength", "Strength"),
    Column::new("agility", "Agility"),
    Column::new("vitality", "Vitality"),
    Column::new("grit", "Grit"),
    Column::new("bonus_vitality", "Bonus Vitality"),
    Column::new("level_rate", "Level Rate"),
    Column::new("armor", "Armor"),
    Column::new("incoming_damage_reduction", "Incoming Damage Reduction"),
    Column::new("killed_xp", "Killed XP"),
    Column::new("temperament", "Temperament"),
    Column::new("gender", "Gender"),
    Column::new("thrallable", "Thrallable"),
    Column::new("race", "Race"),
    Column::new("faction", "Faction"),
    Column::new("description", "Description"),
    Column::new("notes", "Notes"),
];

/// Look up a class by name (case-insensitive, surrounding whitespace ignored)
pub fn get_class(name: &str) -> Option<ThrallClass> {
    let name = name.trim();
    ALL_CLASSES
        .iter()
        .copied()
        .find(|c| c.name().eq_ignore_ascii_case(name))
}

/// Look up a column by a human-written field name ("Level Rate", "level_rate")
pub fn get_column(field: &str) -> Option<&'static Column> {
    let normalized = normalize_field_name(field);
    COLUMNS.iter().find(|c| c.name == normalized)
}

/// All class display names
pub fn class_names() -> Vec<&'static str> {
    ALL_CLASSES.iter().map(|c| c.name()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fixed_sizes() {
        assert_eq!(ALL_CLASSES.len(), 14);
        assert_eq!(COLUMNS.len(), 20);
        assert_eq!(COLUMNS.iter().filter(|c| c.primary_key).count(), 1);
        assert_eq!(COLUMNS[0].name, "name");
    }

    #[test]
    fn test_identifiers_unique() {
        let columns: HashSet<_> = COLUMNS.iter().map(|c| c.name).collect();
        assert_eq!(columns.len(), COLUMNS.len());
        let tables: HashSet<_> = ALL_CLASSES.iter().map(|c| c.table_name()).collect();
        assert_eq!(tables.len(), ALL_CLASSES.len());
    }

    #[test]
    fn test_labels_normalize_to_identifiers() {
        for col in COLUMNS {
            assert_eq!(normalize_field_name(col.label), col.name);
        }
    }

    #[test]
    fn test_get_class() {
        assert_eq!(get_class("archer"), Some(ThrallClass::Archer));
        assert_eq!(get_class(" TASKMASTER "), Some(ThrallClass::Taskmaster));
        assert_eq!(get_class("Dragon"), None);
        assert_eq!(get_class(""), None);
    }

    #[test]
    fn test_get_column() {
        assert_eq!(get_column("Bonus Vitality").map(|c| c.name), Some("bonus_vitality"));
        assert_eq!(get_column("killed_xp").map(|c| c.label), Some("Killed XP"));
        assert!(get_column("name; DROP TABLE cook").is_none());
        assert!(get_column("rowid").is_none());
    }
}
