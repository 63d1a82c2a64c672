use std::fmt;

/// Literal stored for every attribute a source file leaves out
pub const NOT_AVAILABLE: &str = "N/A";

/// The thrall classes the store keeps a table for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThrallClass {
    Alchemist,
    Archer,
    Armorer,
    Bearer,
    Blacksmith,
    Carpenter,
    Cook,
    Fighter,
    Performer,
    Priest,
    Smelter,
    Sorcerer,
    Tanner,
    Taskmaster,
}

impl ThrallClass {
    /// Display name, as shown to users
    pub const fn name(self) -> &'static str {
        match self {
            ThrallClass::Alchemist => "Alchemist",
            ThrallClass::Archer => "Archer",
            ThrallClass::Armorer => "Armorer",
            ThrallClass::Bearer => "Bearer",
            ThrallClass::Blacksmith => "Blacksmith",
            ThrallClass::Carpenter => "Carpenter",
            ThrallClass::Cook => "Cook",
            ThrallClass::Fighter => "Fighter",
            ThrallClass::Performer => "Performer",
            ThrallClass::Priest => "Priest",
            ThrallClass::Smelter => "Smelter",
            ThrallClass::Sorcerer => "Sorcerer",
            ThrallClass::Tanner => "Tanner",
            ThrallClass::Taskmaster => "Taskmaster",
        }
    }

    /// SQL identifier of the class table
    pub const fn table_name(self) -> &'static str {
        match self {
            ThrallClass::Alchemist => "alchemist",
            ThrallClass::Archer => "archer",
            ThrallClass::Armorer => "armorer",
            ThrallClass::Bearer => "bearer",
            ThrallClass::Blacksmith => "blacksmith",
            ThrallClass::Carpenter => "carpenter",
            ThrallClass::Cook => "cook",
            ThrallClass::Fighter => "fighter",
            ThrallClass::Performer => "performer",
            ThrallClass::Priest => "priest",
            ThrallClass::Smelter => "smelter",
            ThrallClass::Sorcerer => "sorcerer",
            ThrallClass::Tanner => "tanner",
            ThrallClass::Taskmaster => "taskmaster",
        }
    }
}

impl fmt::Display for ThrallClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Column definition. Every column is stored as TEXT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// SQL identifier (snake_case)
    pub name: &'static str,
    /// Human-readable field name, as written in source files
    pub label: &'static str,
    pub primary_key: bool,
}

impl Column {
    pub const fn new(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            primary_key: false,
        }
    }

    /// Create the identity column of a class table
    pub const fn key(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            primary_key: true,
        }
    }
}

/// Normalize a human-written field name to a column identifier:
/// trimmed, lower-cased, spaces replaced by underscores.
pub fn normalize_field_name(field: &str) -> String {
    field.trim().to_lowercase().replace(' ', "_")
}
