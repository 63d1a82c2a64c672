//! Integration tests that import thrall files into an on-disk database and
//! read them back through the public API.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use thrall_db::schema::{ALL_CLASSES, COLUMNS};
use thrall_db::ui::SilentUi;
use thrall_db::writer::{collect_input_files, import_files};
use thrall_db::{ImportOutcome, QueryError, ThrallClass, ThrallError, ThrallStore};

// =============================================================================
// Fixtures
// =============================================================================

struct TestDatabase {
    dir: TempDir,
}

impl TestDatabase {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    fn db_path(&self) -> PathBuf {
        self.dir.path().join("thralls.db")
    }

    fn open(&self) -> ThrallStore {
        ThrallStore::open(&self.db_path()).expect("Failed to open test database")
    }

    /// Write a thrall file into the input directory and return its path
    fn write_file(&self, file_name: &str, contents: &str) -> PathBuf {
        let input = self.dir.path().join("input");
        fs::create_dir_all(&input).unwrap();
        let path = input.join(file_name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn input_dir(&self) -> PathBuf {
        self.dir.path().join("input")
    }
}

fn row_count(db_path: &Path, class: ThrallClass) -> i64 {
    let conn = rusqlite::Connection::open(db_path).unwrap();
    conn.query_row(
        &format!("SELECT COUNT(*) FROM \"{}\"", class.table_name()),
        [],
        |row| row.get(0),
    )
    .unwrap()
}

fn full_thrall(name: &str, class: &str) -> String {
    format!(
        "Name = {name}\n\
         ID = 1042\n\
         Class = {class}\n\
         Health = 1250\n\
         Strength = 14\n\
         Agility = 30\n\
         Vitality = 22\n\
         Grit = 11\n\
         Bonus Vitality = 3\n\
         Level Rate = fast\n\
         Armor = 40\n\
         Incoming Damage Reduction = 12%\n\
         Killed XP = 900\n\
         Temperament = Fiery\n\
         Gender = female\n\
         Thrallable = Yes\n\
         Race = Cimmerian\n\
         Faction = Black Hand\n\
         Description = Found near the Summoning Place\n\
         Notes = Keep away from the river\n"
    )
}

// =============================================================================
// Ingestion
// =============================================================================

#[test]
fn test_every_class_round_trips_through_get_record() {
    let db = TestDatabase::new();
    let store = db.open();

    for class in ALL_CLASSES {
        let name = format!("{} Thrall", class.name());
        let path = db.write_file(
            &format!("{}.txt", class.table_name()),
            &format!("name = {}\nclass = {}\nagility = 17\n", name, class.name()),
        );

        let (stored_class, _) = store.ingest_file(&path).unwrap();
        assert_eq!(stored_class, *class);

        let record = store.get_record(*class, &name).unwrap();
        assert_eq!(record.name(), name);
        assert_eq!(record.get("class"), Some(class.name()));
        assert_eq!(record.get("agility"), Some("17"));
        for col in COLUMNS {
            if !["name", "class", "agility"].contains(&col.name) {
                assert_eq!(record.get(col.name), Some("N/A"), "column {}", col.name);
            }
        }
    }
}

#[test]
fn test_all_twenty_fields_are_mapped() {
    let db = TestDatabase::new();
    let store = db.open();
    let path = db.write_file("ymir.txt", &full_thrall("Ymir's Chosen", "Fighter"));
    store.ingest_file(&path).unwrap();

    let record = store.get_record(ThrallClass::Fighter, "Ymir's Chosen").unwrap();
    assert!(record.values().iter().all(|v| v != "N/A"));
    assert_eq!(record.get("bonus_vitality"), Some("3"));
    assert_eq!(record.get("incoming_damage_reduction"), Some("12%"));
    assert_eq!(record.get("killed_xp"), Some("900"));
    assert_eq!(record.get("description"), Some("Found near the Summoning Place"));
}

#[test]
fn test_reingest_overwrites_instead_of_merging() {
    let db = TestDatabase::new();
    let first = db.write_file("first.txt", &full_thrall("Ulla", "Cook"));
    let second = db.write_file("second.txt", "Name = Ulla\nClass = Cook\nHealth = 99\n");

    let store = db.open();
    store.ingest_file(&first).unwrap();
    store.ingest_file(&second).unwrap();
    drop(store);

    assert_eq!(row_count(&db.db_path(), ThrallClass::Cook), 1);
    let record = db.open().get_record(ThrallClass::Cook, "Ulla").unwrap();
    assert_eq!(record.get("health"), Some("99"));
    assert_eq!(record.get("strength"), Some("N/A"));
    assert_eq!(record.get("race"), Some("N/A"));
}

#[test]
fn test_same_name_in_two_classes_is_two_rows() {
    let db = TestDatabase::new();
    let store = db.open();
    store
        .ingest_file(&db.write_file("a.txt", "name = Twin\nclass = Archer"))
        .unwrap();
    store
        .ingest_file(&db.write_file("b.txt", "name = Twin\nclass = Bearer"))
        .unwrap();

    assert_eq!(store.list_names(ThrallClass::Archer).unwrap(), vec!["Twin"]);
    assert_eq!(store.list_names(ThrallClass::Bearer).unwrap(), vec!["Twin"]);
}

#[test]
fn test_invalid_class_is_rejected_without_write() {
    let db = TestDatabase::new();
    let store = db.open();
    let path = db.write_file("smaug.txt", "Name = Smaug\nClass = Dragon\n");

    match store.ingest_file(&path) {
        Err(ThrallError::InvalidClass(value)) => assert_eq!(value, "DRAGON"),
        other => panic!("expected InvalidClass, got {:?}", other.map(|(c, _)| c)),
    }
    for class in ALL_CLASSES {
        assert_eq!(row_count(&db.db_path(), *class), 0);
    }
}

#[test]
fn test_batch_import_reports_each_file() {
    let db = TestDatabase::new();
    db.write_file("01-good.txt", &full_thrall("Ulla", "Cook"));
    db.write_file("02-dragon.txt", "Name = Smaug\nClass = Dragon\n");
    db.write_file("03-noise.txt", "no separators here\nat all\n");
    db.write_file("04-good.txt", "Name = Mitra\nClass = priest\n");
    db.write_file("notes.md", "Name = Ignored\nClass = Cook\n");
    fs::write(db.input_dir().join("05-binary.txt"), [0xff, 0xfe, 0x00, 0xc3]).unwrap();

    let store = db.open();
    let files = collect_input_files(&[db.input_dir()]).unwrap();
    assert_eq!(files.len(), 5);

    let reports = import_files(&store, &files, &mut SilentUi::new());
    let outcomes: Vec<_> = reports.iter().map(|r| r.outcome.clone()).collect();
    assert!(outcomes[0].is_success());
    assert_eq!(outcomes[1], ImportOutcome::InvalidClass("DRAGON".to_string()));
    assert_eq!(outcomes[2], ImportOutcome::InvalidClass(String::new()));
    assert!(outcomes[3].is_success());
    assert!(matches!(outcomes[4], ImportOutcome::Error(_)));

    assert_eq!(store.list_names(ThrallClass::Cook).unwrap(), vec!["Ulla"]);
    assert_eq!(store.list_names(ThrallClass::Priest).unwrap(), vec!["Mitra"]);
}

// =============================================================================
// Schema
// =============================================================================

#[test]
fn test_schema_init_is_idempotent_across_opens() {
    let db = TestDatabase::new();
    {
        let store = db.open();
        store
            .ingest_file(&db.write_file("ulla.txt", "name = Ulla\nclass = Cook"))
            .unwrap();
        store.init_schema().unwrap();
    }

    let store = db.open();
    store.init_schema().unwrap();
    let tables: i64 = store
        .conn()
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tables, 14);
    assert_eq!(store.list_names(ThrallClass::Cook).unwrap(), vec!["Ulla"]);
}

// =============================================================================
// Search
// =============================================================================

fn searchable_store(db: &TestDatabase) -> ThrallStore {
    let store = db.open();
    let thralls = [
        ("ayla.txt", "Name = Ayla\nClass = Archer\nAgility = 30\nGender = female\nLevel Rate = fast"),
        ("bren.txt", "Name = Bren\nClass = Archer\nAgility = 40\nGender = male\nLevel Rate = slow"),
        ("cyra.txt", "Name = Cyra\nClass = Archer\nAgility = 12\nGender = female\nLevel Rate = fast"),
        ("dova.txt", "Name = Dova\nClass = Archer\nAgility = 26\nGender = female"),
    ];
    for (file, text) in thralls {
        store.ingest_file(&db.write_file(file, text)).unwrap();
    }
    store
}

#[test]
fn test_empty_search_equals_list() {
    let db = TestDatabase::new();
    let store = searchable_store(&db);
    let listed = store.list_names(ThrallClass::Archer).unwrap();
    assert_eq!(listed, vec!["Ayla", "Bren", "Cyra", "Dova"]);
    assert_eq!(store.search(ThrallClass::Archer, "").unwrap(), listed);
}

#[test]
fn test_search_conjunction() {
    let db = TestDatabase::new();
    let store = searchable_store(&db);
    assert_eq!(
        store
            .search(ThrallClass::Archer, "Agility>25 AND Gender=female")
            .unwrap(),
        vec!["Ayla", "Dova"]
    );
}

#[test]
fn test_search_two_character_operator_on_spaced_field() {
    let db = TestDatabase::new();
    let store = searchable_store(&db);
    // Textual: "fast" >= "fast", "slow" >= "fast", "N/A" < "fast"
    assert_eq!(
        store.search(ThrallClass::Archer, "Level Rate>=fast").unwrap(),
        vec!["Ayla", "Bren", "Cyra"]
    );
}

#[test]
fn test_numeric_operator_ignores_text_values() {
    let db = TestDatabase::new();
    let store = searchable_store(&db);
    store
        .ingest_file(&db.write_file(
            "eira.txt",
            "Name = Eira\nClass = Archer\nAgility = high\nLevel Rate = 2",
        ))
        .unwrap();

    // "fast", "slow" and "N/A" are not numbers and never satisfy a numeric bound
    assert_eq!(
        store.search(ThrallClass::Archer, "Level Rate<3").unwrap(),
        vec!["Eira"]
    );
    assert_eq!(
        store.search(ThrallClass::Archer, "Agility<20").unwrap(),
        vec!["Cyra"]
    );
    assert_eq!(
        store.search(ThrallClass::Archer, "Agility>=0").unwrap(),
        vec!["Ayla", "Bren", "Cyra", "Dova"]
    );
}

#[test]
fn test_search_errors_are_reported() {
    let db = TestDatabase::new();
    let store = searchable_store(&db);
    assert!(matches!(
        store.search(ThrallClass::Archer, "Wingspan>3"),
        Err(QueryError::UnknownField(_))
    ));
    assert!(matches!(
        store.search(ThrallClass::Archer, "Gender female"),
        Err(QueryError::MalformedCondition(_))
    ));
}

#[test]
fn test_get_record_not_found() {
    let db = TestDatabase::new();
    let store = searchable_store(&db);
    assert!(matches!(
        store.get_record(ThrallClass::Archer, "Nobody"),
        Err(ThrallError::NotFound { .. })
    ));
}
