use crate::schema::{ThrallClass, COLUMNS};

/// Generate CREATE TABLE SQL for a class table. Leaves an existing table untouched.
pub fn generate_create_table(class: ThrallClass) -> String {
    let mut sql = format!("CREATE TABLE IF NOT EXISTS \"{}\" (\n", class.table_name());

    let columns: Vec<String> = COLUMNS
        .iter()
        .map(|col| {
            let pk = if col.primary_key { " PRIMARY KEY" } else { "" };
            format!("    \"{}\" TEXT{}", col.name, pk)
        })
        .collect();

    sql.push_str(&columns.join(",\n"));
    sql.push_str("\n)");

    sql
}

/// Generate the insert-or-replace statement for a class table.
///
/// On a name conflict every other column is overwritten with the new row.
pub fn generate_upsert(class: ThrallClass) -> String {
    let names: Vec<String> = COLUMNS.iter().map(|c| format!("\"{}\"", c.name)).collect();
    let placeholders: Vec<&str> = COLUMNS.iter().map(|_| "?").collect();
    let key = COLUMNS
        .iter()
        .find(|c| c.primary_key)
        .map(|c| c.name)
        .unwrap_or("name");
    let updates: Vec<String> = COLUMNS
        .iter()
        .filter(|c| !c.primary_key)
        .map(|c| format!("\"{0}\" = excluded.\"{0}\"", c.name))
        .collect();

    format!(
        "INSERT INTO \"{}\" ({}) VALUES ({})\nON CONFLICT(\"{}\") DO UPDATE SET {}",
        class.table_name(),
        names.join(", "),
        placeholders.join(", "),
        key,
        updates.join(", ")
    )
}
