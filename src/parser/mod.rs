mod record;

pub use record::{parse_fields, parse_file, validate_class, FieldMap, ThrallRecord};
