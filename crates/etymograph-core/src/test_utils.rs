//! Test fixtures for Etymograph

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::model::Word;

/// "etymology": chain and roots both start with "etymologia".
pub fn etymology_record() -> Word {
    Word::new("etymology", "English")
        .with_year(1398)
        .with_etymology(vec![Word::new("etymologia", "Latin").with_year(1350)])
        .with_roots(vec![Word::new("etymologia", "Latin").with_year(1350).with_roots(vec![
            Word::new("etymon", "Greek").with_definition("true sense"),
            Word::new("logia", "Greek").with_definition("study of"),
        ])])
}

/// A record with nothing behind it.
pub fn bare_record() -> Word {
    Word::new("ok", "English").with_year(1839)
}

/// Two roots spelled "mundus" with different glosses.
pub fn mundane_record() -> Word {
    Word::new("mundane", "English").with_year(1475).with_roots(vec![
        Word::new("mundus", "Latin").with_definition("world, universe"),
        Word::new("mundus", "Latin").with_definition("clean, elegant"),
    ])
}

/// Write records into `<dir>/<Language>/<letter>/<word>.json`.
pub fn create_data_tree(records: &[Word]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for record in records {
        write_record(temp_dir.path(), record);
    }
    temp_dir
}

pub fn write_record(root: &Path, record: &Word) {
    let key = record.lookup_key();
    let letter: String = key.chars().take(1).collect();
    let dir = root.join(&record.language).join(letter);
    fs::create_dir_all(&dir).unwrap();
    let json = serde_json::to_string_pretty(record).unwrap();
    fs::write(dir.join(format!("{}.json", key)), json).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_data_tree() {
        let temp_dir = create_data_tree(&[etymology_record(), mundane_record()]);
        let root = temp_dir.path();

        assert!(root.join("English/e/etymology.json").exists());
        assert!(root.join("English/m/mundane.json").exists());
    }
}
