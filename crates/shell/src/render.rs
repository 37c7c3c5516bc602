//! User-facing text.

use std::path::Path;

use fileshell_file_ops::DirEntry;

pub fn welcome(username: &str) -> String {
    format!("Welcome to the File Manager, {username}!")
}

pub fn farewell(username: &str) -> String {
    format!("Thank you for using File Manager, {username}, goodbye!")
}

pub fn current_dir(dir: &Path) -> String {
    format!("You are currently in {}", dir.display())
}

/// Renders a listing as a table with `(index)`, `Name` and `Type` columns.
pub fn listing_table(entries: &[DirEntry]) -> String {
    const INDEX: &str = "(index)";
    const NAME: &str = "Name";
    const TYPE: &str = "Type";

    let index_width = entries
        .len()
        .saturating_sub(1)
        .to_string()
        .len()
        .max(INDEX.len());
    let name_width = entries
        .iter()
        .map(|e| e.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(NAME.len());

    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(format!("{INDEX:<index_width$}  {NAME:<name_width$}  {TYPE}"));
    for (i, entry) in entries.iter().enumerate() {
        lines.push(format!(
            "{i:<index_width$}  {:<name_width$}  {}",
            entry.name, entry.kind
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use fileshell_file_ops::EntryKind;

    #[test]
    fn messages_interpolate() {
        assert_eq!(welcome("ada"), "Welcome to the File Manager, ada!");
        assert_eq!(
            farewell("ada"),
            "Thank you for using File Manager, ada, goodbye!"
        );
        assert_eq!(
            current_dir(Path::new("/srv")),
            "You are currently in /srv"
        );
    }

    #[test]
    fn table_layout() {
        let entries = vec![
            DirEntry {
                name: "adir".into(),
                kind: EntryKind::Directory,
            },
            DirEntry {
                name: "a-long-name.txt".into(),
                kind: EntryKind::File,
            },
        ];
        let table = listing_table(&entries);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "(index)  Name             Type");
        assert_eq!(lines[1], "0        adir             directory");
        assert_eq!(lines[2], "1        a-long-name.txt  file");
    }

    #[test]
    fn empty_table_has_header() {
        assert_eq!(listing_table(&[]), "(index)  Name  Type");
    }
}
