use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::io::open_maybe_gz;
use crate::records::Table;

pub fn read_table(path: &Path) -> Result<Table> {
    let mut content = String::new();
    open_maybe_gz(path)
        .with_context(|| format!("failed to open table {}", path.display()))?
        .read_to_string(&mut content)
        .with_context(|| format!("failed to read table {}", path.display()))?;
    parse_table(&content, &path.display().to_string())
}

pub fn parse_table(content: &str, source: &str) -> Result<Table> {
    let mut lines = content.lines().filter(|l| !l.trim().is_empty());
    let Some(header) = lines.next() else {
        bail!("{} is empty", source);
    };
    let columns: Vec<String> = header
        .trim_end_matches('\r')
        .split('\t')
        .map(|c| c.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for line in lines {
        let mut cells: Vec<String> = line
            .trim_end_matches('\r')
            .split('\t')
            .map(str::to_string)
            .collect();
        if cells.len() < columns.len() {
            cells.resize(columns.len(), String::new());
        }
        rows.push(cells);
    }
    Ok(Table::new(columns, rows))
}
