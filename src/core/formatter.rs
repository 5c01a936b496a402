//! Output formatters, selected by name from the configuration.
//!
//! Tabular formatters expect a list of rows whose first row is the header;
//! anything else is rendered as pretty JSON.

use crate::error::{AdrError, Result};
use indexmap::IndexMap;
use serde_json::Value;

/// Renders a recipe result for display.
pub type Formatter = fn(&Value) -> String;

/// Formatter name → formatter.
#[derive(Debug, Clone, Default)]
pub struct FormatterRegistry {
    formatters: IndexMap<String, Formatter>,
}

impl FormatterRegistry {
    /// `json`, `table`, `markdown`, and `tab`.
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        registry.register("json", format_json);
        registry.register("table", format_table);
        registry.register("markdown", format_markdown);
        registry.register("tab", format_tab);
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, formatter: Formatter) {
        self.formatters.insert(name.into(), formatter);
    }

    pub fn get(&self, name: &str) -> Result<Formatter> {
        self.formatters
            .get(name)
            .copied()
            .ok_or_else(|| AdrError::UnknownFormatter(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.formatters.keys().map(String::as_str)
    }
}

pub fn format_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Space-aligned columns with a dashed rule under the header.
pub fn format_table(value: &Value) -> String {
    let Some(rows) = rows(value) else {
        return format_json(value);
    };
    let widths = column_widths(&rows);

    let mut out = Vec::with_capacity(rows.len() + 1);
    for (i, row) in rows.iter().enumerate() {
        out.push(pad_row(row, &widths, "  ").trim_end().to_string());
        if i == 0 {
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            out.push(rule.join("  "));
        }
    }
    out.join("\n")
}

/// GitHub-flavoured pipe table.
pub fn format_markdown(value: &Value) -> String {
    let Some(rows) = rows(value) else {
        return format_json(value);
    };
    let widths: Vec<usize> = column_widths(&rows).into_iter().map(|w| w.max(3)).collect();

    let mut out = Vec::with_capacity(rows.len() + 1);
    for (i, row) in rows.iter().enumerate() {
        out.push(format!("| {} |", pad_row(row, &widths, " | ")));
        if i == 0 {
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            out.push(format!("| {} |", rule.join(" | ")));
        }
    }
    out.join("\n")
}

/// Tab-separated rows.
pub fn format_tab(value: &Value) -> String {
    let Some(rows) = rows(value) else {
        return format_json(value);
    };
    rows.iter()
        .map(|row| row.join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Stringified cells, or None when `value` is not a list of lists.
fn rows(value: &Value) -> Option<Vec<Vec<String>>> {
    let rows = value.as_array()?;
    if rows.is_empty() {
        return None;
    }
    rows.iter()
        .map(|row| row.as_array().map(|cells| cells.iter().map(cell).collect()))
        .collect()
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn column_widths(rows: &[Vec<String>]) -> Vec<usize> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    (0..columns)
        .map(|c| {
            rows.iter()
                .filter_map(|row| row.get(c))
                .map(|s| s.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect()
}

fn pad_row(row: &[String], widths: &[usize], separator: &str) -> String {
    widths
        .iter()
        .enumerate()
        .map(|(i, w)| {
            let s = row.get(i).map(String::as_str).unwrap_or("");
            format!("{:<width$}", s, width = *w)
        })
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!([["file", "pct"], ["a.py", 80], ["dom/base.cpp", 55.5]])
    }

    #[test]
    fn test_formatter_builtin_names() {
        let registry = FormatterRegistry::builtin();
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["json", "table", "markdown", "tab"]
        );
    }

    #[test]
    fn test_formatter_unknown() {
        let registry = FormatterRegistry::builtin();
        let err = registry.get("yaml").unwrap_err();
        assert!(matches!(err, AdrError::UnknownFormatter(ref n) if n == "yaml"));
    }

    #[test]
    fn test_formatter_register_custom() {
        let mut registry = FormatterRegistry::builtin();
        registry.register("raw", |v| v.to_string());
        let f = registry.get("raw").unwrap();
        assert_eq!(f(&json!([1, 2])), "[1,2]");
    }

    #[test]
    fn test_formatter_json() {
        let out = format_json(&json!({"a": 1}));
        assert_eq!(out, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_formatter_table() {
        let out = format_table(&sample());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "file          pct");
        assert_eq!(lines[1], "------------  ----");
        assert_eq!(lines[2], "a.py          80");
        assert_eq!(lines[3], "dom/base.cpp  55.5");
    }

    #[test]
    fn test_formatter_markdown() {
        let out = format_markdown(&json!([["file", "pct"], ["a.py", 80]]));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "| file | pct |");
        assert_eq!(lines[1], "| ---- | --- |");
        assert_eq!(lines[2], "| a.py | 80  |");
    }

    #[test]
    fn test_formatter_tab() {
        assert_eq!(format_tab(&sample()), "file\tpct\na.py\t80\ndom/base.cpp\t55.5");
    }

    #[test]
    fn test_formatter_null_cells_blank() {
        assert_eq!(format_tab(&json!([["a", "b"], [null, 1]])), "a\tb\n\t1");
    }

    #[test]
    fn test_formatter_non_tabular_falls_back_to_json() {
        let value = json!({"total": 3});
        assert_eq!(format_table(&value), format_json(&value));
        assert_eq!(format_markdown(&value), format_json(&value));
        assert_eq!(format_tab(&json!([])), format_json(&json!([])));
    }
}
