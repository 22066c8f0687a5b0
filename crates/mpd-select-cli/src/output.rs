//! Output formatting for CLI

use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Table,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "table" => OutputFormat::Table,
            _ => OutputFormat::Text,
        }
    }
}

/// Render rows in the selected format. `text` renders one row per line.
pub fn render<T, F>(rows: &[T], format: OutputFormat, text: F) -> anyhow::Result<String>
where
    T: Serialize + Tabled,
    F: Fn(&T) -> String,
{
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(rows)?,
        OutputFormat::Table => Table::new(rows).to_string(),
        OutputFormat::Text => rows.iter().map(text).collect::<Vec<_>>().join("\n"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Tabled)]
    struct Row {
        name: String,
        value: u64,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "a".into(), value: 1 },
            Row { name: "b".into(), value: 2 },
        ]
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from("table"), OutputFormat::Table);
        assert_eq!(OutputFormat::from("anything"), OutputFormat::Text);
    }

    #[test]
    fn test_render_text() {
        let out = render(&rows(), OutputFormat::Text, |r| format!("{}={}", r.name, r.value)).unwrap();
        assert_eq!(out, "a=1\nb=2");
    }

    #[test]
    fn test_render_json() {
        let out = render(&rows(), OutputFormat::Json, |_| String::new()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[1]["name"], "b");
        assert_eq!(parsed[1]["value"], 2);
    }

    #[test]
    fn test_render_table_has_headers() {
        let out = render(&rows(), OutputFormat::Table, |_| String::new()).unwrap();
        assert!(out.contains("name"));
        assert!(out.contains("value"));
    }
}
