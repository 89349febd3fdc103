use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn options() -> table::TableOptions {
    table::TableOptions {
        max_width: ui::prefs().term_width,
    }
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    match serde_json::to_value(value)? {
        Value::Array(items) => Ok(render_array_table(&items)),
        Value::Object(map) => {
            let rows = flatten_object(&map, "")
                .into_iter()
                .map(|(key, cell)| vec![key, cell])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&["field", "value"], &rows, options()))
        }
        scalar => Ok(table::render_entity_table(
            &["value"],
            &[vec![value_to_cell(&scalar)]],
            options(),
        )),
    }
}

/// One row per item; nested objects (an animal's family) become dotted columns.
fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    let flattened = items
        .iter()
        .map(|item| match item {
            Value::Object(map) => flatten_object(map, ""),
            other => vec![(String::from("value"), value_to_cell(other))],
        })
        .collect::<Vec<_>>();

    let mut headers = Vec::<String>::new();
    for row in &flattened {
        for (key, _) in row {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = flattened
        .iter()
        .map(|row| {
            headers
                .iter()
                .map(|header| {
                    row.iter()
                        .find(|(key, _)| key == header)
                        .map_or_else(|| String::from("-"), |(_, cell)| cell.clone())
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, options())
}

/// Flatten nested objects into `parent.child` keys.
fn flatten_object(map: &Map<String, Value>, prefix: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for (key, value) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(inner) => out.extend(flatten_object(inner, &name)),
            other => out.push((name, value_to_cell(other))),
        }
    }
    out
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Family {
        id: i64,
        name: &'static str,
    }

    #[derive(Serialize)]
    struct Animal {
        id: i64,
        name: &'static str,
        description: Option<&'static str>,
        family: Family,
    }

    fn paco() -> Animal {
        Animal {
            id: 1,
            name: "Paco",
            description: None,
            family: Family {
                id: 4,
                name: "Guerrero",
            },
        }
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&paco(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["name"], "Paco");
        assert_eq!(parsed["family"]["name"], "Guerrero");
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&paco(), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], 1);
    }

    #[test]
    fn table_render_for_object_lists_fields() {
        let out = render(&paco(), OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.contains("field")));
        assert!(out.contains("family.name"));
        assert!(out.contains("Guerrero"));
    }

    #[test]
    fn table_render_for_list_flattens_family() {
        let out = render(&vec![paco()], OutputFormat::Table).expect("table render should work");
        let header = out.lines().next().unwrap();
        assert!(header.contains("family.id"));
        assert!(header.contains("family.name"));
        assert_eq!(out.lines().count(), 3);
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let empty: Vec<serde_json::Value> = Vec::new();
        assert_eq!(render(&empty, OutputFormat::Table).unwrap(), "(no rows)");
    }
}
