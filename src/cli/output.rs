use comfy_table::{modifiers, presets, Cell, Color, ContentArrangement, Table};
use serde::Serialize;
use terminal_size::{terminal_size, Width};
use yansi::Paint;

/// Table with the console's house style, sized to the terminal.
pub fn new_table<I, S>(header: I) -> Table
where
    I: IntoIterator<Item = S>,
    S: Into<Cell>,
{
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table.set_header(header.into_iter().map(Into::into).collect::<Vec<Cell>>());
    table
}

pub fn print_table(table: &Table, empty_message: &str) {
    if table.row_iter().next().is_none() {
        println!("{}", empty_message.dim());
        return;
    }
    println!("\n{table}\n");
}

/// Status cell coloured after the console's badge class.
pub fn status_cell(text: impl Into<String>, class: &str) -> Cell {
    let cell = Cell::new(text.into());
    if !yansi::is_enabled() {
        return cell;
    }
    if class.ends_with("success") {
        cell.fg(Color::Green)
    } else if class.ends_with("warning") {
        cell.fg(Color::Yellow)
    } else if class.ends_with("error") {
        cell.fg(Color::Red)
    } else {
        cell
    }
}

pub fn or_dash(value: Option<impl ToString>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn json_value_to_string(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::Null => "-".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            serde_json::to_string(v).unwrap_or_default()
        }
    }
}

/// Field/value table of a single resource, in wire field order.
pub fn print_record<T: Serialize>(record: &T) {
    let value = match serde_json::to_value(record) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(%e, "Failed to serialize record for display");
            return;
        }
    };
    let mut table = new_table(["Field", "Value"]);
    match &value {
        serde_json::Value::Object(obj) => {
            for (k, v) in obj {
                table.add_row(vec![k.clone(), json_value_to_string(v)]);
            }
        }
        other => {
            table.add_row(vec!["value".to_string(), json_value_to_string(other)]);
        }
    }
    println!("\n{table}\n");
}

pub fn success(message: impl AsRef<str>) {
    println!("{}", message.as_ref().green());
}
