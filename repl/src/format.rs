//! Output formatting for the REPL.

use serde_json::Value;

/// Render a table payload as an aligned text grid with a row-count
/// footer. Payloads that do not look like a table fall back to compact
/// JSON.
pub fn format_table(table: &Value) -> String {
    let (Some(headers), Some(data)) = (table["headers"].as_array(), table["data"].as_array())
    else {
        return table.to_string();
    };

    let names: Vec<String> = headers
        .iter()
        .map(|h| h["name"].as_str().unwrap_or("?").to_string())
        .collect();
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|row| {
            row.as_array()
                .map(|cells| cells.iter().map(format_cell).collect())
                .unwrap_or_default()
        })
        .collect();

    let mut widths: Vec<usize> = names.iter().map(String::len).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() && cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let mut output = String::new();
    push_row(&mut output, &names, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    output.push_str(&rule.join("-+-"));
    output.push('\n');
    for row in &rows {
        push_row(&mut output, row, &widths);
    }
    output.push_str(&format!("({} rows)", rows.len()));

    output
}

fn push_row(output: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<1$}", cell, width))
        .collect();
    output.push_str(padded.join(" | ").trim_end());
    output.push('\n');
}

/// Strings render bare; everything else renders as JSON.
fn format_cell(cell: &Value) -> String {
    match cell.as_str() {
        Some(s) => s.to_string(),
        None => cell.to_string(),
    }
}

/// Print help information.
pub fn print_help() {
    println!("Tether REPL commands:");
    println!("  \\i <file>      Run a script file");
    println!("  help, \\h       Show this help");
    println!("  quit, \\q       Exit");
    println!();
    println!("Anything else is interpreted as jot code. A block that is");
    println!("still incomplete continues on the next line; %table <name>");
    println!("renders a bound list of rows as a grid.");
}
