use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Left-aligned columns separated by two spaces. Widths count characters so
/// check marks line up.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    print_row(headers, &widths);
    let separator: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    print_row(&separator, &widths);
    for row in rows {
        print_row(row, &widths);
    }
}

fn print_row<S: AsRef<str>>(cells: &[S], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{:<w$}", cell.as_ref()))
        .collect();
    println!("{}", padded.join("  ").trim_end());
}

pub fn mark(present: bool) -> String {
    if present { "✓" } else { "·" }.to_string()
}

/// `42%`, or `-` when unknown.
pub fn percent(progress: Option<f64>) -> String {
    match progress {
        Some(p) => format!("{:.0}%", p * 100.0),
        None => "-".to_string(),
    }
}

pub fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}
