use crate::annotate::AnnotatedEntry;

const HEADERS: [&str; 11] = [
    "Qty",
    "Name",
    "Edition",
    "Collector #",
    "Color(s)",
    "Rarity",
    "Modifier",
    "Current Category",
    "Should Be In",
    "Price (USD)",
    "Source",
];

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn or_na(s: &str) -> String {
    if s.trim().is_empty() {
        "N/A".to_string()
    } else {
        s.to_string()
    }
}

/// Format a price the way the table shows it ("$3.10" or "N/A")
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) => format!("${p:.2}"),
        None => "N/A".to_string(),
    }
}

/// Price column; quotes from the fallback vendor carry a leading "~"
fn price_cell(row: &AnnotatedEntry) -> String {
    let price = format_price(row.price);
    if row.price.is_some() && !row.primary_quote {
        format!("~{price}")
    } else {
        price
    }
}

fn row_cells(row: &AnnotatedEntry) -> [String; 11] {
    let card = &row.entry.card;
    let name = if row.name().is_empty() {
        "Unknown".to_string()
    } else {
        row.name().to_string()
    };

    [
        row.entry.quantity.to_string(),
        name,
        card.edition.editionname.clone(),
        card.collector_number.clone(),
        row.colors.join(", "),
        or_na(&capitalize(&card.rarity)),
        row.entry.modifier.clone(),
        row.entry.categories.join(", "),
        row.should_be.to_string(),
        price_cell(row),
        row.price_source.to_string(),
    ]
}

/// Marker column: "^" needs to move up, "*" other mismatch
fn marker(row: &AnnotatedEntry) -> &'static str {
    if row.needs_move_up {
        "^"
    } else if row.is_mismatch {
        "*"
    } else {
        " "
    }
}

fn render_line<'a>(values: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    values
        .zip(widths)
        .map(|(value, &width)| format!("{value:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

/// Render rows as a fixed-width text table followed by a short summary
pub fn format_table(rows: &[&AnnotatedEntry]) -> String {
    let cells: Vec<[String; 11]> = rows.iter().map(|r| row_cells(r)).collect();

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    output.push_str(&format!("  {}\n", render_line(HEADERS.iter().copied(), &widths)));
    let rule_len = widths.iter().sum::<usize>() + 3 * (widths.len() - 1);
    output.push_str(&format!("  {}\n", "-".repeat(rule_len)));

    for (row, values) in rows.iter().zip(&cells) {
        output.push_str(&format!(
            "{} {}\n",
            marker(row),
            render_line(values.iter().map(String::as_str), &widths)
        ));
    }

    let mismatches = rows.iter().filter(|r| r.is_mismatch).count();
    let move_ups = rows.iter().filter(|r| r.needs_move_up).count();
    output.push_str(&format!(
        "\n{} cards shown, {} mismatched ({} to move up)\n",
        rows.len(),
        mismatches,
        move_ups
    ));
    let fallbacks = rows
        .iter()
        .filter(|r| r.price.is_some() && !r.primary_quote)
        .count();
    if fallbacks > 0 {
        output.push_str(&format!("~ {} prices from the fallback vendor\n", fallbacks));
    }

    output
}
