use std::fmt::Write;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::domain::entities::kpi::format_f64;
use crate::domain::entities::row::Value;
use crate::usecase::services::dashboard::{DashboardSnapshot, FetchStatus};

const STATUS_HEADER: &str = "status";
const MAX_CELL_WIDTH: usize = 32;

pub fn format_cell(value: &Value) -> String {
    match value {
        Value::Number(number) => format_f64(*number),
        other => other.to_text(),
    }
}

pub fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        // leave a column for the ellipsis
        if width + ch_width + 1 > max_width {
            break;
        }
        out.push(ch);
        width += ch_width;
    }
    out.push('…');
    out
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

pub fn status_line(status: &FetchStatus) -> String {
    match status {
        FetchStatus::Idle => "not loaded".to_string(),
        FetchStatus::Loaded { rows: 0, fetched_at } => {
            format!("no rows returned ({})", fetched_at.format("%H:%M:%S"))
        }
        FetchStatus::Loaded { rows, fetched_at } => {
            format!("{rows} rows loaded ({})", fetched_at.format("%H:%M:%S"))
        }
        FetchStatus::Failed(err) => format!("fetch failed: {err}"),
    }
}

pub fn render_snapshot(snapshot: &DashboardSnapshot<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", snapshot.title);
    let _ = writeln!(out, "{}", status_line(snapshot.status));
    let _ = writeln!(out);

    for kpi in &snapshot.kpis {
        let _ = writeln!(out, "  {:<24} {}", kpi.name, kpi.value);
    }
    if !snapshot.kpis.is_empty() {
        let _ = writeln!(out);
    }

    let view = &snapshot.view;
    let mut headers = vec![STATUS_HEADER.to_string()];
    headers.extend(view.columns.iter().cloned());

    let body: Vec<Vec<String>> = view
        .rows
        .iter()
        .zip(&snapshot.labels)
        .map(|(row, label)| {
            let mut cells = vec![label.to_string()];
            cells.extend(
                view.columns
                    .iter()
                    .map(|column| truncate(&format_cell(row.get(column)), MAX_CELL_WIDTH)),
            );
            cells
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            body.iter()
                .filter_map(|cells| cells.get(idx))
                .map(|cell| cell.width())
                .chain(std::iter::once(header.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad(cell, *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let _ = writeln!(out, "{}", line(&headers));
    let _ = writeln!(
        out,
        "{}",
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("  ")
    );
    for cells in &body {
        let _ = writeln!(out, "{}", line(cells));
    }

    let _ = writeln!(
        out,
        "\npage {} of {} ({} matching rows)",
        view.page,
        view.total_pages.max(1),
        view.filtered_count
    );
    out
}
