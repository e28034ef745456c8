use anyhow::{Context, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::domain::entities::row::Row;

// Header line of bare column names, then one line per row with every value
// quoted. Null cells are written as `""`.
pub fn rows_to_csv(rows: &[&Row], columns: &[String]) -> Result<String> {
    let mut header = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    header
        .write_record(columns)
        .context("failed to write csv header")?;
    let mut output = header
        .into_inner()
        .map_err(|err| anyhow::anyhow!("failed to flush csv header: {}", err.error()))?;

    let mut body = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for (row_idx, row) in rows.iter().enumerate() {
        let record: Vec<String> = columns
            .iter()
            .map(|column| row.get(column).to_text())
            .collect();
        body.write_record(&record)
            .with_context(|| format!("failed to write csv row {row_idx}"))?;
    }
    let body = body
        .into_inner()
        .map_err(|err| anyhow::anyhow!("failed to flush csv rows: {}", err.error()))?;

    output.extend_from_slice(&body);
    String::from_utf8(output).context("csv output is not valid utf-8")
}
