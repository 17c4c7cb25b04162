//! Rendering of extraction output as JSON, CSV or text.

use docfields_core::models::{DocumentOutput, ExtractionResult, StatementResult};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Render `output`; `source_text` is embedded in JSON output when given.
pub fn render(
    output: &DocumentOutput,
    format: OutputFormat,
    source_text: Option<&str>,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => format_json(output, source_text),
        OutputFormat::Csv => match output {
            DocumentOutput::Fields(result) => format_fields_csv(result),
            DocumentOutput::Statement(result) => format_statement_csv(result),
        },
        OutputFormat::Text => Ok(match output {
            DocumentOutput::Fields(result) => format_fields_text(result),
            DocumentOutput::Statement(result) => format_statement_text(result),
        }),
    }
}

fn format_json(output: &DocumentOutput, source_text: Option<&str>) -> anyhow::Result<String> {
    let mut value = serde_json::to_value(output)?;

    if let (Some(text), Some(obj)) = (source_text, value.as_object_mut()) {
        obj.insert("source_text".to_string(), serde_json::Value::String(text.to_string()));
    }

    Ok(serde_json::to_string_pretty(&value)?)
}

fn format_fields_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(std::iter::once("profile").chain(result.fields.keys().map(String::as_str)))?;
    wtr.write_record(
        std::iter::once(result.profile.as_str()).chain(result.fields.values().map(String::as_str)),
    )?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_statement_csv(result: &StatementResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "date",
        "posted_on",
        "description",
        "reference_number",
        "debit",
        "credit",
        "balance",
        "line_number",
    ])?;

    for tx in &result.transactions {
        wtr.write_record([
            tx.date.clone(),
            tx.posted_on.map(|d| d.to_string()).unwrap_or_default(),
            tx.description.clone(),
            tx.reference_number.clone().unwrap_or_default(),
            tx.debit.map(|d| d.to_string()).unwrap_or_default(),
            tx.credit.map(|c| c.to_string()).unwrap_or_default(),
            tx.balance.map(|b| b.to_string()).unwrap_or_default(),
            tx.line_number.to_string(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_fields_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Profile: {}\n", result.profile));
    output.push_str(&format!(
        "Filled: {}/{} ({:.0}%)\n",
        result.metadata.filled_field_count,
        result.metadata.total_field_count,
        result.completeness() * 100.0
    ));
    output.push('\n');

    let width = result.fields.keys().map(String::len).max().unwrap_or(0);
    for (name, value) in &result.fields {
        let shown = if value.is_empty() { "-" } else { value.as_str() };
        output.push_str(&format!("  {:<width$}  {}\n", name, shown, width = width));
    }

    if !result.warnings.is_empty() {
        output.push_str("\nWarnings:\n");
        for warning in &result.warnings {
            output.push_str(&format!("  - {}\n", warning));
        }
    }

    output
}

fn format_statement_text(result: &StatementResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Profile: {}\n", result.profile));
    output.push_str(&format!(
        "Transactions: {} (from {} lines, {} classification)\n",
        result.metadata.transaction_count,
        result.metadata.lines_scanned,
        result.metadata.classification_policy
    ));
    output.push('\n');

    for tx in &result.transactions {
        let amount = match (tx.debit, tx.credit) {
            (Some(d), Some(c)) => format!("-{} +{}", d, c),
            (Some(d), None) => format!("-{}", d),
            (None, Some(c)) => format!("+{}", c),
            (None, None) => String::new(),
        };
        let balance = tx.balance.map(|b| b.to_string()).unwrap_or_default();
        output.push_str(&format!(
            "  {:<12} {:<40} {:>14} {:>14}\n",
            tx.date, tx.description, amount, balance
        ));
    }

    output.push('\n');
    output.push_str(&format!("Total debit:  {}\n", result.metadata.total_debit));
    output.push_str(&format!("Total credit: {}\n", result.metadata.total_credit));

    output
}
