// Metadata hydrator - Attaches execution results to dashboard widgets
use crate::application::execution_repository::ExecutionRepository;
use crate::domain::dashboard::Dashboard;
use crate::domain::metadata::{Metadata, Record, ResultTable};
use crate::domain::widget::DashboardWidget;
use futures::future::try_join_all;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
enum ResultParseError {
    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("stray quote on line {line}")]
    StrayQuote { line: usize },

    #[error("quoted field opened on line {line} is never closed")]
    UnterminatedQuote { line: usize },
}

#[derive(Clone)]
pub struct MetadataHydrator {
    executions: Arc<dyn ExecutionRepository>,
}

impl MetadataHydrator {
    pub fn new(executions: Arc<dyn ExecutionRepository>) -> Self {
        Self { executions }
    }

    /// Hydrates all widgets concurrently. Fails as a whole if any widget fails.
    pub async fn hydrate(&self, dashboard: &mut Dashboard) -> anyhow::Result<()> {
        tracing::debug!(
            "Hydrating dashboard {} ({} widgets)",
            dashboard.name,
            dashboard.widgets.len()
        );

        try_join_all(
            dashboard
                .widgets
                .iter_mut()
                .map(|widget| self.hydrate_widget(widget)),
        )
        .await?;

        Ok(())
    }

    pub async fn hydrate_widget(&self, widget: &mut DashboardWidget) -> anyhow::Result<()> {
        let Some(source) = widget.source().resolve() else {
            return Ok(());
        };
        let action = source.action.to_string();

        let status = if source.is_latest() {
            self.executions.latest_execution(source.workflow).await?
        } else {
            self.executions.workflow_status(source.execution).await?
        };

        let Some(action_status) = status.action_status(&action) else {
            tracing::debug!(
                "No status for action {} in execution {}",
                action,
                status.execution_id
            );
            return Ok(());
        };

        match &action_status.result {
            Some(result) => widget.set_metadata(parse_result(result)),
            None => tracing::debug!(
                "Action {} in execution {} has no result yet",
                action,
                status.execution_id
            ),
        }

        Ok(())
    }
}

/// Parses an action result as CSV with a header row, falling back to the raw
/// text when it does not parse.
pub fn parse_result(text: &str) -> Metadata {
    match parse_csv(text) {
        Ok(table) => Metadata::Table(table),
        Err(e) => {
            tracing::warn!("Action result is not valid CSV, keeping raw text: {}", e);
            Metadata::Raw(text.to_string())
        }
    }
}

/// Rows may be shorter or longer than the header. Values past the last header
/// are keyed `field<N>` by column position.
fn parse_csv(text: &str) -> Result<ResultTable, ResultParseError> {
    check_quoting(text)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut data = Vec::new();
    for record in reader.records() {
        let record = record?;
        let keyed: Record = record
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let key = headers
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("field{}", i + 1));
                (key, value.to_string())
            })
            .collect();
        data.push(keyed);
    }

    Ok(ResultTable::new(headers, data))
}

/// Rejects quotes the CSV reader would otherwise take literally: a quote
/// inside an unquoted field, text after a closing quote, or a quoted field
/// that runs to the end of input.
fn check_quoting(text: &str) -> Result<(), ResultParseError> {
    let mut line = 1;
    let mut field_start = true;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if field_start => {
                let opened_on = line;
                loop {
                    match chars.next() {
                        Some('"') if chars.peek() == Some(&'"') => {
                            chars.next();
                        }
                        Some('"') => break,
                        Some('\n') => line += 1,
                        Some(_) => {}
                        None => return Err(ResultParseError::UnterminatedQuote { line: opened_on }),
                    }
                }
                if !matches!(chars.peek(), None | Some(',' | '\r' | '\n')) {
                    return Err(ResultParseError::StrayQuote { line });
                }
                field_start = false;
            }
            '"' => return Err(ResultParseError::StrayQuote { line }),
            ',' => field_start = true,
            '\n' => {
                line += 1;
                field_start = true;
            }
            _ => field_start = false,
        }
    }

    Ok(())
}
