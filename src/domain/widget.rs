// Widget domain model - Tagged union of dashboard widget kinds
use super::metadata::Metadata;
use serde::{Deserialize, Serialize};

/// Execution identifier that selects the most recent run of a workflow.
pub const LATEST_EXECUTION: &str = "latest";

/// Optional references into a workflow execution that feed a widget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// A fully specified source: workflow, execution and action all present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRef<'a> {
    pub workflow: &'a str,
    pub execution: &'a str,
    pub action: &'a str,
}

impl SourceRef<'_> {
    pub fn is_latest(&self) -> bool {
        self.execution == LATEST_EXECUTION
    }
}

impl DataSource {
    pub fn new(workflow: &str, execution: &str, action: &str) -> Self {
        Self {
            workflow: Some(workflow.to_string()),
            execution: Some(execution.to_string()),
            action: Some(action.to_string()),
        }
    }

    /// Returns the source only when all three references are set and non-empty.
    pub fn resolve(&self) -> Option<SourceRef<'_>> {
        fn non_empty(v: &Option<String>) -> Option<&str> {
            v.as_deref().filter(|s| !s.is_empty())
        }

        Some(SourceRef {
            workflow: non_empty(&self.workflow)?,
            execution: non_empty(&self.execution)?,
            action: non_empty(&self.action)?,
        })
    }
}

/// Grid placement shared by every widget kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetLayout {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub x: u32,
    #[serde(default)]
    pub y: u32,
    #[serde(default)]
    pub cols: u32,
    #[serde(default)]
    pub rows: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    #[serde(flatten)]
    pub source: DataSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_label: Option<String>,
    #[serde(default)]
    pub show_legend: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextOptions {
    #[serde(flatten)]
    pub source: DataSource,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableOptions {
    #[serde(flatten)]
    pub source: DataSource,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KibanaOptions {
    #[serde(flatten)]
    pub source: DataSource,
    #[serde(default)]
    pub dashboard_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Options types that can point a widget at an execution result.
pub trait Sourced {
    fn source(&self) -> &DataSource;
}

macro_rules! impl_sourced {
    ($($ty:ty),*) => {
        $(impl Sourced for $ty {
            fn source(&self) -> &DataSource {
                &self.source
            }
        })*
    };
}

impl_sourced!(ChartOptions, TextOptions, TableOptions, KibanaOptions);

/// One widget: layout, kind-specific options and the transient metadata slot.
///
/// `metadata` is never read back from a serialized form; the dashboard store
/// also clears it before writing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Widget<O> {
    #[serde(flatten)]
    pub layout: WidgetLayout,
    #[serde(default)]
    pub options: O,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl<O> Widget<O> {
    pub fn new(title: &str, options: O) -> Self {
        Self {
            layout: WidgetLayout {
                title: title.to_string(),
                ..WidgetLayout::default()
            },
            options,
            metadata: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Bar,
    Pie,
    Line,
    Text,
    Table,
    Kibana,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DashboardWidget {
    Bar(Widget<ChartOptions>),
    Pie(Widget<ChartOptions>),
    Line(Widget<ChartOptions>),
    Text(Widget<TextOptions>),
    Table(Widget<TableOptions>),
    Kibana(Widget<KibanaOptions>),
}

macro_rules! each_widget {
    ($self:expr, $w:ident => $body:expr) => {
        match $self {
            DashboardWidget::Bar($w)
            | DashboardWidget::Pie($w)
            | DashboardWidget::Line($w) => $body,
            DashboardWidget::Text($w) => $body,
            DashboardWidget::Table($w) => $body,
            DashboardWidget::Kibana($w) => $body,
        }
    };
}

impl DashboardWidget {
    pub fn kind(&self) -> WidgetKind {
        match self {
            DashboardWidget::Bar(_) => WidgetKind::Bar,
            DashboardWidget::Pie(_) => WidgetKind::Pie,
            DashboardWidget::Line(_) => WidgetKind::Line,
            DashboardWidget::Text(_) => WidgetKind::Text,
            DashboardWidget::Table(_) => WidgetKind::Table,
            DashboardWidget::Kibana(_) => WidgetKind::Kibana,
        }
    }

    pub fn layout(&self) -> &WidgetLayout {
        each_widget!(self, w => &w.layout)
    }

    pub fn source(&self) -> &DataSource {
        each_widget!(self, w => w.options.source())
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        each_widget!(self, w => w.metadata.as_ref())
    }

    pub fn set_metadata(&mut self, metadata: Metadata) {
        each_widget!(self, w => w.metadata = Some(metadata))
    }

    pub fn clear_metadata(&mut self) {
        each_widget!(self, w => w.metadata = None)
    }
}
