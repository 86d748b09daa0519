// Dashboard domain model
use super::widget::DashboardWidget;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub id: String,
    pub name: String,
    /// Render order.
    #[serde(default)]
    pub widgets: Vec<DashboardWidget>,
}

impl Dashboard {
    /// Creates an empty dashboard with a freshly minted id.
    pub fn new(name: String) -> Self {
        Self::with_widgets(name, Vec::new())
    }

    pub fn with_widgets(name: String, widgets: Vec<DashboardWidget>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            widgets,
        }
    }

    /// Copy suitable for persisting: widget metadata removed.
    pub fn without_metadata(&self) -> Self {
        let mut stripped = self.clone();
        stripped
            .widgets
            .iter_mut()
            .for_each(DashboardWidget::clear_metadata);
        stripped
    }
}
