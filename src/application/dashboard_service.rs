// Dashboard service - Use cases for stored and hydrated dashboards
use crate::application::dashboard_store::DashboardStore;
use crate::application::metadata_hydrator::MetadataHydrator;
use crate::domain::dashboard::Dashboard;
use crate::domain::widget::DashboardWidget;

#[derive(Clone)]
pub struct DashboardService {
    store: DashboardStore,
    hydrator: MetadataHydrator,
}

impl DashboardService {
    pub fn new(store: DashboardStore, hydrator: MetadataHydrator) -> Self {
        Self { store, hydrator }
    }

    pub fn list_dashboards(&self) -> anyhow::Result<Vec<Dashboard>> {
        Ok(self.store.list()?)
    }

    pub fn get_dashboard(&self, name: &str) -> anyhow::Result<Option<Dashboard>> {
        Ok(self.store.get_by_name(name)?)
    }

    pub fn create_dashboard(
        &self,
        name: String,
        widgets: Vec<DashboardWidget>,
    ) -> anyhow::Result<Dashboard> {
        let dashboard = Dashboard::with_widgets(name, widgets);
        self.store.save(&dashboard)?;
        tracing::info!("Created dashboard {} ({})", dashboard.name, dashboard.id);
        Ok(dashboard)
    }

    pub fn save_dashboard(&self, dashboard: &Dashboard) -> anyhow::Result<()> {
        Ok(self.store.save(dashboard)?)
    }

    pub fn delete_dashboard(&self, id: &str) -> anyhow::Result<usize> {
        Ok(self.store.delete_by_id(id)?)
    }

    /// Looks up a dashboard by name and fills in widget metadata from the
    /// execution service. `None` when no dashboard has that name.
    pub async fn get_dashboard_with_metadata(
        &self,
        name: &str,
    ) -> anyhow::Result<Option<Dashboard>> {
        let Some(mut dashboard) = self.store.get_by_name(name)? else {
            return Ok(None);
        };

        self.hydrator.hydrate(&mut dashboard).await?;
        Ok(Some(dashboard))
    }
}
