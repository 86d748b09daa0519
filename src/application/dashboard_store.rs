// Dashboard store - Whole-collection persistence over a key-value store
use crate::application::key_value_store::{KeyValueStore, StoreError};
use crate::domain::dashboard::Dashboard;
use std::sync::Arc;

pub const DEFAULT_STORE_KEY: &str = "dashboards";

/// Every operation reads and, for mutations, rewrites the entire collection
/// stored under a single key. Concurrent writers are last-writer-wins.
///
/// `save` replaces only the first entry with a matching id while `delete`
/// removes all of them; a collection holding duplicate ids keeps that
/// asymmetry.
#[derive(Clone)]
pub struct DashboardStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl DashboardStore {
    pub fn new(store: Arc<dyn KeyValueStore>, key: String) -> Self {
        Self { store, key }
    }

    pub fn list(&self) -> Result<Vec<Dashboard>, StoreError> {
        match self.store.get(&self.key)? {
            Some(blob) => serde_json::from_str(&blob).map_err(StoreError::Decode),
            None => Ok(Vec::new()),
        }
    }

    pub fn get_by_name(&self, name: &str) -> Result<Option<Dashboard>, StoreError> {
        Ok(self.list()?.into_iter().find(|d| d.name == name))
    }

    pub fn save(&self, dashboard: &Dashboard) -> Result<(), StoreError> {
        let mut dashboards = self.list()?;
        let incoming = dashboard.without_metadata();

        match dashboards.iter().position(|d| d.id == dashboard.id) {
            Some(index) => dashboards[index] = incoming,
            None => dashboards.push(incoming),
        }

        tracing::debug!("Saving dashboard {} ({} stored)", dashboard.id, dashboards.len());
        self.write(&dashboards)
    }

    pub fn delete(&self, dashboard: &Dashboard) -> Result<(), StoreError> {
        self.delete_by_id(&dashboard.id).map(|_| ())
    }

    /// Removes every entry with this id. Returns how many were removed.
    pub fn delete_by_id(&self, id: &str) -> Result<usize, StoreError> {
        let mut dashboards = self.list()?;
        let before = dashboards.len();
        dashboards.retain(|d| d.id != id);
        let removed = before - dashboards.len();

        tracing::debug!("Deleting dashboard {} ({} entries removed)", id, removed);
        self.write(&dashboards)?;
        Ok(removed)
    }

    fn write(&self, dashboards: &[Dashboard]) -> Result<(), StoreError> {
        // Encode fully before touching the store so a failure leaves it as it was.
        let blob = serde_json::to_string(dashboards).map_err(StoreError::Encode)?;
        self.store.set(&self.key, &blob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metadata::Metadata;
    use crate::domain::widget::{
        ChartOptions, DashboardWidget, DataSource, KibanaOptions, TableOptions, TextOptions,
        Widget, WidgetKind,
    };
    use crate::infrastructure::memory_store::MemoryStore;

    fn store() -> (Arc<MemoryStore>, DashboardStore) {
        let backing = Arc::new(MemoryStore::new());
        let store = DashboardStore::new(backing.clone(), DEFAULT_STORE_KEY.to_string());
        (backing, store)
    }

    fn every_kind() -> Vec<DashboardWidget> {
        let chart = |label: &str| ChartOptions {
            source: DataSource::new("wf", "latest", "a1"),
            x_label: Some(label.to_string()),
            show_legend: true,
            ..ChartOptions::default()
        };

        vec![
            DashboardWidget::Bar(Widget::new("Bar", chart("bars"))),
            DashboardWidget::Pie(Widget::new("Pie", chart("slices"))),
            DashboardWidget::Line(Widget::new("Line", chart("time"))),
            DashboardWidget::Text(Widget::new(
                "Text",
                TextOptions {
                    text: "hello".to_string(),
                    ..TextOptions::default()
                },
            )),
            DashboardWidget::Table(Widget::new(
                "Table",
                TableOptions {
                    source: DataSource::new("wf", "e-42", "a2"),
                    columns: vec!["host".to_string()],
                    page_size: Some(10),
                },
            )),
            DashboardWidget::Kibana(Widget::new(
                "Kibana",
                KibanaOptions {
                    dashboard_url: "http://kibana/app/dashboards#/view/1".to_string(),
                    height: Some(400),
                    ..KibanaOptions::default()
                },
            )),
        ]
    }

    #[test]
    fn test_list_is_empty_when_key_absent() {
        let (_, store) = store();
        assert!(store.list().unwrap().is_empty());
        assert!(store.get_by_name("anything").unwrap().is_none());
    }

    #[test]
    fn test_save_then_list_contains_dashboard_once() {
        let (_, store) = store();
        let dashboard = Dashboard::with_widgets("ops".to_string(), every_kind());

        store.save(&dashboard).unwrap();

        let listed = store.list().unwrap();
        let matching: Vec<_> = listed.iter().filter(|d| d.id == dashboard.id).collect();
        assert_eq!(matching, vec![&dashboard]);
    }

    #[test]
    fn test_round_trip_preserves_widget_kinds_and_order() {
        let (_, store) = store();
        let dashboard = Dashboard::with_widgets("ops".to_string(), every_kind());
        store.save(&dashboard).unwrap();

        let loaded = store.get_by_name("ops").unwrap().unwrap();
        let kinds: Vec<_> = loaded.widgets.iter().map(DashboardWidget::kind).collect();
        assert_eq!(
            kinds,
            vec![
                WidgetKind::Bar,
                WidgetKind::Pie,
                WidgetKind::Line,
                WidgetKind::Text,
                WidgetKind::Table,
                WidgetKind::Kibana,
            ]
        );
        assert_eq!(loaded.widgets, dashboard.widgets);
    }

    #[test]
    fn test_save_replaces_in_place() {
        let (_, store) = store();
        let first = Dashboard::new("first".to_string());
        let mut second = Dashboard::new("second".to_string());
        let third = Dashboard::new("third".to_string());
        for d in [&first, &second, &third] {
            store.save(d).unwrap();
        }

        second.name = "renamed".to_string();
        second.widgets = every_kind();
        store.save(&second).unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0], first);
        assert_eq!(listed[1], second);
        assert_eq!(listed[2], third);
    }

    #[test]
    fn test_save_does_not_persist_metadata() {
        let (backing, store) = store();
        let mut dashboard = Dashboard::with_widgets("ops".to_string(), every_kind());
        dashboard.widgets[0].set_metadata(Metadata::Raw("live".to_string()));

        store.save(&dashboard).unwrap();

        let blob = backing.get(DEFAULT_STORE_KEY).unwrap().unwrap();
        assert!(!blob.contains("live"));
        assert!(store.list().unwrap()[0].widgets[0].metadata().is_none());
    }

    #[test]
    fn test_delete_removes_all_duplicates() {
        let (backing, store) = store();
        let target = Dashboard::new("dup".to_string());
        let keep = Dashboard::new("keep".to_string());
        let blob =
            serde_json::to_string(&vec![target.clone(), keep.clone(), target.clone()]).unwrap();
        backing.set(DEFAULT_STORE_KEY, &blob).unwrap();

        let () = store.delete(&target).unwrap();

        assert_eq!(store.list().unwrap(), vec![keep]);
    }

    #[test]
    fn test_save_replaces_only_first_duplicate() {
        let (backing, store) = store();
        let original = Dashboard::new("dup".to_string());
        let blob = serde_json::to_string(&vec![original.clone(), original.clone()]).unwrap();
        backing.set(DEFAULT_STORE_KEY, &blob).unwrap();

        let mut updated = original.clone();
        updated.name = "updated".to_string();
        store.save(&updated).unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed, vec![updated, original]);
    }

    #[test]
    fn test_delete_by_id_reports_count() {
        let (_, store) = store();
        let dashboard = Dashboard::new("ops".to_string());
        store.save(&dashboard).unwrap();

        assert_eq!(store.delete_by_id(&dashboard.id).unwrap(), 1);
        assert_eq!(store.delete_by_id(&dashboard.id).unwrap(), 0);
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_get_by_name_returns_first_match() {
        let (_, store) = store();
        let first = Dashboard::new("shared".to_string());
        let second = Dashboard::new("shared".to_string());
        store.save(&first).unwrap();
        store.save(&second).unwrap();

        assert_eq!(store.get_by_name("shared").unwrap().unwrap().id, first.id);
        assert!(store.get_by_name("missing").unwrap().is_none());
    }

    #[test]
    fn test_corrupt_blob_is_decode_error() {
        let (backing, store) = store();
        backing.set(DEFAULT_STORE_KEY, "{not json").unwrap();

        assert!(matches!(store.list(), Err(StoreError::Decode(_))));
        assert!(store.save(&Dashboard::new("ops".to_string())).is_err());
        assert_eq!(backing.get(DEFAULT_STORE_KEY).unwrap().as_deref(), Some("{not json"));
    }
}
