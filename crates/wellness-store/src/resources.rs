use std::collections::HashSet;

use uuid::Uuid;

use wellness_types::api::ResourceFilter;
use wellness_types::events::SliceName;
use wellness_types::models::{Difficulty, Resource, ResourceCategory};

use crate::scope::ViewScope;
use crate::slice::{Settled, Slice};
use crate::store::Store;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourcesState {
    pub resources: Vec<Resource>,
    /// `resources` narrowed by `filters`, in catalog order.
    pub filtered: Vec<Resource>,
    pub current_resource: Option<Resource>,
    pub filters: ResourceFilter,
    pub favorites: HashSet<Uuid>,
}

impl ResourcesState {
    /// Linear rescan of the whole catalog.
    fn refilter(&mut self) {
        if self.filters.is_empty() {
            self.filtered = self.resources.clone();
            return;
        }
        self.filtered = self
            .resources
            .iter()
            .filter(|r| self.filters.matches(r))
            .cloned()
            .collect();
    }

    pub fn favorite_resources(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter().filter(|r| self.favorites.contains(&r.id))
    }
}

impl Store {
    pub async fn fetch_resources(&self, scope: &ViewScope) -> Settled {
        let api = self.inner.api.clone();
        self.dispatch(
            &self.inner.resources,
            SliceName::Resources,
            "fetch_all",
            scope,
            async move { api.resources().await },
            |state: &mut ResourcesState, resources: Vec<Resource>| {
                state.resources = resources;
                state.refilter();
            },
        )
        .await
    }

    /// A rejected lookup leaves `current_resource` as it was.
    pub async fn fetch_resource(&self, scope: &ViewScope, id: Uuid) -> Settled {
        let api = self.inner.api.clone();
        self.dispatch(
            &self.inner.resources,
            SliceName::Resources,
            "fetch_by_id",
            scope,
            async move { api.resource(id).await },
            |state: &mut ResourcesState, resource: Resource| {
                state.current_resource = Some(resource)
            },
        )
        .await
    }

    pub async fn set_resource_category(&self, category: Option<ResourceCategory>) {
        self.update_filters("set_category", |filters| filters.category = category)
            .await;
    }

    pub async fn set_resource_difficulty(&self, difficulty: Option<Difficulty>) {
        self.update_filters("set_difficulty", |filters| filters.difficulty = difficulty)
            .await;
    }

    pub async fn set_resource_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.update_filters("set_query", |filters| filters.query = query)
            .await;
    }

    pub async fn clear_resource_filters(&self) {
        self.update_filters("clear_filters", |filters| {
            *filters = ResourceFilter::default()
        })
        .await;
    }

    /// Returns whether the resource is a favorite afterwards.
    pub async fn toggle_favorite(&self, id: Uuid) -> bool {
        self.update(&self.inner.resources, SliceName::Resources, "toggle_favorite", |slice| {
            let favorites = &mut slice.data.favorites;
            if favorites.remove(&id) {
                false
            } else {
                favorites.insert(id);
                true
            }
        })
        .await
    }

    pub async fn clear_resources_error(&self) {
        self.update(&self.inner.resources, SliceName::Resources, "clear_error", |slice| {
            slice.clear_error()
        })
        .await;
    }

    async fn update_filters(&self, intent: &'static str, change: impl FnOnce(&mut ResourceFilter)) {
        self.update(
            &self.inner.resources,
            SliceName::Resources,
            intent,
            |slice: &mut Slice<ResourcesState>| {
                change(&mut slice.data.filters);
                slice.data.refilter();
            },
        )
        .await;
    }
}
