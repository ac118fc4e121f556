//! Family graph service interface
//!
//! `FamilyGraphService` is the unified API the portal talks to. Writes are
//! routed through the consistency manager exclusively; reads fetch an
//! immutable snapshot and run the pure hierarchy passes over it.

use std::sync::Arc;
use tracing::{debug, info};

use crate::config::ParivarConfig;
use crate::hierarchy::{
    ComponentDiscovery, FamilyHierarchy, FamilyLayout, HierarchyBuilder, LayoutProjector,
    assign_generations,
};
use crate::relations::consistency::ConsistencyManager;
use crate::relations::types::{ActorContext, NewRelationship, RelationshipEdge};
use crate::relations::taxonomy::RelationType;
use crate::storage::traits::GraphStore;
use crate::Result;

/// The primary interface for interacting with the relationship graph
#[derive(Debug)]
pub struct FamilyGraphService {
    /// The single write path over relationship edges
    consistency: ConsistencyManager,

    /// Component discovery for the read path
    discovery: ComponentDiscovery,

    /// Shared storage handle
    storage: Arc<dyn GraphStore>,

    /// Configuration for the service
    config: ParivarConfig,
}

impl FamilyGraphService {
    /// Create a new service over the given store and configuration
    pub fn new(storage: Arc<dyn GraphStore>, config: ParivarConfig) -> Self {
        let consistency = ConsistencyManager::new(Arc::clone(&storage));
        let discovery = ComponentDiscovery::new(Arc::clone(&storage));

        info!("👪 FamilyGraphService initialized");
        Self {
            consistency,
            discovery,
            storage,
            config,
        }
    }

    // =========================================================================
    // Write path (delegated to ConsistencyManager)
    // =========================================================================

    /// Create a relationship pair between two people
    pub async fn create_relationship(
        &self,
        request: NewRelationship,
        actor: &ActorContext,
    ) -> Result<RelationshipEdge> {
        self.consistency.create_relationship(request, actor).await
    }

    /// Update the type and/or description of an existing relationship
    pub async fn update_relationship(
        &self,
        subject_id: &str,
        object_id: &str,
        new_type: RelationType,
        new_description: Option<String>,
        actor: &ActorContext,
    ) -> Result<RelationshipEdge> {
        self.consistency
            .update_relationship(subject_id, object_id, new_type, new_description, actor)
            .await
    }

    /// Delete a relationship pair, both directions together
    pub async fn delete_relationship(&self, subject_id: &str, object_id: &str) -> Result<()> {
        self.consistency
            .delete_relationship(subject_id, object_id)
            .await
    }

    /// Approve a relationship pair, both directions together
    pub async fn approve_relationship(&self, subject_id: &str, object_id: &str) -> Result<()> {
        self.consistency
            .approve_relationship(subject_id, object_id)
            .await
    }

    // =========================================================================
    // Read path
    // =========================================================================

    /// Build the nested family hierarchy around a person
    ///
    /// The tree is rooted at the topmost known ancestor of the discovered
    /// component; a person that cannot be resolved yields a single-node
    /// hierarchy rather than an error.
    pub async fn get_family_hierarchy(&self, person_id: &str) -> Result<FamilyHierarchy> {
        let snapshot = self.discovery.discover(person_id).await?;
        let generations = assign_generations(&snapshot, person_id);
        let hierarchy = HierarchyBuilder::new(&snapshot, &generations).build();
        debug!(
            person = person_id,
            members = hierarchy.metadata.total_members,
            span = hierarchy.metadata.generation_span,
            "Built family hierarchy"
        );
        Ok(hierarchy)
    }

    /// Fetch relationship edges around a person
    ///
    /// With `include_family` false, returns only the edges recorded with
    /// the person as subject; with true, every edge of the person's
    /// discovered component.
    pub async fn get_relationship_graph(
        &self,
        person_id: &str,
        include_family: bool,
    ) -> Result<Vec<RelationshipEdge>> {
        if !include_family {
            let edges = self
                .storage
                .list_edges(
                    Some(crate::storage::filters::helpers::edges_from(person_id)),
                    None,
                    None,
                )
                .await?;
            return Ok(edges);
        }

        let snapshot = self.discovery.discover(person_id).await?;
        Ok(snapshot.unique_edges().into_iter().cloned().collect())
    }

    /// Project the family around a person onto 2-D layout coordinates
    pub async fn get_family_layout(&self, person_id: &str) -> Result<FamilyLayout> {
        let snapshot = self.discovery.discover(person_id).await?;
        let layout = LayoutProjector::new(&snapshot)
            .with_pitches(
                self.config.hierarchy.horizontal_pitch,
                self.config.hierarchy.vertical_pitch,
            )
            .project(person_id);
        Ok(layout)
    }

    /// Number of edges recorded with the person as subject
    pub async fn relationship_count(&self, person_id: &str) -> Result<usize> {
        let count = self
            .storage
            .count_edges(Some(crate::storage::filters::helpers::edges_from(
                person_id,
            )))
            .await?;
        Ok(count)
    }

    /// Get access to the underlying storage service
    pub fn storage(&self) -> &Arc<dyn GraphStore> {
        &self.storage
    }

    /// Get the active configuration
    pub fn config(&self) -> &ParivarConfig {
        &self.config
    }
}
