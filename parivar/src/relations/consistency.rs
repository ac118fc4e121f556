//! Consistency management for the two-row relationship representation
//!
//! A family fact is stored as two directed rows so that both endpoints see
//! it from their own perspective. Those rows can drift apart, so every write
//! goes through this manager: it derives the mirror label, reconciles
//! concurrent writers by updating the mirror in place, and compensates by
//! deleting the forward row when the mirror cannot be written at all. No
//! caller writes a single direction directly.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::models::Person;
use crate::relations::taxonomy::RelationType;
use crate::relations::types::{ActorContext, MAX_DESCRIPTION_LEN, NewRelationship, RelationshipEdge};
use crate::storage::errors::StorageError;
use crate::storage::traits::GraphStore;
use crate::{ParivarError, Result};

/// The single write path over relationship edges
#[derive(Debug)]
pub struct ConsistencyManager {
    store: Arc<dyn GraphStore>,
}

impl ConsistencyManager {
    /// Create a new consistency manager over the given store
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    /// Create a relationship pair
    ///
    /// Writes the forward edge and its mirror. On success both rows exist;
    /// on failure neither does. A mirror row created concurrently by the
    /// counter-party is updated in place rather than treated as an error.
    pub async fn create_relationship(
        &self,
        request: NewRelationship,
        actor: &ActorContext,
    ) -> Result<RelationshipEdge> {
        if request.subject_id == request.object_id {
            return Err(ParivarError::SelfRelationship);
        }
        validate_description(request.description.as_deref())?;

        if let Some(existing) = self
            .edge_between_either_direction(&request.subject_id, &request.object_id)
            .await?
        {
            return Err(ParivarError::DuplicateRelationship {
                existing: Box::new(existing),
            });
        }

        let subject = self.resolve_person(&request.subject_id).await?;
        let object = self.resolve_person(&request.object_id).await?;
        let inverse_type = request.relation_type.inverse_of(subject.gender);
        let is_approved = actor.is_admin;

        let forward = RelationshipEdge::new(
            &request.subject_id,
            &request.object_id,
            request.relation_type,
            request.description.clone(),
            is_approved,
            &actor.person_id,
        );
        let mut forward = match self.store.insert_edge(forward).await {
            Ok(edge) => edge,
            Err(StorageError::AlreadyExists(_)) => {
                // Lost the race against another writer between the duplicate
                // check and the insert. Surface the canonical edge.
                let existing = self
                    .edge_between_either_direction(&request.subject_id, &request.object_id)
                    .await?
                    .ok_or_else(|| {
                        ParivarError::Internal(
                            "Edge insert conflicted but no canonical edge found".to_string(),
                        )
                    })?;
                return Err(ParivarError::DuplicateRelationship {
                    existing: Box::new(existing),
                });
            }
            Err(e) => return Err(e.into()),
        };
        debug!(
            edge_id = %forward.id,
            subject = %forward.subject_id,
            object = %forward.object_id,
            relation = %forward.relation_type,
            "Wrote forward relationship edge"
        );

        self.write_mirror(&forward, inverse_type, actor).await?;

        info!(
            "🧬 Recorded relationship: {} is {} of {}",
            object.display_name(),
            forward.relation_type,
            subject.display_name()
        );
        forward.subject = Some(subject.summary());
        forward.object = Some(object.summary());
        Ok(forward)
    }

    /// Update the type and/or description of an existing relationship
    ///
    /// Re-derives the mirror label from the new type and rewrites the
    /// reverse row. A missing reverse row is a data-integrity defect; it is
    /// repaired here rather than surfaced.
    pub async fn update_relationship(
        &self,
        subject_id: &str,
        object_id: &str,
        new_type: RelationType,
        new_description: Option<String>,
        actor: &ActorContext,
    ) -> Result<RelationshipEdge> {
        validate_description(new_description.as_deref())?;

        let Some(mut forward) = self.store.find_edge(subject_id, object_id).await? else {
            return Err(ParivarError::RelationshipNotFound {
                subject_id: subject_id.to_string(),
                object_id: object_id.to_string(),
            });
        };

        let subject = self.resolve_person(subject_id).await?;
        let object = self.resolve_person(object_id).await?;
        let inverse_type = new_type.inverse_of(subject.gender);

        forward.relation_type = new_type;
        forward.description = new_description.clone();
        forward.updated_by = actor.person_id.clone();
        forward.updated_at = chrono::Utc::now();
        let mut forward = self.store.update_edge(forward).await?;

        match self.store.find_edge(object_id, subject_id).await? {
            Some(mut reverse) => {
                reverse.relation_type = inverse_type;
                reverse.description = new_description;
                reverse.updated_by = actor.person_id.clone();
                reverse.updated_at = chrono::Utc::now();
                self.store.update_edge(reverse).await?;
            }
            None => {
                warn!(
                    subject = subject_id,
                    object = object_id,
                    "Mirror edge missing during update; repairing"
                );
                let reverse = RelationshipEdge::new(
                    object_id,
                    subject_id,
                    inverse_type,
                    new_description,
                    forward.is_approved,
                    &actor.person_id,
                );
                self.store.insert_edge(reverse).await?;
            }
        }

        forward.subject = Some(subject.summary());
        forward.object = Some(object.summary());
        Ok(forward)
    }

    /// Delete a relationship pair, both directions together
    pub async fn delete_relationship(&self, subject_id: &str, object_id: &str) -> Result<()> {
        let Some(forward) = self.store.find_edge(subject_id, object_id).await? else {
            return Err(ParivarError::RelationshipNotFound {
                subject_id: subject_id.to_string(),
                object_id: object_id.to_string(),
            });
        };
        self.store.delete_edge(&forward.id).await?;

        match self.store.find_edge(object_id, subject_id).await? {
            Some(reverse) => {
                self.store.delete_edge(&reverse.id).await?;
            }
            None => {
                // Orphaned single direction: not a supported state, but the
                // delete still leaves the graph consistent.
                warn!(
                    subject = subject_id,
                    object = object_id,
                    "Mirror edge already missing during delete"
                );
            }
        }

        info!(
            "🗑️ Removed relationship pair between {} and {}",
            subject_id, object_id
        );
        Ok(())
    }

    /// Approve a relationship pair, both directions together
    ///
    /// The approval workflow itself (who may approve) is owned by the
    /// portal; the engine only guarantees the flag never differs between
    /// the two rows.
    pub async fn approve_relationship(&self, subject_id: &str, object_id: &str) -> Result<()> {
        let Some(mut forward) = self.store.find_edge(subject_id, object_id).await? else {
            return Err(ParivarError::RelationshipNotFound {
                subject_id: subject_id.to_string(),
                object_id: object_id.to_string(),
            });
        };
        forward.is_approved = true;
        forward.updated_at = chrono::Utc::now();
        self.store.update_edge(forward).await?;

        if let Some(mut reverse) = self.store.find_edge(object_id, subject_id).await? {
            reverse.is_approved = true;
            reverse.updated_at = chrono::Utc::now();
            self.store.update_edge(reverse).await?;
        }
        Ok(())
    }

    /// Write or reconcile the mirror row for a freshly inserted forward edge
    async fn write_mirror(
        &self,
        forward: &RelationshipEdge,
        inverse_type: RelationType,
        actor: &ActorContext,
    ) -> Result<()> {
        let reverse = RelationshipEdge::new(
            &forward.object_id,
            &forward.subject_id,
            inverse_type,
            forward.description.clone(),
            forward.is_approved,
            &actor.person_id,
        );

        match self.store.insert_edge(reverse).await {
            Ok(_) => Ok(()),
            Err(StorageError::AlreadyExists(_)) => {
                // Another writer described the same pair from the other
                // side; reconcile their row to the inverse just derived.
                match self
                    .store
                    .find_edge(&forward.object_id, &forward.subject_id)
                    .await
                {
                    Ok(Some(mut existing)) => {
                        existing.relation_type = inverse_type;
                        existing.description = forward.description.clone();
                        existing.is_approved = forward.is_approved;
                        existing.updated_by = actor.person_id.clone();
                        existing.updated_at = chrono::Utc::now();
                        match self.store.update_edge(existing).await {
                            Ok(_) => Ok(()),
                            Err(e) => Err(self.compensate(forward, e).await),
                        }
                    }
                    Ok(None) => {
                        // Insert said the row exists, re-read says it does
                        // not: the concurrent writer deleted it. Roll back.
                        let cause =
                            StorageError::Internal("Mirror edge vanished during reconcile".into());
                        Err(self.compensate(forward, cause).await)
                    }
                    Err(e) => Err(self.compensate(forward, e).await),
                }
            }
            Err(e) => Err(self.compensate(forward, e).await),
        }
    }

    /// Delete the forward edge after a failed mirror write
    ///
    /// Keeps the "both sides exist or neither does" invariant. The delete
    /// completes before the error is surfaced; if it fails too, the orphan
    /// is logged for operator correlation.
    async fn compensate(&self, forward: &RelationshipEdge, cause: StorageError) -> ParivarError {
        match self.store.delete_edge(&forward.id).await {
            Ok(_) => debug!(
                edge_id = %forward.id,
                "Compensated forward edge after mirror failure"
            ),
            Err(e) => tracing::error!(
                edge_id = %forward.id,
                subject = %forward.subject_id,
                object = %forward.object_id,
                error = %e,
                "Compensating delete failed; orphaned forward edge left behind"
            ),
        }
        ParivarError::MirrorWriteFailure(cause.to_string())
    }

    async fn edge_between_either_direction(
        &self,
        a: &str,
        b: &str,
    ) -> Result<Option<RelationshipEdge>> {
        if let Some(edge) = self.store.find_edge(a, b).await? {
            return Ok(Some(edge));
        }
        Ok(self.store.find_edge(b, a).await?)
    }

    async fn resolve_person(&self, id: &str) -> Result<Person> {
        self.store
            .get_person(id)
            .await?
            .ok_or_else(|| ParivarError::PersonNotFound { id: id.to_string() })
    }

    /// Get access to the underlying storage service
    pub fn store(&self) -> &Arc<dyn GraphStore> {
        &self.store
    }
}

fn validate_description(description: Option<&str>) -> Result<()> {
    if let Some(description) = description
        && description.chars().count() > MAX_DESCRIPTION_LEN
    {
        return Err(ParivarError::Validation(format!(
            "Description exceeds {} characters",
            MAX_DESCRIPTION_LEN
        )));
    }
    Ok(())
}
