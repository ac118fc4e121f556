//! Simple in-memory storage for testing and development

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::models::Person;
use crate::relations::types::RelationshipEdge;
use crate::storage::errors::StorageError;
use crate::storage::filters::{EdgeFilter, PersonFilter};
use crate::storage::traits::{BaseStore, EdgeStore, GraphStore, PersonStore};

/// In-memory reference backend
///
/// Edges are indexed by id and by ordered `(subject_id, object_id)` pair;
/// the pair index is checked under the write lock, which makes it the
/// uniqueness constraint concurrent writers serialize on.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    persons: RwLock<HashMap<String, Person>>,
    edges: RwLock<EdgeTable>,
}

#[derive(Debug, Default)]
struct EdgeTable {
    by_id: HashMap<String, RelationshipEdge>,
    by_pair: HashMap<(String, String), String>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed or replace a person record
    ///
    /// Person records are owned by the identity collaborator in production;
    /// this is the hook that collaborator (or a test) uses to populate the
    /// reference backend.
    pub fn put_person(&self, person: Person) {
        self.persons
            .write()
            .unwrap()
            .insert(person.id.clone(), person);
    }

    fn matches(edge: &RelationshipEdge, filter: &EdgeFilter) -> bool {
        if let Some(ids) = &filter.ids
            && !ids.contains(&edge.id)
        {
            return false;
        }
        if let Some(subject_id) = &filter.subject_id
            && edge.subject_id != *subject_id
        {
            return false;
        }
        if let Some(object_id) = &filter.object_id
            && edge.object_id != *object_id
        {
            return false;
        }
        if let Some(relation_type) = &filter.relation_type
            && edge.relation_type != *relation_type
        {
            return false;
        }
        if let Some(is_approved) = filter.is_approved
            && edge.is_approved != is_approved
        {
            return false;
        }
        if let Some(after) = filter.created_after
            && edge.created_at < after
        {
            return false;
        }
        if let Some(before) = filter.created_before
            && edge.created_at > before
        {
            return false;
        }
        true
    }
}

#[async_trait]
impl BaseStore for InMemoryStore {
    async fn health_check(&self) -> Result<bool, StorageError> {
        Ok(true)
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.persons.write().unwrap().clear();
        let mut edges = self.edges.write().unwrap();
        edges.by_id.clear();
        edges.by_pair.clear();
        Ok(())
    }

    async fn get_metadata(&self) -> Result<serde_json::Value, StorageError> {
        let person_count = self.persons.read().unwrap().len();
        let edge_count = self.edges.read().unwrap().by_id.len();
        Ok(serde_json::json!({
            "type": "in_memory_store",
            "person_count": person_count,
            "edge_count": edge_count
        }))
    }

    async fn close(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

#[async_trait]
impl PersonStore for InMemoryStore {
    async fn get_person(&self, id: &str) -> Result<Option<Person>, StorageError> {
        let persons = self.persons.read().unwrap();
        Ok(persons.get(id).cloned())
    }

    async fn list_persons(
        &self,
        filter: Option<PersonFilter>,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<Person>, StorageError> {
        let persons = self.persons.read().unwrap();
        let mut results: Vec<Person> = persons
            .values()
            .filter(|person| {
                let Some(filter) = &filter else {
                    return true;
                };
                if let Some(ids) = &filter.ids
                    && !ids.contains(&person.id)
                {
                    return false;
                }
                if let Some(last_name) = &filter.last_name
                    && person.last_name != *last_name
                {
                    return false;
                }
                if let Some(community) = &filter.community
                    && person.community.as_deref() != Some(community.as_str())
                {
                    return false;
                }
                true
            })
            .cloned()
            .collect();

        // Deterministic order for pagination
        results.sort_by(|a, b| a.id.cmp(&b.id));

        let start = offset.unwrap_or(0);
        if start >= results.len() {
            return Ok(vec![]);
        }
        results = results.into_iter().skip(start).collect();
        if let Some(limit) = limit {
            results.truncate(limit);
        }

        Ok(results)
    }
}

#[async_trait]
impl EdgeStore for InMemoryStore {
    async fn insert_edge(&self, edge: RelationshipEdge) -> Result<RelationshipEdge, StorageError> {
        let mut edges = self.edges.write().unwrap();
        let pair = (edge.subject_id.clone(), edge.object_id.clone());
        if edges.by_pair.contains_key(&pair) {
            return Err(StorageError::AlreadyExists(format!(
                "Edge from {} to {} already exists",
                edge.subject_id, edge.object_id
            )));
        }
        if edges.by_id.contains_key(&edge.id) {
            return Err(StorageError::AlreadyExists(format!(
                "Edge with ID {} already exists",
                edge.id
            )));
        }
        edges.by_pair.insert(pair, edge.id.clone());
        edges.by_id.insert(edge.id.clone(), edge.clone());
        Ok(edge)
    }

    async fn get_edge(&self, id: &str) -> Result<Option<RelationshipEdge>, StorageError> {
        let edges = self.edges.read().unwrap();
        Ok(edges.by_id.get(id).cloned())
    }

    async fn update_edge(&self, edge: RelationshipEdge) -> Result<RelationshipEdge, StorageError> {
        let mut edges = self.edges.write().unwrap();
        let Some(existing) = edges.by_id.get(&edge.id) else {
            return Err(StorageError::NotFound(format!(
                "Edge with ID {} not found",
                edge.id
            )));
        };
        // The pair is immutable; updates may only touch type, description
        // and approval.
        if existing.subject_id != edge.subject_id || existing.object_id != edge.object_id {
            return Err(StorageError::Validation(
                "Edge endpoints cannot be changed by update".to_string(),
            ));
        }
        edges.by_id.insert(edge.id.clone(), edge.clone());
        Ok(edge)
    }

    async fn delete_edge(&self, id: &str) -> Result<bool, StorageError> {
        let mut edges = self.edges.write().unwrap();
        if let Some(edge) = edges.by_id.remove(id) {
            edges
                .by_pair
                .remove(&(edge.subject_id.clone(), edge.object_id.clone()));
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn list_edges(
        &self,
        filter: Option<EdgeFilter>,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<RelationshipEdge>, StorageError> {
        let edges = self.edges.read().unwrap();
        let mut results: Vec<RelationshipEdge> = edges
            .by_id
            .values()
            .filter(|edge| filter.as_ref().map_or(true, |f| Self::matches(edge, f)))
            .cloned()
            .collect();

        results.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        let start = offset.unwrap_or(0);
        if start >= results.len() {
            return Ok(vec![]);
        }
        results = results.into_iter().skip(start).collect();
        if let Some(limit) = limit {
            results.truncate(limit);
        }

        Ok(results)
    }

    async fn count_edges(&self, filter: Option<EdgeFilter>) -> Result<usize, StorageError> {
        let edges = self.edges.read().unwrap();
        Ok(edges
            .by_id
            .values()
            .filter(|edge| filter.as_ref().map_or(true, |f| Self::matches(edge, f)))
            .count())
    }

    async fn find_edge(
        &self,
        subject_id: &str,
        object_id: &str,
    ) -> Result<Option<RelationshipEdge>, StorageError> {
        let edges = self.edges.read().unwrap();
        let pair = (subject_id.to_string(), object_id.to_string());
        Ok(edges
            .by_pair
            .get(&pair)
            .and_then(|id| edges.by_id.get(id))
            .cloned())
    }

    async fn edges_for_person(
        &self,
        person_id: &str,
        approved_only: bool,
    ) -> Result<Vec<RelationshipEdge>, StorageError> {
        let edges = self.edges.read().unwrap();
        let mut results: Vec<RelationshipEdge> = edges
            .by_id
            .values()
            .filter(|edge| edge.involves(person_id) && (!approved_only || edge.is_approved))
            .cloned()
            .collect();
        results.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(results)
    }
}

#[async_trait]
impl GraphStore for InMemoryStore {
    async fn clear_storage(&self) -> Result<(), StorageError> {
        self.clear().await
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;
    use crate::relations::taxonomy::RelationType;

    fn edge(subject: &str, object: &str, relation_type: RelationType) -> RelationshipEdge {
        RelationshipEdge::new(subject, object, relation_type, None, true, subject)
    }

    #[tokio::test]
    async fn test_pair_uniqueness_enforced() {
        let store = InMemoryStore::new();
        store
            .insert_edge(edge("a", "b", RelationType::Father))
            .await
            .unwrap();

        let err = store
            .insert_edge(edge("a", "b", RelationType::Brother))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::AlreadyExists(_)));

        // The opposite direction is a different ordered pair.
        store
            .insert_edge(edge("b", "a", RelationType::Son))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_releases_pair() {
        let store = InMemoryStore::new();
        let stored = store
            .insert_edge(edge("a", "b", RelationType::Father))
            .await
            .unwrap();
        assert!(store.delete_edge(&stored.id).await.unwrap());
        store
            .insert_edge(edge("a", "b", RelationType::Father))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_edges_for_person_filters_unapproved() {
        let store = InMemoryStore::new();
        store
            .insert_edge(edge("a", "b", RelationType::Father))
            .await
            .unwrap();
        let mut pending = edge("a", "c", RelationType::Brother);
        pending.is_approved = false;
        store.insert_edge(pending).await.unwrap();

        let all = store.edges_for_person("a", false).await.unwrap();
        assert_eq!(all.len(), 2);
        let approved = store.edges_for_person("a", true).await.unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].object_id, "b");
    }

    #[tokio::test]
    async fn test_person_seeding() {
        let store = InMemoryStore::new();
        store.put_person(Person::new("p1", "Arun", "Kumar", Gender::Male));
        let person = store.get_person("p1").await.unwrap().unwrap();
        assert_eq!(person.first_name, "Arun");
        assert!(store.get_person("missing").await.unwrap().is_none());
    }
}
