//! Domain Layer - Core Resource Trait
//!
//! Every entity the console manages is a `Resource`: it has a string id and a
//! `ResourceKind` naming its API path. Kinds the console may write to also
//! implement `Mutable`.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::query::encode_path_segment;

/// Static description of one resource type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceKind {
    /// Singular, human readable ("quest")
    pub name: &'static str,
    /// Plural, human readable ("quests")
    pub plural: &'static str,
    /// Collection path below the API prefix, without slashes ("quests")
    pub path: &'static str,
}

impl ResourceKind {
    pub fn collection_path(&self) -> String {
        format!("/{}", self.path)
    }

    pub fn item_path(&self, id: &str) -> String {
        format!("/{}/{}", self.path, encode_path_segment(id))
    }

    /// Default banner text for a failed list fetch
    pub fn load_error(&self) -> String {
        format!("Failed to load {}.", self.plural)
    }

    /// Banner text for a failed delete
    pub fn delete_error(&self, id: &str) -> String {
        format!(
            "Failed to delete {} {}. It may still be referenced by another record.",
            self.name, id
        )
    }
}

/// Core trait for all API resources
pub trait Resource: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: ResourceKind;

    /// Server-assigned identifier
    fn id(&self) -> &str;
}

/// Resources the console may create, update and delete
pub trait Mutable: Resource {}

#[cfg(test)]
mod tests {
    use super::*;

    const KIND: ResourceKind = ResourceKind {
        name: "collection",
        plural: "collections",
        path: "collectibles/collections",
    };

    #[test]
    fn paths_are_built_below_the_collection() {
        assert_eq!(KIND.collection_path(), "/collectibles/collections");
        assert_eq!(KIND.item_path("c 1"), "/collectibles/collections/c%201");
    }

    #[test]
    fn delete_error_names_the_id() {
        let msg = KIND.delete_error("c9");
        assert!(msg.contains("collection c9"));
        assert!(msg.contains("referenced"));
    }
}
