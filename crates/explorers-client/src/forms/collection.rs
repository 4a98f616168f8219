//! Collection edit form

use crate::config::ClientConfig;
use crate::domain::{Collection, CollectionType};
use crate::error::FieldErrors;

use super::{is_http_url, EditForm, JsonPayload, Payload};

const URL_FIELDS: [&str; 3] = ["badgeImageUrl", "boxImageUrl", "backgroundImageUrl"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionForm {
    pub name: String,
    pub description: String,
    pub collection_type: CollectionType,
    pub badge_image_url: String,
    pub box_image_url: String,
    pub background_image_url: String,
}

impl CollectionForm {
    fn urls(&self) -> [(&'static str, &str); 3] {
        [
            (URL_FIELDS[0], self.badge_image_url.as_str()),
            (URL_FIELDS[1], self.box_image_url.as_str()),
            (URL_FIELDS[2], self.background_image_url.as_str()),
        ]
    }
}

impl EditForm for CollectionForm {
    type Resource = Collection;

    fn from_resource(collection: &Collection) -> Self {
        Self {
            name: collection.name.clone(),
            description: collection.description.clone().unwrap_or_default(),
            collection_type: collection.collection_type,
            badge_image_url: collection.badge_image_url.clone().unwrap_or_default(),
            box_image_url: collection.box_image_url.clone().unwrap_or_default(),
            background_image_url: collection.background_image_url.clone().unwrap_or_default(),
        }
    }

    fn validate(&self, _config: &ClientConfig) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.add("name", "Collection name is required");
        }
        for (field, value) in self.urls() {
            if !value.trim().is_empty() && !is_http_url(value) {
                errors.add(field, "Must be an http(s) URL");
            }
        }
        errors
    }

    fn to_payload(&self, id: Option<&str>) -> Payload {
        let mut payload = JsonPayload::new(id)
            .text("name", &self.name)
            .text("description", &self.description)
            .value("collectionType", self.collection_type.as_str());
        for (field, value) in self.urls() {
            payload = payload.text(field, value);
        }
        payload.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_urls_are_omitted() {
        let form = CollectionForm {
            name: "Nordic Stamps".into(),
            badge_image_url: "https://cdn/badge.png".into(),
            ..CollectionForm::default()
        };
        let payload = form.to_payload(None);
        assert_eq!(payload.field("badgeImageUrl"), Some("https://cdn/badge.png".into()));
        assert_eq!(payload.field("boxImageUrl"), None);
        assert_eq!(payload.field("collectionType"), Some("Stamps".into()));
    }

    #[test]
    fn non_http_urls_are_rejected() {
        let form = CollectionForm {
            name: "Coins".into(),
            box_image_url: "file:///tmp/box.png".into(),
            ..CollectionForm::default()
        };
        let errors = form.validate(&ClientConfig::default());
        assert!(errors.get("boxImageUrl").is_some());
        assert!(errors.get("name").is_none());
    }
}
