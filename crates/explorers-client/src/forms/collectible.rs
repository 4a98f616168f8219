//! Collectible edit form
//!
//! Always sent as multipart, with the image part only when one was picked.

use crate::config::ClientConfig;
use crate::domain::Collectible;
use crate::error::FieldErrors;
use crate::transport::MultipartForm;

use super::{Attachment, EditForm, Payload};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectibleForm {
    pub name: String,
    pub description: String,
    pub image: Option<Attachment>,
    pub image_url: Option<String>,
}

impl EditForm for CollectibleForm {
    type Resource = Collectible;

    fn from_resource(collectible: &Collectible) -> Self {
        Self {
            name: collectible.name.clone(),
            description: collectible.description.clone().unwrap_or_default(),
            image: None,
            image_url: collectible.image_url.clone(),
        }
    }

    fn validate(&self, config: &ClientConfig) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.add("name", "Collectible name is required");
        }
        if let Some(image) = &self.image {
            if let Err(message) = image.validate(config.max_attachment_bytes) {
                errors.add("image", message);
            }
        }
        errors
    }

    fn to_payload(&self, id: Option<&str>) -> Payload {
        let mut form = MultipartForm::new();
        if let Some(id) = id {
            form = form.text("id", id);
        }
        form = form.text("name", self.name.trim());
        // An emptied description still goes out on updates so it gets cleared
        if id.is_some() || !self.description.trim().is_empty() {
            form = form.text("description", self.description.trim());
        }
        if let Some(image) = &self.image {
            form = form.file(image.to_part("image"));
        }
        Payload::Multipart(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_image_is_not_sent() {
        let form = CollectibleForm {
            name: "Kilometre Coin".into(),
            image_url: Some("https://cdn/coin.png".into()),
            ..CollectibleForm::default()
        };
        let payload = form.to_payload(Some("c1"));
        assert!(matches!(payload, Payload::Multipart(_)));
        assert!(!payload.has_file("image"));
        assert_eq!(payload.field("description"), Some(String::new()));
        assert_eq!(form.to_payload(None).field("description"), None);
    }

    #[test]
    fn oversized_image_blocks_submission() {
        let form = CollectibleForm {
            name: "Badge".into(),
            image: Some(Attachment::new("badge.png", vec![0; 64])),
            ..CollectibleForm::default()
        };
        let config = ClientConfig::default().with_max_attachment_bytes(32);
        assert!(form.validate(&config).get("image").is_some());
    }
}
