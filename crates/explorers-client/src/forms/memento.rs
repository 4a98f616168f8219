//! Memento edit form

use crate::config::ClientConfig;
use crate::domain::{Memento, MementoType};
use crate::error::FieldErrors;

use super::{datetime_input, parse_datetime, EditForm, JsonPayload, Payload};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MementoForm {
    pub memento_type: String,
    pub capture_date: String,
    /// Coordinates as typed
    pub location_x: String,
    pub location_y: String,
    pub url: String,
    pub thumbnail_url: String,
    pub is_royal_explorer: bool,
    pub is_locked: bool,
}

fn coordinate(value: &str) -> Option<Result<f64, ()>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    Some(value.parse::<f64>().ok().filter(|v| v.is_finite()).ok_or(()))
}

impl EditForm for MementoForm {
    type Resource = Memento;

    fn from_resource(memento: &Memento) -> Self {
        Self {
            memento_type: memento.memento_type.clone().unwrap_or_default(),
            capture_date: datetime_input(memento.capture_date.as_ref()),
            location_x: memento.location.map(|l| l.x.to_string()).unwrap_or_default(),
            location_y: memento.location.map(|l| l.y.to_string()).unwrap_or_default(),
            url: memento.url.clone().unwrap_or_default(),
            thumbnail_url: memento.thumbnail_url.clone().unwrap_or_default(),
            is_royal_explorer: memento.is_royal_explorer_on_time_of_discovery,
            is_locked: memento.is_memento_locked,
        }
    }

    fn validate(&self, _config: &ClientConfig) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.memento_type.trim().is_empty() {
            errors.add("type", "Type is required");
        } else if MementoType::from_str(self.memento_type.trim()).is_none() {
            errors.add("type", "Unknown memento type");
        }
        if self.capture_date.trim().is_empty() {
            errors.add("captureDate", "Capture date is required");
        } else if parse_datetime(&self.capture_date).is_none() {
            errors.add("captureDate", "Capture date is not a valid date");
        }
        for (field, value) in [("location.x", &self.location_x), ("location.y", &self.location_y)] {
            if let Some(Err(())) = coordinate(value) {
                errors.add(field, "Must be a number");
            }
        }
        errors
    }

    fn to_payload(&self, id: Option<&str>) -> Payload {
        let mut payload = JsonPayload::new(id)
            .text("type", &self.memento_type)
            .text(
                "captureDate",
                &parse_datetime(&self.capture_date)
                    .map(|d| d.to_rfc3339())
                    .unwrap_or_default(),
            )
            .text("url", &self.url)
            .text("thumbnailUrl", &self.thumbnail_url)
            .value("isRoyalExplorerOnTimeOfDiscovery", self.is_royal_explorer)
            .value("isMementoLocked", self.is_locked);

        let x = coordinate(&self.location_x).and_then(Result::ok);
        let y = coordinate(&self.location_y).and_then(Result::ok);
        if x.is_some() || y.is_some() {
            payload = payload.value(
                "location",
                serde_json::json!({ "x": x.unwrap_or(0.0), "y": y.unwrap_or(0.0) }),
            );
        } else {
            payload = payload.cleared("location");
        }
        payload.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_and_date_are_required() {
        let errors = MementoForm::default().validate(&ClientConfig::default());
        assert!(errors.get("type").is_some());
        assert!(errors.get("captureDate").is_some());
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let form = MementoForm {
            memento_type: "Image".into(),
            capture_date: "2024-06-01T12:00".into(),
            location_x: "NaN".into(),
            location_y: "18.06".into(),
            ..MementoForm::default()
        };
        let errors = form.validate(&ClientConfig::default());
        assert_eq!(errors.get("location.x"), Some("Must be a number"));
        assert!(errors.get("location.y").is_none());
    }

    #[test]
    fn location_is_sent_as_an_object() {
        let form = MementoForm {
            memento_type: "Audio".into(),
            capture_date: "2024-06-01T12:00".into(),
            location_x: "59.5".into(),
            location_y: "18.25".into(),
            ..MementoForm::default()
        };
        let Payload::Json(body) = form.to_payload(Some("m1")) else {
            panic!("memento payloads are JSON");
        };
        assert_eq!(body["location"]["x"], 59.5);
        assert_eq!(body["type"], "Audio");
        assert_eq!(body["id"], "m1");
    }
}
