//! Quest edit form

use crate::config::ClientConfig;
use crate::domain::{Difficulty, Quest, QuestStatus};
use crate::error::FieldErrors;
use crate::transport::MultipartForm;

use super::{datetime_input, parse_datetime, Attachment, EditForm, JsonPayload, Payload};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestForm {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub reward_collectible_id: String,
    /// `datetime-local` text
    pub start_date: String,
    pub end_date: String,
    pub status: QuestStatus,
    /// Newly picked icon; `None` leaves the stored icon alone
    pub icon: Option<Attachment>,
    /// Icon currently stored on the server
    pub icon_url: Option<String>,
}

impl EditForm for QuestForm {
    type Resource = Quest;

    fn from_resource(quest: &Quest) -> Self {
        Self {
            title: quest.title.clone(),
            description: quest.description.clone(),
            difficulty: quest.difficulty,
            reward_collectible_id: quest.reward_collectible_id.clone().unwrap_or_default(),
            start_date: datetime_input(quest.start_date.as_ref()),
            end_date: datetime_input(quest.end_date.as_ref()),
            status: quest.status,
            icon: None,
            icon_url: quest.icon_url.clone(),
        }
    }

    fn validate(&self, config: &ClientConfig) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.title.trim().is_empty() {
            errors.add("title", "Title is required");
        }
        if self.description.trim().is_empty() {
            errors.add("description", "Description is required");
        }
        if self.reward_collectible_id.trim().is_empty() {
            errors.add("rewardCollectibleId", "Reward is required");
        }

        let start = parse_datetime(&self.start_date);
        let end = parse_datetime(&self.end_date);
        match (self.start_date.trim().is_empty(), start) {
            (true, _) => errors.add("startDate", "Start date is required"),
            (false, None) => errors.add("startDate", "Start date is not a valid date"),
            _ => {}
        }
        match (self.end_date.trim().is_empty(), end) {
            (true, _) => errors.add("endDate", "End date is required"),
            (false, None) => errors.add("endDate", "End date is not a valid date"),
            _ => {}
        }
        if let (Some(start), Some(end)) = (start, end) {
            if end <= start {
                errors.add("endDate", "End date must be after start date");
            }
        }

        if let Some(icon) = &self.icon {
            if let Err(message) = icon.validate(config.max_attachment_bytes) {
                errors.add("icon", message);
            }
        }
        errors
    }

    fn to_payload(&self, id: Option<&str>) -> Payload {
        let start = parse_datetime(&self.start_date).map(|d| d.to_rfc3339());
        let end = parse_datetime(&self.end_date).map(|d| d.to_rfc3339());

        match &self.icon {
            Some(icon) => {
                let mut form = MultipartForm::new();
                if let Some(id) = id {
                    form = form.text("id", id);
                }
                form = form
                    .text("title", self.title.trim())
                    .text("description", self.description.trim())
                    .text("difficulty", self.difficulty.as_str())
                    .text("rewardCollectibleId", self.reward_collectible_id.trim());
                if let Some(status) = self.known_status() {
                    form = form.text("status", status);
                }
                if let Some(start) = start {
                    form = form.text("startDate", start);
                }
                if let Some(end) = end {
                    form = form.text("endDate", end);
                }
                Payload::Multipart(form.file(icon.to_part("icon")))
            }
            None => {
                let mut payload = JsonPayload::new(id)
                    .text("title", &self.title)
                    .text("description", &self.description)
                    .value("difficulty", self.difficulty.as_str())
                    .text("rewardCollectibleId", &self.reward_collectible_id)
                    .text("startDate", start.as_deref().unwrap_or_default())
                    .text("endDate", end.as_deref().unwrap_or_default());
                if let Some(status) = self.known_status() {
                    payload = payload.value("status", status);
                }
                payload.finish()
            }
        }
    }
}

impl QuestForm {
    /// Status to send; a status this client cannot name stays as the server has it
    fn known_status(&self) -> Option<&'static str> {
        (self.status != QuestStatus::Unknown).then(|| self.status.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> QuestForm {
        QuestForm {
            title: "Night Walk".into(),
            description: "Walk after dark".into(),
            difficulty: Difficulty::Medium,
            reward_collectible_id: "c1".into(),
            start_date: "2024-05-01T18:00".into(),
            end_date: "2024-05-02T06:00".into(),
            ..QuestForm::default()
        }
    }

    #[test]
    fn complete_form_has_no_errors() {
        assert!(filled().validate(&ClientConfig::default()).is_empty());
    }

    #[test]
    fn missing_fields_are_reported_individually() {
        let errors = QuestForm::default().validate(&ClientConfig::default());
        assert_eq!(errors.get("title"), Some("Title is required"));
        assert_eq!(errors.get("startDate"), Some("Start date is required"));
        assert_eq!(errors.get("rewardCollectibleId"), Some("Reward is required"));
    }

    #[test]
    fn end_must_follow_start() {
        let mut form = filled();
        form.end_date = form.start_date.clone();
        let errors = form.validate(&ClientConfig::default());
        assert_eq!(errors.get("endDate"), Some("End date must be after start date"));
    }

    #[test]
    fn id_only_in_edit_payloads() {
        let form = filled();
        assert_eq!(form.to_payload(None).field("id"), None);
        assert_eq!(form.to_payload(Some("q7")).field("id"), Some("q7".to_string()));
    }

    #[test]
    fn unrecognised_status_is_not_written_back() {
        let mut form = filled();
        form.status = QuestStatus::Unknown;
        assert_eq!(form.to_payload(Some("q9")).field("status"), None);
        form.icon = Some(Attachment::new("icon.png", vec![1]));
        assert_eq!(form.to_payload(Some("q9")).field("status"), None);

        form.status = QuestStatus::Draft;
        assert_eq!(form.to_payload(Some("q9")).field("status"), Some("draft".to_string()));
    }

    #[test]
    fn icon_switches_payload_to_multipart() {
        let mut form = filled();
        assert!(matches!(form.to_payload(None), Payload::Json(_)));
        form.icon = Some(Attachment::new("icon.png", vec![1, 2, 3]));
        let payload = form.to_payload(Some("q1"));
        assert!(payload.has_file("icon"));
        assert_eq!(payload.field("difficulty"), Some("Medium".to_string()));
        assert_eq!(
            payload.field("startDate"),
            Some("2024-05-01T18:00:00+00:00".to_string())
        );
    }
}
