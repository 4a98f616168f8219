//! Passport edit form

use crate::config::ClientConfig;
use crate::domain::Passport;
use crate::error::FieldErrors;

use super::{EditForm, JsonPayload, Payload};

pub const PASSPORT_STATUSES: [&str; 2] = ["active", "inactive"];

#[derive(Debug, Clone, PartialEq)]
pub struct PassportForm {
    pub name: String,
    pub user_id: String,
    pub status: String,
    pub passport_number: String,
    pub country_of_origin: String,
    pub subscription_plan_id: String,
    pub coins: String,
}

impl Default for PassportForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            user_id: String::new(),
            status: PASSPORT_STATUSES[0].to_string(),
            passport_number: String::new(),
            country_of_origin: String::new(),
            subscription_plan_id: String::new(),
            coins: String::new(),
        }
    }
}

impl EditForm for PassportForm {
    type Resource = Passport;

    fn from_resource(passport: &Passport) -> Self {
        Self {
            name: passport.name.clone(),
            user_id: passport.user_id.clone().unwrap_or_default(),
            status: passport
                .status
                .clone()
                .unwrap_or_else(|| PASSPORT_STATUSES[0].to_string()),
            passport_number: passport.passport_number.clone().unwrap_or_default(),
            country_of_origin: passport.country_of_origin.clone().unwrap_or_default(),
            subscription_plan_id: passport.subscription_plan_id.clone().unwrap_or_default(),
            coins: passport.coins.map(|c| c.to_string()).unwrap_or_default(),
        }
    }

    fn validate(&self, _config: &ClientConfig) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.add("name", "Name is required");
        }
        if self.user_id.trim().is_empty() {
            errors.add("userId", "User ID is required");
        }
        if !PASSPORT_STATUSES.contains(&self.status.as_str()) {
            errors.add("status", "Status must be active or inactive");
        }
        if !self.coins.trim().is_empty() && self.coins.trim().parse::<i64>().is_err() {
            errors.add("coins", "Coins must be a whole number");
        }
        errors
    }

    fn to_payload(&self, id: Option<&str>) -> Payload {
        let mut payload = JsonPayload::new(id)
            .text("name", &self.name)
            .text("userId", &self.user_id)
            .text("status", &self.status)
            .text("passportNumber", &self.passport_number)
            .text("countryOfOrigin", &self.country_of_origin)
            .text("subscriptionPlanId", &self.subscription_plan_id);
        payload = match self.coins.trim().parse::<i64>() {
            Ok(coins) => payload.value("coins", coins),
            Err(_) => payload.cleared("coins"),
        };
        payload.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_and_user_are_required() {
        let errors = PassportForm::default().validate(&ClientConfig::default());
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("userId"), Some("User ID is required"));
        assert!(errors.get("status").is_none());
    }

    #[test]
    fn coins_are_sent_as_a_number() {
        let form = PassportForm {
            name: "Astrid".into(),
            user_id: "u1".into(),
            coins: " 42 ".into(),
            ..PassportForm::default()
        };
        let Payload::Json(body) = form.to_payload(None) else {
            panic!("passport payloads are JSON");
        };
        assert_eq!(body["coins"], 42);
        assert!(body.get("id").is_none());
    }
}
