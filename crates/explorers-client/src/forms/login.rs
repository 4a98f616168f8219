//! Login form

use crate::error::FieldErrors;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        let email = self.email.trim();
        if email.is_empty() {
            errors.add("email", "Email is required");
        } else if !email.contains('@') {
            errors.add("email", "Enter a valid email address");
        }
        if self.password.is_empty() {
            errors.add("password", "Password is required");
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_needs_an_at_sign() {
        let form = LoginForm {
            email: "admin".into(),
            password: "pw".into(),
        };
        assert_eq!(form.validate().get("email"), Some("Enter a valid email address"));
    }

    #[test]
    fn empty_form_reports_both_fields() {
        assert_eq!(LoginForm::default().validate().len(), 2);
    }
}
