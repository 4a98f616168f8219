//! Edit View Controller
//!
//! Drives a create/edit screen: load the record, hold the form, validate,
//! submit, and report per-field or banner errors.

use crate::client::ResourceClient;
use crate::config::ClientConfig;
use crate::domain::Resource;
use crate::error::{ApiError, ApiResult, FieldErrors};
use crate::forms::{EditForm, Payload};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditMode {
    New,
    Editing(String),
}

impl EditMode {
    /// `Editing` when the route carried a non-blank id
    pub fn from_id(id: Option<&str>) -> Self {
        match id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => EditMode::Editing(id.to_string()),
            None => EditMode::New,
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            EditMode::New => None,
            EditMode::Editing(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditPhase {
    Loading,
    /// Loading the record failed; nothing to edit
    LoadFailed(String),
    Ready,
    Submitting,
    /// Saved; carries the record's id
    Done(String),
    Failed(String),
}

/// What to send for a submit
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRequest {
    /// Present for updates
    pub id: Option<String>,
    pub payload: Payload,
}

impl<R: crate::domain::Mutable> ResourceClient<R> {
    /// Create or update, depending on the request
    pub async fn save(&self, request: &SubmitRequest) -> ApiResult<R> {
        match &request.id {
            Some(id) => self.update(id, request.payload.clone()).await,
            None => self.create(request.payload.clone()).await,
        }
    }
}

#[derive(Debug)]
pub struct EditController<F: EditForm> {
    mode: EditMode,
    phase: EditPhase,
    form: F,
    field_errors: FieldErrors,
    config: ClientConfig,
    disposed: bool,
    needs_login: bool,
}

impl<F: EditForm> EditController<F> {
    pub fn new(mode: EditMode, config: ClientConfig) -> Self {
        let phase = match mode {
            EditMode::New => EditPhase::Ready,
            EditMode::Editing(_) => EditPhase::Loading,
        };
        Self {
            mode,
            phase,
            form: F::default(),
            field_errors: FieldErrors::new(),
            config,
            disposed: false,
            needs_login: false,
        }
    }

    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    pub fn phase(&self) -> &EditPhase {
        &self.phase
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    /// Change form input in place
    pub fn update_form(&mut self, edit: impl FnOnce(&mut F)) {
        edit(&mut self.form);
        if matches!(self.phase, EditPhase::Failed(_)) {
            self.phase = EditPhase::Ready;
        }
    }

    pub fn clear_field_error(&mut self, field: &str) {
        self.field_errors.clear_field(field);
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.field_errors.get(field)
    }

    pub fn banner(&self) -> Option<&str> {
        match &self.phase {
            EditPhase::LoadFailed(message) | EditPhase::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn needs_login(&self) -> bool {
        self.needs_login
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    /// Id to load, if this screen edits an existing record
    pub fn begin_load(&mut self) -> Option<String> {
        let id = self.mode.id()?.to_string();
        self.phase = EditPhase::Loading;
        Some(id)
    }

    pub fn finish_load(&mut self, result: ApiResult<F::Resource>) {
        if self.disposed {
            return;
        }
        match result {
            Ok(resource) => {
                self.form = F::from_resource(&resource);
                self.field_errors = FieldErrors::new();
                self.phase = EditPhase::Ready;
            }
            Err(err) => {
                log::warn!("loading {} failed: {}", <F::Resource as Resource>::KIND.name, err);
                self.needs_login |= err.requires_login();
                self.phase = EditPhase::LoadFailed(err.user_message());
            }
        }
    }

    pub async fn load(&mut self, client: &ResourceClient<F::Resource>) {
        if let Some(id) = self.begin_load() {
            let result = client.get_by_id(&id).await;
            self.finish_load(result);
        }
    }

    /// Validate and build the request; `None` when blocked
    pub fn begin_submit(&mut self) -> Option<SubmitRequest> {
        if !matches!(self.phase, EditPhase::Ready | EditPhase::Failed(_)) {
            return None;
        }
        let errors = self.form.validate(&self.config);
        if !errors.is_empty() {
            self.field_errors = errors;
            self.phase = EditPhase::Failed("Please fix the highlighted fields.".to_string());
            return None;
        }
        self.field_errors = FieldErrors::new();
        self.phase = EditPhase::Submitting;
        let id = self.mode.id().map(str::to_string);
        Some(SubmitRequest {
            payload: self.form.to_payload(id.as_deref()),
            id,
        })
    }

    /// Record the outcome; the form input survives every failure
    pub fn finish_submit(&mut self, result: ApiResult<F::Resource>) {
        if self.disposed {
            return;
        }
        match result {
            Ok(saved) => {
                log::info!("saved {} {}", <F::Resource as Resource>::KIND.name, saved.id());
                self.form = F::from_resource(&saved);
                self.mode = EditMode::Editing(saved.id().to_string());
                self.phase = EditPhase::Done(saved.id().to_string());
            }
            Err(err) => {
                log::warn!("saving {} failed: {}", <F::Resource as Resource>::KIND.name, err);
                self.needs_login |= err.requires_login();
                if let ApiError::Validation { fields, .. } = &err {
                    self.field_errors.merge(fields);
                }
                self.phase = EditPhase::Failed(err.user_message());
            }
        }
    }

    pub async fn submit(&mut self, client: &ResourceClient<F::Resource>) -> bool {
        let Some(request) = self.begin_submit() else {
            return false;
        };
        let result = client.save(&request).await;
        self.finish_submit(result);
        matches!(self.phase, EditPhase::Done(_))
    }

    /// Banner shown after a successful save
    pub fn success_message(&self) -> Option<String> {
        match &self.phase {
            EditPhase::Done(id) => Some(format!(
                "{} {} saved.",
                capitalize(<F::Resource as Resource>::KIND.name),
                id
            )),
            _ => None,
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
