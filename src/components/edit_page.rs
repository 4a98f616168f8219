//! Resource Edit Page
//!
//! Create and edit screens share one generic page. Each form type supplies its
//! fields through `FormView`; the field helpers below bind inputs to the
//! `EditController` held in an `RwSignal`.

use explorers_client::{
    Attachment, ClientConfig, EditController, EditForm, EditMode, EditPhase, Resource,
};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlInputElement;

use crate::context::{use_app, AppContext};
use crate::route::{Route, Section};
use crate::store::{store_set_flash, use_app_store, AppStore};

/// Delay before returning to the list after a save
const DONE_REDIRECT_MS: u32 = 1500;

/// Form fields for one resource
pub trait FormView: EditForm {
    const SECTION: Section;

    fn fields(edit: EditHandle<Self>) -> AnyView;
}

pub struct EditHandle<F: EditForm> {
    pub ctx: AppContext,
    pub ctrl: RwSignal<EditController<F>>,
}

impl<F: EditForm> Clone for EditHandle<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: EditForm> Copy for EditHandle<F> {}

impl<F: EditForm> EditHandle<F> {
    pub fn new(ctx: AppContext, mode: EditMode, config: ClientConfig) -> Self {
        Self {
            ctx,
            ctrl: RwSignal::new(EditController::new(mode, config)),
        }
    }

    /// Current value of a form field
    pub fn get<T>(self, read: impl FnOnce(&F) -> T) -> T
    where
        T: Default,
    {
        self.ctrl
            .try_with(|c| read(c.form()))
            .unwrap_or_default()
    }

    /// Change the form and clear the field's error
    pub fn set(self, field: &'static str, change: impl FnOnce(&mut F)) {
        self.ctrl.try_update(|c| {
            c.update_form(change);
            c.clear_field_error(field);
        });
    }

    pub fn error(self, field: &str) -> Option<String> {
        self.ctrl
            .with(|c| c.field_error(field).map(str::to_string))
    }

    pub fn load(self) {
        let Some(Some(id)) = self.ctrl.try_update(|c| c.begin_load()) else {
            return;
        };
        let client = self.ctx.client().resource::<F::Resource>();
        spawn_local(async move {
            let result = client.get_by_id(&id).await;
            let auth_failed = matches!(&result, Err(e) if e.requires_login());
            self.ctrl.try_update(|c| c.finish_load(result));
            if auth_failed {
                self.ctx.logout();
            }
        });
    }

    /// Validate and send; after a save, flash the message and go back to the list
    pub fn submit(self, store: AppStore, section: Section) {
        let Some(Some(request)) = self.ctrl.try_update(|c| c.begin_submit()) else {
            return;
        };
        let client = self.ctx.client().resource::<F::Resource>();
        spawn_local(async move {
            let result = client.save(&request).await;
            let auth_failed = matches!(&result, Err(e) if e.requires_login());
            let saved = self
                .ctrl
                .try_update(|c| {
                    c.finish_submit(result);
                    c.success_message()
                })
                .flatten();
            if auth_failed {
                self.ctx.logout();
                return;
            }
            let Some(message) = saved else {
                return;
            };
            store_set_flash(&store, message);
            TimeoutFuture::new(DONE_REDIRECT_MS).await;
            if self.ctrl.try_with(|c| !c.is_disposed()).unwrap_or(false) {
                self.ctx.navigate(Route::List(section));
            }
        });
    }
}

/// Read a picked file into memory
async fn read_file(file: web_sys::File) -> Result<Attachment, String> {
    let name = file.name();
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| format!("Could not read {}", name))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let attachment = Attachment::new(name, bytes);
    let content_type = file.type_();
    Ok(if content_type.is_empty() {
        attachment
    } else {
        attachment.with_content_type(content_type)
    })
}

fn field_error<F: EditForm>(edit: EditHandle<F>, field: &'static str) -> impl IntoView {
    move || {
        edit.error(field)
            .map(|message| view! { <span class="field-error">{message}</span> })
    }
}

pub fn text_input<F: EditForm>(
    edit: EditHandle<F>,
    label: &'static str,
    field: &'static str,
    input_type: &'static str,
    get: fn(&F) -> String,
    set: fn(&mut F, String),
) -> impl IntoView {
    view! {
        <div class="form-field" class:has-error=move || edit.error(field).is_some()>
            <label>{label}</label>
            <input
                type=input_type
                prop:value=move || edit.get(get)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    edit.set(field, |f| set(f, value));
                }
            />
            {field_error(edit, field)}
        </div>
    }
}

pub fn text_area<F: EditForm>(
    edit: EditHandle<F>,
    label: &'static str,
    field: &'static str,
    get: fn(&F) -> String,
    set: fn(&mut F, String),
) -> impl IntoView {
    view! {
        <div class="form-field" class:has-error=move || edit.error(field).is_some()>
            <label>{label}</label>
            <textarea
                rows="4"
                prop:value=move || edit.get(get)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    edit.set(field, |f| set(f, value));
                }
            ></textarea>
            {field_error(edit, field)}
        </div>
    }
}

/// Select over `(value, label)` pairs; `options` may be reactive
pub fn select_input<F: EditForm>(
    edit: EditHandle<F>,
    label: &'static str,
    field: &'static str,
    options: impl Fn() -> Vec<(String, String)> + Send + Sync + 'static,
    get: fn(&F) -> String,
    set: fn(&mut F, String),
) -> impl IntoView {
    view! {
        <div class="form-field" class:has-error=move || edit.error(field).is_some()>
            <label>{label}</label>
            <select on:change=move |ev| {
                let value = event_target_value(&ev);
                edit.set(field, |f| set(f, value));
            }>
                <option value="">"Select..."</option>
                {move || {
                    let current = edit.get(get);
                    options()
                        .into_iter()
                        .map(|(value, text)| {
                            let selected = value == current;
                            view! { <option value=value selected=selected>{text}</option> }
                        })
                        .collect_view()
                }}
            </select>
            {field_error(edit, field)}
        </div>
    }
}

pub fn checkbox_input<F: EditForm>(
    edit: EditHandle<F>,
    label: &'static str,
    field: &'static str,
    get: fn(&F) -> bool,
    set: fn(&mut F, bool),
) -> impl IntoView {
    view! {
        <div class="form-field checkbox">
            <label>
                <input
                    type="checkbox"
                    prop:checked=move || edit.get(get)
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        edit.set(field, |f| set(f, checked));
                    }
                />
                {label}
            </label>
        </div>
    }
}

/// Image picker with a local preview
///
/// `preview` returns the newly picked file as a data URL, or the stored URL.
pub fn file_input<F: EditForm>(
    edit: EditHandle<F>,
    label: &'static str,
    field: &'static str,
    preview: fn(&F) -> Option<String>,
    set: fn(&mut F, Attachment),
) -> impl IntoView {
    let on_change = move |ev: web_sys::Event| {
        let file = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        let Some(file) = file else {
            return;
        };
        spawn_local(async move {
            match read_file(file).await {
                Ok(attachment) => {
                    log::debug!(
                        "picked {} ({} bytes) for {}",
                        attachment.file_name,
                        attachment.size(),
                        field
                    );
                    edit.set(field, |f| set(f, attachment));
                }
                Err(message) => {
                    log::warn!("{}", message);
                }
            }
        });
    };

    view! {
        <div class="form-field" class:has-error=move || edit.error(field).is_some()>
            <label>{label}</label>
            {move || edit.get(preview).map(|src| view! { <img class="preview" src=src alt="" /> })}
            <input type="file" accept="image/png,image/jpeg,image/gif,image/webp" on:change=on_change />
            {field_error(edit, field)}
        </div>
    }
}

/// Create (`id` absent) or edit screen for `F`
pub fn edit_page<F: FormView>(id: Option<String>) -> impl IntoView {
    let ctx = use_app();
    let store = use_app_store();
    let config = ctx.client().config().clone();
    let edit = EditHandle::<F>::new(ctx, EditMode::from_id(id.as_deref()), config);
    let kind = <F::Resource as Resource>::KIND;

    edit.load();
    on_cleanup(move || {
        edit.ctrl.try_update(|c| c.dispose());
    });

    let title = match &id {
        Some(id) => format!("Edit {} {}", kind.name, id),
        None => format!("New {}", kind.name),
    };
    let phase = move || edit.ctrl.with(|c| c.phase().clone());
    let form_visible = move || !matches!(phase(), EditPhase::Loading | EditPhase::LoadFailed(_));
    let busy = move || matches!(phase(), EditPhase::Submitting | EditPhase::Done(_));

    view! {
        <section class="edit-page">
            <header class="page-header">
                <h1>{title}</h1>
                <button on:click=move |_| ctx.navigate(Route::List(F::SECTION))>"Back to list"</button>
            </header>

            {move || match phase() {
                EditPhase::Loading => Some(view! { <p class="loading">"Loading..."</p> }.into_any()),
                EditPhase::LoadFailed(message) => {
                    Some(view! { <div class="alert error">{message}</div> }.into_any())
                }
                _ => None,
            }}

            {move || edit.ctrl.with(|c| c.success_message()).map(|message| view! {
                <div class="alert success">{message}</div>
            })}

            {move || edit.ctrl.with(|c| c.banner().map(str::to_string)).map(|message| view! {
                <div class="alert error">{message}</div>
            })}

            <Show when=form_visible>
                <form
                    class="edit-form"
                    on:submit=move |ev: web_sys::SubmitEvent| {
                        ev.prevent_default();
                        edit.submit(store, F::SECTION);
                    }
                >
                    {F::fields(edit)}
                    <div class="form-actions">
                        <button type="submit" class="primary" disabled=busy>
                            {move || if busy() { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </form>
            </Show>
        </section>
    }
}
