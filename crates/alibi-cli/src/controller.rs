//! Generator controller: form state, one in-flight generation, the
//! currently displayed result, and the notifications raised along the way.

use std::fmt;

use alibi_bedrock::client::TextGenerator;
use alibi_bedrock::excuse::generate_excuse;
use alibi_core::models::context::{BelievabilityLevel, ExcuseContext, UrgencyLevel};
use alibi_core::models::excuse::SavedExcuse;
use alibi_core::models::generation::{GenerationRequest, GenerationResult};
use alibi_storage::excuses::ExcuseStore;
use alibi_storage::kv::KeyValueStore;
use tracing::{error, info};

pub const GENERATION_FAILED: &str = "Failed to generate excuse. Please try again.";

/// Raw form input. An empty string means "unset".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcuseForm {
    pub context: String,
    pub urgency: String,
    pub believability: String,
}

impl Default for ExcuseForm {
    fn default() -> Self {
        Self {
            context: ExcuseContext::Work.as_str().to_string(),
            urgency: String::new(),
            believability: String::new(),
        }
    }
}

/// A form that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidForm {
    pub context: ExcuseContext,
    pub urgency: Option<UrgencyLevel>,
    pub believability: Option<BelievabilityLevel>,
}

impl ValidForm {
    pub fn to_request(&self) -> GenerationRequest {
        let mut request = GenerationRequest::new(self.context);
        if let Some(urgency) = self.urgency {
            request = request.with_urgency(urgency.as_str());
        }
        if let Some(believability) = self.believability {
            request = request.with_believability(believability.as_str());
        }
        request
    }
}

/// Per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub context: Option<String>,
    pub urgency: Option<String>,
    pub believability: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.context.is_none() && self.urgency.is_none() && self.believability.is_none()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = [
            ("context", &self.context),
            ("urgency", &self.urgency),
            ("believability", &self.believability),
        ];
        let mut first = true;
        for (name, message) in fields {
            if let Some(message) = message {
                if !first {
                    writeln!(f)?;
                }
                write!(f, "{name}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl ExcuseForm {
    pub fn validate(&self) -> Result<ValidForm, FormErrors> {
        let mut errors = FormErrors::default();

        let context = if self.context.trim().is_empty() {
            errors.context = Some("Please select a context.".to_string());
            None
        } else {
            match self.context.parse::<ExcuseContext>() {
                Ok(c) => Some(c),
                Err(_) => {
                    errors.context = Some(format!(
                        "Invalid context. Expected one of: {}.",
                        join_options(ExcuseContext::ALL.iter().map(|c| c.as_str()))
                    ));
                    None
                }
            }
        };

        let urgency = optional_field(&self.urgency, |s| s.parse::<UrgencyLevel>().ok())
            .unwrap_or_else(|| {
                errors.urgency = Some(format!(
                    "Invalid urgency. Expected one of: {}.",
                    join_options(UrgencyLevel::ALL.iter().map(|u| u.as_str()))
                ));
                None
            });

        let believability =
            optional_field(&self.believability, |s| s.parse::<BelievabilityLevel>().ok())
                .unwrap_or_else(|| {
                    errors.believability = Some(format!(
                        "Invalid believability. Expected one of: {}.",
                        join_options(BelievabilityLevel::ALL.iter().map(|b| b.as_str()))
                    ));
                    None
                });

        match context {
            Some(context) if errors.is_empty() => Ok(ValidForm {
                context,
                urgency,
                believability,
            }),
            _ => Err(errors),
        }
    }
}

/// `Some(None)` for unset, `Some(Some(v))` for a valid value, `None` for
/// an invalid one.
fn optional_field<T>(raw: &str, parse: impl Fn(&str) -> Option<T>) -> Option<Option<T>> {
    if raw.trim().is_empty() {
        Some(None)
    } else {
        parse(raw).map(Some)
    }
}

fn join_options<'a>(options: impl Iterator<Item = &'a str>) -> String {
    options.collect::<Vec<_>>().join(", ")
}

/// `submit` holds `&mut self` for the whole call, so at most one
/// generation is in flight per controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A non-blocking toast. Stays queued until dismissed or taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Generated,
    Invalid(FormErrors),
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveError {
    NothingToSave,
    Invalid(FormErrors),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::NothingToSave => f.write_str("no generated excuse to save"),
            SaveError::Invalid(errors) => write!(f, "{errors}"),
        }
    }
}

pub struct GeneratorController<G> {
    generator: G,
    form: ExcuseForm,
    phase: Phase,
    result: Option<GenerationResult>,
    notifications: Vec<Notification>,
}

impl<G: TextGenerator> GeneratorController<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            form: ExcuseForm::default(),
            phase: Phase::Idle,
            result: None,
            notifications: Vec::new(),
        }
    }

    pub fn form(&self) -> &ExcuseForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ExcuseForm {
        &mut self.form
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The excuse currently on display, if any.
    pub fn current_excuse(&self) -> Option<&str> {
        self.result.as_ref().map(|r| r.excuse_text.as_str())
    }

    /// Validate the form and, if valid, run one generation.
    ///
    /// Any previously displayed excuse is discarded as soon as the call
    /// starts. On failure an error notification is queued and nothing is
    /// displayed.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let valid = match self.form.validate() {
            Ok(valid) => valid,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };

        self.phase = Phase::Submitting;
        self.result = None;

        let request = valid.to_request();
        let outcome = match generate_excuse(&self.generator, &request).await {
            Ok(result) => {
                self.result = Some(result);
                SubmitOutcome::Generated
            }
            Err(e) => {
                error!(error = %e, "error generating excuse");
                self.notify(NotificationKind::Error, "Error", GENERATION_FAILED);
                SubmitOutcome::Failed
            }
        };

        self.phase = Phase::Idle;
        outcome
    }

    /// Save the displayed excuse with the form's current values.
    ///
    /// Can be repeated for the same excuse; each save is a new record.
    pub fn save<S: KeyValueStore>(
        &mut self,
        store: &mut ExcuseStore<S>,
    ) -> Result<SavedExcuse, SaveError> {
        let text = self
            .current_excuse()
            .ok_or(SaveError::NothingToSave)?
            .to_string();
        let valid = self.form.validate().map_err(SaveError::Invalid)?;

        let mut excuse = SavedExcuse::new(text, valid.context, valid.urgency, valid.believability);
        // The store refuses duplicate ids.
        while store.get(&excuse.id).is_some() {
            excuse.id = uuid::Uuid::new_v4().to_string();
        }
        store.add(excuse.clone());

        info!(id = %excuse.id, "excuse saved");
        self.notify(
            NotificationKind::Success,
            "Excuse Saved!",
            "Your brilliant excuse is now saved.",
        );
        Ok(excuse)
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Dismiss one notification. Out-of-range indices are ignored.
    pub fn dismiss_notification(&mut self, index: usize) {
        if index < self.notifications.len() {
            self.notifications.remove(index);
        }
    }

    /// Drain every queued notification (shown once, then gone).
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn notify(&mut self, kind: NotificationKind, title: &str, description: &str) {
        self.notifications.push(Notification {
            kind,
            title: title.to_string(),
            description: description.to_string(),
        });
    }
}
