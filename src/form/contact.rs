use crate::error::SubmitError;
use crate::form::errors::FieldErrors;
use crate::form::record::FormRecord;
use crate::task::{CancelToken, Submitter};
use crate::validators::{Validator, matches, min_length, optional, required, run_validators};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::{Duration, Instant};
use tracing::debug;

pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(1500);

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email pattern")
});
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+965\s?[0-9]{7,8}$").expect("phone pattern"));
static LINKEDIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://www\.linkedin\.com/in/[A-Za-z0-9_-]+/?$").expect("linkedin pattern")
});

static RULES: LazyLock<Vec<(ContactField, Vec<Validator>)>> = LazyLock::new(|| {
    vec![
        (
            ContactField::Name,
            vec![
                required("Name is required"),
                min_length(2, "Name must be at least 2 characters"),
            ],
        ),
        (
            ContactField::Email,
            vec![
                required("Email is required"),
                matches(&EMAIL, "Invalid email address"),
            ],
        ),
        (
            ContactField::Phone,
            vec![optional(matches(
                &PHONE,
                "Phone should be in format: +965 XXXXXXX",
            ))],
        ),
        (
            ContactField::Linkedin,
            vec![optional(matches(
                &LINKEDIN,
                "Please enter a valid LinkedIn URL",
            ))],
        ),
        (
            ContactField::Message,
            vec![
                required("Message is required"),
                min_length(20, "Message must be at least 20 characters"),
            ],
        ),
    ]
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Phone,
    Linkedin,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 5] = [
        ContactField::Name,
        ContactField::Email,
        ContactField::Phone,
        ContactField::Linkedin,
        ContactField::Message,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContactField::Name => "Name",
            ContactField::Email => "Email",
            ContactField::Phone => "Phone (Optional)",
            ContactField::Linkedin => "LinkedIn URL (Optional)",
            ContactField::Message => "Message",
        }
    }

    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            ContactField::Phone => Some("+965 XXXXXXX"),
            ContactField::Linkedin => Some("https://www.linkedin.com/in/username"),
            _ => None,
        }
    }

    pub fn is_multiline(self) -> bool {
        self == ContactField::Message
    }
}

/// Values of the contact form. Missing keys deserialize as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub message: String,
}

impl FormRecord for ContactForm {
    type Field = ContactField;

    fn fields() -> &'static [ContactField] {
        &ContactField::ALL
    }

    fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
            ContactField::Linkedin => &self.linkedin,
            ContactField::Message => &self.message,
        }
    }

    fn set(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Phone => self.phone = value,
            ContactField::Linkedin => self.linkedin = value,
            ContactField::Message => self.message = value,
        }
    }
}

/// Total over every input; only failing fields appear in the result.
pub fn validate_contact(values: &ContactForm) -> FieldErrors<ContactField> {
    let mut errors = FieldErrors::new();
    for (field, validators) in RULES.iter() {
        if let Err(message) = run_validators(validators, values.get(*field)) {
            errors.insert(*field, message);
        }
    }
    errors
}

/// Stand-in for a real delivery endpoint: waits, then acknowledges.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    const SLICE: Duration = Duration::from_millis(25);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_DELAY)
    }
}

impl Submitter<ContactForm> for SimulatedSubmitter {
    fn submit(&self, values: ContactForm, cancel: &CancelToken) -> Result<String, SubmitError> {
        let deadline = Instant::now() + self.delay;
        loop {
            if cancel.is_cancelled() {
                debug!("simulated submit cancelled");
                return Err(SubmitError::Cancelled);
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            std::thread::sleep(remaining.min(Self::SLICE));
        }
        Ok(acknowledgement(&values.name))
    }
}

pub fn acknowledgement(name: &str) -> String {
    format!("Thanks for your message, {name}! I'll get back to you soon.")
}
