use crate::error::Result;
use crate::form::{ContactField, ContactForm, FieldErrors, validate_contact};
use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_CONTENT: &str = "FOLIO_CONTENT";
pub const ENV_SUBMIT_DELAY_MS: &str = "FOLIO_SUBMIT_DELAY_MS";
pub const ENV_LOG_FILE: &str = "FOLIO_LOG_FILE";

#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "A portfolio site for the terminal")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<CliCommand>,
    #[command(flatten)]
    pub run: RunArgs,
}

impl Cli {
    /// The subcommand to execute; bare `folio` runs the site.
    pub fn into_command(self) -> CliCommand {
        self.command.unwrap_or(CliCommand::Run(self.run))
    }
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Browse the site interactively.
    Run(RunArgs),
    /// Validate a contact payload (JSON) and print the error record.
    Validate(ValidateArgs),
    /// Load and check the content document, then print it as JSON.
    Content(ContentArgs),
}

#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// YAML content document to use instead of the built-in one.
    #[arg(long, value_name = "YAML")]
    pub content: Option<PathBuf>,
    /// Simulated delivery delay of the contact form.
    #[arg(long, value_name = "MS")]
    pub submit_delay_ms: Option<u64>,
    /// Where diagnostics are written while the screen is in use.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ValidateArgs {
    /// JSON file with the contact fields; stdin when omitted.
    #[arg(long, value_name = "JSON")]
    pub input: Option<PathBuf>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ContentArgs {
    #[arg(long, value_name = "YAML")]
    pub content: Option<PathBuf>,
}

/// Effective settings for an interactive run: built-in defaults, then
/// `FOLIO_*` environment variables, then command-line flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub content: Option<PathBuf>,
    pub submit_delay: Duration,
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            content: None,
            submit_delay: crate::form::contact::DEFAULT_SUBMIT_DELAY,
            log_file: std::env::temp_dir().join("folio.log"),
        }
    }
}

impl Settings {
    pub fn load(args: &RunArgs) -> Self {
        Self::load_with(args, |key| std::env::var(key).ok())
    }

    pub fn load_with(args: &RunArgs, env: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Settings::default();

        if let Some(v) = env(ENV_CONTENT).filter(|v| !v.is_empty()) {
            settings.content = Some(PathBuf::from(v));
        }
        if let Some(v) = env(ENV_SUBMIT_DELAY_MS)
            && let Ok(parsed) = v.trim().parse::<u64>()
        {
            settings.submit_delay = Duration::from_millis(parsed);
        }
        if let Some(v) = env(ENV_LOG_FILE).filter(|v| !v.is_empty()) {
            settings.log_file = PathBuf::from(v);
        }

        if let Some(path) = &args.content {
            settings.content = Some(path.clone());
        }
        if let Some(ms) = args.submit_delay_ms {
            settings.submit_delay = Duration::from_millis(ms);
        }
        if let Some(path) = &args.log_file {
            settings.log_file = path.clone();
        }

        settings
    }
}

/// Parses a contact payload and runs the contact validator over it.
pub fn validate_payload(mut reader: impl Read) -> Result<FieldErrors<ContactField>> {
    let mut raw = String::new();
    reader.read_to_string(&mut raw)?;
    let form: ContactForm = serde_json::from_str(&raw)?;
    Ok(validate_contact(&form))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let settings = Settings::load_with(&RunArgs::default(), env_of(&[]));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.submit_delay, Duration::from_millis(1500));
    }

    #[test]
    fn env_overrides_defaults_and_flags_override_env() {
        let env = env_of(&[
            (ENV_SUBMIT_DELAY_MS, "300"),
            (ENV_CONTENT, "/env/site.yaml"),
        ]);
        let args = RunArgs {
            content: Some(PathBuf::from("/flag/site.yaml")),
            ..RunArgs::default()
        };
        let settings = Settings::load_with(&args, env);
        assert_eq!(settings.submit_delay, Duration::from_millis(300));
        assert_eq!(settings.content, Some(PathBuf::from("/flag/site.yaml")));
    }

    #[test]
    fn malformed_env_delay_is_ignored() {
        let settings =
            Settings::load_with(&RunArgs::default(), env_of(&[(ENV_SUBMIT_DELAY_MS, "soon")]));
        assert_eq!(settings.submit_delay, Duration::from_millis(1500));
    }

    #[test]
    fn bare_invocation_runs_the_site() {
        let cli = Cli::try_parse_from(["folio", "--submit-delay-ms", "10"]).expect("parse");
        match cli.into_command() {
            CliCommand::Run(args) => assert_eq!(args.submit_delay_ms, Some(10)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn validate_subcommand_parses_input() {
        let cli = Cli::try_parse_from(["folio", "validate", "--input", "msg.json"]).expect("parse");
        assert!(matches!(
            cli.into_command(),
            CliCommand::Validate(ValidateArgs { input: Some(_) })
        ));
    }

    #[test]
    fn payload_errors_serialize_by_field_name() {
        let payload = br#"{"name": "J", "email": "jane@example.com", "phone": "123"}"#;
        let errors = validate_payload(&payload[..]).expect("valid json");
        let json = serde_json::to_value(&errors).expect("serialize");
        assert_eq!(json["name"], "Name must be at least 2 characters");
        assert_eq!(json["phone"], "Phone should be in format: +965 XXXXXXX");
        assert_eq!(json["message"], "Message is required");
        assert!(json.get("email").is_none());
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(validate_payload(&b"not json"[..]).is_err());
    }
}
