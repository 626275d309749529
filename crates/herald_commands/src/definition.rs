//! Command definitions and platform validation rules.
//!
//! A [`CommandDefinition`] is the resolved, immutable description of one slash
//! command: its name, description and ordered option list. Definitions come
//! from TOML manifests or are built in code with [`CommandDefinitionBuilder`].
//!
//! # Example
//!
//! ```
//! use herald_commands::{CommandDefinitionBuilder, CommandOptionBuilder, OptionKind};
//!
//! let echo = CommandDefinitionBuilder::default()
//!     .name("echo")
//!     .description("Repeats your message")
//!     .options(vec![
//!         CommandOptionBuilder::default()
//!             .kind(OptionKind::String)
//!             .name("text")
//!             .description("What to repeat")
//!             .required(true)
//!             .build()
//!             .unwrap(),
//!     ])
//!     .build()
//!     .unwrap();
//!
//! assert!(echo.validate().is_ok());
//! ```

use crate::CommandSchema;
use derive_getters::Getters;
use herald_error::{DefinitionError, DefinitionErrorKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Maximum length of command and option names.
pub const MAX_NAME_LEN: usize = 32;
/// Maximum length of command and option descriptions.
pub const MAX_DESCRIPTION_LEN: usize = 100;
/// Maximum options per command (or per sub-command).
pub const MAX_OPTIONS: usize = 25;
/// Maximum choices per option.
pub const MAX_CHOICES: usize = 25;

static NAME_PATTERN: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^[-_\p{Ll}\p{N}]{1,32}$").expect("static name pattern is valid")
});

/// Parameter types a command option can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    /// Nested sub-command
    SubCommand,
    /// Group of sub-commands
    SubCommandGroup,
    /// Free text
    String,
    /// Whole number
    Integer,
    /// True/false
    Boolean,
    /// Platform user
    User,
    /// Channel
    Channel,
    /// Role
    Role,
    /// User or role
    Mentionable,
    /// Floating point number
    Number,
    /// File upload
    Attachment,
}

impl OptionKind {
    /// Numeric option type used by the registration endpoint.
    pub fn wire_type(self) -> u8 {
        match self {
            Self::SubCommand => 1,
            Self::SubCommandGroup => 2,
            Self::String => 3,
            Self::Integer => 4,
            Self::Boolean => 5,
            Self::User => 6,
            Self::Channel => 7,
            Self::Role => 8,
            Self::Mentionable => 9,
            Self::Number => 10,
            Self::Attachment => 11,
        }
    }

    /// Whether this option nests further options.
    pub fn is_container(self) -> bool {
        matches!(self, Self::SubCommand | Self::SubCommandGroup)
    }
}

/// A fixed value the caller may pick for an option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct OptionChoice {
    /// Label shown to the caller
    name: String,
    /// Value delivered to the handler (string, integer or number)
    value: serde_json::Value,
}

impl OptionChoice {
    /// Create a new choice.
    pub fn new(name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One parameter of a command.
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct CommandOption {
    /// Parameter type
    #[serde(rename = "type")]
    kind: OptionKind,
    /// Parameter name
    name: String,
    /// Parameter description
    description: String,
    /// Whether the caller must supply it
    #[builder(default)]
    #[serde(default)]
    required: bool,
    /// Fixed choices, if any
    #[builder(default)]
    #[serde(default)]
    choices: Vec<OptionChoice>,
    /// Nested options for sub-commands and groups
    #[builder(default)]
    #[serde(default)]
    options: Vec<CommandOption>,
    /// Lower bound for numeric options
    #[builder(default)]
    #[serde(default)]
    min_value: Option<f64>,
    /// Upper bound for numeric options
    #[builder(default)]
    #[serde(default)]
    max_value: Option<f64>,
    /// Minimum length for string options
    #[builder(default)]
    #[serde(default)]
    min_length: Option<u16>,
    /// Maximum length for string options
    #[builder(default)]
    #[serde(default)]
    max_length: Option<u16>,
}

/// Resolved description of one slash command.
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct CommandDefinition {
    /// Unique command name
    name: String,
    /// Description shown in the command picker
    description: String,
    /// Ordered parameters
    #[builder(default)]
    #[serde(default)]
    options: Vec<CommandOption>,
    /// Permission bitset required by default, as a decimal string
    #[builder(default)]
    #[serde(default)]
    default_member_permissions: Option<String>,
    /// Whether the command is usable in direct messages
    #[builder(default)]
    #[serde(default)]
    dm_permission: Option<bool>,
    /// Age-restricted command
    #[builder(default)]
    #[serde(default)]
    nsfw: bool,
}

impl CommandDefinition {
    /// Project this definition into the registration wire schema.
    pub fn schema(&self) -> CommandSchema {
        CommandSchema::from(self)
    }

    /// Check the definition against the platform's naming and size rules.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionErrorKind::Invalid`] naming the first rule broken.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        check_name(&self.name, &self.name)?;
        check_description(&self.name, &self.description)?;
        if let Some(permissions) = &self.default_member_permissions {
            if permissions.parse::<u64>().is_err() {
                return Err(invalid(
                    &self.name,
                    format!("default_member_permissions '{permissions}' is not a decimal bitset"),
                ));
            }
        }
        check_options(&self.name, &self.options)
    }
}

fn invalid(name: &str, reason: impl Into<String>) -> DefinitionError {
    DefinitionError::new(DefinitionErrorKind::Invalid {
        name: name.to_string(),
        reason: reason.into(),
    })
}

fn check_name(command: &str, name: &str) -> Result<(), DefinitionError> {
    if NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(invalid(
            command,
            format!(
                "name '{name}' must be 1-{MAX_NAME_LEN} lower-case letters, digits, '-' or '_'"
            ),
        ))
    }
}

fn check_description(command: &str, description: &str) -> Result<(), DefinitionError> {
    let len = description.chars().count();
    if (1..=MAX_DESCRIPTION_LEN).contains(&len) {
        Ok(())
    } else {
        Err(invalid(
            command,
            format!("description must be 1-{MAX_DESCRIPTION_LEN} characters, got {len}"),
        ))
    }
}

fn check_options(command: &str, options: &[CommandOption]) -> Result<(), DefinitionError> {
    if options.len() > MAX_OPTIONS {
        return Err(invalid(
            command,
            format!("at most {MAX_OPTIONS} options allowed, got {}", options.len()),
        ));
    }

    let mut seen = HashSet::new();
    let mut optional_seen = false;
    for option in options {
        check_name(command, &option.name)?;
        check_description(command, &option.description)?;
        if !seen.insert(option.name.as_str()) {
            return Err(invalid(
                command,
                format!("option '{}' is declared twice", option.name),
            ));
        }
        if option.required && optional_seen {
            return Err(invalid(
                command,
                format!("required option '{}' follows an optional one", option.name),
            ));
        }
        optional_seen |= !option.required;

        if option.choices.len() > MAX_CHOICES {
            return Err(invalid(
                command,
                format!("option '{}' has more than {MAX_CHOICES} choices", option.name),
            ));
        }
        if option.kind.is_container() {
            check_options(command, &option.options)?;
        } else if !option.options.is_empty() {
            return Err(invalid(
                command,
                format!("option '{}' cannot nest options", option.name),
            ));
        }
    }
    Ok(())
}
