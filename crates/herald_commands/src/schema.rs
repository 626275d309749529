//! Registration wire schema.
//!
//! These types mirror the JSON body the platform's bulk-overwrite endpoint
//! expects. They are kept apart from [`CommandDefinition`](crate::CommandDefinition)
//! because the manifest format uses readable option kinds while the wire
//! format uses numeric type codes.

use crate::{CommandDefinition, CommandOption, OptionChoice};
use serde::{Deserialize, Serialize};

/// Application command type for slash (chat input) commands.
pub const CHAT_INPUT: u8 = 1;

/// Wire form of one command descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandSchema {
    /// Command name
    pub name: String,
    /// Command type (always [`CHAT_INPUT`])
    #[serde(rename = "type")]
    pub kind: u8,
    /// Command description
    pub description: String,
    /// Command options
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionSchema>,
    /// Default permission bitset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_member_permissions: Option<String>,
    /// Direct message availability
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dm_permission: Option<bool>,
    /// Age-restricted flag
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nsfw: bool,
}

/// Wire form of one option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSchema {
    /// Numeric option type
    #[serde(rename = "type")]
    pub kind: u8,
    /// Option name
    pub name: String,
    /// Option description
    pub description: String,
    /// Required flag
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    /// Fixed choices
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<ChoiceSchema>,
    /// Nested options
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionSchema>,
    /// Numeric lower bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    /// Numeric upper bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    /// String minimum length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u16>,
    /// String maximum length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u16>,
}

/// Wire form of one choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceSchema {
    /// Choice label
    pub name: String,
    /// Choice value
    pub value: serde_json::Value,
}

impl From<&OptionChoice> for ChoiceSchema {
    fn from(choice: &OptionChoice) -> Self {
        Self {
            name: choice.name().clone(),
            value: choice.value().clone(),
        }
    }
}

impl From<&CommandOption> for OptionSchema {
    fn from(option: &CommandOption) -> Self {
        Self {
            kind: option.kind().wire_type(),
            name: option.name().clone(),
            description: option.description().clone(),
            required: *option.required(),
            choices: option.choices().iter().map(ChoiceSchema::from).collect(),
            options: option.options().iter().map(OptionSchema::from).collect(),
            min_value: *option.min_value(),
            max_value: *option.max_value(),
            min_length: *option.min_length(),
            max_length: *option.max_length(),
        }
    }
}

impl From<&CommandDefinition> for CommandSchema {
    fn from(def: &CommandDefinition) -> Self {
        Self {
            name: def.name().clone(),
            kind: CHAT_INPUT,
            description: def.description().clone(),
            options: def.options().iter().map(OptionSchema::from).collect(),
            default_member_permissions: def.default_member_permissions().clone(),
            dm_permission: *def.dm_permission(),
            nsfw: *def.nsfw(),
        }
    }
}
