//! Outbound message payloads.
//!
//! Platform-neutral description of what the bot sends: text plus rows of
//! interactive components. The adapter translates these into the platform's
//! own builders.

use serde::{Deserialize, Serialize};

use crate::selection::DayOption;

/// A message the bot posts or uses to answer an interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ActionRow>,
    /// Only visible to the invoking user. Ignored for plain channel posts.
    #[serde(default)]
    pub ephemeral: bool,
}

impl OutboundMessage {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// An ephemeral text reply.
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            components: Vec::new(),
            ephemeral: true,
        }
    }

    pub fn with_row(mut self, row: ActionRow) -> Self {
        self.components.push(row);
        self
    }
}

/// How an interaction is answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum InteractionResponse {
    /// A new reply message.
    Reply(OutboundMessage),
    /// Replace the message that carried the component, in place.
    Update(OutboundMessage),
}

impl InteractionResponse {
    pub fn message(&self) -> &OutboundMessage {
        match self {
            InteractionResponse::Reply(message) | InteractionResponse::Update(message) => message,
        }
    }
}

/// One row of interactive components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionRow {
    SelectMenu(SelectMenu),
    Buttons { buttons: Vec<Button> },
}

/// A string select menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectMenu {
    pub custom_id: String,
    pub placeholder: String,
    pub options: Vec<MenuOption>,
}

/// One entry of a select menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuOption {
    pub label: String,
    pub description: String,
    pub value: String,
    /// Pre-selected when the menu renders.
    #[serde(default)]
    pub default: bool,
}

impl From<DayOption> for MenuOption {
    fn from(option: DayOption) -> Self {
        Self {
            label: option.label,
            description: option.description,
            value: option.value,
            default: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub custom_id: String,
    pub label: String,
    pub style: ButtonStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    Primary,
    Secondary,
    Success,
    Danger,
}
