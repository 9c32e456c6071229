//! Translation between serenity models and datebot domain types.

use serenity::builder::{
    CreateActionRow, CreateButton, CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, CreateMessage, CreateSelectMenu, CreateSelectMenuKind,
    CreateSelectMenuOption,
};
use serenity::model::application::{
    ButtonStyle as DiscordButtonStyle, ComponentInteraction, ComponentInteractionDataKind,
};
use serenity::model::channel::Message;

use datebot_types::error::{InteractionError, PlatformError};
use datebot_types::event::{ComponentAction, ComponentEvent, IncomingMessage, InteractionRef};
use datebot_types::ids::{ChannelId, GuildId, InteractionId, MessageId, RoleId, UserId};
use datebot_types::outbound::{ActionRow, ButtonStyle, InteractionResponse, OutboundMessage};

// -- inbound ----------------------------------------------------------------

pub fn incoming_message(message: &Message) -> IncomingMessage {
    IncomingMessage {
        id: MessageId(message.id.get()),
        channel_id: ChannelId(message.channel_id.get()),
        guild_id: message.guild_id.map(|id| GuildId(id.get())),
        author_id: UserId(message.author.id.get()),
        author_is_bot: message.author.bot,
        author_roles: message
            .member
            .as_ref()
            .map(|member| member.roles.iter().map(|id| RoleId(id.get())).collect())
            .unwrap_or_default(),
        content: message.content.clone(),
    }
}

pub fn interaction_ref(component: &ComponentInteraction) -> InteractionRef {
    InteractionRef {
        id: InteractionId(component.id.get()),
        token: component.token.clone(),
    }
}

/// Decode a component interaction into a `ComponentEvent`.
pub fn component_event(component: &ComponentInteraction) -> Result<ComponentEvent, InteractionError> {
    let values: &[String] = match &component.data.kind {
        ComponentInteractionDataKind::StringSelect { values } => values,
        _ => &[],
    };
    let action = ComponentAction::parse(&component.data.custom_id, values)?;

    Ok(ComponentEvent {
        interaction: interaction_ref(component),
        user_id: UserId(component.user.id.get()),
        guild_id: component.guild_id.map(|id| GuildId(id.get())),
        member_roles: component
            .member
            .as_ref()
            .map(|member| member.roles.iter().map(|id| RoleId(id.get())).collect())
            .unwrap_or_default(),
        action,
    })
}

// -- outbound ---------------------------------------------------------------

fn action_rows(rows: &[ActionRow]) -> Vec<CreateActionRow> {
    rows.iter().map(action_row).collect()
}

fn action_row(row: &ActionRow) -> CreateActionRow {
    match row {
        ActionRow::SelectMenu(menu) => {
            let options = menu
                .options
                .iter()
                .map(|option| {
                    CreateSelectMenuOption::new(&option.label, &option.value)
                        .description(&option.description)
                        .default_selection(option.default)
                })
                .collect();
            CreateActionRow::SelectMenu(
                CreateSelectMenu::new(&menu.custom_id, CreateSelectMenuKind::String { options })
                    .placeholder(&menu.placeholder),
            )
        }
        ActionRow::Buttons { buttons } => CreateActionRow::Buttons(
            buttons
                .iter()
                .map(|button| {
                    CreateButton::new(&button.custom_id)
                        .label(&button.label)
                        .style(button_style(button.style))
                })
                .collect(),
        ),
    }
}

fn button_style(style: ButtonStyle) -> DiscordButtonStyle {
    match style {
        ButtonStyle::Primary => DiscordButtonStyle::Primary,
        ButtonStyle::Secondary => DiscordButtonStyle::Secondary,
        ButtonStyle::Success => DiscordButtonStyle::Success,
        ButtonStyle::Danger => DiscordButtonStyle::Danger,
    }
}

fn response_message(message: &OutboundMessage) -> CreateInteractionResponseMessage {
    CreateInteractionResponseMessage::new()
        .content(&message.content)
        .components(action_rows(&message.components))
        .ephemeral(message.ephemeral)
}

pub fn interaction_response(response: &InteractionResponse) -> CreateInteractionResponse {
    match response {
        InteractionResponse::Reply(message) => {
            CreateInteractionResponse::Message(response_message(message))
        }
        InteractionResponse::Update(message) => {
            CreateInteractionResponse::UpdateMessage(response_message(message))
        }
    }
}

pub fn follow_up(message: &OutboundMessage) -> CreateInteractionResponseFollowup {
    CreateInteractionResponseFollowup::new()
        .content(&message.content)
        .components(action_rows(&message.components))
        .ephemeral(message.ephemeral)
}

pub fn channel_message(message: &OutboundMessage) -> CreateMessage {
    CreateMessage::new()
        .content(&message.content)
        .components(action_rows(&message.components))
}

/// Map a serenity error onto the platform error taxonomy.
pub fn platform_error(err: serenity::Error) -> PlatformError {
    if let serenity::Error::Http(http_err) = &err {
        match http_err.status_code().map(|code| code.as_u16()) {
            Some(403) => return PlatformError::Forbidden(err.to_string()),
            Some(404) => return PlatformError::NotFound(err.to_string()),
            _ => {}
        }
    }
    PlatformError::Request(err.to_string())
}
