//! User-facing texts and menu payloads.
//!
//! All labels are Polish; the bot ships a single fixed label set.

use std::time::Duration;

use datebot_types::event::{CONFIG_DONE_ID, CONFIG_NOT_DONE_ID, SELECT_MONTH_ID, day_menu_id};
use datebot_types::ids::UserId;
use datebot_types::month::Month;
use datebot_types::outbound::{
    ActionRow, Button, ButtonStyle, MenuOption, OutboundMessage, SelectMenu,
};
use datebot_types::selection::NONE_VALUE;

use crate::calendar;

pub const PICK_REAL_MONTH: &str = "Proszę wybrać miesiąc z listy, aby kontynuować.";
pub const SELECTION_LOST: &str = "Błąd: Nie znaleziono zapisanego miesiąca. Spróbuj ponownie.";
pub const CONFIG_COMPLETE: &str = "Konfiguracja zakończona! Rola została usunięta.";
pub const GENERIC_FAILURE: &str =
    "Wystąpił błąd podczas obsługi Twojej interakcji. Spróbuj ponownie.";
pub const SET_FORMAT_ERROR: &str =
    "❌ Niepoprawny format! Użyj `/set date:MM/DD time_zone:Europe/Warsaw`.";

const MONTH_PLACEHOLDER: &str = "Wybierz miesiąc";
const DAY_PLACEHOLDER: &str = "Wybierz dzień";

/// The month menu posted in reply to `!start`.
pub fn month_menu() -> OutboundMessage {
    let neutral = MenuOption {
        label: MONTH_PLACEHOLDER.to_string(),
        description: "Nie wybiera żadnego miesiąca".to_string(),
        value: NONE_VALUE.to_string(),
        default: true,
    };
    let options = std::iter::once(neutral)
        .chain(Month::all().map(|month| MenuOption {
            label: month.name().to_string(),
            description: format!("Wybierz {}", month.name()),
            value: month.number().to_string(),
            default: false,
        }))
        .collect();

    OutboundMessage::text("Wybierz miesiąc, a potem dzień:").with_row(ActionRow::SelectMenu(
        SelectMenu {
            custom_id: SELECT_MONTH_ID.to_string(),
            placeholder: MONTH_PLACEHOLDER.to_string(),
            options,
        },
    ))
}

fn day_menu(days_in_month: u32, page: u32) -> ActionRow {
    ActionRow::SelectMenu(SelectMenu {
        custom_id: day_menu_id(page),
        placeholder: DAY_PLACEHOLDER.to_string(),
        options: calendar::day_options(days_in_month, page)
            .into_iter()
            .map(MenuOption::from)
            .collect(),
    })
}

/// First day page, sent right after a month pick.
pub fn month_chosen(month: Month, days_in_month: u32) -> OutboundMessage {
    OutboundMessage::ephemeral(format!(
        "Wybrałeś miesiąc: {}. Teraz wybierz dzień:",
        month.number()
    ))
    .with_row(day_menu(days_in_month, 1))
}

/// A day page shown while paging.
pub fn day_page(days_in_month: u32, page: u32) -> OutboundMessage {
    OutboundMessage::ephemeral(format!("Strona {page}: Wybierz dzień:"))
        .with_row(day_menu(days_in_month, page))
}

/// The `/set` command line the user is asked to paste.
pub fn set_command_line(month: Month, day: u32, time_zone: &str) -> String {
    format!(
        "/set date:{} time_zone:{time_zone}",
        calendar::format_month_day(month, day)
    )
}

/// Reply carrying the copyable `/set` command.
pub fn set_command(month: Month, day: u32, time_zone: &str) -> OutboundMessage {
    OutboundMessage::ephemeral(format!(
        "```{}```\n **Wklej ją poniżej i wyślij!**",
        set_command_line(month, day, time_zone)
    ))
}

pub fn invalid_day(days_in_month: u32) -> OutboundMessage {
    OutboundMessage::ephemeral(format!(
        "Niepoprawny dzień. Wybierz dzień od 1 do {days_in_month}."
    ))
}

/// Prompt asking whether the user finished configuring.
pub fn nudge(user_id: UserId) -> OutboundMessage {
    OutboundMessage::ephemeral(format!(
        "Hej, {}! Czy zakończyłeś konfigurację?",
        user_id.mention()
    ))
    .with_row(ActionRow::Buttons {
        buttons: vec![
            Button {
                custom_id: CONFIG_DONE_ID.to_string(),
                label: "Tak".to_string(),
                style: ButtonStyle::Success,
            },
            Button {
                custom_id: CONFIG_NOT_DONE_ID.to_string(),
                label: "Nie".to_string(),
                style: ButtonStyle::Danger,
            },
        ],
    })
}

pub fn waiting(delay: Duration) -> OutboundMessage {
    OutboundMessage::ephemeral(format!(
        "Poczekam kolejne {} sekund. Daj znać, gdy zakończysz.",
        delay.as_secs()
    ))
}

pub fn set_success(date: &str, time_zone: &str) -> OutboundMessage {
    OutboundMessage::text(format!(
        "✅ Ustawiono datę na **{date}** i strefę czasową na **{time_zone}**."
    ))
}
