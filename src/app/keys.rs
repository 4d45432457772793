//! Keyboard bindings.
//!
//! | Keys                        | Event                          |
//! |-----------------------------|--------------------------------|
//! | `Esc`                       | [`Event::Dismiss`]             |
//! | `Down`, `j`, `Ctrl+n`       | [`Event::FocusNext`]           |
//! | `Up`, `k`, `Ctrl+p`         | [`Event::FocusPrevious`]       |
//! | `Home`, `g`                 | [`Event::FocusFirst`]          |
//! | `End`, `G`                  | [`Event::FocusLast`]           |
//! | `Enter`, `Space`            | [`Event::ActivateFocused`]     |
//! | `Left`, `h`, `Backspace`    | [`Event::Back`]                |

use super::handler::Event;
use zellij_tile::prelude::{BareKey, KeyModifier, KeyWithModifier};

/// Maps a key press to a menu event, or `None` for unbound keys.
#[must_use]
pub fn map_key(key: &KeyWithModifier) -> Option<Event> {
    if key.has_modifiers(&[KeyModifier::Ctrl]) {
        return match key.bare_key {
            BareKey::Char('n') => Some(Event::FocusNext),
            BareKey::Char('p') => Some(Event::FocusPrevious),
            _ => None,
        };
    }

    Some(match key.bare_key {
        BareKey::Esc => Event::Dismiss,
        BareKey::Down | BareKey::Char('j') => Event::FocusNext,
        BareKey::Up | BareKey::Char('k') => Event::FocusPrevious,
        BareKey::Home | BareKey::Char('g') => Event::FocusFirst,
        BareKey::End | BareKey::Char('G') => Event::FocusLast,
        BareKey::Enter | BareKey::Char(' ') => Event::ActivateFocused,
        BareKey::Left | BareKey::Char('h') | BareKey::Backspace => Event::Back,
        _ => return None,
    })
}
