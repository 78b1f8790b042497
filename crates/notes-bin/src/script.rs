//! Action script tokens accepted on the command line.
//!
//! | token              | action                         |
//! |--------------------|--------------------------------|
//! | `indent-right`     | `IndentRight`                  |
//! | `indent-left`      | `IndentLeft`                   |
//! | `ordered`          | `ToggleOrderedList`            |
//! | `unordered`        | `ToggleUnorderedList`          |
//! | `bold` / `italic`  | trait toggles                  |
//! | `underline`        | `ToggleUnderline`              |
//! | `strike`           | `ToggleStrikethrough`          |
//! | `font+` / `font-`  | font size step                 |
//! | `family:NAME`      | `ApplyFontFamily`              |
//! | `color:RRGGBB`     | `SetTextColor`                 |
//! | `highlight:RRGGBB` | `SetHighlightColor` (`clear`)  |
//! | `select:LOC:LEN`   | `Select`                       |
//! | `caret:LOC`        | `Select` with zero length      |
//! | `type:TEXT`        | `InsertText` (`\n` = newline)  |
//! | `delete`           | `DeleteBackward`               |
//! | `undo` / `redo`    | history                        |

use anyhow::{Context, Result, anyhow, bail};
use core_actions::Action;
use core_text::{Color, TextRange};

pub fn parse_action(token: &str) -> Result<Action> {
    let action = match token {
        "indent-right" => Action::IndentRight,
        "indent-left" => Action::IndentLeft,
        "ordered" => Action::ToggleOrderedList,
        "unordered" => Action::ToggleUnorderedList,
        "bold" => Action::ToggleBold,
        "italic" => Action::ToggleItalic,
        "underline" => Action::ToggleUnderline,
        "strike" => Action::ToggleStrikethrough,
        "font+" => Action::IncreaseFontSize,
        "font-" => Action::DecreaseFontSize,
        "delete" => Action::DeleteBackward,
        "undo" => Action::Undo,
        "redo" => Action::Redo,
        _ => return parse_with_argument(token),
    };
    Ok(action)
}

fn parse_with_argument(token: &str) -> Result<Action> {
    let (name, arg) = token
        .split_once(':')
        .ok_or_else(|| anyhow!("unknown action `{token}`"))?;
    let action = match name {
        "family" if !arg.is_empty() => Action::ApplyFontFamily(arg.to_string()),
        "color" => Action::SetTextColor(parse_color(arg)?),
        "highlight" if arg.eq_ignore_ascii_case("clear") => Action::SetHighlightColor(Color::CLEAR),
        "highlight" => Action::SetHighlightColor(parse_color(arg)?),
        "caret" => Action::Select(TextRange::caret(parse_index(arg)?)),
        "select" => {
            let (loc, len) = arg
                .split_once(':')
                .ok_or_else(|| anyhow!("expected select:LOC:LEN, got `{token}`"))?;
            Action::Select(TextRange::new(parse_index(loc)?, parse_index(len)?))
        }
        "type" => Action::InsertText(arg.replace("\\n", "\n")),
        _ => bail!("unknown action `{token}`"),
    };
    Ok(action)
}

fn parse_index(s: &str) -> Result<usize> {
    s.parse::<usize>()
        .with_context(|| format!("invalid index `{s}`"))
}

fn parse_color(s: &str) -> Result<Color> {
    let hex = s.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        bail!("expected RRGGBB color, got `{s}`");
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).with_context(|| format!("invalid color `{s}`"))
    };
    Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
}
