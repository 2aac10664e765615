use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum KeyCommand {
    Quit,
    OpenLocationInput,
    Refresh,
    SetFahrenheit,
    SetCelsius,
    EnterPortal(usize),
    ExitPortal,
    ZoomIn,
    ZoomOut,
}

pub(super) fn is_location_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, ' ' | '-' | '\'' | '’' | ',' | '.')
}

pub(super) fn command_char(key: KeyEvent) -> Option<char> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
    {
        return None;
    }
    if let KeyCode::Char(ch) = key.code {
        Some(ch.to_ascii_lowercase())
    } else {
        None
    }
}

pub(super) fn command_from_char(cmd: char) -> Option<KeyCommand> {
    const KEY_COMMANDS: [(char, KeyCommand); 11] = [
        ('q', KeyCommand::Quit),
        ('l', KeyCommand::OpenLocationInput),
        ('r', KeyCommand::Refresh),
        ('f', KeyCommand::SetFahrenheit),
        ('c', KeyCommand::SetCelsius),
        ('0', KeyCommand::ExitPortal),
        ('1', KeyCommand::EnterPortal(0)),
        ('2', KeyCommand::EnterPortal(1)),
        ('3', KeyCommand::EnterPortal(2)),
        ('+', KeyCommand::ZoomIn),
        ('-', KeyCommand::ZoomOut),
    ];

    KEY_COMMANDS
        .iter()
        .find_map(|(target, action)| (*target == cmd).then_some(*action))
        .or_else(|| (cmd == '=').then_some(KeyCommand::ZoomIn))
}
