//! App-setting matchers. Consulted only when no document action matched.

use super::Command;
use crate::actions::Action;

const THEMES: &[&str] = &["dark", "light", "blue", "green", "purple", "default"];
const LANGUAGES: &[&str] = &[
    "english", "spanish", "french", "german", "italian", "portuguese", "chinese", "japanese",
    "arabic", "hindi",
];
const OFF_WORDS: &[&str] = &["off", "disable", "disabled", "stop", "mute", "exit", "leave", "no"];

fn enabled(cmd: &Command) -> bool {
    !cmd.has_any_word(OFF_WORDS)
}

pub fn theme(cmd: &Command) -> Option<Action> {
    if !cmd.has_any_word(&["theme", "mode"]) {
        return None;
    }
    let theme = THEMES.iter().find(|t| cmd.has_word(t))?;
    Some(Action::ChangeTheme {
        theme: theme.to_string(),
    })
}

pub fn font_size(cmd: &Command) -> Option<Action> {
    if !cmd.has_any(&["font size", "font-size", "text size", "font"]) {
        return None;
    }
    let size = if cmd.has_any(&["extra large", "x-large", "huge"]) {
        "extra-large"
    } else if cmd.has_any_word(&["large", "larger", "bigger", "big", "increase"]) {
        "large"
    } else if cmd.has_any_word(&["small", "smaller", "decrease", "tiny"]) {
        "small"
    } else if cmd.has_any_word(&["medium", "normal", "default"]) {
        "medium"
    } else {
        return None;
    };
    Some(Action::ChangeFontSize {
        size: size.to_string(),
    })
}

pub fn language(cmd: &Command) -> Option<Action> {
    if !cmd.has_any_word(&["language", "locale"]) {
        return None;
    }
    let language = LANGUAGES.iter().find(|l| cmd.has_word(l))?;
    Some(Action::ChangeLanguage {
        language: language.to_string(),
    })
}

pub fn auto_save(cmd: &Command) -> Option<Action> {
    cmd.has_any(&["autosave", "auto-save", "auto save"])
        .then(|| Action::SetAutoSave {
            enabled: enabled(cmd),
        })
}

pub fn shortcuts(cmd: &Command) -> Option<Action> {
    cmd.has("shortcut").then_some(Action::ShowShortcuts)
}

pub fn file_history(cmd: &Command) -> Option<Action> {
    cmd.has_any(&["history", "recent files"])
        .then_some(Action::ShowFileHistory)
}

pub fn export_settings(cmd: &Command) -> Option<Action> {
    (cmd.has_word("export") && cmd.has("setting")).then_some(Action::ExportSettings)
}

pub fn import_settings(cmd: &Command) -> Option<Action> {
    (cmd.has_word("import") && cmd.has("setting")).then_some(Action::ImportSettings)
}

pub fn notifications(cmd: &Command) -> Option<Action> {
    cmd.has("notification").then(|| Action::SetNotifications {
        enabled: enabled(cmd),
    })
}

pub fn fullscreen(cmd: &Command) -> Option<Action> {
    cmd.has_any(&["fullscreen", "full screen", "full-screen"])
        .then(|| Action::SetFullscreen {
            enabled: enabled(cmd),
        })
}

pub fn help(cmd: &Command) -> Option<Action> {
    cmd.has_word("help").then_some(Action::ShowHelp)
}

pub fn about(cmd: &Command) -> Option<Action> {
    let asked = cmd.lower == "about"
        || (cmd.has_word("about") && cmd.has_any_word(&["show", "app", "version", "info"]));
    asked.then_some(Action::ShowAbout)
}

pub fn reset(cmd: &Command) -> Option<Action> {
    (cmd.has_word("reset") && cmd.has("setting")).then_some(Action::ResetSettings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(text: &str) -> Command {
        Command::new(text)
    }

    #[test]
    fn theme_needs_a_known_name() {
        assert_eq!(
            theme(&cmd("switch to dark mode")),
            Some(Action::ChangeTheme {
                theme: "dark".to_string()
            })
        );
        assert_eq!(theme(&cmd("change theme")), None);
    }

    #[test]
    fn font_size_words() {
        assert_eq!(
            font_size(&cmd("make the font size bigger")),
            Some(Action::ChangeFontSize {
                size: "large".to_string()
            })
        );
        assert_eq!(
            font_size(&cmd("font size extra large")),
            Some(Action::ChangeFontSize {
                size: "extra-large".to_string()
            })
        );
    }

    #[test]
    fn toggles_read_off_words() {
        assert_eq!(
            auto_save(&cmd("turn off autosave")),
            Some(Action::SetAutoSave { enabled: false })
        );
        assert_eq!(
            notifications(&cmd("enable notifications")),
            Some(Action::SetNotifications { enabled: true })
        );
        assert_eq!(
            fullscreen(&cmd("exit full screen")),
            Some(Action::SetFullscreen { enabled: false })
        );
    }

    #[test]
    fn display_requests() {
        assert_eq!(shortcuts(&cmd("show keyboard shortcuts")), Some(Action::ShowShortcuts));
        assert_eq!(export_settings(&cmd("export my settings")), Some(Action::ExportSettings));
        assert_eq!(reset(&cmd("reset settings")), Some(Action::ResetSettings));
        assert_eq!(about(&cmd("About")), Some(Action::ShowAbout));
        assert_eq!(about(&cmd("change about heading")), None);
        assert_eq!(language(&cmd("set language to Spanish")), Some(Action::ChangeLanguage {
            language: "spanish".to_string()
        }));
    }
}
