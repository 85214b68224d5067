//! Keyboard shortcut registry.

use serde::{Deserialize, Serialize};

/// Modifier key state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Editor command a shortcut triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    SelectAll,
    Group,
    Ungroup,
    ToggleLock,
    Copy,
    Paste,
    Duplicate,
    Delete,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    /// Requires the command modifier (Ctrl or Cmd).
    pub command_key: bool,
    pub shift: bool,
    pub command: Command,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        command_key: bool,
        shift: bool,
        command: Command,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            command_key,
            shift,
            command,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Mod+Shift+G").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.command_key {
            parts.push("Mod");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    fn matches(&self, key: &str, modifiers: Modifiers) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.command_key == modifiers.command()
            && self.shift == modifiers.shift
            && !modifiers.alt
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("A", true, false, Command::SelectAll, "Select all elements"),
            Shortcut::new("G", true, false, Command::Group, "Group selected elements"),
            Shortcut::new("G", true, true, Command::Ungroup, "Ungroup selected elements"),
            Shortcut::new("L", true, false, Command::ToggleLock, "Lock or unlock selection"),
            Shortcut::new("C", true, false, Command::Copy, "Copy element"),
            Shortcut::new("V", true, false, Command::Paste, "Paste element"),
            Shortcut::new("D", true, false, Command::Duplicate, "Duplicate selection"),
            Shortcut::new("Delete", false, false, Command::Delete, "Delete selected elements"),
            Shortcut::new("Backspace", false, false, Command::Delete, "Delete selected elements"),
        ]
    }

    /// Command bound to a key press.
    ///
    /// Returns None while focus is inside a text-editing control so typing
    /// never triggers editor commands.
    pub fn resolve(key: &str, modifiers: Modifiers, text_focus: bool) -> Option<Command> {
        if text_focus {
            return None;
        }
        Self::all()
            .into_iter()
            .find(|s| s.matches(key, modifiers))
            .map(|s| s.command)
    }

    /// Shortcut table as printable lines.
    pub fn table() -> Vec<String> {
        Self::all()
            .iter()
            .map(|s| format!("{:20} {}", s.format(), s.description))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl() -> Modifiers {
        Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        }
    }

    #[test]
    fn test_resolve_commands() {
        assert_eq!(ShortcutRegistry::resolve("a", ctrl(), false), Some(Command::SelectAll));
        assert_eq!(ShortcutRegistry::resolve("G", ctrl(), false), Some(Command::Group));
        let ctrl_shift = Modifiers { shift: true, ..ctrl() };
        assert_eq!(ShortcutRegistry::resolve("g", ctrl_shift, false), Some(Command::Ungroup));
        assert_eq!(ShortcutRegistry::resolve("Delete", Modifiers::NONE, false), Some(Command::Delete));
        assert_eq!(ShortcutRegistry::resolve("Backspace", Modifiers::NONE, false), Some(Command::Delete));
    }

    #[test]
    fn test_meta_is_command_key() {
        let cmd = Modifiers {
            meta: true,
            ..Modifiers::NONE
        };
        assert_eq!(ShortcutRegistry::resolve("l", cmd, false), Some(Command::ToggleLock));
    }

    #[test]
    fn test_text_focus_suppresses() {
        assert_eq!(ShortcutRegistry::resolve("a", ctrl(), true), None);
        assert_eq!(ShortcutRegistry::resolve("Delete", Modifiers::NONE, true), None);
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(ShortcutRegistry::resolve("a", Modifiers::NONE, false), None);
        assert_eq!(ShortcutRegistry::resolve("Delete", ctrl(), false), None);
    }

    #[test]
    fn test_format() {
        let ungroup = ShortcutRegistry::all()
            .into_iter()
            .find(|s| s.command == Command::Ungroup)
            .unwrap();
        assert_eq!(ungroup.format(), "Mod+Shift+G");
    }
}
