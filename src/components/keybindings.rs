//! Keybinding system for context-aware keyboard shortcuts
//!
//! Provides a registry of keybindings that change with the current screen.
//! The same registry drives key dispatch, the nav bar and the help overlay,
//! so what is shown is always what works.

use crate::app::Screen;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NavigateUp,
    NavigateDown,
    Select,
    Increment,
    Decrement,
    Next,
    Back,
    NextField,
    PreviousField,
    /// Enter on the contact form: verify the number or get the estimate
    Submit,
    Resend,
    Cancel,
    Info,
    Help,
    Quit,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self::with_modifiers(key, KeyModifiers::NONE, action, display, description)
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    fn matches(&self, event: &KeyEvent) -> bool {
        if self.key != event.code {
            return false;
        }
        // Shift is implied by the character itself ('+', '?')
        let relevant = event.modifiers.difference(KeyModifiers::SHIFT);
        relevant == self.modifiers
    }
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    /// Screen-specific keybindings
    screen_bindings: HashMap<Screen, Vec<Keybinding>>,
    /// Available on every screen
    global_bindings: Vec<Keybinding>,
    /// Available on screens that do not take text input
    plain_key_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            screen_bindings: HashMap::new(),
            global_bindings: Vec::new(),
            plain_key_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    fn register_defaults(&mut self) {
        self.global_bindings = vec![
            Keybinding::with_modifiers(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyAction::Quit,
                "Ctrl+C",
                "Quit",
            ),
            Keybinding::new(KeyCode::F(1), KeyAction::Help, "F1", "Help"),
        ];

        // Printable shortcuts would swallow typed text on the form screens
        self.plain_key_bindings = vec![
            Keybinding::new(KeyCode::Char('i'), KeyAction::Info, "I", "Know more"),
            Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
            Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
        ];

        let step_nav = [
            Keybinding::new(KeyCode::Char('n'), KeyAction::Next, "N", "Next"),
            Keybinding::new(KeyCode::Tab, KeyAction::Next, "Tab", "Next"),
            Keybinding::new(KeyCode::Char('b'), KeyAction::Back, "B", "Previous"),
            Keybinding::new(KeyCode::Esc, KeyAction::Back, "Esc", "Previous"),
        ];

        let mut configuration = vec![
            Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Navigate up"),
            Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Navigate down"),
            Keybinding::new(KeyCode::Char('k'), KeyAction::NavigateUp, "K", "Navigate up"),
            Keybinding::new(KeyCode::Char('j'), KeyAction::NavigateDown, "J", "Navigate down"),
            Keybinding::new(KeyCode::Enter, KeyAction::Select, "Enter", "Choose"),
            Keybinding::new(KeyCode::Char(' '), KeyAction::Select, "Space", "Choose"),
        ];
        configuration.extend(step_nav.iter().cloned());
        self.screen_bindings.insert(Screen::Configuration, configuration);

        let mut rooms = vec![
            Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Navigate up"),
            Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Navigate down"),
            Keybinding::new(KeyCode::Char('k'), KeyAction::NavigateUp, "K", "Navigate up"),
            Keybinding::new(KeyCode::Char('j'), KeyAction::NavigateDown, "J", "Navigate down"),
            Keybinding::new(KeyCode::Right, KeyAction::Increment, "Right", "Add one"),
            Keybinding::new(KeyCode::Char('+'), KeyAction::Increment, "+", "Add one"),
            Keybinding::new(KeyCode::Left, KeyAction::Decrement, "Left", "Remove one"),
            Keybinding::new(KeyCode::Char('-'), KeyAction::Decrement, "-", "Remove one"),
            Keybinding::new(KeyCode::Enter, KeyAction::Next, "Enter", "Next"),
        ];
        rooms.extend(step_nav.iter().cloned());
        self.screen_bindings.insert(Screen::Rooms, rooms);

        let mut package = vec![
            Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Navigate up"),
            Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Navigate down"),
            Keybinding::new(KeyCode::Char('k'), KeyAction::NavigateUp, "K", "Navigate up"),
            Keybinding::new(KeyCode::Char('j'), KeyAction::NavigateDown, "J", "Navigate down"),
            Keybinding::new(KeyCode::Enter, KeyAction::Select, "Enter", "Choose"),
            Keybinding::new(KeyCode::Char(' '), KeyAction::Select, "Space", "Choose"),
        ];
        package.extend(step_nav.iter().cloned());
        self.screen_bindings.insert(Screen::Package, package);

        self.screen_bindings.insert(
            Screen::Contact,
            vec![
                Keybinding::new(KeyCode::Down, KeyAction::NextField, "Down", "Next field"),
                Keybinding::new(KeyCode::Tab, KeyAction::NextField, "Tab", "Next field"),
                Keybinding::new(KeyCode::Up, KeyAction::PreviousField, "Up", "Previous field"),
                Keybinding::new(KeyCode::BackTab, KeyAction::PreviousField, "S-Tab", "Previous field"),
                Keybinding::new(KeyCode::Enter, KeyAction::Submit, "Enter", "Verify / Get estimate"),
                Keybinding::new(KeyCode::Esc, KeyAction::Back, "Esc", "Previous"),
                Keybinding::new(KeyCode::F(2), KeyAction::Info, "F2", "Privacy & terms"),
            ],
        );

        self.screen_bindings.insert(
            Screen::CodePrompt,
            vec![
                Keybinding::new(KeyCode::Enter, KeyAction::Submit, "Enter", "Verify"),
                Keybinding::new(KeyCode::Char('r'), KeyAction::Resend, "R", "Resend OTP"),
                Keybinding::new(KeyCode::Esc, KeyAction::Cancel, "Esc", "Close"),
            ],
        );

        self.screen_bindings.insert(
            Screen::Results,
            vec![Keybinding::new(KeyCode::Enter, KeyAction::Quit, "Enter", "Finish")],
        );
    }

    /// Get keybindings for a screen (includes global bindings)
    pub fn get_bindings(&self, screen: Screen) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();

        if let Some(screen_bindings) = self.screen_bindings.get(&screen) {
            bindings.extend(screen_bindings.iter());
        }
        if !screen.takes_text() {
            bindings.extend(self.plain_key_bindings.iter());
        }
        bindings.extend(self.global_bindings.iter());

        bindings
    }

    /// Resolve a key event on `screen` to an action.
    pub fn action_for(&self, screen: Screen, event: &KeyEvent) -> Option<KeyAction> {
        self.get_bindings(screen)
            .into_iter()
            .find(|b| b.matches(event))
            .map(|b| b.action)
    }

    /// Get navigation bar items for display
    pub fn get_nav_items(&self, screen: Screen) -> Vec<NavBarItem> {
        let bindings = self.get_bindings(screen);

        let priority_actions: &[KeyAction] = match screen {
            Screen::Configuration | Screen::Package => &[
                KeyAction::NavigateUp,
                KeyAction::Select,
                KeyAction::Next,
                KeyAction::Back,
                KeyAction::Info,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            Screen::Rooms => &[
                KeyAction::NavigateUp,
                KeyAction::Increment,
                KeyAction::Decrement,
                KeyAction::Next,
                KeyAction::Back,
                KeyAction::Info,
                KeyAction::Quit,
            ],
            Screen::Contact => &[
                KeyAction::NextField,
                KeyAction::Submit,
                KeyAction::Back,
                KeyAction::Info,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            Screen::CodePrompt => &[
                KeyAction::Submit,
                KeyAction::Resend,
                KeyAction::Cancel,
                KeyAction::Quit,
            ],
            Screen::Results => &[KeyAction::Quit],
        };

        let mut items: Vec<NavBarItem> = Vec::new();
        for action in priority_actions {
            if *action == KeyAction::NavigateUp {
                items.push(NavBarItem {
                    key_display: "Up/Dn".to_string(),
                    action_label: "Navigate".to_string(),
                });
                continue;
            }
            if let Some(binding) = bindings.iter().find(|b| b.action == *action) {
                items.push(NavBarItem {
                    key_display: binding.display.clone(),
                    action_label: binding.description.clone(),
                });
            }
        }

        items
    }

    /// Get full help content for a screen (for help overlay)
    pub fn get_help_content(&self, screen: Screen) -> Vec<HelpSection> {
        let groups: [(&str, &[KeyAction]); 3] = [
            (
                "Navigation",
                &[
                    KeyAction::NavigateUp,
                    KeyAction::NavigateDown,
                    KeyAction::NextField,
                    KeyAction::PreviousField,
                    KeyAction::Next,
                    KeyAction::Back,
                ],
            ),
            (
                "Actions",
                &[
                    KeyAction::Select,
                    KeyAction::Increment,
                    KeyAction::Decrement,
                    KeyAction::Submit,
                    KeyAction::Resend,
                    KeyAction::Cancel,
                ],
            ),
            ("General", &[KeyAction::Info, KeyAction::Help, KeyAction::Quit]),
        ];

        let bindings = self.get_bindings(screen);
        groups
            .iter()
            .filter_map(|(title, actions)| {
                let items: Vec<(String, String)> = bindings
                    .iter()
                    .filter(|b| actions.contains(&b.action))
                    .map(|b| (b.display.clone(), b.description.clone()))
                    .collect();
                (!items.is_empty()).then(|| HelpSection {
                    title: title.to_string(),
                    items,
                })
            })
            .collect()
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

/// Help section for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}
