//! Centralized theme and styling for the TUI
//!
//! Single source of truth for the colors, styles and fixed strings used by
//! the wizard screens.
//!
//! # Usage
//! ```rust
//! use quotewizard::theme::{Colors, Styles, Theme};
//! use ratatui::style::Style;
//!
//! let style = Style::default().fg(Colors::PRIMARY);
//! let title_style = Styles::title();
//! let step_style = Theme::step_style(true, false);
//! ```

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Core color palette. Components should not hardcode colors.
pub struct Colors;

impl Colors {
    // -------------------------------------------------------------------------
    // Base Colors
    // -------------------------------------------------------------------------

    /// Dark background for overlays
    pub const BG_PRIMARY: Color = Color::Rgb(20, 20, 30);

    pub const BG_OVERLAY: Color = Color::Rgb(30, 30, 40);

    pub const FG_PRIMARY: Color = Color::White;

    pub const FG_SECONDARY: Color = Color::Gray;

    /// Disabled controls, e.g. a counter button at its bound
    pub const FG_MUTED: Color = Color::DarkGray;

    // -------------------------------------------------------------------------
    // Accent Colors
    // -------------------------------------------------------------------------

    /// Brand accent (the studio's yellow)
    pub const PRIMARY: Color = Color::Yellow;

    pub const SECONDARY: Color = Color::Cyan;

    // -------------------------------------------------------------------------
    // Semantic Colors
    // -------------------------------------------------------------------------

    pub const SUCCESS: Color = Color::Green;

    pub const WARNING: Color = Color::LightYellow;

    pub const ERROR: Color = Color::Red;

    pub const INFO: Color = Color::LightBlue;

    // -------------------------------------------------------------------------
    // UI Element Colors
    // -------------------------------------------------------------------------

    pub const BORDER_ACTIVE: Color = Color::Yellow;

    pub const BORDER_INACTIVE: Color = Color::DarkGray;

    pub const SELECTED_BG: Color = Color::Yellow;

    /// Text on the selected background
    pub const SELECTED_FG: Color = Color::Black;

    pub const NAV_HINT: Color = Color::DarkGray;

    // -------------------------------------------------------------------------
    // Stepper Colors
    // -------------------------------------------------------------------------

    pub const STEP_ACTIVE: Color = Color::Yellow;

    pub const STEP_COMPLETE: Color = Color::Green;

    pub const STEP_PENDING: Color = Color::Gray;
}

// =============================================================================
// PRE-BUILT STYLES
// =============================================================================

/// Pre-built styles for common UI patterns
pub struct Styles;

impl Styles {
    pub fn text() -> Style {
        Style::default().fg(Colors::FG_PRIMARY)
    }

    pub fn text_muted() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    pub fn text_secondary() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    /// Screen headings
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_active() -> Style {
        Style::default().fg(Colors::BORDER_ACTIVE)
    }

    pub fn border_inactive() -> Style {
        Style::default().fg(Colors::BORDER_INACTIVE)
    }

    pub fn overlay_bg() -> Style {
        Style::default().bg(Colors::BG_OVERLAY).fg(Colors::FG_PRIMARY)
    }

    /// Cursor row in lists
    pub fn selected() -> Style {
        Style::default()
            .fg(Colors::SELECTED_FG)
            .bg(Colors::SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// A choice the user has made (not necessarily under the cursor)
    pub fn chosen() -> Style {
        Style::default()
            .fg(Colors::SUCCESS)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(Colors::SUCCESS)
    }

    pub fn warning() -> Style {
        Style::default().fg(Colors::WARNING)
    }

    pub fn error() -> Style {
        Style::default().fg(Colors::ERROR)
    }

    pub fn info() -> Style {
        Style::default().fg(Colors::INFO)
    }

    pub fn key_hint() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn nav_hint() -> Style {
        Style::default().fg(Colors::NAV_HINT)
    }
}

// =============================================================================
// SEMANTIC HELPERS
// =============================================================================

pub struct Theme;

impl Theme {
    /// Style for one entry of the progress stepper
    pub fn step_style(completed: bool, active: bool) -> Style {
        if active {
            Style::default()
                .fg(Colors::STEP_ACTIVE)
                .add_modifier(Modifier::BOLD)
        } else if completed {
            Style::default().fg(Colors::STEP_COMPLETE)
        } else {
            Style::default().fg(Colors::STEP_PENDING)
        }
    }

    /// Counter button style; muted when the bound is reached
    pub fn counter_button(enabled: bool) -> Style {
        if enabled {
            Styles::key_hint()
        } else {
            Styles::text_muted()
        }
    }
}

// =============================================================================
// LAYOUT CONSTANTS
// =============================================================================

pub struct UiConstants;

impl UiConstants {
    pub const HEADER_HEIGHT: u16 = 4;

    pub const NAV_BAR_HEIGHT: u16 = 1;

    pub const STATUS_BAR_HEIGHT: u16 = 1;

    pub const OVERLAY_WIDTH_PCT: u16 = 60;

    pub const OVERLAY_MIN_WIDTH: u16 = 40;

    pub const OVERLAY_MAX_WIDTH: u16 = 76;
}

// =============================================================================
// FIXED TEXT
// =============================================================================

pub struct UiText;

impl UiText {
    pub const APP_TITLE: &'static str = "ARTIZAN STUDIO  ·  INTERIOR COST ESTIMATE";
    pub const KNOW_MORE: &'static str = "To know more about this, press [i]";
    pub const CONTACT_SUBTITLE: &'static str = "Tailor your space with your ideal configuration";
    pub const RESEND_HINT: &'static str = "Didn't receive the code?";
    pub const SENDING: &'static str = "Sending...";
    pub const VERIFYING: &'static str = "Verifying...";
    pub const SUBMITTED: &'static str = "Thank you! Your estimate request has been submitted.";
}
