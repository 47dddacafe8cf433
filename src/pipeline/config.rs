//! Document configuration.
//!
//! ```toml
//! mouse_capture = true
//! alternate_screen = false
//! exit_on_ctrl_c = true
//! tab_focus = true
//! ```
//!
//! Missing keys take their defaults.

use serde::Deserialize;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocumentConfig {
    /// Ask the terminal for mouse reports.
    pub mouse_capture: bool,
    /// Draw on the alternate screen and leave the shell scrollback alone.
    pub alternate_screen: bool,
    /// Ctrl+C stops the run loop.
    pub exit_on_ctrl_c: bool,
    /// TAB and BACKTAB move focus.
    pub tab_focus: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            mouse_capture: true,
            alternate_screen: true,
            exit_on_ctrl_c: true,
            tab_focus: true,
        }
    }
}

impl DocumentConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }
}

// =============================================================================
// Tests
// =============================================================================
