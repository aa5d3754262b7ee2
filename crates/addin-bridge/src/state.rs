use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Id the command is registered under; also how the host refers to it in
/// `ExecuteCommand` messages.
pub const COMMAND_ID: &str = "drawRoundedSquareCmd";
/// Button label.
pub const COMMAND_LABEL: &str = "Draw Rounded Square";
pub const COMMAND_TOOLTIP: &str =
    "Draw a rounded square centered on a selected point in a sketch";
/// Host toolbar panel the command's control is added to.
pub const PANEL_ID: &str = "SketchCreatePanel";

/// A command the add-in has registered with the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDefinition {
    pub id: String,
    pub label: String,
    pub tooltip: String,
}

/// A host toolbar panel and the command controls sitting in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolbarPanel {
    pub id: String,
    /// Command ids, in the order their controls were added.
    pub controls: Vec<String>,
}

/// Everything the add-in has contributed to the host, held explicitly so
/// startup and teardown are plain method calls instead of process-global
/// side effects.
#[derive(Debug, Clone)]
pub struct AddinState {
    pub definitions: Vec<CommandDefinition>,
    pub panel: ToolbarPanel,
}

impl AddinState {
    pub fn new() -> Self {
        Self {
            definitions: Vec::new(),
            panel: ToolbarPanel {
                id: PANEL_ID.to_string(),
                controls: Vec::new(),
            },
        }
    }

    /// Look up a registered command by id.
    pub fn command_definition(&self, id: &str) -> Option<&CommandDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }

    pub fn is_registered(&self) -> bool {
        self.command_definition(COMMAND_ID).is_some()
    }

    /// Add-in startup: create the command definition and drop a control for
    /// it into the sketch-create panel. Safe to call again after a host
    /// reload; existing registrations are left alone.
    #[instrument(skip(self))]
    pub fn register(&mut self) {
        if self.command_definition(COMMAND_ID).is_none() {
            self.definitions.push(CommandDefinition {
                id: COMMAND_ID.to_string(),
                label: COMMAND_LABEL.to_string(),
                tooltip: COMMAND_TOOLTIP.to_string(),
            });
            debug!(command_id = COMMAND_ID, "command definition created");
        }
        if !self.panel.controls.iter().any(|c| c == COMMAND_ID) {
            self.panel.controls.push(COMMAND_ID.to_string());
            debug!(panel_id = %self.panel.id, "panel control added");
        }
    }

    /// Add-in teardown: remove the control and the definition. A second
    /// call finds nothing to remove and does nothing.
    #[instrument(skip(self))]
    pub fn unregister(&mut self) {
        self.panel.controls.retain(|c| c != COMMAND_ID);
        self.definitions.retain(|d| d.id != COMMAND_ID);
        debug!(command_id = COMMAND_ID, "command unregistered");
    }
}

impl Default for AddinState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_creates_definition_and_control() {
        let mut state = AddinState::new();
        assert!(!state.is_registered());
        state.register();
        assert!(state.is_registered());
        let def = state.command_definition(COMMAND_ID).unwrap();
        assert_eq!(def.label, "Draw Rounded Square");
        assert_eq!(
            def.tooltip,
            "Draw a rounded square centered on a selected point in a sketch"
        );
        assert_eq!(state.panel.id, "SketchCreatePanel");
        assert_eq!(state.panel.controls, vec![COMMAND_ID.to_string()]);
    }

    #[test]
    fn register_twice_is_a_no_op() {
        let mut state = AddinState::new();
        state.register();
        state.register();
        assert_eq!(state.definitions.len(), 1);
        assert_eq!(state.panel.controls.len(), 1);
    }

    #[test]
    fn unregister_removes_everything_and_is_idempotent() {
        let mut state = AddinState::new();
        state.register();
        state.unregister();
        assert!(!state.is_registered());
        assert!(state.panel.controls.is_empty());
        state.unregister();
        assert!(state.definitions.is_empty());
    }

    #[test]
    fn register_after_unregister_works_again() {
        let mut state = AddinState::new();
        state.register();
        state.unregister();
        state.register();
        assert!(state.is_registered());
        assert_eq!(state.panel.controls.len(), 1);
    }
}
