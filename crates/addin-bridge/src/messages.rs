use serde::{Deserialize, Serialize};

use crate::presets::PadPreset;
use crate::selection::SelectionRef;

/// Values gathered from the command dialog when the user commits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandInputs {
    /// Chosen fastener size. Hosts that omit it get the default.
    #[serde(default)]
    pub size: PadPreset,
    /// The selection set at commit time.
    pub selection: Vec<SelectionRef>,
}

/// Messages from the host application to the add-in.
/// Serialized as JSON for transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostToAddin {
    /// The user committed a command dialog.
    ExecuteCommand {
        command_id: String,
        inputs: CommandInputs,
    },
}

/// Messages from the add-in back to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AddinToHost {
    /// The profile was drawn and fully constrained.
    ProfileCreated { summary: ProfileSummary },

    /// The command could not run; `message` is what the host shows the user.
    Error { message: String },
}

/// What a finished profile looks like, for the host's status line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub size_label: String,
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
    pub edges: usize,
    pub fillets: usize,
}
