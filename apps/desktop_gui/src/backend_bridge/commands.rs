//! UI -> backend command definitions.

use client_core::Control;
use shared::{FilterParams, SortKey};

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    SetFilter(FilterParams),
    SetSort(SortKey),
    RefreshNow,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::SetFilter(_) => "set_filter",
            BackendCommand::SetSort(_) => "set_sort",
            BackendCommand::RefreshNow => "refresh_now",
        }
    }
}

impl From<BackendCommand> for Control {
    fn from(cmd: BackendCommand) -> Self {
        match cmd {
            BackendCommand::SetFilter(filter) => Control::SetFilter(filter),
            BackendCommand::SetSort(sort) => Control::SetSort(sort),
            BackendCommand::RefreshNow => Control::RefreshNow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_map_onto_scheduler_controls() {
        assert_eq!(
            Control::from(BackendCommand::SetSort(SortKey::Depth)),
            Control::SetSort(SortKey::Depth)
        );
        assert_eq!(Control::from(BackendCommand::RefreshNow), Control::RefreshNow);
        assert_eq!(BackendCommand::SetFilter(FilterParams::default()).name(), "set_filter");
    }
}
