//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Backend worker stopped; restart the app to resume updates".to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;

    use super::*;

    #[test]
    fn queued_command_leaves_status_alone() {
        let (tx, rx) = bounded(1);
        let mut status = String::from("ok");

        dispatch_backend_command(&tx, BackendCommand::RefreshNow, &mut status);

        assert_eq!(status, "ok");
        assert_eq!(rx.try_recv(), Ok(BackendCommand::RefreshNow));
    }

    #[test]
    fn full_and_disconnected_queues_report_status() {
        let (tx, rx) = bounded(1);
        let mut status = String::new();

        dispatch_backend_command(&tx, BackendCommand::RefreshNow, &mut status);
        dispatch_backend_command(&tx, BackendCommand::RefreshNow, &mut status);
        assert!(status.contains("full"));

        drop(rx);
        dispatch_backend_command(&tx, BackendCommand::RefreshNow, &mut status);
        assert!(status.contains("stopped"));
    }
}
