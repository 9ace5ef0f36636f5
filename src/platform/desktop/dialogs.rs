use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

/// Blocking yes/no confirmation for destructive actions.
pub fn confirm(title: &str, description: &str) -> bool {
    let result = MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title(title)
        .set_description(description)
        .set_buttons(MessageButtons::YesNo)
        .show();
    matches!(result, MessageDialogResult::Yes)
}

