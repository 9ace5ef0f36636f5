pub mod dialogs;
pub mod dirs;
