pub mod dirs;
pub mod files;
pub mod output;
