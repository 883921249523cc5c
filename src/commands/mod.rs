//! CLI commands for examforge

pub mod allocate;
pub mod dispatch;
pub mod doctor;
pub mod generate;
pub mod helpers;
pub mod init;
pub mod session;
pub mod show;
