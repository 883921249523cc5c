mod allocate;
mod doctor;
mod generate;
mod init;
mod show;
pub mod support;
