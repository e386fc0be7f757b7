pub mod init;
pub mod report;
