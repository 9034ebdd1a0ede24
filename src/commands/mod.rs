pub mod common;
pub mod edit;
pub mod export;
pub mod history;
pub mod init;
pub mod log;
pub mod report;
pub mod school;
pub mod stages;
