pub mod init;
pub mod token;
