pub mod check;
pub mod generate;
pub mod helper;
pub mod init;
