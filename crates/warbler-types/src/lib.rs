pub mod flash;
pub mod forms;
