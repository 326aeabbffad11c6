pub mod enums;
pub mod td_exception;
pub mod time;
pub mod utils;
