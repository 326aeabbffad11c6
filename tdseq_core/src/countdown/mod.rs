pub mod countdown;
pub mod countdown_config;
pub mod countdown_list;
