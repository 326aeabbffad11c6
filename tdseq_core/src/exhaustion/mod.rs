pub mod exhaustion_config;
pub mod exhaustion_list;
