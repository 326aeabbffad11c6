pub mod setup;
pub mod setup_config;
pub mod setup_list;
