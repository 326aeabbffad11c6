pub mod td_config;
