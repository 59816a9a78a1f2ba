pub mod check_config;
pub mod notify;
pub mod serve;
