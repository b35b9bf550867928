pub mod capture_session;
pub mod infrastructure;
pub mod session_config;
pub mod session_logger;
