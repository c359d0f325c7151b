pub mod agents;
pub mod config_cmd;
pub mod search;
pub mod status;
pub mod tools;
