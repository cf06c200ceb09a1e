pub mod command;
pub mod command_context;
pub mod error;
pub mod payloads;
pub mod request_id;
pub mod status_code;
pub mod world_commands;
