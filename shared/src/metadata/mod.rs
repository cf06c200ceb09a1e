pub mod command_meta_data;
pub mod payload_store;
