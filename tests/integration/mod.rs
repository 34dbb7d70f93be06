mod batch_integration;
mod config_integration;
mod sql_integration;
mod tree_integration;
