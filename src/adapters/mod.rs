pub mod api_handler;
pub mod health_handler;
pub mod interface_parser;
pub mod mock_generator;
pub mod project_manager;

#[cfg(test)]
mod project_manager_test;
