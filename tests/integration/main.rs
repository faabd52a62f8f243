mod common;
mod health_test;
mod mock_endpoint_test;
