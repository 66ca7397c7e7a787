pub mod functions_api;
pub mod functions_client;
pub mod memory_store;

pub use functions_api::FunctionsApi;
pub use functions_client::FunctionsApiClient;
pub use memory_store::InMemoryFunctionsApi;
