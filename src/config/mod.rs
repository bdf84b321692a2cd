#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

pub const DEFAULT_FLOW_NAME: &str = "data_flow";
pub const DEFAULT_API_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/posts";
pub const DEFAULT_OUTPUT_PATH: &str = "./artifacts";

#[cfg(feature = "cli")]
pub use cli::CliConfig;
