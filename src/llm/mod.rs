pub mod llm_interface;
pub mod http_client;
pub mod openai_compatible_llm;
pub mod ollama_llm;
pub mod llama_cpp_llm;
pub mod llm_factory;

pub use llm_interface::*;
pub use llm_factory::*;
