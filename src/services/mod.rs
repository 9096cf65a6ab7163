pub mod model_selection;
pub mod ollama;
pub mod session_manager;
