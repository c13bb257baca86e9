pub mod assembler;
pub mod classifier;
pub mod image_service;
pub mod model_service;
pub mod prompts;
pub mod quota_service;
pub mod trip_service;
