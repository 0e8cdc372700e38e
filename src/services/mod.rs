pub mod fallback_plan_service;
pub mod gemini_service;
pub mod generation_error;
pub mod plan_generation_service;
pub mod plan_validation;
pub mod prompt_service;
pub mod response_extraction;
