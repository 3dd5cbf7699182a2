//! Input processing module
//! Handles document formats, text extraction, and input management

pub mod document;
pub mod file_detector;
pub mod manager;
pub mod text_extractor;

pub use document::{AnalysisRequest, Document, JobDescription};
pub use manager::InputManager;
