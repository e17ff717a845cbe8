pub mod estimator;
pub mod orchestrator;
pub mod page_processor;
pub mod report;
