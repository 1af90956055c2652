//! Integration tests for the report pipeline.

mod mock_source;
mod report_pipeline;
