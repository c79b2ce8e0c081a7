//! Integration tests for the seedconf provisioning pipeline

mod datasource_contract;
mod synthesis_pipeline;
mod template_resolution;
