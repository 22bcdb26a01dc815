pub mod brain_model;
pub mod report;
