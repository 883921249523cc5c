//! Per-competency selection: eligible topics, topic sampling, question picking

pub mod eligibility;
pub mod picker;
pub mod sampler;

pub use eligibility::{EligibilityFilter, TopicLevelCounts};
pub use picker::QuestionPicker;
pub use sampler::{Shortfall, TopicSample, TopicSampler};
