//! Data models for extracted profiles and library configuration.

pub mod config;
pub mod profile;

pub use config::{
    ExtractionConfig, FolioConfig, ParsingConfig, ParsingLimits, PortfolioConfig,
    SectionVocabulary, Vocabulary,
};
pub use profile::{
    EducationEntry, ExperienceEntry, PersonalInfo, ProfileRecord, ProjectEntry, Skills, sentinel,
};
