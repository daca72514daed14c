//! Rule-based field extractors for resumes.
//!
//! Every extractor is a pure function over a [`ResumeText`] and returns a
//! [`FieldOutcome`](crate::resume::FieldOutcome); placeholder substitution
//! happens later, in the assembler.

pub mod contact;
pub mod education;
pub mod experience;
pub mod headline;
pub mod lines;
pub mod patterns;
pub mod projects;
pub mod skills;

pub use contact::{extract_email, extract_location, extract_phone};
pub use education::extract_education;
pub use experience::extract_experience;
pub use headline::{extract_name, extract_summary, extract_title};
pub use lines::ResumeText;
pub use projects::extract_projects;
pub use skills::{SkillMatcher, extract_skills};
