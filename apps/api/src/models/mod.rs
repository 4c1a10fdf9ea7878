pub mod resume;

pub use resume::{
    EducationEntry, ExperienceEntry, ProjectExperienceEntry, ResumeContent, ResumeInput,
};
