use serde::{Deserialize, Serialize};

/// Contact block at the top of a résumé. Unknown fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub job_title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

/// Structured output of résumé parsing, in the shape the web client consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeData {
    pub basic_info: BasicInfo,
    pub professional_summary: String,
    /// Union of technical and soft skills, deduplicated case-insensitively.
    pub skills: Vec<String>,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub certifications: Vec<String>,
    pub years_of_experience: u32,
    pub recommended_job_roles: Vec<String>,
}

impl ResumeData {
    /// Rebuilds `skills` from the technical and soft lists.
    pub fn merge_skills(&mut self) {
        let mut merged = Vec::new();
        for skill in self.technical_skills.iter().chain(self.soft_skills.iter()) {
            push_unique(&mut merged, skill);
        }
        self.skills = merged;
    }
}

/// Appends `value` unless an entry equal ignoring ASCII case is already present.
pub fn push_unique(list: &mut Vec<String>, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        return;
    }
    if !list.iter().any(|v| v.eq_ignore_ascii_case(value)) {
        list.push(value.to_string());
    }
}
