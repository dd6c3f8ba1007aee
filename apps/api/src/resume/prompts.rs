// Résumé field extraction prompt templates.

pub const RESUME_PARSE_SYSTEM: &str = "\
You are a precise résumé data extractor. \
You MUST respond with valid JSON only, with no markdown fences and no explanations. \
Copy values from the résumé; never invent employers, dates, degrees or skills. \
Use an empty string or empty list when a field is absent.";

pub const RESUME_PARSE_PROMPT: &str = r#"Extract structured data from the résumé text below.

RÉSUMÉ TEXT:
{resume_text}

OUTPUT SCHEMA (return exactly this structure):
{
  "basic_info": {"name": "string", "email": "string", "phone": "string", "location": "string"},
  "professional_summary": "string",
  "skills": ["string"],
  "technical_skills": ["string"],
  "soft_skills": ["string"],
  "experience": [{"job_title": "string", "company": "string", "duration": "string", "description": "string"}],
  "education": [{"degree": "string", "institution": "string", "year": "string"}],
  "certifications": ["string"],
  "years_of_experience": number,
  "recommended_job_roles": ["string"]
}

RULES:
- "years_of_experience" is a whole number of years of professional experience.
- "recommended_job_roles" lists up to 5 job titles this candidate should search for.
- "skills" is the union of technical_skills and soft_skills."#;
