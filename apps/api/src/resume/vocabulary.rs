// Word lists used by the heuristic field extractor.
// Matching is case-insensitive; the spelling here is the one reported back.

/// Technical skills recognised anywhere in the résumé text.
pub const TECHNICAL_SKILLS: &[&str] = &[
    "Rust",
    "Python",
    "Java",
    "JavaScript",
    "TypeScript",
    "C++",
    "C#",
    "Ruby",
    "PHP",
    "Swift",
    "Kotlin",
    "Scala",
    "Golang",
    "SQL",
    "PostgreSQL",
    "MySQL",
    "MongoDB",
    "Redis",
    "SQLite",
    "GraphQL",
    "HTML",
    "CSS",
    "React",
    "React Native",
    "Angular",
    "Vue",
    "Next.js",
    "Node.js",
    "Django",
    "Flask",
    "FastAPI",
    "Ruby on Rails",
    ".NET",
    "Docker",
    "Kubernetes",
    "Terraform",
    "Ansible",
    "Jenkins",
    "AWS",
    "Azure",
    "GCP",
    "Linux",
    "Git",
    "CI/CD",
    "Kafka",
    "Spark",
    "Hadoop",
    "Airflow",
    "Snowflake",
    "Pandas",
    "NumPy",
    "scikit-learn",
    "TensorFlow",
    "PyTorch",
    "Machine Learning",
    "Deep Learning",
    "NLP",
    "Computer Vision",
    "Tableau",
    "Power BI",
    "Excel",
    "Selenium",
    "Cypress",
    "Jest",
    "JUnit",
    "Figma",
    "Flutter",
    "Android",
    "iOS",
    "Microservices",
    "ETL",
    "Statistics",
];

/// Technical skills that are also common English words or single letters.
/// Only recognised inside the skills section.
pub const SECTION_ONLY_SKILLS: &[&str] = &["Go", "R", "C", "REST", "Spring", "Express", "Rails"];

/// Soft skills. A skills-section token containing one of these is soft.
pub const SOFT_SKILLS: &[&str] = &[
    "communication",
    "leadership",
    "teamwork",
    "collaboration",
    "problem solving",
    "problem-solving",
    "critical thinking",
    "time management",
    "adaptability",
    "creativity",
    "mentoring",
    "mentorship",
    "public speaking",
    "negotiation",
    "attention to detail",
    "stakeholder management",
    "conflict resolution",
    "presentation",
    "interpersonal",
    "decision making",
    "decision-making",
    "empathy",
    "self-motivated",
    "work ethic",
    "customer service",
    "organizational",
];

/// Role recommendations and the technical skills that support them.
/// Order breaks ties between roles with equal support.
pub const ROLE_TABLE: &[(&str, &[&str])] = &[
    (
        "Backend Developer",
        &[
            "Rust", "Go", "Golang", "Java", "Python", "Node.js", "SQL", "PostgreSQL", "MySQL",
            "MongoDB", "Redis", "Django", "Flask", "FastAPI", "Spring", "Express", "GraphQL",
            "REST", "Microservices", ".NET", "C#", "Ruby on Rails", "Rails", "PHP", "Kotlin",
        ],
    ),
    (
        "Frontend Developer",
        &[
            "JavaScript", "TypeScript", "React", "Angular", "Vue", "Next.js", "HTML", "CSS",
            "Figma",
        ],
    ),
    (
        "Full Stack Developer",
        &[
            "JavaScript", "TypeScript", "React", "Node.js", "Express", "Next.js", "PostgreSQL",
            "MongoDB", "GraphQL",
        ],
    ),
    (
        "DevOps Engineer",
        &[
            "Docker", "Kubernetes", "Terraform", "Ansible", "Jenkins", "CI/CD", "AWS", "Azure",
            "GCP", "Linux",
        ],
    ),
    (
        "Cloud Engineer",
        &["AWS", "Azure", "GCP", "Terraform", "Kubernetes", "Docker"],
    ),
    (
        "Data Scientist",
        &[
            "Python", "R", "Pandas", "NumPy", "scikit-learn", "Machine Learning", "Statistics",
            "SQL",
        ],
    ),
    (
        "Machine Learning Engineer",
        &[
            "TensorFlow", "PyTorch", "Machine Learning", "Deep Learning", "NLP",
            "Computer Vision", "scikit-learn",
        ],
    ),
    (
        "Data Engineer",
        &[
            "Spark", "Hadoop", "Kafka", "Airflow", "Snowflake", "ETL", "SQL", "Scala",
        ],
    ),
    (
        "Data Analyst",
        &["SQL", "Excel", "Tableau", "Power BI", "Statistics", "Pandas"],
    ),
    (
        "Mobile Developer",
        &["Swift", "Kotlin", "Android", "iOS", "Flutter", "React Native"],
    ),
    (
        "Systems Engineer",
        &["Rust", "C", "C++", "Linux", "Go"],
    ),
    (
        "QA Engineer",
        &["Selenium", "Cypress", "Jest", "JUnit"],
    ),
];

/// Words that mark a line as a job title rather than a company name.
pub const TITLE_WORDS: &[&str] = &[
    "engineer",
    "developer",
    "manager",
    "analyst",
    "intern",
    "designer",
    "scientist",
    "consultant",
    "lead",
    "director",
    "architect",
    "specialist",
    "administrator",
    "coordinator",
    "officer",
    "assistant",
    "associate",
    "head",
    "technician",
    "programmer",
    "researcher",
    "founder",
];

/// Degree markers. Abbreviations are matched on word boundaries.
pub const DEGREE_WORDS: &[&str] = &[
    "bachelor",
    "master",
    "doctor",
    "doctorate",
    "diploma",
    "associate of",
    "associate's",
    "high school",
    "b.s.",
    "b.s",
    "bs",
    "bsc",
    "b.sc",
    "b.sc.",
    "b.a.",
    "ba",
    "m.s.",
    "m.s",
    "ms",
    "msc",
    "m.sc",
    "m.sc.",
    "m.a.",
    "ma",
    "mba",
    "ph.d",
    "ph.d.",
    "phd",
    "b.tech",
    "m.tech",
    "b.e.",
    "m.e.",
    "btech",
    "mtech",
];

pub const INSTITUTION_WORDS: &[&str] = &[
    "university",
    "college",
    "institute",
    "school",
    "academy",
    "polytechnic",
];
