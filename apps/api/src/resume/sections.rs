//! Splits résumé text into the header block and titled sections.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Summary,
    Skills,
    Experience,
    Education,
    Certifications,
    Projects,
    Other,
}

const HEADINGS: &[(&str, SectionKind)] = &[
    ("summary", SectionKind::Summary),
    ("professional summary", SectionKind::Summary),
    ("career summary", SectionKind::Summary),
    ("profile", SectionKind::Summary),
    ("professional profile", SectionKind::Summary),
    ("objective", SectionKind::Summary),
    ("career objective", SectionKind::Summary),
    ("about me", SectionKind::Summary),
    ("about", SectionKind::Summary),
    ("skills", SectionKind::Skills),
    ("technical skills", SectionKind::Skills),
    ("key skills", SectionKind::Skills),
    ("core skills", SectionKind::Skills),
    ("core competencies", SectionKind::Skills),
    ("competencies", SectionKind::Skills),
    ("skills and abilities", SectionKind::Skills),
    ("technologies", SectionKind::Skills),
    ("tech stack", SectionKind::Skills),
    ("experience", SectionKind::Experience),
    ("work experience", SectionKind::Experience),
    ("professional experience", SectionKind::Experience),
    ("relevant experience", SectionKind::Experience),
    ("employment", SectionKind::Experience),
    ("employment history", SectionKind::Experience),
    ("work history", SectionKind::Experience),
    ("career history", SectionKind::Experience),
    ("education", SectionKind::Education),
    ("academic background", SectionKind::Education),
    ("education and training", SectionKind::Education),
    ("academic qualifications", SectionKind::Education),
    ("certifications", SectionKind::Certifications),
    ("certification", SectionKind::Certifications),
    ("certificates", SectionKind::Certifications),
    ("licenses and certifications", SectionKind::Certifications),
    ("certifications and licenses", SectionKind::Certifications),
    ("licenses", SectionKind::Certifications),
    ("projects", SectionKind::Projects),
    ("personal projects", SectionKind::Projects),
    ("key projects", SectionKind::Projects),
    ("awards", SectionKind::Other),
    ("honors and awards", SectionKind::Other),
    ("achievements", SectionKind::Other),
    ("publications", SectionKind::Other),
    ("languages", SectionKind::Other),
    ("interests", SectionKind::Other),
    ("hobbies", SectionKind::Other),
    ("references", SectionKind::Other),
    ("volunteer experience", SectionKind::Other),
    ("volunteering", SectionKind::Other),
    ("activities", SectionKind::Other),
    ("contact", SectionKind::Other),
];

const MAX_HEADING_LEN: usize = 40;

#[derive(Debug, Clone)]
pub struct Section<'a> {
    pub kind: SectionKind,
    pub lines: Vec<&'a str>,
}

#[derive(Debug, Clone, Default)]
pub struct SectionedText<'a> {
    /// Lines before the first recognised heading (name, contact details).
    pub header: Vec<&'a str>,
    pub sections: Vec<Section<'a>>,
}

impl<'a> SectionedText<'a> {
    /// All lines of every section of `kind`, in document order.
    pub fn lines_of(&self, kind: SectionKind) -> Vec<&'a str> {
        self.sections
            .iter()
            .filter(|s| s.kind == kind)
            .flat_map(|s| s.lines.iter().copied())
            .collect()
    }
}

/// Classifies a line as a section heading.
pub fn classify_heading(line: &str) -> Option<SectionKind> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.len() > MAX_HEADING_LEN {
        return None;
    }
    let key = heading_key(trimmed);
    HEADINGS
        .iter()
        .find(|(heading, _)| *heading == key)
        .map(|(_, kind)| *kind)
}

/// Lowercases, drops decoration around the words, maps `&` to `and` and
/// collapses whitespace: `"## Skills & Abilities:"` → `"skills and abilities"`.
fn heading_key(line: &str) -> String {
    let core = line.trim_matches(|c: char| !c.is_alphanumeric());
    core.replace('&', " and ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub fn split_sections(text: &str) -> SectionedText<'_> {
    let mut out = SectionedText::default();

    for line in text.lines() {
        if let Some(kind) = classify_heading(line) {
            out.sections.push(Section {
                kind,
                lines: Vec::new(),
            });
            continue;
        }

        // "Skills: Rust, Go" carries its heading inline. "Languages: ..." inside
        // a skills block is a label, so catch-all headings never open inline.
        if let Some((label, rest)) = line.split_once(':') {
            if let Some(kind) = classify_heading(label) {
                if kind != SectionKind::Other && !rest.trim().is_empty() {
                    out.sections.push(Section {
                        kind,
                        lines: vec![rest.trim()],
                    });
                    continue;
                }
            }
        }

        match out.sections.last_mut() {
            Some(section) => section.lines.push(line),
            None => out.header.push(line),
        }
    }

    out
}
