//! Rule-based field extraction. Deterministic, no network.
//!
//! Works on the section split produced by `sections::split_sections`:
//! contact details come from the header block, everything else from the
//! section it belongs to. Technical keywords are also picked up anywhere in
//! the text, since many résumés mention their stack only inside bullets.

use chrono::Datelike;

use crate::resume::dates::{explicit_years, find_date_range, years_in, DateRange};
use crate::resume::models::{push_unique, BasicInfo, EducationEntry, ExperienceEntry, ResumeData};
use crate::resume::sections::{classify_heading, split_sections, SectionKind, SectionedText};
use crate::resume::vocabulary::{
    DEGREE_WORDS, INSTITUTION_WORDS, ROLE_TABLE, SECTION_ONLY_SKILLS, SOFT_SKILLS,
    TECHNICAL_SKILLS, TITLE_WORDS,
};

const BULLET_GLYPHS: &[char] = &['-', '*', '•', '·', '▪', '◦', '●', '○', '■', '►', '➢', '✓', '–'];
const CONTACT_SEPARATORS: &[char] = &['|', '•', '·', '◦', '⋅'];
pub(crate) const MAX_RECOMMENDED_ROLES: usize = 5;
const MIN_ROLE_SUPPORT: usize = 2;
const MAX_SKILL_LEN: usize = 40;
const MAX_HEADING_LINES: usize = 2;

/// Extracts every `ResumeData` field from normalised résumé text.
pub fn extract_fields(text: &str) -> ResumeData {
    extract_fields_at(text, chrono::Utc::now().year() as u32)
}

/// Same as `extract_fields`, with "present" pinned to `current_year`.
pub fn extract_fields_at(text: &str, current_year: u32) -> ResumeData {
    let sectioned = split_sections(text);

    let (technical_skills, soft_skills) = extract_skills(&sectioned, text);
    let experience_blocks = extract_experience(&sectioned.lines_of(SectionKind::Experience));

    let years_of_experience = explicit_years(text)
        .or_else(|| span_years(&experience_blocks, current_year))
        .unwrap_or(0);

    let experience: Vec<ExperienceEntry> =
        experience_blocks.into_iter().map(|(entry, _)| entry).collect();
    let recommended_job_roles = recommend_roles(&technical_skills, &experience);

    let mut data = ResumeData {
        basic_info: extract_basic_info(&sectioned, text),
        professional_summary: join_paragraph(&sectioned.lines_of(SectionKind::Summary)),
        skills: Vec::new(),
        technical_skills,
        soft_skills,
        experience,
        education: extract_education(&sectioned.lines_of(SectionKind::Education)),
        certifications: extract_certifications(&sectioned.lines_of(SectionKind::Certifications)),
        years_of_experience,
        recommended_job_roles,
    };
    data.merge_skills();
    data
}

// ────────────────────────────────────────────────────────────────────────────
// Contact block
// ────────────────────────────────────────────────────────────────────────────

fn extract_basic_info(sectioned: &SectionedText<'_>, text: &str) -> BasicInfo {
    let header: Vec<&str> = sectioned
        .header
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let name = header
        .iter()
        .map(|line| first_segment(line))
        .find(|segment| is_name_like(segment))
        .unwrap_or_default()
        .to_string();

    let email = header
        .iter()
        .find_map(|line| find_email(line))
        .or_else(|| find_email(text))
        .unwrap_or_default();

    let phone = header
        .iter()
        .find_map(|line| find_phone(line))
        .or_else(|| text.lines().find_map(find_phone))
        .unwrap_or_default();

    let location = header
        .iter()
        .flat_map(|line| line.split(CONTACT_SEPARATORS))
        .map(|segment| strip_label(segment.trim(), &["location", "address"]))
        .find(|segment| *segment != name && is_location_like(segment))
        .unwrap_or_default()
        .to_string();

    BasicInfo {
        name,
        email,
        phone,
        location,
    }
}

fn first_segment(line: &str) -> &str {
    line.split(CONTACT_SEPARATORS).next().unwrap_or(line).trim()
}

fn strip_label<'a>(segment: &'a str, labels: &[&str]) -> &'a str {
    if let Some((label, rest)) = segment.split_once(':') {
        if labels.iter().any(|l| label.trim().eq_ignore_ascii_case(l)) {
            return rest.trim();
        }
    }
    segment
}

fn is_name_like(line: &str) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    (2..=5).contains(&words.len())
        && !line.contains('@')
        && !line.chars().any(|c| c.is_ascii_digit())
        && classify_heading(line).is_none()
        && words.iter().all(|w| {
            w.chars().next().is_some_and(|c| c.is_alphabetic())
                && w.chars().all(|c| c.is_alphabetic() || matches!(c, '.' | '-' | '\''))
        })
}

/// Finds the first `local@domain.tld` token.
pub fn find_email(text: &str) -> Option<String> {
    text.split(|c: char| c.is_whitespace() || matches!(c, '|' | ',' | ';' | '<' | '>' | '(' | ')' | '[' | ']'))
        .map(|token| {
            let token = token.strip_prefix("mailto:").unwrap_or(token);
            token.trim_matches(|c: char| !c.is_alphanumeric())
        })
        .find(|token| is_email(token))
        .map(str::to_string)
}

fn is_email(token: &str) -> bool {
    let Some((local, domain)) = token.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !local.is_empty()
        && !host.is_empty()
        && !domain.contains('@')
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
        && local
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-'))
        && domain
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '.' | '-'))
}

/// Finds the first run of phone characters holding 10–15 digits.
pub fn find_phone(line: &str) -> Option<String> {
    let is_phone_char = |c: char| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')' | '.');

    let mut candidates = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in line.char_indices() {
        match (is_phone_char(c), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                candidates.push(&line[s..i]);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        candidates.push(&line[s..]);
    }

    candidates.into_iter().find_map(|run| {
        let run = run.trim_matches(|c: char| c == ' ' || c == '.' || c == '-');
        let digits = run.chars().filter(|c| c.is_ascii_digit()).count();
        let groups: Vec<&str> = run
            .split(|c: char| !c.is_ascii_digit())
            .filter(|g| !g.is_empty())
            .collect();
        // "2016 - 2019 2020" is a run of years, not a number
        let all_years = groups
            .iter()
            .all(|g| g.len() == 4 && (g.starts_with("19") || g.starts_with("20")));
        ((10..=15).contains(&digits) && !all_years).then(|| run.to_string())
    })
}

fn is_location_like(segment: &str) -> bool {
    if segment.is_empty()
        || segment.contains('@')
        || segment.chars().any(|c| c.is_ascii_digit())
        || segment.contains("http")
        || segment.contains("www.")
    {
        return false;
    }
    let parts: Vec<&str> = segment.split(',').map(str::trim).collect();
    if parts.len() != 2 {
        return false;
    }
    parts.iter().all(|part| {
        let words: Vec<&str> = part.split_whitespace().collect();
        (1..=4).contains(&words.len())
            && words.iter().all(|w| {
                w.chars().next().is_some_and(char::is_uppercase)
                    && w.chars().all(|c| c.is_alphabetic() || matches!(c, '.' | '-' | '\''))
            })
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

fn extract_skills(sectioned: &SectionedText<'_>, text: &str) -> (Vec<String>, Vec<String>) {
    let mut technical = Vec::new();
    let mut soft = Vec::new();

    for line in sectioned.lines_of(SectionKind::Skills) {
        let line = strip_bullet(line);
        // in "Languages: Rust, Go" the label is not a skill
        let line = match line.split_once(':') {
            Some((_, rest)) if !rest.trim().is_empty() => rest,
            _ => line,
        };
        for token in line.split([',', ';', '|', '•', '·']) {
            let token = token.trim().trim_end_matches('.').trim();
            if token.is_empty()
                || token.len() > MAX_SKILL_LEN
                || token.split_whitespace().count() > 5
            {
                continue;
            }
            if is_soft_skill(token) {
                push_unique(&mut soft, token);
            } else {
                push_unique(&mut technical, canonical_skill(token).unwrap_or(token));
            }
        }
    }

    let lower = text.to_lowercase();
    for skill in TECHNICAL_SKILLS {
        if contains_term(&lower, &skill.to_lowercase()) {
            push_unique(&mut technical, skill);
        }
    }

    (technical, soft)
}

/// Whole-token match, so "Communication Skills" is soft but
/// "Communication Protocols" is not.
fn is_soft_skill(token: &str) -> bool {
    let lower = token.to_lowercase();
    let core = lower
        .strip_suffix(" skills")
        .or_else(|| lower.strip_suffix(" skill"))
        .unwrap_or(&lower)
        .trim();
    SOFT_SKILLS.iter().any(|s| *s == core)
}

fn canonical_skill(token: &str) -> Option<&'static str> {
    TECHNICAL_SKILLS
        .iter()
        .chain(SECTION_ONLY_SKILLS.iter())
        .find(|s| s.eq_ignore_ascii_case(token))
        .copied()
}

/// Word-bounded, already-lowercased substring search. `+` and `#` count as
/// word characters so "c" never matches inside "c++".
fn contains_term(haystack: &str, term: &str) -> bool {
    let is_word = |c: char| c.is_alphanumeric() || c == '+' || c == '#';
    haystack.match_indices(term).any(|(i, _)| {
        let before = haystack[..i].chars().next_back();
        let after = haystack[i + term.len()..].chars().next();
        let starts_word = term.chars().next().is_some_and(is_word);
        let ends_word = term.chars().next_back().is_some_and(is_word);
        (!starts_word || !before.is_some_and(is_word))
            && (!ends_word || !after.is_some_and(is_word))
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Experience
// ────────────────────────────────────────────────────────────────────────────

/// Groups experience lines into entries, each anchored on a date-range line.
fn extract_experience(lines: &[&str]) -> Vec<(ExperienceEntry, DateRange)> {
    let anchors: Vec<(usize, DateRange)> = lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| find_date_range(line).map(|r| (i, r)))
        .collect();

    // Heading lines directly above each anchor belong to that entry.
    let mut heading_starts = Vec::with_capacity(anchors.len());
    let mut floor = 0;
    for (anchor, _) in &anchors {
        let mut start = *anchor;
        while start > floor
            && *anchor - (start - 1) <= MAX_HEADING_LINES
            && is_heading_line(lines[start - 1])
        {
            start -= 1;
        }
        heading_starts.push(start);
        floor = anchor + 1;
    }

    anchors
        .iter()
        .enumerate()
        .map(|(k, (anchor, range))| {
            let end = heading_starts.get(k + 1).copied().unwrap_or(lines.len());

            let mut parts: Vec<String> = lines[heading_starts[k]..*anchor]
                .iter()
                .flat_map(|l| split_heading(l))
                .collect();
            let anchor_line = lines[*anchor];
            let remainder = format!(
                "{} {}",
                &anchor_line[..range.span.0],
                &anchor_line[range.span.1..]
            );
            parts.extend(split_heading(&remainder));

            let (job_title, company) = title_and_company(parts);
            let description = lines[anchor + 1..end]
                .iter()
                .map(|l| strip_bullet(l))
                .filter(|l| !l.is_empty())
                .collect::<Vec<_>>()
                .join("\n");

            (
                ExperienceEntry {
                    job_title,
                    company,
                    duration: range.text.clone(),
                    description,
                },
                range.clone(),
            )
        })
        .collect()
}

fn is_heading_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && trimmed.len() <= 80
        && !trimmed.starts_with(BULLET_GLYPHS)
        && !trimmed.ends_with('.')
        && find_date_range(trimmed).is_none()
}

fn split_heading(line: &str) -> Vec<String> {
    let mut parts = vec![line.to_string()];
    for sep in [" at ", " @ ", " | ", " — ", " – ", " - ", ", ", "|", "(", ")"] {
        parts = parts
            .iter()
            .flat_map(|p| p.split(sep).map(str::to_string).collect::<Vec<_>>())
            .collect();
    }
    parts
        .into_iter()
        .map(|p| {
            p.trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | '|' | '-' | '–' | '—'))
                .to_string()
        })
        .filter(|p| !p.is_empty())
        .collect()
}

fn title_and_company(parts: Vec<String>) -> (String, String) {
    let is_title = |p: &String| {
        let lower = p.to_lowercase();
        TITLE_WORDS.iter().any(|w| contains_term(&lower, w))
    };
    let title_index = parts.iter().position(is_title).unwrap_or(0);
    let job_title = parts.get(title_index).cloned().unwrap_or_default();
    let company = parts
        .iter()
        .enumerate()
        .find(|(i, p)| *i != title_index && !is_location_like(p))
        .map(|(_, p)| p.clone())
        .unwrap_or_default();
    (job_title, company)
}

fn span_years(blocks: &[(ExperienceEntry, DateRange)], current_year: u32) -> Option<u32> {
    let start = blocks.iter().map(|(_, r)| r.start_year).min()?;
    let end = blocks.iter().map(|(_, r)| r.end_or(current_year)).max()?;
    Some(end.saturating_sub(start))
}

// ────────────────────────────────────────────────────────────────────────────
// Education and certifications
// ────────────────────────────────────────────────────────────────────────────

fn extract_education(lines: &[&str]) -> Vec<EducationEntry> {
    let mut entries = Vec::new();
    let mut current = EducationEntry::default();
    let mut block_years: Vec<u32> = Vec::new();

    let mut flush = |current: &mut EducationEntry, years: &mut Vec<u32>| {
        if let Some(year) = years.last() {
            current.year = year.to_string();
        }
        if !current.degree.is_empty() || !current.institution.is_empty() {
            entries.push(std::mem::take(current));
        }
        years.clear();
    };

    for line in lines {
        let line = strip_bullet(line);
        if line.is_empty() {
            flush(&mut current, &mut block_years);
            continue;
        }

        let segments = split_heading(line);
        let degree = segments.iter().find(|s| has_degree_word(s));
        let institution = segments.iter().find(|s| has_institution_word(s));

        // A second degree or institution in the same block starts a new entry.
        if (degree.is_some() && !current.degree.is_empty())
            || (institution.is_some() && !current.institution.is_empty())
        {
            flush(&mut current, &mut block_years);
        }

        if let Some(d) = degree {
            current.degree = strip_years(d);
        }
        if let Some(i) = institution {
            current.institution = strip_years(i);
        }
        block_years.extend(years_in(line));
    }
    flush(&mut current, &mut block_years);

    entries
}

fn has_degree_word(text: &str) -> bool {
    let lower = text.to_lowercase();
    DEGREE_WORDS.iter().any(|w| contains_term(&lower, w))
}

fn has_institution_word(text: &str) -> bool {
    let lower = text.to_lowercase();
    INSTITUTION_WORDS.iter().any(|w| contains_term(&lower, w))
}

fn strip_years(text: &str) -> String {
    let without_range = match find_date_range(text) {
        Some(range) => format!("{}{}", &text[..range.span.0], &text[range.span.1..]),
        None => text.to_string(),
    };
    without_range
        .split_whitespace()
        .filter(|w| years_in(w).is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | '-' | '(' | ')'))
        .to_string()
}

fn extract_certifications(lines: &[&str]) -> Vec<String> {
    let mut certifications = Vec::new();
    for line in lines {
        push_unique(&mut certifications, strip_bullet(line));
    }
    certifications
}

// ────────────────────────────────────────────────────────────────────────────
// Recommendations and helpers
// ────────────────────────────────────────────────────────────────────────────

/// Ranks roles by how many of the candidate's technical skills support them.
pub fn recommend_roles(technical_skills: &[String], experience: &[ExperienceEntry]) -> Vec<String> {
    let mut scored: Vec<(usize, usize, &str)> = ROLE_TABLE
        .iter()
        .enumerate()
        .map(|(order, (role, supporting))| {
            let support = supporting
                .iter()
                .filter(|s| technical_skills.iter().any(|t| t.eq_ignore_ascii_case(s)))
                .count();
            (support, order, *role)
        })
        .filter(|(support, _, _)| *support >= MIN_ROLE_SUPPORT)
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    let mut roles = Vec::new();
    for (_, _, role) in scored.into_iter().take(MAX_RECOMMENDED_ROLES) {
        push_unique(&mut roles, role);
    }

    if roles.is_empty() {
        for entry in experience.iter().take(MAX_RECOMMENDED_ROLES) {
            push_unique(&mut roles, &entry.job_title);
        }
    }
    if roles.is_empty() && !technical_skills.is_empty() {
        roles.push("Software Engineer".to_string());
    }
    roles
}

fn strip_bullet(line: &str) -> &str {
    line.trim().trim_start_matches(BULLET_GLYPHS).trim()
}

fn join_paragraph(lines: &[&str]) -> String {
    lines
        .iter()
        .map(|l| strip_bullet(l))
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
