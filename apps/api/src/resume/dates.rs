//! Date-range detection for experience entries and years-of-experience.

const MONTHS: &[&str] = &[
    "jan", "january", "feb", "february", "mar", "march", "apr", "april", "may", "jun", "june",
    "jul", "july", "aug", "august", "sep", "sept", "september", "oct", "october", "nov",
    "november", "dec", "december",
];

const PRESENT_WORDS: &[&str] = &["present", "current", "now", "today", "date", "ongoing"];

const MIN_YEAR: u32 = 1950;
const MAX_YEAR: u32 = 2100;

/// A `start - end` span found in a line. `end_year == None` means "present".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub text: String,
    pub start_year: u32,
    pub end_year: Option<u32>,
    /// Byte span of `text` within the searched line.
    pub span: (usize, usize),
}

impl DateRange {
    pub fn end_or(&self, current_year: u32) -> u32 {
        self.end_year.unwrap_or(current_year)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Month,
    Year(u32),
    Present,
    Dash,
    Word,
}

#[derive(Debug, Clone, Copy)]
struct Token {
    kind: Kind,
    start: usize,
    end: usize,
}

fn is_dash(c: char) -> bool {
    matches!(c, '-' | '–' | '—' | '‒' | '―')
}

fn tokenize(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;

    let flush = |start: usize, end: usize, tokens: &mut Vec<Token>| {
        let word = &line[start..end];
        tokens.push(Token {
            kind: classify_word(word),
            start,
            end,
        });
    };

    for (i, c) in line.char_indices() {
        if c.is_alphanumeric() || c == '/' || c == '.' || c == '\'' {
            word_start.get_or_insert(i);
            continue;
        }
        if let Some(start) = word_start.take() {
            flush(start, i, &mut tokens);
        }
        if is_dash(c) {
            tokens.push(Token {
                kind: Kind::Dash,
                start: i,
                end: i + c.len_utf8(),
            });
        }
    }
    if let Some(start) = word_start {
        flush(start, line.len(), &mut tokens);
    }
    tokens
}

fn classify_word(word: &str) -> Kind {
    let word = word.trim_end_matches('.');
    let lower = word.to_lowercase();

    if MONTHS.contains(&lower.as_str()) {
        return Kind::Month;
    }
    if PRESENT_WORDS.contains(&lower.as_str()) {
        return Kind::Present;
    }
    if matches!(lower.as_str(), "to" | "until" | "till") {
        return Kind::Dash;
    }
    // YYYY, MM/YYYY, 'YY is too ambiguous and is ignored
    let year_part = word.rsplit('/').next().unwrap_or(word);
    if let Some(year) = parse_year(year_part) {
        if word == year_part || word.split('/').all(|p| p.chars().all(|c| c.is_ascii_digit())) {
            return Kind::Year(year);
        }
    }
    Kind::Word
}

pub fn parse_year(s: &str) -> Option<u32> {
    if s.len() != 4 || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse::<u32>()
        .ok()
        .filter(|y| (MIN_YEAR..=MAX_YEAR).contains(y))
}

/// Finds the first `[Month] Year <dash|to> [Month] (Year|Present)` range.
pub fn find_date_range(line: &str) -> Option<DateRange> {
    let tokens = tokenize(line);

    for (i, token) in tokens.iter().enumerate() {
        let Kind::Year(start_year) = token.kind else {
            continue;
        };
        let first = match i.checked_sub(1).map(|p| tokens[p]) {
            Some(prev) if prev.kind == Kind::Month => prev,
            _ => *token,
        };

        let mut j = i + 1;
        if tokens.get(j).map(|t| t.kind) != Some(Kind::Dash) {
            continue;
        }
        j += 1;
        if tokens.get(j).map(|t| t.kind) == Some(Kind::Month) {
            j += 1;
        }
        let Some(last) = tokens.get(j) else {
            continue;
        };
        let end_year = match last.kind {
            Kind::Year(y) if y >= start_year => Some(y),
            Kind::Present => None,
            _ => continue,
        };

        return Some(DateRange {
            text: line[first.start..last.end].to_string(),
            start_year,
            end_year,
            span: (first.start, last.end),
        });
    }
    None
}

/// Every standalone four-digit year in the text, in order.
pub fn years_in(line: &str) -> Vec<u32> {
    tokenize(line)
        .into_iter()
        .filter_map(|t| match t.kind {
            Kind::Year(y) => Some(y),
            _ => None,
        })
        .collect()
}

/// Largest explicit "N+ years" or "N years of experience" claim in the text.
pub fn explicit_years(text: &str) -> Option<u32> {
    let words: Vec<String> = text
        .split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric() && c != '+')
                .to_lowercase()
        })
        .collect();

    let mut best: Option<u32> = None;
    for (i, word) in words.iter().enumerate() {
        if !(word.starts_with("year") || word.starts_with("yr")) || i == 0 {
            continue;
        }
        let previous = &words[i - 1];
        let has_plus = previous.ends_with('+') || word.ends_with('+');
        let Ok(n) = previous.trim_end_matches('+').parse::<u32>() else {
            continue;
        };
        let followed_by_experience = words
            .iter()
            .skip(i + 1)
            .take(3)
            .any(|w| w.starts_with("experience"));

        if (has_plus || followed_by_experience) && n <= 60 {
            best = Some(best.map_or(n, |b| b.max(n)));
        }
    }
    best
}
