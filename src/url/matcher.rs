/// A single compiled URL glob pattern.
///
/// `*` matches any run of characters, including the empty run. Matching is
/// case-sensitive and anchored over the whole URL string: a pattern without
/// wildcards matches only the identical URL, not a substring of it.
#[derive(Debug, Clone)]
pub struct UrlPattern {
    chars: Vec<char>,
}

impl UrlPattern {
    /// Compiles a single pattern line.
    pub fn new(pattern: &str) -> Self {
        Self {
            chars: pattern.chars().collect(),
        }
    }

    /// Checks whether a candidate URL matches this pattern.
    pub fn matches(&self, candidate: &str) -> bool {
        let text: Vec<char> = candidate.chars().collect();
        glob_match(&self.chars, &text)
    }
}

/// An ordered set of URL patterns parsed from a newline-delimited list.
///
/// Check definitions carry pattern lists as a single block of text, one glob
/// per line. Both `\n` and `\r\n` line endings are accepted and blank lines
/// are skipped. An empty set never matches anything.
///
/// # Examples
///
/// ```
/// use sitesentry::url::PatternSet;
///
/// let patterns = PatternSet::parse("*do-not-follow*\r\n*twitter.com");
///
/// assert!(patterns.matches("http://example.com/do-not-follow/page.html"));
/// assert!(patterns.matches("http://twitter.com"));
/// assert!(!patterns.matches("http://example.com/index.html"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<UrlPattern>,
}

impl PatternSet {
    /// Parses a newline-delimited pattern list, compiling each line once.
    pub fn parse(list: &str) -> Self {
        let patterns = list
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(UrlPattern::new)
            .collect();
        Self { patterns }
    }

    /// A set with no patterns; matches nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Checks whether any pattern in the set matches the URL.
    ///
    /// Patterns are tried in list order and the first match short-circuits.
    pub fn matches(&self, url: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(url))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Anchored wildcard match where `*` spans any run of characters.
///
/// Two-pointer scan with backtracking to the most recent star; linear in
/// practice for the short patterns URL lists carry.
fn glob_match(pattern: &[char], text: &[char]) -> bool {
    let mut p = 0;
    let mut t = 0;
    let mut star: Option<usize> = None;
    let mut mark = 0;

    while t < text.len() {
        if p < pattern.len() && pattern[p] == '*' {
            star = Some(p);
            mark = t;
            p += 1;
        } else if p < pattern.len() && pattern[p] == text[t] {
            p += 1;
            t += 1;
        } else if let Some(s) = star {
            p = s + 1;
            mark += 1;
            t = mark;
        } else {
            return false;
        }
    }

    while p < pattern.len() && pattern[p] == '*' {
        p += 1;
    }
    p == pattern.len()
}
