//! Extension-rule filtering of candidate file names.

/// A file extension rule with an enabled flag. The text is either a literal
/// extension ("txt") or the wildcard "*", which matches names that have no
/// extension at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionRule {
    pub ext: String,
    pub enabled: bool,
}

impl ExtensionRule {
    pub fn new(ext: impl Into<String>) -> Self {
        Self {
            ext: ext.into(),
            enabled: true,
        }
    }
}

/// Whether `name` qualifies for scanning under `rules`.
///
/// An empty rule set includes every file. Otherwise the name is included if
/// at least one enabled rule matches; order carries no precedence. The
/// wildcard rule matches only names containing no `.` - it is "files without
/// an extension", not "all files". Literal rules compare the `.ext` suffix
/// case-insensitively.
pub fn is_included(name: &str, rules: &[ExtensionRule]) -> bool {
    if rules.is_empty() {
        return true;
    }
    let lower = name.to_lowercase();
    for rule in rules.iter().filter(|r| r.enabled) {
        if rule.ext == "*" {
            if !name.contains('.') {
                return true;
            }
        } else if lower.ends_with(&format!(".{}", rule.ext.to_lowercase())) {
            return true;
        }
    }
    false
}
