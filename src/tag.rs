use crate::error::Error;
use regex::Regex;
use std::sync::OnceLock;

/// Matches one token at the start of the remaining tag, followed by its separator.
///
/// Groups: 1 long name, 2 short name, 3 key and 4 quoted value, 5 bare keyword.
const PATTERN: &str = r"^(?:--([A-Za-z0-9_-]+)|-([A-Za-z0-9])|([A-Za-z][A-Za-z0-9_-]*)='((?:\\.|[^\\'])*)'|([A-Za-z][A-Za-z0-9_-]*))\s*(?:,|$)";

/// The attributes declared by a flag's tag.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Tag {
    pub(crate) shorts: Vec<char>,
    pub(crate) longs: Vec<String>,
    pub(crate) description: String,
    pub(crate) groups: Vec<String>,
    pub(crate) obligatory: bool,
    pub(crate) accumulate: bool,
}

impl Tag {
    /// Parses a tag such as `-n, --name, obligatory, description='The name'`.
    pub fn parse(tag: &str) -> Result<Self, Error> {
        let pattern = pattern()?;
        let mut result = Tag::default();
        let mut position = 0;
        loop {
            let rest = &tag[position..];
            let trimmed = rest.trim_start();
            position += rest.len() - trimmed.len();
            if trimmed.is_empty() {
                break;
            }

            let Some(captures) = pattern.captures(trimmed) else {
                return Err(invalid(tag, position, "unrecognized token"));
            };
            if let Some(long) = captures.get(1) {
                result.longs.push(long.as_str().to_owned());
            } else if let Some(short) = captures.get(2) {
                result.shorts.extend(short.as_str().chars());
            } else if let (Some(key), Some(value)) = (captures.get(3), captures.get(4)) {
                match key.as_str() {
                    "description" => result.description = unescape(value.as_str()),
                    "mutexgroup" => {
                        for group in unescape(value.as_str()).split(',') {
                            let group = group.trim();
                            if group.is_empty() {
                                return Err(invalid(tag, position, "empty mutex group name"));
                            }
                            if !result.groups.iter().any(|known| known == group) {
                                result.groups.push(group.to_owned());
                            }
                        }
                    }
                    _ => return Err(invalid(tag, position, "unknown key")),
                }
            } else if let Some(keyword) = captures.get(5) {
                match keyword.as_str() {
                    "obligatory" => result.obligatory = true,
                    "accumulate" => result.accumulate = true,
                    _ => return Err(invalid(tag, position, "unknown keyword")),
                }
            }
            position += captures.get(0).map_or(trimmed.len(), |token| token.end());
        }
        Ok(result)
    }

    pub fn shorts(&self) -> &[char] {
        &self.shorts
    }

    pub fn longs(&self) -> &[String] {
        &self.longs
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    pub const fn is_obligatory(&self) -> bool {
        self.obligatory
    }

    pub const fn accumulates(&self) -> bool {
        self.accumulate
    }

    pub fn is_anonymous(&self) -> bool {
        self.shorts.is_empty() && self.longs.is_empty()
    }

    /// The preferred display name: the first long name, then the first short name.
    pub fn name(&self) -> String {
        match (self.longs.first(), self.shorts.first()) {
            (Some(long), _) => format!("--{long}"),
            (None, Some(short)) => format!("-{short}"),
            (None, None) => "<unspecified>".to_owned(),
        }
    }
}

fn pattern() -> Result<&'static Regex, Error> {
    static CELL: OnceLock<Regex> = OnceLock::new();
    if let Some(pattern) = CELL.get() {
        return Ok(pattern);
    }
    let pattern = Regex::new(PATTERN)?;
    Ok(CELL.get_or_init(|| pattern))
}

fn invalid(tag: &str, position: usize, reason: &'static str) -> Error {
    Error::InvalidTag {
        tag: tag.to_owned(),
        position,
        rest: tag[position..].to_owned(),
        reason: reason.into(),
    }
}

fn unescape(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut letters = value.chars();
    while let Some(letter) = letters.next() {
        match letter {
            '\\' => result.extend(letters.next()),
            letter => result.push(letter),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_description() {
        let tag = Tag::parse("--name, -n, description='Some name'").unwrap();
        assert_eq!(tag.longs(), ["name"]);
        assert_eq!(tag.shorts(), ['n']);
        assert_eq!(tag.description(), "Some name");
        assert!(!tag.is_obligatory());
        assert!(!tag.accumulates());
        assert!(tag.groups().is_empty());
    }

    #[test]
    fn keywords_and_groups() {
        let tag = Tag::parse("--name, -n, description='Some name', mutexgroup='selector', obligatory")
            .unwrap();
        assert_eq!(tag.groups(), ["selector"]);
        assert!(tag.is_obligatory());
        let tag = Tag::parse("-v,--verbose,accumulate").unwrap();
        assert!(tag.accumulates());
        assert_eq!(tag.name(), "--verbose");
    }

    #[test]
    fn order_does_not_matter() {
        let left = Tag::parse("obligatory, -a, --all, mutexgroup='x'").unwrap();
        let right = Tag::parse("  --all ,mutexgroup='x', -a,obligatory ").unwrap();
        assert_eq!(left, right);
    }

    #[test]
    fn escaped_quotes_and_backslashes() {
        let tag = Tag::parse(r"-p, description='Don\'t prompt, ever \\ really'").unwrap();
        assert_eq!(tag.description(), r"Don't prompt, ever \ really");
    }

    #[test]
    fn several_mutex_groups() {
        let tag = Tag::parse("--file, mutexgroup='type, output'").unwrap();
        assert_eq!(tag.groups(), ["type", "output"]);
    }

    #[test]
    fn repeated_mutex_groups_are_kept_once() {
        let tag = Tag::parse("-a, mutexgroup='x, y, x', mutexgroup='y'").unwrap();
        assert_eq!(tag.groups(), ["x", "y"]);
    }

    #[test]
    fn repeated_names_accumulate() {
        let tag = Tag::parse("-a, -b, --alpha, --beta").unwrap();
        assert_eq!(tag.shorts(), ['a', 'b']);
        assert_eq!(tag.longs(), ["alpha", "beta"]);
    }

    #[test]
    fn anonymous_tag_is_legal() {
        let tag = Tag::parse("description='Never matched'").unwrap();
        assert!(tag.is_anonymous());
        assert_eq!(tag.name(), "<unspecified>");
        assert!(Tag::parse("").unwrap().is_anonymous());
    }

    #[test]
    fn unknown_keyword_reports_position() {
        let error = Tag::parse("-n, mandatory").unwrap_err();
        assert!(matches!(
            error,
            Error::InvalidTag { position: 4, ref rest, .. } if rest == "mandatory"
        ));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let error = Tag::parse("--name, default='x'").unwrap_err();
        assert!(matches!(error, Error::InvalidTag { position: 8, .. }));
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        for tag in [
            "-ab",
            "--",
            "-",
            "--name,,-n",
            "description='unterminated",
            "description=unquoted",
            "mutexgroup=''",
            "--na me",
        ] {
            assert!(
                matches!(Tag::parse(tag), Err(Error::InvalidTag { .. })),
                "{tag}"
            );
        }
    }

    #[test]
    fn error_keeps_unparsed_suffix() {
        let Err(Error::InvalidTag { rest, .. }) = Tag::parse("--name, -n, $oops, obligatory") else {
            panic!("expected an invalid tag");
        };
        assert_eq!(rest, "$oops, obligatory");
    }
}
