//! Selections of tag codes, written `<family>:<size>[:<ranges>]`.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::family::{Family, FamilyRegistry};
use crate::{TagTraceError, TagTraceResult};

/// A half-open range of code indices. A missing end runs to the end of the family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub begin: usize,
    pub end: Option<usize>,
}

impl Range {
    pub fn new(begin: usize, end: Option<usize>) -> Self {
        Self { begin, end }
    }

    /// Number of indices covered, `None` when the range is open ended.
    pub fn len(&self) -> Option<usize> {
        self.end.map(|end| end.saturating_sub(self.begin))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Clamp the range to a family of `count` codes.
    pub fn resolve(&self, count: usize) -> std::ops::Range<usize> {
        let end = self.end.unwrap_or(count).min(count);
        self.begin.min(end)..end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(_) if self.len() == Some(1) => write!(f, "{}", self.begin),
            None => write!(f, "{}-", self.begin),
            Some(end) if self.begin == 0 => write!(f, "-{end}"),
            Some(end) => write!(f, "{}-{end}", self.begin),
        }
    }
}

impl FromStr for Range {
    type Err = TagTraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |bound: &str| {
            bound
                .parse::<usize>()
                .map_err(|e| TagTraceError::InvalidRange(format!("'{s}': {e}")))
        };

        let bounds: Vec<&str> = s.split('-').collect();
        match bounds.as_slice() {
            [single] => {
                let begin = parse(single)?;
                let end = begin
                    .checked_add(1)
                    .ok_or_else(|| TagTraceError::InvalidRange(format!("'{s}': index too large")))?;
                Ok(Range::new(begin, Some(end)))
            }
            [begin, end] => {
                let begin = if begin.is_empty() { 0 } else { parse(begin)? };
                let end = if end.is_empty() { None } else { Some(parse(end)?) };
                Ok(Range::new(begin, end))
            }
            _ => Err(TagTraceError::InvalidRange(format!(
                "only N, N-, -N and N-M are supported, got '{s}'"
            ))),
        }
    }
}

/// Parse a `;` separated list of ranges. An empty string selects nothing.
pub fn parse_ranges(s: &str) -> TagTraceResult<Vec<Range>> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    s.split(';').map(str::parse).collect()
}

/// A family together with a printed size and the codes to render.
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyBlock {
    pub family: Arc<Family>,
    pub size_mm: f64,
    pub ranges: Vec<Range>,
}

impl FamilyBlock {
    /// Parse `<name>:<size>[:<ranges>]`, resolving the family through `registry`.
    pub fn parse(s: &str, registry: &FamilyRegistry) -> TagTraceResult<Self> {
        let invalid = |reason: String| TagTraceError::InvalidFamilyBlock(format!("'{s}': {reason}"));

        let args: Vec<&str> = s.split(':').collect();
        if !(2..=3).contains(&args.len()) {
            return Err(invalid("format should be <name>:<size>[:<range>]".to_string()));
        }

        let family = registry.get(args[0])?;
        let size_mm = args[1].parse::<f64>().map_err(|e| invalid(e.to_string()))?;
        let ranges = match args.get(2) {
            Some(ranges) => parse_ranges(ranges).map_err(|e| invalid(e.to_string()))?,
            None => vec![Range::new(0, Some(family.len()))],
        };

        Ok(Self {
            family,
            size_mm,
            ranges,
        })
    }

    fn covers_whole_family(&self) -> bool {
        matches!(self.ranges.as_slice(), [r] if r.begin == 0 && r.end == Some(self.family.len()))
    }

    /// Code indices covered by the block, in range order, clamped to the family.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        let count = self.family.len();
        self.ranges.iter().flat_map(move |r| r.resolve(count))
    }

    /// Number of tags the block selects.
    pub fn tag_count(&self) -> usize {
        let count = self.family.len();
        self.ranges.iter().map(|r| r.resolve(count).len()).sum()
    }

    /// Human readable label, such as `36h11 1.60MM`.
    pub fn label(&self) -> String {
        format!("{} {:.2}MM", self.family.name, self.size_mm)
    }
}

impl fmt::Display for FamilyBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.family.name, self.size_mm)?;
        if self.covers_whole_family() {
            return Ok(());
        }
        let ranges: Vec<String> = self.ranges.iter().map(Range::to_string).collect();
        write!(f, ":{}", ranges.join(";"))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::family::testing::tiny_family;

    mod range {
        use super::*;

        #[test]
        fn formats_and_parses() {
            for (range, text) in [
                (Range::new(0, None), "0-"),
                (Range::new(3, None), "3-"),
                (Range::new(3, Some(4)), "3"),
                (Range::new(0, Some(4)), "-4"),
                (Range::new(1, Some(4)), "1-4"),
            ] {
                assert_eq!(range.to_string(), text, "formatting");
                assert_eq!(text.parse::<Range>().unwrap(), range, "parsing {text}");
            }
        }

        #[test]
        fn rejects_malformed() {
            let last = usize::MAX.to_string();
            for text in ["", "a", "1-2-3", "-x", "--", last.as_str()] {
                assert!(
                    matches!(text.parse::<Range>(), Err(TagTraceError::InvalidRange(_))),
                    "{text}"
                );
            }
        }

        #[test]
        fn resolve_clamps_to_family() {
            assert_eq!(Range::new(3, None).resolve(10), 3..10);
            assert_eq!(Range::new(2, Some(50)).resolve(10), 2..10);
            assert_eq!(Range::new(12, None).resolve(10), 10..10);
        }

        #[test]
        fn parse_list() {
            assert_eq!(parse_ranges("").unwrap(), Vec::new());
            assert_eq!(
                parse_ranges("1-5;8-").unwrap(),
                vec![Range::new(1, Some(5)), Range::new(8, None)]
            );
            assert!(parse_ranges("1;;2").is_err());
        }
    }

    mod family_block {
        use super::*;

        fn registry() -> (tempfile::TempDir, FamilyRegistry) {
            let dir = tempfile::tempdir().unwrap();
            let family = tiny_family();
            fs::write(
                dir.path().join(format!("{}.json", family.name)),
                serde_json::to_string(&family).unwrap(),
            )
            .unwrap();
            let registry = FamilyRegistry::new(dir.path());
            (dir, registry)
        }

        #[test]
        fn whole_family_round_trips() {
            let (_dir, registry) = registry();
            let block = FamilyBlock::parse("9h1:1.6", &registry).unwrap();
            assert_eq!(block.ranges, vec![Range::new(0, Some(4))]);
            assert_eq!(block.size_mm, 1.6);
            assert_eq!(block.to_string(), "9h1:1.6");
            assert_eq!(block.indices().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        }

        #[test]
        fn explicit_ranges_round_trip() {
            let (_dir, registry) = registry();
            let block = FamilyBlock::parse("9h1:1.6:1-2;3-", &registry).unwrap();
            assert_eq!(block.ranges, vec![Range::new(1, Some(2)), Range::new(3, None)]);
            assert_eq!(block.to_string(), "9h1:1.6:1;3-");
            assert_eq!(block.indices().collect::<Vec<_>>(), vec![1, 3]);
            assert_eq!(block.tag_count(), 2);
            assert_eq!(block.label(), "9h1 1.60MM");
        }

        #[test]
        fn rejects_bad_shapes() {
            let (_dir, registry) = registry();
            let last = format!("9h1:1:{}", usize::MAX);
            for text in ["9h1", "9h1:1:2:3", "9h1:big", "9h1:1:x", last.as_str()] {
                assert!(
                    matches!(
                        FamilyBlock::parse(text, &registry),
                        Err(TagTraceError::InvalidFamilyBlock(_))
                    ),
                    "{text}"
                );
            }
        }

        #[test]
        fn unknown_family_propagates() {
            let (_dir, registry) = registry();
            assert!(matches!(
                FamilyBlock::parse("36h11:1.6", &registry),
                Err(TagTraceError::UnknownFamily { .. })
            ));
        }
    }
}
