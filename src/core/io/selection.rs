//! Sequence windowing applied after selection: a 1-based inclusive slice,
//! then an optional length limit.

/// 1-based inclusive slice `a:b`. Either bound may be left empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SliceSpec {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

impl SliceSpec {
    /// Parse `"a:b"`, `"a:"`, `":b"` or `":"`.
    pub fn parse(spec: &str) -> Result<Self, String> {
        let parts: Vec<&str> = spec.split(':').collect();
        if parts.len() != 2 {
            return Err(format!("bad slice '{}'", spec));
        }

        let bound = |s: &str| -> Result<Option<i64>, String> {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<i64>()
                .map(Some)
                .map_err(|_| format!("bad slice '{}'", spec))
        };

        Ok(SliceSpec {
            start: bound(parts[0])?,
            end: bound(parts[1])?,
        })
    }

    /// Apply to `seq`. Bounds are clamped to the sequence; an inverted range
    /// yields an empty sequence.
    pub fn apply(&self, seq: &[u8]) -> Vec<u8> {
        let len = seq.len() as i64;
        let start = self.start.unwrap_or(1).max(1);
        let end = self.end.unwrap_or(len).min(len);
        if end < start {
            return Vec::new();
        }
        seq[(start - 1) as usize..end as usize].to_vec()
    }
}

/// Keep at most `limit` leading symbols
pub fn truncate(seq: &mut Vec<u8>, limit: Option<usize>) {
    if let Some(limit) = limit {
        seq.truncate(limit);
    }
}

/// Slice (if given) and then limit.
pub fn apply_window(seq: Vec<u8>, slice: Option<&SliceSpec>, limit: Option<usize>) -> Vec<u8> {
    let mut seq = match slice {
        Some(spec) => spec.apply(&seq),
        None => seq,
    };
    truncate(&mut seq, limit);
    seq
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bounds() {
        assert_eq!(
            SliceSpec::parse("2:5"),
            Ok(SliceSpec {
                start: Some(2),
                end: Some(5)
            })
        );
        assert_eq!(
            SliceSpec::parse(":7"),
            Ok(SliceSpec {
                start: None,
                end: Some(7)
            })
        );
        assert_eq!(SliceSpec::parse(":"), Ok(SliceSpec::default()));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(SliceSpec::parse("12"), Err("bad slice '12'".to_string()));
        assert!(SliceSpec::parse("1:2:3").is_err());
        assert!(SliceSpec::parse("a:b").is_err());
    }

    #[test]
    fn test_apply_is_one_based_inclusive() {
        let spec = SliceSpec::parse("2:4").unwrap();
        assert_eq!(spec.apply(b"ACGTACGT"), b"CGT");
    }

    #[test]
    fn test_apply_clamps() {
        let spec = SliceSpec::parse("-3:100").unwrap();
        assert_eq!(spec.apply(b"ACGT"), b"ACGT");
        let spec = SliceSpec::parse("3:").unwrap();
        assert_eq!(spec.apply(b"ACGT"), b"GT");
    }

    #[test]
    fn test_apply_inverted_is_empty() {
        let spec = SliceSpec::parse("5:2").unwrap();
        assert!(spec.apply(b"ACGTACGT").is_empty());
        let spec = SliceSpec::parse("9:").unwrap();
        assert!(spec.apply(b"ACGT").is_empty());
    }

    #[test]
    fn test_slice_before_limit() {
        let spec = SliceSpec::parse("3:").unwrap();
        let seq = apply_window(b"AACCGGTT".to_vec(), Some(&spec), Some(3));
        assert_eq!(seq, b"CCG");
        assert_eq!(apply_window(b"ACGT".to_vec(), None, Some(10)), b"ACGT");
    }
}
