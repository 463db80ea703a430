//! Row highlight requests
//!
//! Background highlights are requested per 1-based line number, either one
//! line at a time or as a closed range. Resolution is plain set arithmetic.
//! `resolve` holds every line a range names, so callers that know the
//! document length should go through `resolve_within`.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::error::{HighlightError, Result};

/// A line or closed range of lines to highlight (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightRequest {
    Line(i64),
    Range(i64, i64),
}

impl HighlightRequest {
    /// Check the request is a positive line or a non-inverted positive range
    pub fn validate(&self) -> Result<()> {
        let reason = match *self {
            HighlightRequest::Line(n) if n <= 0 => Some("line numbers start at 1"),
            HighlightRequest::Range(start, _) if start <= 0 => Some("line numbers start at 1"),
            HighlightRequest::Range(start, end) if start > end => Some("range is inverted"),
            _ => None,
        };
        match reason {
            Some(reason) => Err(HighlightError::InvalidHighlightRequest {
                request: self.to_string(),
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Shorten a valid range so it ends no later than `line_count`.
    ///
    /// A range starting past the end keeps only its first line. Single lines
    /// and invalid requests are returned unchanged.
    pub fn clamp_to(&self, line_count: usize) -> Self {
        match *self {
            HighlightRequest::Range(start, end) if start > 0 && start <= end => {
                let last = i64::try_from(line_count).unwrap_or(i64::MAX).max(start);
                HighlightRequest::Range(start, end.min(last))
            }
            other => other,
        }
    }

    /// Line numbers covered by this request (empty when invalid)
    pub fn lines(&self) -> impl Iterator<Item = usize> {
        let range = match *self {
            _ if self.validate().is_err() => 1..=0,
            HighlightRequest::Line(n) => n..=n,
            HighlightRequest::Range(start, end) => start..=end,
        };
        range.map(|n| n as usize)
    }
}

impl fmt::Display for HighlightRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighlightRequest::Line(n) => write!(f, "{}", n),
            HighlightRequest::Range(start, end) => write!(f, "{}-{}", start, end),
        }
    }
}

impl FromStr for HighlightRequest {
    type Err = HighlightError;

    /// Accepts `5`, `11-14`, `11..14` and `11...14`
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = |reason: &str| HighlightError::InvalidHighlightRequest {
            request: s.to_string(),
            reason: reason.to_string(),
        };
        let number = |part: &str| {
            part.trim()
                .parse::<i64>()
                .map_err(|_| invalid("not a line number"))
        };

        let bounds = s
            .split_once("...")
            .or_else(|| s.split_once(".."))
            .or_else(|| {
                // Skip the first character so `-2` stays a (negative) line
                s.get(1..)
                    .and_then(|rest| rest.split_once('-'))
                    .map(|(a, b)| (&s[..a.len() + 1], b))
            });

        match bounds {
            Some((start, end)) => Ok(HighlightRequest::Range(number(start)?, number(end)?)),
            None => Ok(HighlightRequest::Line(number(s)?)),
        }
    }
}

/// Parse a comma-separated list such as `5,11-14`
pub fn parse_requests(list: &str) -> Result<Vec<HighlightRequest>> {
    list.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<HighlightRequest>())
        .collect()
}

/// Flatten requests into the set of highlighted line numbers.
///
/// Malformed requests are logged and skipped; they never fail the call.
pub fn resolve(requests: &[HighlightRequest]) -> BTreeSet<usize> {
    let mut rows = BTreeSet::new();
    for request in requests {
        if let Err(e) = request.validate() {
            warn!("ignoring highlight request: {}", e);
            continue;
        }
        rows.extend(request.lines());
    }
    rows
}

/// Like `resolve`, for a document of `line_count` lines.
///
/// Ranges are clamped first, so a request like `1-999999999999` costs no
/// more than the document itself.
pub fn resolve_within(requests: &[HighlightRequest], line_count: usize) -> BTreeSet<usize> {
    let clamped: Vec<HighlightRequest> = requests.iter().map(|r| r.clamp_to(line_count)).collect();
    resolve(&clamped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_line_and_range() {
        let rows = resolve(&[HighlightRequest::Line(5), HighlightRequest::Range(11, 14)]);
        assert_eq!(rows.into_iter().collect::<Vec<_>>(), [5, 11, 12, 13, 14]);
    }

    #[test]
    fn test_resolve_duplicates_collapse() {
        let rows = resolve(&[
            HighlightRequest::Range(2, 4),
            HighlightRequest::Line(3),
            HighlightRequest::Range(4, 5),
        ]);
        assert_eq!(rows.into_iter().collect::<Vec<_>>(), [2, 3, 4, 5]);
    }

    #[test]
    fn test_resolve_empty() {
        assert!(resolve(&[]).is_empty());
    }

    #[test]
    fn test_single_line_range() {
        let rows = resolve(&[HighlightRequest::Range(7, 7)]);
        assert_eq!(rows.into_iter().collect::<Vec<_>>(), [7]);
    }

    #[test]
    fn test_invalid_requests_skipped() {
        let rows = resolve(&[
            HighlightRequest::Line(0),
            HighlightRequest::Line(-3),
            HighlightRequest::Range(9, 2),
            HighlightRequest::Range(-1, 2),
            HighlightRequest::Line(4),
        ]);
        assert_eq!(rows.into_iter().collect::<Vec<_>>(), [4]);
    }

    #[test]
    fn test_clamp_to() {
        assert_eq!(HighlightRequest::Range(2, 100).clamp_to(10), HighlightRequest::Range(2, 10));
        assert_eq!(HighlightRequest::Range(2, 5).clamp_to(10), HighlightRequest::Range(2, 5));
        assert_eq!(HighlightRequest::Range(20, 30).clamp_to(10), HighlightRequest::Range(20, 20));
        assert_eq!(HighlightRequest::Range(9, 2).clamp_to(5), HighlightRequest::Range(9, 2));
        assert_eq!(HighlightRequest::Line(50).clamp_to(5), HighlightRequest::Line(50));
    }

    #[test]
    fn test_resolve_within_bounds_huge_ranges() {
        let rows = resolve_within(
            &[
                HighlightRequest::Range(1, 999_999_999_999),
                HighlightRequest::Range(20, i64::MAX),
                HighlightRequest::Range(9, 2),
                HighlightRequest::Line(3),
            ],
            10,
        );
        assert_eq!(rows.into_iter().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 20]);
    }

    #[test]
    fn test_validate_reports_request() {
        let err = HighlightRequest::Range(9, 2).validate().unwrap_err();
        match err {
            HighlightError::InvalidHighlightRequest { request, reason } => {
                assert_eq!(request, "9-2");
                assert_eq!(reason, "range is inverted");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(HighlightRequest::Line(1).validate().is_ok());
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!("5".parse::<HighlightRequest>().unwrap(), HighlightRequest::Line(5));
        assert_eq!("11-14".parse::<HighlightRequest>().unwrap(), HighlightRequest::Range(11, 14));
        assert_eq!("16...19".parse::<HighlightRequest>().unwrap(), HighlightRequest::Range(16, 19));
        assert_eq!(" 5..6 ".parse::<HighlightRequest>().unwrap(), HighlightRequest::Range(5, 6));
        assert_eq!("-2".parse::<HighlightRequest>().unwrap(), HighlightRequest::Line(-2));
        assert!("x".parse::<HighlightRequest>().is_err());
        assert!("3-".parse::<HighlightRequest>().is_err());
    }

    #[test]
    fn test_parse_list() {
        let requests = parse_requests("5, 11-14,").unwrap();
        assert_eq!(requests, [HighlightRequest::Line(5), HighlightRequest::Range(11, 14)]);
        assert!(parse_requests("5,abc").is_err());
        assert!(parse_requests("").unwrap().is_empty());
    }
}
