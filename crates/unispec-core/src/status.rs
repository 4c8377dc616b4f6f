//! Status specifier parsing and status code allocation.
//!
//! Response maps key their entries by specifiers of three shapes: a
//! literal code (`404`), a class wildcard (`4XX`) and the `default`
//! fallback. Readers allocate each specifier a disjoint set of concrete
//! codes by draining a shared per-operation pool, most specific specifier
//! first.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::ops::Range;

pub use crate::error::InvalidStatusKind;

/// A parsed status specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// A literal three-digit code, e.g. `404`.
    Code(u16),
    /// A class wildcard, e.g. `4XX`.
    Class(u8),
    /// The `default` fallback.
    Default,
}

impl StatusKind {
    /// Parse a specifier. The grammar is exact: `default`, three digits,
    /// or one digit followed by the literal `XX`.
    pub fn parse(kind: &str) -> Result<Self, InvalidStatusKind> {
        if kind == "default" {
            return Ok(StatusKind::Default);
        }
        let bytes = kind.as_bytes();
        if bytes.len() == 3 && bytes[0].is_ascii_digit() {
            let hundreds = bytes[0] - b'0';
            if bytes[1..] == *b"XX" {
                return Ok(StatusKind::Class(hundreds));
            }
            if bytes[1].is_ascii_digit() && bytes[2].is_ascii_digit() {
                let code = u16::from(hundreds) * 100
                    + u16::from(bytes[1] - b'0') * 10
                    + u16::from(bytes[2] - b'0');
                return Ok(StatusKind::Code(code));
            }
        }
        Err(InvalidStatusKind(kind.to_string()))
    }

    /// Specificity rank; higher sorts first.
    pub fn priority(self) -> u8 {
        match self {
            StatusKind::Code(_) => 3,
            StatusKind::Class(_) => 2,
            StatusKind::Default => 1,
        }
    }

    /// The half-open window of codes this specifier may claim.
    pub fn code_window(self) -> Range<u16> {
        match self {
            StatusKind::Code(code) => code..code + 1,
            StatusKind::Class(class) => {
                let low = u16::from(class) * 100;
                low..low + 100
            }
            StatusKind::Default => 100..600,
        }
    }
}

/// Rank of a raw specifier string. Unparseable specifiers rank 0 so the
/// comparer stays total over arbitrary strings.
fn specificity(kind: &str) -> u8 {
    StatusKind::parse(kind).map_or(0, StatusKind::priority)
}

/// Order status specifiers most specific first: literal codes, then class
/// wildcards, then `default`, then anything unparseable. Specifiers of
/// equal specificity compare equal; a stable sort keeps their document
/// order.
pub fn status_kind_comparer(a: &str, b: &str) -> Ordering {
    specificity(b).cmp(&specificity(a))
}

/// Claim the pool codes that fall inside `status_kind`'s window.
///
/// The specifier is parsed up front; a rejected specifier never touches
/// the pool. The returned iterator scans the window in ascending order
/// and removes every code it yields, so repeated takes against one pool
/// can never hand out a code twice. Callers resolving several specifiers
/// for one operation must go most specific first (see
/// [`status_kind_comparer`]) or broad specifiers will swallow codes the
/// narrow ones name outright.
pub fn take_status_codes<'p>(
    pool: &'p mut BTreeSet<u16>,
    status_kind: &str,
) -> Result<TakeStatusCodes<'p>, InvalidStatusKind> {
    let kind = StatusKind::parse(status_kind)?;
    Ok(TakeStatusCodes {
        pool,
        window: kind.code_window(),
    })
}

/// Draining iterator returned by [`take_status_codes`]. Codes leave the
/// pool one at a time, as they are yielded.
#[derive(Debug)]
pub struct TakeStatusCodes<'p> {
    pool: &'p mut BTreeSet<u16>,
    window: Range<u16>,
}

impl Iterator for TakeStatusCodes<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        loop {
            let code = self.window.next()?;
            if self.pool.remove(&code) {
                return Some(code);
            }
        }
    }
}
