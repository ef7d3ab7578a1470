//! Query text normalization.
//!
//! A pure textual substitution applied to every statement immediately before
//! delegation: identifier-quote characters foreign to the target dialect are
//! replaced and binary arguments are widened to text where the backend
//! requires it.
//!
//! This is not SQL-aware. The quote substitution is a global character
//! replacement and does not special-case string literals that happen to
//! contain a backtick; that is a documented limitation, not a parser.

use std::borrow::Cow;

use sqlbridge_dsn::Dialect;

use crate::value::BoundValue;

/// The per-dialect normalization applied to statement text and arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryRewrite {
    double_quote_identifiers: bool,
    widen_binary: bool,
}

impl QueryRewrite {
    /// A rewrite that changes nothing.
    pub fn none() -> Self {
        Self {
            double_quote_identifiers: false,
            widen_binary: false,
        }
    }

    /// The normalization required by a dialect.
    pub fn for_dialect(dialect: Dialect) -> Self {
        match dialect {
            Dialect::MySql => Self::none(),
            Dialect::Dm | Dialect::Kingbase => Self {
                double_quote_identifiers: true,
                widen_binary: true,
            },
        }
    }

    /// Rewrite statement text. Borrows when nothing changes.
    pub fn rewrite_sql<'a>(&self, sql: &'a str) -> Cow<'a, str> {
        if self.double_quote_identifiers && sql.contains('`') {
            Cow::Owned(sql.replace('`', "\""))
        } else {
            Cow::Borrowed(sql)
        }
    }

    /// Rewrite bound arguments, widening binary values when required.
    pub fn rewrite_args(&self, args: &[BoundValue]) -> Vec<BoundValue> {
        if !self.widen_binary {
            return args.to_vec();
        }
        args.iter().cloned().map(BoundValue::widened).collect()
    }
}
