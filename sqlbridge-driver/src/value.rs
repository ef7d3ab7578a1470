//! Tagged bound-parameter values.
//!
//! Every argument crossing the dispatcher carries an explicit tag instead of
//! relying on runtime type inspection. Binary values additionally carry a
//! render-as-text flag, set once at the rewrite boundary for dialects that
//! widen binary arguments to text before forwarding.

/// A bound statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
    /// SQL NULL.
    Null,
    /// Boolean.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit float.
    Float(f64),
    /// Text.
    Text(String),
    /// Binary payload.
    Bytes {
        /// The raw bytes.
        data: Vec<u8>,
        /// Whether the backend should receive this value as text.
        as_text: bool,
    },
}

impl BoundValue {
    /// A binary value in its default (non-widened) form.
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Self::Bytes {
            data: data.into(),
            as_text: false,
        }
    }

    /// Widen a binary value to its text representation; other variants are
    /// returned unchanged.
    pub fn widened(self) -> Self {
        match self {
            Self::Bytes { data, .. } => Self::Bytes {
                data,
                as_text: true,
            },
            other => other,
        }
    }

    /// Whether this is a binary value still tagged for binary transfer.
    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Bytes { as_text: false, .. })
    }

    /// A short rendering for diagnostic logging.
    pub fn render_for_log(&self) -> String {
        match self {
            Self::Null => "NULL".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Text(s) => format!("{:?}", s),
            Self::Bytes { data, as_text } => {
                if *as_text {
                    format!("{:?}", String::from_utf8_lossy(data))
                } else {
                    format!("<{} bytes>", data.len())
                }
            }
        }
    }
}

impl From<bool> for BoundValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for BoundValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for BoundValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for BoundValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for BoundValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<u8>> for BoundValue {
    fn from(v: Vec<u8>) -> Self {
        Self::bytes(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widening_tags_bytes_only() {
        let widened = BoundValue::bytes(b"abc".to_vec()).widened();
        assert_eq!(
            widened,
            BoundValue::Bytes {
                data: b"abc".to_vec(),
                as_text: true,
            }
        );
        assert!(!widened.is_binary());

        let int = BoundValue::Int(7).widened();
        assert_eq!(int, BoundValue::Int(7));
    }

    #[test]
    fn test_log_rendering_hides_binary_payload() {
        let raw = BoundValue::bytes(b"secret".to_vec());
        assert_eq!(raw.render_for_log(), "<6 bytes>");

        let widened = raw.widened();
        assert_eq!(widened.render_for_log(), "\"secret\"");
    }
}
