//! Parameter remapping across dialect vocabularies.
//!
//! Each dialect carries a rule table keyed by canonical parameter name.
//! Remapping walks the parsed parameter list in source order; surviving
//! entries keep their relative order and dropped entries leave no gap.

use crate::descriptor::Param;
use crate::duration::parse_duration;
use crate::error::{DsnError, DsnResult};

/// How one canonical parameter translates into the target vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamRule {
    /// Keep the name and value unchanged.
    Keep,
    /// Rename, keeping the value.
    Rename(&'static str),
    /// Rename and convert a duration-string value to integer milliseconds.
    RenameDurationMillis(&'static str),
    /// Rename and convert a duration-string value to whole seconds.
    RenameDurationSecs(&'static str),
    /// Drop the parameter explicitly.
    Drop,
}

/// A dialect's rule table. Every canonical name not listed is handled
/// according to the active [`ParamMode`].
pub type ParamRules = &'static [(&'static str, ParamRule)];

/// What to do with parameters the rule table does not list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamMode {
    /// Silently drop unknown parameters.
    #[default]
    Lenient,
    /// Fail with [`DsnError::UnknownParameter`].
    Strict,
}

/// Remap a parameter list through a dialect rule table.
///
/// Bare flags (entries without `=`) are forwarded untouched. A duration
/// conversion failure aborts the whole translation with
/// [`DsnError::InvalidDuration`].
pub fn remap_params(params: &[Param], rules: ParamRules, mode: ParamMode) -> DsnResult<Vec<Param>> {
    let mut out = Vec::with_capacity(params.len());
    for param in params {
        let Some(value) = &param.value else {
            out.push(param.clone());
            continue;
        };
        let rule = rules
            .iter()
            .find(|(name, _)| *name == param.name)
            .map(|(_, rule)| *rule);
        match rule {
            Some(ParamRule::Keep) => out.push(param.clone()),
            Some(ParamRule::Rename(to)) => out.push(Param::new(to, value.clone())),
            Some(ParamRule::RenameDurationMillis(to)) => {
                let duration = parse_duration(value)?;
                out.push(Param::new(to, duration.as_millis().to_string()));
            }
            Some(ParamRule::RenameDurationSecs(to)) => {
                let duration = parse_duration(value)?;
                out.push(Param::new(to, duration.as_secs().to_string()));
            }
            Some(ParamRule::Drop) => {}
            None => match mode {
                ParamMode::Lenient => {}
                ParamMode::Strict => {
                    return Err(DsnError::UnknownParameter {
                        name: param.name.clone(),
                    });
                }
            },
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: ParamRules = &[
        ("timeout", ParamRule::RenameDurationMillis("connectTimeout")),
        ("autocommit", ParamRule::Rename("autoCommit")),
        ("charset", ParamRule::Keep),
        ("collation", ParamRule::Drop),
    ];

    #[test]
    fn test_rename_and_convert() {
        let params = vec![
            Param::new("timeout", "10s"),
            Param::new("autocommit", "true"),
        ];
        let out = remap_params(&params, RULES, ParamMode::Lenient).unwrap();
        assert_eq!(
            out,
            vec![
                Param::new("connectTimeout", "10000"),
                Param::new("autoCommit", "true"),
            ]
        );
    }

    #[test]
    fn test_order_preserved_and_unknown_dropped() {
        let params = vec![
            Param::new("readTimeout", "10s"),
            Param::new("autocommit", "true"),
            Param::new("collation", "utf8mb4_bin"),
            Param::new("charset", "utf8mb4"),
            Param::new("timeout", "1s"),
        ];
        let out = remap_params(&params, RULES, ParamMode::Lenient).unwrap();
        assert_eq!(
            out,
            vec![
                Param::new("autoCommit", "true"),
                Param::new("charset", "utf8mb4"),
                Param::new("connectTimeout", "1000"),
            ]
        );
    }

    #[test]
    fn test_strict_mode_rejects_unknown() {
        let params = vec![Param::new("readTimeout", "10s")];
        let err = remap_params(&params, RULES, ParamMode::Strict).unwrap_err();
        assert!(matches!(err, DsnError::UnknownParameter { name } if name == "readTimeout"));
    }

    #[test]
    fn test_flags_pass_through() {
        let params = vec![Param::flag("timeout")];
        let out = remap_params(&params, RULES, ParamMode::Lenient).unwrap();
        assert_eq!(out, vec![Param::flag("timeout")]);
    }

    #[test]
    fn test_invalid_duration_aborts() {
        let params = vec![Param::new("timeout", "10xxs")];
        let err = remap_params(&params, RULES, ParamMode::Lenient).unwrap_err();
        assert!(matches!(err, DsnError::InvalidDuration { value } if value == "10xxs"));
    }
}
