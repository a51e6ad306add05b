//! Argument validation: arity and primitive type checks over the raw
//! tokens following the command token.
//!
//! Positions are 0-based and correspond 1:1 with the parameter
//! descriptors. Checks run strictly in parameter order and fail fast
//! on the first violation. Tokens beyond the declared parameter list
//! pass through unchecked; they are the provider's concern.

use crate::cli::error::{CliError, NumericKind};
use crate::registry::{ParamKind, ParamSpec};

/// Raw tokens that passed validation, unchanged. Strings stay strings;
/// coercion belongs to the provider.
#[derive(Debug, Clone, Copy)]
pub struct CheckedArgs<'a> {
    tokens: &'a [String],
}

impl<'a> CheckedArgs<'a> {
    pub fn tokens(&self) -> &'a [String] {
        self.tokens
    }
}

pub fn validate<'a>(
    params: &[ParamSpec],
    raw: &'a [String],
) -> Result<CheckedArgs<'a>, CliError> {
    for (position, param) in params.iter().enumerate() {
        let Some(token) = raw.get(position) else {
            if param.is_required() {
                return Err(CliError::MissingArgument {
                    position,
                    name: param.name.clone(),
                });
            }
            continue;
        };
        match param.kind {
            ParamKind::Int if !is_int_literal(token) => {
                return Err(CliError::TypeMismatch {
                    position,
                    expected: NumericKind::Int,
                });
            }
            ParamKind::Float if !is_float_literal(token) => {
                return Err(CliError::TypeMismatch {
                    position,
                    expected: NumericKind::Float,
                });
            }
            _ => {}
        }
    }
    Ok(CheckedArgs { tokens: raw })
}

/// Decimal digits only: no sign, no whitespace, non-empty.
pub fn is_int_literal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Numeric literal: optional sign, integer and/or fractional digits,
/// optional exponent.
pub fn is_float_literal(s: &str) -> bool {
    let mut rest = s.as_bytes();
    if let Some((&first, tail)) = rest.split_first()
        && (first == b'+' || first == b'-')
    {
        rest = tail;
    }

    let int_digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
    rest = &rest[int_digits..];

    let mut frac_digits = 0;
    if rest.first() == Some(&b'.') {
        rest = &rest[1..];
        frac_digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
        rest = &rest[frac_digits..];
    }
    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    match rest.split_first() {
        None => true,
        Some((&e, tail)) if e == b'e' || e == b'E' => {
            let mut exp = tail;
            if let Some((&sign, t)) = exp.split_first()
                && (sign == b'+' || sign == b'-')
            {
                exp = t;
            }
            !exp.is_empty() && exp.iter().all(|b| b.is_ascii_digit())
        }
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ParamDefault;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn missing_required_argument() {
        let params = [ParamSpec::required("a", ParamKind::Int)];
        let err = validate(&params, &[]).unwrap_err();
        assert_eq!(
            err,
            CliError::MissingArgument {
                position: 0,
                name: "a".into(),
            }
        );
    }

    #[test]
    fn missing_second_argument_reports_its_position() {
        let params = [
            ParamSpec::required("a", ParamKind::Int),
            ParamSpec::required("b", ParamKind::Int),
        ];
        let raw = tokens(&["3"]);
        let err = validate(&params, &raw).unwrap_err();
        assert_eq!(
            err,
            CliError::MissingArgument {
                position: 1,
                name: "b".into(),
            }
        );
    }

    #[test]
    fn fails_fast_on_earliest_violation() {
        let params = [
            ParamSpec::required("a", ParamKind::Int),
            ParamSpec::required("b", ParamKind::Declared("string".into())),
        ];
        let raw = tokens(&["x", "y"]);
        let err = validate(&params, &raw).unwrap_err();
        assert_eq!(
            err,
            CliError::TypeMismatch {
                position: 0,
                expected: NumericKind::Int,
            }
        );
    }

    #[test]
    fn default_satisfies_missing_token() {
        let params = [ParamSpec::optional(
            "a",
            ParamKind::Int,
            ParamDefault::Int(5),
        )];
        let checked = validate(&params, &[]).unwrap();
        assert!(checked.tokens().is_empty());
    }

    #[test]
    fn present_token_still_checked_for_optional_parameter() {
        let params = [ParamSpec::optional(
            "a",
            ParamKind::Int,
            ParamDefault::Int(5),
        )];
        let raw = tokens(&["abc"]);
        assert!(validate(&params, &raw).is_err());
    }

    #[test]
    fn decimal_string_fails_int_but_passes_float() {
        let int_params = [ParamSpec::required("a", ParamKind::Int)];
        let float_params = [ParamSpec::required("a", ParamKind::Float)];
        let raw = tokens(&["12.5"]);
        assert_eq!(
            validate(&int_params, &raw).unwrap_err(),
            CliError::TypeMismatch {
                position: 0,
                expected: NumericKind::Int,
            }
        );
        assert!(validate(&float_params, &raw).is_ok());
    }

    #[test]
    fn declared_and_untyped_parameters_accept_anything() {
        let params = [
            ParamSpec::required("a", ParamKind::Declared("string".into())),
            ParamSpec::required("b", ParamKind::Untyped),
        ];
        let raw = tokens(&["not-a-number", "***"]);
        assert!(validate(&params, &raw).is_ok());
    }

    #[test]
    fn excess_tokens_pass_through() {
        let params = [ParamSpec::required("a", ParamKind::Int)];
        let raw = tokens(&["1", "anything", "goes"]);
        let checked = validate(&params, &raw).unwrap();
        assert_eq!(checked.tokens().len(), 3);
    }

    #[test]
    fn int_literal_rules() {
        assert!(is_int_literal("0"));
        assert!(is_int_literal("007"));
        assert!(is_int_literal("42"));
        assert!(!is_int_literal(""));
        assert!(!is_int_literal("+3"));
        assert!(!is_int_literal("-3"));
        assert!(!is_int_literal(" 3"));
        assert!(!is_int_literal("3 "));
        assert!(!is_int_literal("3.0"));
    }

    #[test]
    fn float_literal_rules() {
        assert!(is_float_literal("1"));
        assert!(is_float_literal("-1"));
        assert!(is_float_literal("12.5"));
        assert!(is_float_literal("5."));
        assert!(is_float_literal(".5"));
        assert!(is_float_literal("+.5"));
        assert!(is_float_literal("1e5"));
        assert!(is_float_literal("-1.2E-3"));
        assert!(!is_float_literal(""));
        assert!(!is_float_literal("."));
        assert!(!is_float_literal("+"));
        assert!(!is_float_literal("1e"));
        assert!(!is_float_literal("e5"));
        assert!(!is_float_literal("1.2.3"));
        assert!(!is_float_literal(" 1"));
        assert!(!is_float_literal("abc"));
    }
}
