//! Raw argument binding.
//!
//! Scans the raw argument vector and binds flag values into declared
//! [`ToolOption`]s and positional tokens into declared [`ToolArgument`]s.
//! Both `--name=value` and `--name value` forms are accepted; `-a` matches
//! single-character aliases; `--` ends flag parsing. Anything the declared
//! schema cannot account for is a syntax error - validation proper happens
//! later, in `dispatch`.

use crate::argument::ToolArgument;
use crate::error::ShellError;
use crate::option::{Arity, ToolOption};

/// Bind `argv` into the declared options and arguments, in place.
pub(crate) fn bind(
    argv: &[String],
    options: &mut [ToolOption],
    arguments: &mut [ToolArgument],
) -> Result<(), ShellError> {
    let mut positionals: Vec<String> = Vec::new();
    let mut flags_done = false;

    let mut i = 0;
    while i < argv.len() {
        let token = &argv[i];

        if token == "--" && !flags_done {
            flags_done = true;
            i += 1;
            continue;
        }

        if flags_done || !looks_like_flag(token) {
            positionals.push(token.clone());
            i += 1;
            continue;
        }

        let (flag, inline) = match token.split_once('=') {
            Some((flag, value)) => (flag, Some(value.to_string())),
            None => (token.as_str(), None),
        };

        let Some(opt) = find_option(options, flag) else {
            return Err(ShellError::Syntax(format!("Unknown option '{flag}'.")));
        };

        match opt.arity() {
            Arity::NoValue => {
                if inline.is_some() {
                    return Err(ShellError::Syntax(format!(
                        "Option '{flag}' does not take a value."
                    )));
                }
                opt.mark_present();
                i += 1;
            }
            Arity::SingleValue => {
                if opt.bound_len() > 0 {
                    return Err(ShellError::Syntax(format!(
                        "Option '{flag}' specified more than once."
                    )));
                }
                let value = take_value(flag, inline, argv, &mut i)?;
                opt.bind(value);
            }
            Arity::MultipleValue => {
                let value = take_value(flag, inline, argv, &mut i)?;
                opt.bind(value);
            }
        }
    }

    bind_positionals(positionals, arguments)
}

/// A lone `-` is a conventional stdin placeholder and a leading digit
/// marks a negative number (`-7`, `-2.5`); both bind positionally.
fn looks_like_flag(token: &str) -> bool {
    token.starts_with('-')
        && token != "-"
        && !token.chars().nth(1).is_some_and(|c| c.is_ascii_digit())
}

/// Resolve the value for a value-taking flag: inline (`--flag=v`) or the
/// next token (`--flag v`). Advances the scan index accordingly.
fn take_value(
    flag: &str,
    inline: Option<String>,
    argv: &[String],
    i: &mut usize,
) -> Result<String, ShellError> {
    if let Some(value) = inline {
        *i += 1;
        return Ok(value);
    }
    match argv.get(*i + 1) {
        Some(value) => {
            *i += 2;
            Ok(value.clone())
        }
        None => Err(ShellError::Syntax(format!(
            "Option '{flag}' requires a value."
        ))),
    }
}

/// Match a dashed token against declared long names and aliases.
fn find_option<'a>(options: &'a mut [ToolOption], flag: &str) -> Option<&'a mut ToolOption> {
    options.iter_mut().find(|opt| {
        if flag == format!("--{}", opt.name()) {
            return true;
        }
        opt.aliases().iter().any(|alias| {
            if alias.len() == 1 {
                flag == format!("-{alias}")
            } else {
                flag == format!("--{alias}")
            }
        })
    })
}

/// Distribute positional tokens over the declared arguments in order: one
/// each, with a trailing collecting argument taking whatever remains.
fn bind_positionals(
    positionals: Vec<String>,
    arguments: &mut [ToolArgument],
) -> Result<(), ShellError> {
    let mut tokens = positionals.into_iter();
    for arg in arguments.iter_mut() {
        if arg.is_collecting() {
            for token in tokens.by_ref() {
                arg.bind(token);
            }
            break;
        }
        if let Some(token) = tokens.next() {
            arg.bind(token);
        }
    }
    if let Some(extra) = tokens.next() {
        return Err(ShellError::Syntax(format!("Unexpected argument '{extra}'.")));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueKind;

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_bind_no_value_flag() {
        let mut opts = vec![ToolOption::new("verbose", Arity::NoValue).alias("v")];
        bind(&argv(&["--verbose"]), &mut opts, &mut []).unwrap();
        assert!(opts[0].is_present());
    }

    #[test]
    fn test_bind_short_alias() {
        let mut opts = vec![ToolOption::new("verbose", Arity::NoValue).alias("v")];
        bind(&argv(&["-v"]), &mut opts, &mut []).unwrap();
        assert!(opts[0].is_present());
    }

    #[test]
    fn test_bind_separate_and_inline_values() {
        let mut opts = vec![
            ToolOption::new("out", Arity::SingleValue),
            ToolOption::new("level", Arity::SingleValue).kind(ValueKind::Int32),
        ];
        bind(
            &argv(&["--out", "a.txt", "--level=3"]),
            &mut opts,
            &mut [],
        )
        .unwrap();
        assert_eq!(opts[0].text(), Some("a.txt"));
        assert_eq!(opts[1].integer(), Some(3));
    }

    #[test]
    fn test_bind_multiple_value_repeats() {
        let mut opts = vec![ToolOption::new("tag", Arity::MultipleValue).alias("t")];
        bind(
            &argv(&["--tag", "a", "-t", "b", "--tag=c"]),
            &mut opts,
            &mut [],
        )
        .unwrap();
        assert_eq!(opts[0].values().len(), 3);
    }

    #[test]
    fn test_repeated_single_value_is_syntax_error() {
        let mut opts = vec![ToolOption::new("out", Arity::SingleValue)];
        let err = bind(&argv(&["--out", "a", "--out", "b"]), &mut opts, &mut []).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_unknown_option_is_syntax_error() {
        let err = bind(&argv(&["--bogus"]), &mut [], &mut []).unwrap_err();
        assert!(matches!(err, ShellError::Syntax(_)));
        assert!(err.to_string().contains("Unknown option '--bogus'"));
    }

    #[test]
    fn test_missing_value_is_syntax_error() {
        let mut opts = vec![ToolOption::new("out", Arity::SingleValue)];
        let err = bind(&argv(&["--out"]), &mut opts, &mut []).unwrap_err();
        assert!(err.to_string().contains("requires a value"));
    }

    #[test]
    fn test_no_value_flag_rejects_inline_value() {
        let mut opts = vec![ToolOption::new("verbose", Arity::NoValue)];
        let err = bind(&argv(&["--verbose=yes"]), &mut opts, &mut []).unwrap_err();
        assert!(err.to_string().contains("does not take a value"));
    }

    #[test]
    fn test_positionals_bind_in_declared_order() {
        let mut args = vec![ToolArgument::new("first"), ToolArgument::new("second")];
        bind(&argv(&["a", "b"]), &mut [], &mut args).unwrap();
        assert_eq!(args[0].text(), Some("a"));
        assert_eq!(args[1].text(), Some("b"));
    }

    #[test]
    fn test_trailing_collecting_argument_takes_rest() {
        let mut args = vec![
            ToolArgument::new("first"),
            ToolArgument::new("rest").multiple(),
        ];
        bind(&argv(&["a", "b", "c"]), &mut [], &mut args).unwrap();
        assert_eq!(args[0].text(), Some("a"));
        assert_eq!(args[1].values().len(), 2);
    }

    #[test]
    fn test_excess_positionals_are_syntax_error() {
        let mut args = vec![ToolArgument::new("only")];
        let err = bind(&argv(&["a", "b"]), &mut [], &mut args).unwrap_err();
        assert!(err.to_string().contains("Unexpected argument 'b'"));
    }

    #[test]
    fn test_double_dash_ends_flag_parsing() {
        let mut opts = vec![ToolOption::new("verbose", Arity::NoValue)];
        let mut args = vec![ToolArgument::new("path")];
        bind(&argv(&["--", "--verbose"]), &mut opts, &mut args).unwrap();
        assert!(!opts[0].is_present());
        assert_eq!(args[0].text(), Some("--verbose"));
    }

    #[test]
    fn test_negative_integer_is_positional() {
        let mut args = vec![ToolArgument::new("delta").kind(ValueKind::Int32)];
        bind(&argv(&["-7"]), &mut [], &mut args).unwrap();
        assert_eq!(args[0].integer(), Some(-7));
    }

    #[test]
    fn test_negative_float_is_positional() {
        let mut args = vec![ToolArgument::new("delta").kind(ValueKind::Float64)];
        bind(&argv(&["-2.5"]), &mut [], &mut args).unwrap();
        assert_eq!(args[0].float(), Some(-2.5));
    }

    #[test]
    fn test_lone_dash_is_positional() {
        let mut args = vec![ToolArgument::new("input")];
        bind(&argv(&["-"]), &mut [], &mut args).unwrap();
        assert_eq!(args[0].text(), Some("-"));
    }
}
