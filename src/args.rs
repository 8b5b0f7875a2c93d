//! Command-line token partitioning.
//!
//! The converter recognises a fixed set of options; everything else that
//! looks like a flag belongs to Pandoc. [`split_args`] walks the raw tokens
//! once and separates the two, so the recognised half can go through a
//! strict parser while the rest is forwarded verbatim.
//!
//! Passthrough rule: an unrecognised token starting with `-` is forwarded,
//! together with the next token when that one does not start with `-`.
//! `--number-sections report.md` therefore forwards both tokens; put
//! positionals before engine flags, or use `--flag=value`.

use crate::request::PassthroughArg;

/// Recognised options that consume the following token as their value.
pub const VALUE_OPTIONS: &[&str] = &[
    "--from",
    "-f",
    "--to",
    "-t",
    "-o",
    "--pdf-engine",
    "--timeout",
    "--engine-path",
];

/// Recognised options that stand alone.
pub const SWITCH_OPTIONS: &[&str] = &[
    "--standalone",
    "-s",
    "--toc",
    "--check",
    "--formats",
    "--json",
    "--no-progress",
    "-h",
    "--help",
];

/// Tokens after partitioning.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SplitArgs {
    /// Recognised options, their values and positionals, in original order.
    pub recognized: Vec<String>,
    /// Engine arguments, in original order.
    pub passthrough: Vec<PassthroughArg>,
}

fn is_value_option(token: &str) -> bool {
    VALUE_OPTIONS.contains(&token)
}

fn is_inline_value_option(token: &str) -> bool {
    token.starts_with("--")
        && token
            .split_once('=')
            .is_some_and(|(name, _)| is_value_option(name))
}

/// Separate recognised tokens from engine passthrough tokens.
pub fn split_args<I, S>(args: I) -> SplitArgs
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let tokens: Vec<String> = args.into_iter().map(Into::into).collect();
    let mut split = SplitArgs::default();
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];
        if is_value_option(token) {
            split.recognized.push(token.clone());
            if let Some(value) = tokens.get(i + 1) {
                split.recognized.push(value.clone());
            }
            i += 2;
        } else if SWITCH_OPTIONS.contains(&token.as_str()) || is_inline_value_option(token) {
            split.recognized.push(token.clone());
            i += 1;
        } else if token.starts_with('-') {
            split.passthrough.push(PassthroughArg::new(token.as_str()));
            if let Some(next) = tokens.get(i + 1).filter(|n| !n.starts_with('-')) {
                split.passthrough.push(PassthroughArg::new(next.as_str()));
                i += 1;
            }
            i += 1;
        } else {
            split.recognized.push(token.clone());
            i += 1;
        }
    }

    split
}

/// Whether any token equals one of `names`, wherever it appears.
pub fn contains_any(args: &[String], names: &[&str]) -> bool {
    args.iter().any(|a| names.contains(&a.as_str()))
}
