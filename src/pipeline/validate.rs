//! Pre-flight validation: a static table of conversions the tool refuses.
//!
//! Rules run in order and the first rejection wins. New restrictions are new
//! entries in [`RULES`]; nothing here guesses.

use crate::formats::is_input_only;

/// Extensions holding tabular data rather than prose.
const TABULAR: &[&str] = &[".csv", ".tsv", ".xlsx"];

/// Rich targets that tabular data cannot meaningfully become.
const RICH_TARGETS: &[&str] = &[".pptx", ".epub"];

/// The resolved pairing a rule looks at.
#[derive(Debug, Clone, Copy)]
pub struct ConversionPair<'a> {
    pub input_format: &'a str,
    pub output_format: &'a str,
    pub input_extension: Option<&'a str>,
    pub output_extension: Option<&'a str>,
}

/// Outcome of [`validate_conversion`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Allowed,
    Rejected { rule: &'static str, reason: String },
}

impl Verdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allowed)
    }
}

/// A named check that returns a reason when it rejects.
pub struct Rule {
    pub name: &'static str,
    check: fn(&ConversionPair<'_>) -> Option<String>,
}

/// Every rule, in evaluation order.
pub const RULES: &[Rule] = &[
    Rule {
        name: "input-only-target",
        check: reject_input_only_target,
    },
    Rule {
        name: "tabular-to-rich",
        check: reject_tabular_to_rich,
    },
];

fn reject_input_only_target(pair: &ConversionPair<'_>) -> Option<String> {
    let ext = pair.output_extension.filter(|e| is_input_only(e))?;
    Some(format!("Cannot convert TO {ext} - it's an input-only format"))
}

fn reject_tabular_to_rich(pair: &ConversionPair<'_>) -> Option<String> {
    let input = pair.input_extension.filter(|e| TABULAR.contains(e))?;
    let output = pair.output_extension.filter(|e| RICH_TARGETS.contains(e))?;
    Some(format!(
        "Converting tabular data ({input}) to {output} is not supported"
    ))
}

/// Run every rule against `pair`.
pub fn validate_conversion(pair: &ConversionPair<'_>) -> Verdict {
    for rule in RULES {
        if let Some(reason) = (rule.check)(pair) {
            return Verdict::Rejected {
                rule: rule.name,
                reason,
            };
        }
    }
    Verdict::Allowed
}
