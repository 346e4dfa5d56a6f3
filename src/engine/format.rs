//! Identified-format synthesis.
//!
//! The resolvers describe field order with placeholder delimiters. This module
//! puts the delimiters actually found in the source text back in:
//!
//! ```text
//! text "December 12, 2025"   delimiters [" ", ",", " "]
//! tag  "MMM$dd&yyyy"    ->   "MMMMM dd, yyyy"
//! ```

use crate::DateElement;
use crate::api::Options;
use crate::vocab::has_full_month;

/// Layout of the matched text, built from the resolver's `tag`.
///
/// `has_am_pm` must only be set when an am/pm time was applied to the result.
/// A time dropped during validation (`12:00:00 pm` shifts to hour 24) leaves
/// the date's format without the ` a` marker, so `2025-12-12 12:00:00 pm`
/// reports `yyyy-MM-dd`.
pub(crate) fn identified_format(element: &DateElement, tag: &str, has_am_pm: bool, options: &Options) -> String {
    let delimiters: Vec<char> = element.text.chars().filter(|c| !c.is_alphanumeric()).collect();
    let first: String = delimiters.first().map(char::to_string).unwrap_or_default();
    let rest: String = delimiters.iter().skip(1).collect();

    let mut format = tag.replacen('$', &first, 1).replacen('&', &rest, 1);

    if options.widen_full_month_names && element.alphanumeric && has_full_month(&element.text) {
        format = format.replacen("MMM", "MMMMM", 1);
    }
    if has_am_pm {
        format.push_str(" a");
    }
    format
}
