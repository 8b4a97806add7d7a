//! Live currency masking for amount inputs
//!
//! Boundary adapter for the hosting UI: regroups digits by thousands
//! while the user types and keeps the caret in place. The validator
//! never sees masked text it cannot normalize back.

use crate::validation::normalize_amount;
use serde::{Deserialize, Serialize};

/// Group separator used by fr-FR number formatting (narrow no-break space)
pub const GROUP_SEPARATOR: char = '\u{202f}';

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MaskedInput {
    pub value: String,
    /// Caret position in characters
    pub caret: usize,
}

/// Group a digit string by thousands, dropping leading zeros ("0012500" → "12 500")
pub fn group_thousands(digits: &str) -> String {
    let trimmed = digits.trim_start_matches('0');
    let significant = if trimmed.is_empty() && !digits.is_empty() {
        "0"
    } else {
        trimmed
    };

    let len = significant.chars().count();
    let mut grouped = String::with_capacity(len + len / 3 * GROUP_SEPARATOR.len_utf8());

    for (i, c) in significant.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(c);
    }

    grouped
}

/// Re-mask an input after an edit.
///
/// `caret` is the position the edit left the caret at; it moves by the
/// number of separators inserted or removed.
pub fn apply_mask(current: &str, caret: usize) -> MaskedInput {
    let digits = normalize_amount(current);
    if digits.is_empty() {
        return MaskedInput {
            value: String::new(),
            caret: 0,
        };
    }

    let value = group_thousands(&digits);
    let old_len = current.chars().count() as i64;
    let new_len = value.chars().count() as i64;
    let shifted = caret as i64 + (new_len - old_len);
    let caret = shifted.clamp(0, new_len) as usize;

    MaskedInput { value, caret }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NNBSP: char = GROUP_SEPARATOR;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("5"), "5");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), format!("1{NNBSP}000"));
        assert_eq!(group_thousands("1234567"), format!("1{NNBSP}234{NNBSP}567"));
        assert_eq!(group_thousands("0012500"), format!("12{NNBSP}500"));
        assert_eq!(group_thousands("000"), "0");
        assert_eq!(group_thousands(""), "");
    }

    #[test]
    fn test_mask_moves_caret_past_new_separator() {
        // typed the fourth digit at the end of "123"
        let masked = apply_mask("1234", 4);
        assert_eq!(masked.value, format!("1{NNBSP}234"));
        assert_eq!(masked.caret, 5);
    }

    #[test]
    fn test_mask_after_deleting_a_digit() {
        // removed the "2" from "1 234" leaving "1 34" with the caret after "1 "
        let current = format!("1{NNBSP}34");
        let masked = apply_mask(&current, 2);
        assert_eq!(masked.value, "134");
        assert_eq!(masked.caret, 1);
    }

    #[test]
    fn test_mask_strips_letters_and_clears_empty() {
        assert_eq!(apply_mask("12a", 3).value, "12");

        let cleared = apply_mask("abc", 3);
        assert!(cleared.value.is_empty());
        assert_eq!(cleared.caret, 0);
    }

    #[test]
    fn test_masked_value_normalizes_back() {
        let masked = apply_mask("45000", 5);
        assert_eq!(normalize_amount(&masked.value), "45000");
    }
}
