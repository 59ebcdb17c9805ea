//! Responsive breakpoint selection
//!
//! Sibling chart variants in one responsive container each declare a
//! minimum viewport width. A variant's effective display window runs from
//! its own declared width up to (but excluding) the next declared width.

use std::collections::BTreeMap;

use crate::EmbedError;

/// Effective pixel display window for one chart variant.
///
/// `min_width` is inclusive, `max_width` exclusive-by-construction (it is
/// already the last pixel at which the variant shows). A `None` bound is
/// unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Breakpoint {
    pub min_width: Option<u32>,
    pub max_width: Option<u32>,
}

/// Compute the display window for `variant_id` given the minimum widths
/// declared by all sibling variants.
///
/// An empty declaration set means a single non-responsive chart: no
/// constraint. A variant without a declared width is the zero-width default
/// and shows below the first declared breakpoint. The variant with the
/// largest declared width shows from that width up indefinitely.
pub fn compute_breakpoint(variant_id: &str, declared: &BTreeMap<String, u32>) -> Breakpoint {
    if declared.is_empty() {
        return Breakpoint::default();
    }

    let min_width = declared.get(variant_id).copied().unwrap_or(0);
    let next_width = declared
        .values()
        .copied()
        .filter(|width| *width > min_width)
        .min();

    match next_width {
        Some(next) => Breakpoint {
            // The zero-width default has no lower bound.
            min_width: (min_width > 0).then_some(min_width),
            max_width: Some(next - 1),
        },
        None => Breakpoint {
            min_width: Some(min_width),
            max_width: None,
        },
    }
}

/// Reject sibling variants declaring the identical minimum width; two
/// variants cannot share one display window.
pub fn validate_breakpoints(declared: &BTreeMap<String, u32>) -> Result<(), EmbedError> {
    let mut widths: Vec<u32> = declared.values().copied().collect();
    widths.sort_unstable();

    for pair in widths.windows(2) {
        if pair[0] == pair[1] {
            return Err(EmbedError::DuplicateWidth(pair[0]));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declared(pairs: &[(&str, u32)]) -> BTreeMap<String, u32> {
        pairs
            .iter()
            .map(|(id, width)| (id.to_string(), *width))
            .collect()
    }

    #[test]
    fn test_empty_declarations_are_unconstrained() {
        assert_eq!(
            compute_breakpoint("c1", &BTreeMap::new()),
            Breakpoint::default()
        );
    }

    #[test]
    fn test_default_variant_has_only_upper_bound() {
        let widths = declared(&[("c1", 0), ("c2", 600)]);
        assert_eq!(
            compute_breakpoint("c1", &widths),
            Breakpoint {
                min_width: None,
                max_width: Some(599),
            }
        );
    }

    #[test]
    fn test_largest_variant_has_only_lower_bound() {
        let widths = declared(&[("c1", 0), ("c2", 600)]);
        assert_eq!(
            compute_breakpoint("c2", &widths),
            Breakpoint {
                min_width: Some(600),
                max_width: None,
            }
        );
    }

    #[test]
    fn test_middle_variant_is_bounded_both_sides() {
        let widths = declared(&[("c1", 0), ("c2", 600), ("c3", 900)]);
        assert_eq!(
            compute_breakpoint("c2", &widths),
            Breakpoint {
                min_width: Some(600),
                max_width: Some(899),
            }
        );
    }

    #[test]
    fn test_undeclared_variant_acts_as_default() {
        let widths = declared(&[("c2", 600)]);
        assert_eq!(
            compute_breakpoint("c1", &widths),
            Breakpoint {
                min_width: None,
                max_width: Some(599),
            }
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_widths() {
        let widths = declared(&[("c1", 600), ("c2", 600)]);
        assert_eq!(
            validate_breakpoints(&widths),
            Err(EmbedError::DuplicateWidth(600))
        );

        let ok = declared(&[("c1", 0), ("c2", 600), ("c3", 900)]);
        assert_eq!(validate_breakpoints(&ok), Ok(()));
    }
}
