//! Non-destructive range wrapping.
//!
//! The cheap path encloses a range that lies inside one text node. A range
//! crossing element boundaries is decomposed into one sub-range per
//! intersected text node; each sub-range wraps independently and a failed
//! sub-wrap (for instance a node that is already wrapped) is skipped
//! without aborting its siblings. Only a pass that wraps nothing at all
//! reports failure.

use crate::MARK_CLASS;
use dom::{Document, DomError, RangeSlice, TextRange, WrapTemplate};
use std::fmt;

/// Foreground applied inside wrappers so text stays readable on any
/// highlight color.
pub const TEXT_COLOR: &str = "#000000";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WrapOutcome {
    pub wrapped: usize,
    pub skipped: usize,
}

#[derive(Debug, PartialEq)]
pub enum WrapError {
    /// No sub-range could be wrapped at all; nothing was persisted-worthy.
    NothingWrapped,
    Dom(DomError),
}

impl fmt::Display for WrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WrapError::NothingWrapped => write!(f, "no part of the range could be wrapped"),
            WrapError::Dom(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for WrapError {}

impl From<DomError> for WrapError {
    fn from(err: DomError) -> Self {
        WrapError::Dom(err)
    }
}

fn template(color: &str) -> WrapTemplate {
    WrapTemplate::styled_span(
        MARK_CLASS,
        vec![
            ("background-color".to_string(), color.to_string()),
            ("color".to_string(), TEXT_COLOR.to_string()),
        ],
    )
}

/// Enclose `range` in marker spans colored `color`.
pub fn wrap(doc: &mut Document, range: &TextRange, color: &str) -> Result<WrapOutcome, WrapError> {
    let template = template(color);

    if range.in_single_node() {
        let slice = RangeSlice {
            node: range.start.node,
            start: range.start.offset,
            end: range.end.offset,
        };
        doc.wrap_text_slice(&template, slice)?;
        return Ok(WrapOutcome {
            wrapped: 1,
            skipped: 0,
        });
    }

    let slices = doc.covered_slices(range)?;
    let mut outcome = WrapOutcome::default();
    for slice in slices {
        match doc.wrap_text_slice(&template, slice) {
            Ok(_) => outcome.wrapped += 1,
            Err(err) => {
                log::debug!(target: "anchor.wrapper", "sub-wrap skipped: {err}");
                outcome.skipped += 1;
            }
        }
    }
    if outcome.wrapped == 0 {
        return Err(WrapError::NothingWrapped);
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::locate;
    use dom::fixtures::{doc, el, el_class, text, text_node_id};
    use dom::TextRange;

    #[test]
    fn single_node_wrap_takes_the_cheap_path() {
        let mut d = doc("https://ex.test/", vec![el("p", vec![text("pick me out")])]);
        let range = locate(&d, "me").unwrap();

        let outcome = wrap(&mut d, &range, "#ffff00").unwrap();
        assert_eq!(outcome, WrapOutcome { wrapped: 1, skipped: 0 });
        assert_eq!(d.marked_elements(MARK_CLASS).len(), 1);
    }

    #[test]
    fn cross_node_wrap_marks_each_intersected_node() {
        // three sibling text nodes, clipped at both ends
        let mut d = doc(
            "https://ex.test/",
            vec![el(
                "p",
                vec![text("one two "), el("b", vec![text("three")]), text(" four five")],
            )],
        );
        let range = locate(&d, "two three four").unwrap();
        let original = d.range_text(&range).unwrap();

        let outcome = wrap(&mut d, &range, "#ffff00").unwrap();
        assert_eq!(outcome.wrapped, 3);
        assert_eq!(outcome.skipped, 0);

        let wrappers = d.marked_elements(MARK_CLASS);
        assert_eq!(wrappers.len(), 3);
        let mut covered = String::new();
        for id in wrappers {
            let node = d.find(id).unwrap();
            covered.push_str(node.children().unwrap()[0].text().unwrap());
        }
        assert_eq!(covered, original);
    }

    #[test]
    fn partially_wrapped_ranges_skip_the_taken_nodes() {
        let mut d = doc(
            "https://ex.test/",
            vec![el(
                "p",
                vec![
                    el_class("span", MARK_CLASS, vec![text("held ")]),
                    text("free"),
                ],
            )],
        );
        let held = text_node_id(&d, "held ").unwrap();
        let free = text_node_id(&d, "free").unwrap();
        let range = TextRange::new(held, 0, free, 4);

        let outcome = wrap(&mut d, &range, "#ffff00").unwrap();
        assert_eq!(outcome, WrapOutcome { wrapped: 1, skipped: 1 });
    }

    #[test]
    fn fully_wrapped_ranges_fail_without_touching_the_tree() {
        let mut d = doc(
            "https://ex.test/",
            vec![el_class("span", MARK_CLASS, vec![text("sealed")])],
        );
        let sealed = text_node_id(&d, "sealed").unwrap();
        let range = TextRange::new(sealed, 0, sealed, 6);

        let err = wrap(&mut d, &range, "#ffff00").unwrap_err();
        assert!(matches!(err, WrapError::Dom(DomError::AlreadyWrapped(_))));
        assert_eq!(d.marked_elements(MARK_CLASS).len(), 1);
    }

    #[test]
    fn cross_node_total_failure_reports_nothing_wrapped() {
        let mut d = doc(
            "https://ex.test/",
            vec![el_class(
                "span",
                MARK_CLASS,
                vec![text("first "), el("b", vec![text("second")])],
            )],
        );
        let a = text_node_id(&d, "first ").unwrap();
        let b = text_node_id(&d, "second").unwrap();
        let range = TextRange::new(a, 0, b, 6);

        assert_eq!(wrap(&mut d, &range, "#ffff00").unwrap_err(), WrapError::NothingWrapped);
        assert_eq!(d.marked_elements(MARK_CLASS).len(), 1);
    }
}
