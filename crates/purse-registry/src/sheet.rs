//! Stylesheet-backed sink.
//!
//! [`SheetSink`] models a document stylesheet: plain rules and at-rules are
//! kept in two separate regions, and at-rules always render after plain
//! rules so that media and feature queries win over the base rules they
//! wrap. Rule text is checked for basic well-formedness before it is
//! accepted, as a browser would when parsing an inserted rule.

use purse_types::StyleRule;

use crate::error::{SinkError, SinkResult};
use crate::traits::{RuleHandle, StyleSink};

/// A live stylesheet that can be attached to or detached from its document.
#[derive(Debug)]
pub struct SheetSink {
    rules: Vec<(u64, StyleRule)>,
    at_rules: Vec<(u64, StyleRule)>,
    next_id: u64,
    attached: bool,
}

impl SheetSink {
    /// Create an empty, attached stylesheet.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            at_rules: Vec::new(),
            next_id: 0,
            attached: true,
        }
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Detach the stylesheet. Held rules stay, new rules are refused.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Total number of held rules across both regions.
    pub fn len(&self) -> usize {
        self.rules.len() + self.at_rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.at_rules.is_empty()
    }

    /// Plain rules in insertion order.
    pub fn base_rules(&self) -> impl Iterator<Item = &StyleRule> {
        self.rules.iter().map(|(_, rule)| rule)
    }

    /// At-rules in insertion order.
    pub fn at_rules(&self) -> impl Iterator<Item = &StyleRule> {
        self.at_rules.iter().map(|(_, rule)| rule)
    }

    /// Stylesheet text: plain rules, then at-rules, one per line.
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        for rule in self.base_rules().chain(self.at_rules()) {
            css.push_str(rule.as_str());
            css.push('\n');
        }
        css
    }
}

impl Default for SheetSink {
    fn default() -> Self {
        Self::new()
    }
}

/// Check that `text` looks like one complete rule: a prelude followed by a
/// balanced `{...}` block that closes at the very end.
fn validate_rule(text: &str) -> Result<(), String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("rule is empty".into());
    }
    let Some(open) = trimmed.find('{') else {
        return Err("rule has no declaration block".into());
    };
    if trimmed[..open].trim().is_empty() {
        return Err("rule has no selector".into());
    }

    let mut depth: usize = 0;
    for (i, c) in trimmed.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| format!("unexpected '}}' at byte {i}"))?;
                if depth == 0 && i + 1 != trimmed.len() {
                    return Err("trailing text after rule".into());
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err("unbalanced braces".into());
    }
    Ok(())
}

impl StyleSink for SheetSink {
    fn add_rule(&mut self, rule: &StyleRule) -> SinkResult<RuleHandle> {
        if !self.attached {
            return Err(SinkError::Detached(rule.to_string()));
        }
        validate_rule(rule.as_str()).map_err(|reason| SinkError::Rejected {
            rule: rule.to_string(),
            reason,
        })?;

        let id = self.next_id;
        self.next_id += 1;
        let region = if rule.is_at_rule() {
            &mut self.at_rules
        } else {
            &mut self.rules
        };
        region.push((id, rule.clone()));
        Ok(RuleHandle::new(id))
    }

    fn retract(&mut self, handle: RuleHandle) {
        for region in [&mut self.rules, &mut self.at_rules] {
            if let Some(pos) = region.iter().position(|(id, _)| *id == handle.id()) {
                region.remove(pos);
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(text: &str) -> StyleRule {
        StyleRule::new(text)
    }

    #[test]
    fn at_rules_render_after_base_rules() {
        let mut sheet = SheetSink::new();
        let _m = sheet.add_rule(&rule("@media print{.a{color:black;}}")).unwrap();
        let _a = sheet.add_rule(&rule(".a{color:red;}")).unwrap();
        assert_eq!(
            sheet.to_css(),
            ".a{color:red;}\n@media print{.a{color:black;}}\n"
        );
        assert_eq!(sheet.len(), 2);
    }

    #[test]
    fn retract_from_either_region() {
        let mut sheet = SheetSink::new();
        let m = sheet.add_rule(&rule("@media print{.a{color:black;}}")).unwrap();
        let a = sheet.add_rule(&rule(".a{color:red;}")).unwrap();
        sheet.retract(m);
        assert_eq!(sheet.at_rules().count(), 0);
        sheet.retract(a);
        assert!(sheet.is_empty());
    }

    #[test]
    fn detached_sheet_refuses_rules() {
        let mut sheet = SheetSink::new();
        sheet.detach();
        assert!(!sheet.is_attached());
        let err = sheet.add_rule(&rule(".a{color:red;}")).unwrap_err();
        assert_eq!(err, SinkError::Detached(".a{color:red;}".into()));
        assert!(err.to_string().contains(".a{color:red;}"));

        sheet.attach();
        assert!(sheet.add_rule(&rule(".a{color:red;}")).is_ok());
    }

    #[test]
    fn rejects_malformed_rules() {
        let mut sheet = SheetSink::new();
        for bad in ["", "   ", "color:red;", "{color:red;}", ".a{color:red;", ".a{}}", ".a{} .b"] {
            let err = sheet.add_rule(&rule(bad)).unwrap_err();
            assert!(matches!(err, SinkError::Rejected { .. }), "accepted {bad:?}");
        }
        assert!(sheet.is_empty());
    }

    #[test]
    fn accepts_nested_at_rules() {
        let mut sheet = SheetSink::new();
        let ok = sheet.add_rule(&rule("@supports (display: grid){.a{display:grid;}}"));
        assert!(ok.is_ok());
    }
}
