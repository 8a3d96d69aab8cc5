//! Risk/advice classification of text-markup annotations.
//!
//! The same semantic arrives through two legacy encodings: a subtype marker
//! on the annotation and a free-text pattern in its title. Both are folded
//! into one canonical `(subtype, title)` pair by an ordered rule table:
//!
//! 1. marker rules: a High/Normal/Low marker rewrites the title to the
//!    localized risk label;
//! 2. title rules: one of six legacy titles rewrites both title and subtype,
//!    overriding pass 1. Only this pass produces the advice subtypes.
//!
//! Canonical titles match no legacy pattern, so classifying the output again
//! returns it unchanged.

use markup_model::Subtype;

/// What a rule reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The parsed subtype marker equals this tag
    Marker(Subtype),
    /// The title equals this legacy text exactly
    Title(&'static str),
}

/// One classification rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub trigger: Trigger,
    pub subtype: Subtype,
    pub title: &'static str,
}

impl Rule {
    const fn marker(subtype: Subtype, title: &'static str) -> Self {
        Self { trigger: Trigger::Marker(subtype), subtype, title }
    }

    const fn title(legacy: &'static str, subtype: Subtype, title: &'static str) -> Self {
        Self { trigger: Trigger::Title(legacy), subtype, title }
    }

    fn matches(&self, marker: Option<Subtype>, title: &str) -> bool {
        match self.trigger {
            Trigger::Marker(subtype) => marker == Some(subtype),
            Trigger::Title(legacy) => title == legacy,
        }
    }
}

/// Pass 1: subtype markers.
pub const MARKER_RULES: [Rule; 3] = [
    Rule::marker(Subtype::High, "高风险"),
    Rule::marker(Subtype::Normal, "中风险"),
    Rule::marker(Subtype::Low, "低风险"),
];

/// Pass 2: legacy title patterns.
pub const TITLE_RULES: [Rule; 6] = [
    Rule::title("High风险", Subtype::High, "高风险"),
    Rule::title("Normal风险", Subtype::Normal, "中风险"),
    Rule::title("Low风险", Subtype::Low, "低风险"),
    Rule::title("High建议", Subtype::HighAdvice, "建议（高）"),
    Rule::title("Normal建议", Subtype::NormalAdvice, "建议（中）"),
    Rule::title("Low建议", Subtype::LowAdvice, "建议（低）"),
];

/// Canonical classification of one annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub subtype: Option<Subtype>,
    pub title: String,
}

impl Classification {
    /// Settings entry whose color overrides the raw annotation color.
    pub fn color_key(&self) -> Option<Subtype> {
        self.subtype
    }
}

/// Classify a raw `(subtype marker, title)` pair.
///
/// Unknown markers count as no marker. Titles that match no rule are kept
/// verbatim.
pub fn classify(marker: Option<&str>, title: &str) -> Classification {
    let mut subtype = marker.and_then(Subtype::parse);
    let mut canonical = title.to_owned();

    if let Some(rule) = MARKER_RULES.iter().find(|rule| rule.matches(subtype, title)) {
        canonical = rule.title.to_owned();
    }

    // Title rules look at the title as supplied, so a legacy title still wins
    // over a marker that pass 1 already rewrote.
    if let Some(rule) = TITLE_RULES.iter().find(|rule| rule.matches(subtype, title)) {
        canonical = rule.title.to_owned();
        subtype = Some(rule.subtype);
    }

    Classification { subtype, title: canonical }
}
