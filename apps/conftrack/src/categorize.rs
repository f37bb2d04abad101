//! Path categorization.
//!
//! Every suite path maps to exactly one category label. The mapping is an
//! ordered decision table: top-level rules match on the path prefix, and the
//! `built-ins/` and `language/` rules refine through their own ordered
//! tables. The first matching rule wins at every level.

/// Label for paths no rule claims.
pub const OTHER: &str = "Other";

const CORE_OBJECTS: &[&str] = &["Array", "String", "Object", "Number", "Boolean", "Function"];
const ES6_OBJECTS: &[&str] = &["Promise", "Symbol", "Proxy", "Reflect"];
const COLLECTIONS: &[&str] = &["Map", "Set", "WeakMap", "WeakSet"];
const BUILTIN_OBJECTS: &[&str] = &["Math", "Date", "RegExp", "JSON"];

/// How a top-level rule turns a matching path into a label.
#[derive(Debug, Clone, Copy)]
enum Action {
    Fixed(&'static str),
    BuiltIns,
    Language,
}

/// Prefix-matched rule over the whole path.
#[derive(Debug, Clone, Copy)]
struct TopRule {
    prefix: &'static str,
    action: Action,
}

const TOP_RULES: &[TopRule] = &[
    TopRule {
        prefix: "built-ins/",
        action: Action::BuiltIns,
    },
    TopRule {
        prefix: "language/",
        action: Action::Language,
    },
    TopRule {
        prefix: "annexB/",
        action: Action::Fixed("Annex B (Legacy)"),
    },
    TopRule {
        prefix: "intl402/",
        action: Action::Fixed("Internationalization (ECMA-402)"),
    },
    TopRule {
        prefix: "harness/",
        action: Action::Fixed("Test Harness"),
    },
];

/// Test applied to the segment after `built-ins/`.
#[derive(Debug, Clone, Copy)]
enum SegmentTest {
    OneOf(&'static [&'static str]),
    StartsWith(&'static str),
}

impl SegmentTest {
    fn matches(self, segment: &str) -> bool {
        match self {
            SegmentTest::OneOf(names) => names.contains(&segment),
            SegmentTest::StartsWith(prefix) => segment.starts_with(prefix),
        }
    }
}

/// Label produced by a built-ins rule.
#[derive(Debug, Clone, Copy)]
enum SegmentLabel {
    /// `"<prefix><segment>"`, keeping the segment verbatim.
    PerSegment(&'static str),
    Fixed(&'static str),
}

#[derive(Debug, Clone, Copy)]
struct SegmentRule {
    test: SegmentTest,
    label: SegmentLabel,
}

const BUILTIN_RULES: &[SegmentRule] = &[
    SegmentRule {
        test: SegmentTest::OneOf(CORE_OBJECTS),
        label: SegmentLabel::PerSegment("Core Objects - "),
    },
    SegmentRule {
        test: SegmentTest::OneOf(ES6_OBJECTS),
        label: SegmentLabel::Fixed("ES6+ Objects"),
    },
    SegmentRule {
        test: SegmentTest::OneOf(COLLECTIONS),
        label: SegmentLabel::Fixed("Collections"),
    },
    SegmentRule {
        test: SegmentTest::OneOf(BUILTIN_OBJECTS),
        label: SegmentLabel::Fixed("Built-in Objects"),
    },
    SegmentRule {
        test: SegmentTest::StartsWith("Intl"),
        label: SegmentLabel::Fixed("Internationalization"),
    },
];
const OTHER_BUILTINS: &str = "Other Built-ins";
const BUILTINS: &str = "Built-ins";

/// Substring rules for `language/` paths; order matters because a path may
/// contain more than one keyword.
const LANGUAGE_RULES: &[(&str, &str)] = &[
    ("expressions", "Language - Expressions"),
    ("statements", "Language - Statements"),
    ("types", "Language - Types"),
];
const LANGUAGE_FEATURES: &str = "Language Features";

/// Assign `path` to its category. Total: never fails, never returns an empty
/// label.
pub fn categorize(path: &str) -> String {
    for rule in TOP_RULES {
        if let Some(rest) = path.strip_prefix(rule.prefix) {
            return match rule.action {
                Action::Fixed(label) => label.to_string(),
                Action::BuiltIns => categorize_builtin(rest),
                Action::Language => categorize_language(path),
            };
        }
    }
    OTHER.to_string()
}

fn categorize_builtin(rest: &str) -> String {
    let segment = rest.split('/').next().unwrap_or_default();
    if segment.is_empty() {
        return BUILTINS.to_string();
    }
    BUILTIN_RULES
        .iter()
        .find(|r| r.test.matches(segment))
        .map(|r| match r.label {
            SegmentLabel::PerSegment(prefix) => format!("{prefix}{segment}"),
            SegmentLabel::Fixed(label) => label.to_string(),
        })
        .unwrap_or_else(|| OTHER_BUILTINS.to_string())
}

fn categorize_language(path: &str) -> String {
    LANGUAGE_RULES
        .iter()
        .find(|(needle, _)| path.contains(needle))
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| LANGUAGE_FEATURES.to_string())
}
