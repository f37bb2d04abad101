//! ECMAScript feature catalog.
//!
//! Maps edition → feature name → suite path, and resolves each feature's
//! support level against a parsed ledger. The built-in table can be replaced
//! by a pipe-delimited file:
//!
//! ```text
//! # EDITION|Feature Name|suite/path
//! ES2015|Promises|built-ins/Promise
//! ```

use crate::ledger::Ledger;
use crate::models::catalog::{EditionFeatures, EditionSupport, Feature, FeatureSupport};
use crate::models::ResultRecord;
use std::fs;
use std::path::Path;

/// Editions whose fully passing features are listed as "modern" in reports.
pub const MODERN_EDITIONS: &[&str] = &[
    "ES2017", "ES2018", "ES2019", "ES2020", "ES2021", "ES2022", "ES2023", "ES2024", "ES2025",
];

const BUILTIN_CATALOG: &[(&str, &[(&str, &str)])] = &[
    (
        "ES2015",
        &[
            ("Arrow Functions", "language/expressions/arrow-function"),
            ("Classes", "language/statements/class"),
            ("Template Literals", "language/expressions/template-literal"),
            ("Destructuring", "language/expressions/assignment/destructuring"),
            ("Default Parameters", "language/expressions/function/default-parameters"),
            ("Rest Parameters", "language/expressions/function/rest-parameters"),
            ("Spread Operator", "language/expressions/spread"),
            ("for...of Loop", "language/statements/for-of"),
            ("Symbols", "built-ins/Symbol"),
            ("Generators", "built-ins/GeneratorFunction"),
            ("Promises", "built-ins/Promise"),
            ("Map", "built-ins/Map"),
            ("Set", "built-ins/Set"),
            ("WeakMap", "built-ins/WeakMap"),
            ("WeakSet", "built-ins/WeakSet"),
            ("Proxy", "built-ins/Proxy"),
            ("Reflect", "built-ins/Reflect"),
            ("Array.from", "built-ins/Array/from"),
            ("Array.of", "built-ins/Array/of"),
            ("Object.assign", "built-ins/Object/assign"),
        ],
    ),
    (
        "ES2016",
        &[
            ("Exponentiation Operator", "language/expressions/exponentiation"),
            ("Array.includes", "built-ins/Array/prototype/includes"),
        ],
    ),
    (
        "ES2017",
        &[
            ("async/await", "language/expressions/async-function"),
            ("Object.values", "built-ins/Object/values"),
            ("Object.entries", "built-ins/Object/entries"),
            (
                "Object.getOwnPropertyDescriptors",
                "built-ins/Object/getOwnPropertyDescriptors",
            ),
            ("String.padStart", "built-ins/String/prototype/padStart"),
            ("String.padEnd", "built-ins/String/prototype/padEnd"),
            ("Trailing Commas", "language/expressions/trailing-comma"),
        ],
    ),
    (
        "ES2018",
        &[
            ("Async Iterators", "built-ins/AsyncIteratorPrototype"),
            ("Promise.finally", "built-ins/Promise/prototype/finally"),
            ("Rest/Spread Properties", "language/expressions/object/rest-spread"),
            ("RegExp Named Groups", "built-ins/RegExp/named-groups"),
            ("RegExp Lookbehind", "built-ins/RegExp/lookbehind"),
            ("RegExp s flag", "built-ins/RegExp/dotAll"),
        ],
    ),
    (
        "ES2019",
        &[
            ("Array.flat", "built-ins/Array/prototype/flat"),
            ("Array.flatMap", "built-ins/Array/prototype/flatMap"),
            ("Object.fromEntries", "built-ins/Object/fromEntries"),
            ("String.trimStart", "built-ins/String/prototype/trimStart"),
            ("String.trimEnd", "built-ins/String/prototype/trimEnd"),
            ("Symbol.description", "built-ins/Symbol/prototype/description"),
            ("JSON.stringify", "built-ins/JSON/stringify"),
        ],
    ),
    (
        "ES2020",
        &[
            ("BigInt", "built-ins/BigInt"),
            ("BigInt64Array", "built-ins/BigInt64Array"),
            ("BigUint64Array", "built-ins/BigUint64Array"),
            ("Promise.allSettled", "built-ins/Promise/allSettled"),
            ("globalThis", "built-ins/global"),
            ("Optional Chaining (?.)", "language/expressions/optional-chaining"),
            ("Nullish Coalescing (??)", "language/expressions/coalesce"),
            ("String.matchAll", "built-ins/String/prototype/matchAll"),
            ("Dynamic Import", "language/expressions/dynamic-import"),
            ("import.meta", "language/expressions/import.meta"),
        ],
    ),
    (
        "ES2021",
        &[
            ("String.replaceAll", "built-ins/String/prototype/replaceAll"),
            ("Promise.any", "built-ins/Promise/any"),
            ("WeakRef", "built-ins/WeakRef"),
            ("FinalizationRegistry", "built-ins/FinalizationRegistry"),
            ("Logical Assignment (&&=)", "language/expressions/logical-assignment"),
            ("Numeric Separators", "language/expressions/numeric-separator"),
        ],
    ),
    (
        "ES2022",
        &[
            ("Class Fields", "language/statements/class/fields"),
            ("Private Methods", "language/statements/class/private-methods"),
            ("Static Class Fields", "language/statements/class/static"),
            ("Top-level await", "language/module-code/top-level-await"),
            ("Error.cause", "built-ins/Error/cause"),
            ("Array.at", "built-ins/Array/prototype/at"),
            ("String.at", "built-ins/String/prototype/at"),
            ("Object.hasOwn", "built-ins/Object/hasOwn"),
            ("RegExp d flag", "built-ins/RegExp/match-indices"),
        ],
    ),
    (
        "ES2023",
        &[
            ("Array.findLast", "built-ins/Array/prototype/findLast"),
            ("Array.findLastIndex", "built-ins/Array/prototype/findLastIndex"),
            ("Array.toReversed", "built-ins/Array/prototype/toReversed"),
            ("Array.toSorted", "built-ins/Array/prototype/toSorted"),
            ("Array.toSpliced", "built-ins/Array/prototype/toSpliced"),
            ("Array.with", "built-ins/Array/prototype/with"),
            ("Hashbang Grammar", "language/comments/hashbang"),
        ],
    ),
    (
        "ES2024",
        &[
            ("Array.fromAsync", "built-ins/Array/fromAsync"),
            ("Promise.withResolvers", "built-ins/Promise/withResolvers"),
            ("Object.groupBy", "built-ins/Object/groupBy"),
            ("Map.groupBy", "built-ins/Map/groupBy"),
            ("String.isWellFormed", "built-ins/String/prototype/isWellFormed"),
            ("String.toWellFormed", "built-ins/String/prototype/toWellFormed"),
            ("ArrayBuffer.transfer", "built-ins/ArrayBuffer/prototype/transfer"),
            ("RegExp v flag", "built-ins/RegExp/unicode-sets"),
        ],
    ),
    (
        "ES2025",
        &[
            ("Iterator Helpers", "built-ins/Iterator"),
            ("Set Methods", "built-ins/Set/prototype"),
            ("Promise.try", "built-ins/Promise/try"),
            ("Math.sumPrecise", "built-ins/Math/sumPrecise"),
            ("Math.f16round", "built-ins/Math/f16round"),
            ("Error.isError", "built-ins/Error/isError"),
            ("RegExp.escape", "built-ins/RegExp/escape"),
            ("Temporal", "built-ins/Temporal"),
        ],
    ),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureCatalog {
    editions: Vec<EditionFeatures>,
}

impl Default for FeatureCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FeatureCatalog {
    /// The catalog shipped with conftrack (ES2015 through ES2025).
    pub fn builtin() -> Self {
        let editions = BUILTIN_CATALOG
            .iter()
            .map(|(edition, features)| EditionFeatures {
                edition: edition.to_string(),
                features: features
                    .iter()
                    .map(|(name, path)| Feature {
                        name: name.to_string(),
                        path: path.to_string(),
                    })
                    .collect(),
            })
            .collect();
        Self { editions }
    }

    /// Parse `EDITION|Feature Name|path` lines. Comments, blank lines, and
    /// lines without exactly three non-empty fields are ignored. Editions keep
    /// the order of their first appearance.
    pub fn parse(text: &str) -> Self {
        let mut editions: Vec<EditionFeatures> = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let parts: Vec<&str> = line.split('|').map(str::trim).collect();
            let [edition, name, path] = parts.as_slice() else {
                log::debug!("catalog line ignored: {line:?}");
                continue;
            };
            if edition.is_empty() || name.is_empty() || path.is_empty() {
                continue;
            }
            let feature = Feature {
                name: name.to_string(),
                path: path.to_string(),
            };
            match editions.iter_mut().find(|e| e.edition == *edition) {
                Some(e) => e.features.push(feature),
                None => editions.push(EditionFeatures {
                    edition: edition.to_string(),
                    features: vec![feature],
                }),
            }
        }
        Self { editions }
    }

    /// Load a catalog file, falling back to the built-in table when the file
    /// is missing or unreadable.
    pub fn load_or_builtin(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::builtin();
        };
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(e) => {
                log::warn!(
                    "catalog {} unreadable ({e}); using built-in feature catalog",
                    path.display()
                );
                Self::builtin()
            }
        }
    }

    pub fn editions(&self) -> &[EditionFeatures] {
        &self.editions
    }

    pub fn feature_count(&self) -> usize {
        self.editions.iter().map(|e| e.features.len()).sum()
    }

    /// Resolve every feature against the ledger.
    pub fn resolve(&self, ledger: &Ledger) -> Vec<EditionSupport> {
        self.editions
            .iter()
            .map(|ed| {
                let features = ed
                    .features
                    .iter()
                    .map(|f| match find_support(ledger, &f.path) {
                        Some(rec) => FeatureSupport::from_record(f, rec),
                        None => FeatureSupport::not_found(f),
                    })
                    .collect();
                EditionSupport::new(ed.edition.clone(), features)
            })
            .collect()
    }
}

/// Find the ledger record that best describes `path`: an exact entry, then
/// the first entry (in path order) where either path contains the other, then
/// the closest ancestor.
pub fn find_support<'a>(ledger: &'a Ledger, path: &str) -> Option<&'a ResultRecord> {
    if let Some(rec) = ledger.get(path) {
        return Some(rec);
    }
    if let Some(rec) = ledger
        .records()
        .iter()
        .find(|(p, _)| p.contains(path) || path.contains(p.as_str()))
        .map(|(_, rec)| rec)
    {
        return Some(rec);
    }
    let mut parent = path;
    while let Some((head, _)) = parent.rsplit_once('/') {
        if let Some(rec) = ledger.get(head) {
            return Some(rec);
        }
        parent = head;
    }
    None
}
