//! Shared test utilities for ta-trend tests.
//!
//! Fixture files are plain text. A file holds one or more cases; each case
//! starts with a `=== name ===` header, may carry `key = value` parameters, and
//! has labelled sections (`Input:`, `High:`, `Output:` ...) of `index: value`
//! lines, where the literal `NaN` marks an undefined value.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Tolerance for comparisons against reference fixtures.
#[allow(dead_code)]
pub const EPSILON: f64 = 1e-9;

/// Approximate equality check for floating-point values.
///
/// Two NaN values are considered equal for testing purposes.
#[allow(dead_code)]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() < eps
}

/// One named case of a fixture file.
#[derive(Debug, Clone, Default)]
#[allow(dead_code)]
pub struct FixtureCase {
    pub name: String,
    pub params: BTreeMap<String, f64>,
    pub sections: BTreeMap<String, Vec<Option<f64>>>,
}

#[allow(dead_code)]
impl FixtureCase {
    /// Returns a section as raw values, with NaN for undefined entries.
    pub fn values(&self, section: &str) -> Vec<f64> {
        self.section(section)
            .iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect()
    }

    /// Returns a section, panicking with a readable message if it is missing.
    pub fn section(&self, section: &str) -> &[Option<f64>] {
        self.sections
            .get(section)
            .unwrap_or_else(|| panic!("case `{}` has no `{}` section", self.name, section))
    }

    /// Returns a parameter, panicking if it is missing.
    pub fn param(&self, key: &str) -> f64 {
        *self
            .params
            .get(key)
            .unwrap_or_else(|| panic!("case `{}` has no `{}` parameter", self.name, key))
    }
}

/// Directory holding the fixture files.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Reads and parses a fixture file by name.
#[allow(dead_code)]
pub fn load_fixture(file: &str) -> Vec<FixtureCase> {
    let path = fixtures_dir().join(file);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e));
    parse_fixture(&text)
}

/// Parses fixture text into its cases.
///
/// Indices must be contiguous from zero within a section.
#[allow(dead_code)]
pub fn parse_fixture(text: &str) -> Vec<FixtureCase> {
    let mut cases: Vec<FixtureCase> = Vec::new();
    let mut section: Option<String> = None;

    for (line_no, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(name) = line
            .strip_prefix("===")
            .and_then(|rest| rest.strip_suffix("==="))
        {
            cases.push(FixtureCase {
                name: name.trim().to_string(),
                ..FixtureCase::default()
            });
            section = None;
            continue;
        }

        if cases.is_empty() {
            cases.push(FixtureCase::default());
        }
        let case = cases.last_mut().unwrap();

        if let Some(label) = line.strip_suffix(':') {
            case.sections.insert(label.to_string(), Vec::new());
            section = Some(label.to_string());
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            let value: f64 = value
                .trim()
                .parse()
                .unwrap_or_else(|e| panic!("line {}: bad parameter `{}`: {}", line_no + 1, line, e));
            case.params.insert(key.trim().to_string(), value);
            continue;
        }

        let (index, value) = line
            .split_once(':')
            .unwrap_or_else(|| panic!("line {}: expected `index: value`, got `{}`", line_no + 1, line));
        let index: usize = index
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("line {}: bad index: {}", line_no + 1, e));
        let value = match value.trim() {
            "NaN" => None,
            v => Some(
                v.parse::<f64>()
                    .unwrap_or_else(|e| panic!("line {}: bad value `{}`: {}", line_no + 1, v, e)),
            ),
        };

        let label = section
            .as_ref()
            .unwrap_or_else(|| panic!("line {}: value outside of a section", line_no + 1));
        let values = case.sections.get_mut(label).unwrap();
        assert_eq!(index, values.len(), "line {}: non-contiguous index", line_no + 1);
        values.push(value);
    }

    cases
}

/// Asserts `actual` matches an expected fixture column within `eps`.
#[allow(dead_code)]
pub fn assert_matches_fixture(actual: &[f64], expected: &[Option<f64>], eps: f64, context: &str) {
    assert_eq!(actual.len(), expected.len(), "{}: length mismatch", context);
    for (i, (&a, e)) in actual.iter().zip(expected).enumerate() {
        match e {
            None => assert!(a.is_nan(), "{}[{}]: expected NaN, got {}", context, i, a),
            Some(e) => assert!(
                approx_eq(a, *e, eps),
                "{}[{}]: expected {}, got {} (diff {})",
                context,
                i,
                e,
                a,
                (a - e).abs()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq(1.0, 1.0, EPSILON));
        assert!(approx_eq(f64::NAN, f64::NAN, EPSILON));
        assert!(!approx_eq(f64::NAN, 1.0, EPSILON));
        assert!(!approx_eq(1.0, 1.1, EPSILON));
    }

    #[test]
    fn test_parse_fixture_sections_and_params() {
        let text = "=== demo ===\nacceleration = 0.03\n\nInput:\n0: 1.5\n1: NaN\n\nOutput:\n0: NaN\n1: 2.25\n";
        let cases = parse_fixture(text);
        assert_eq!(cases.len(), 1);
        let case = &cases[0];
        assert_eq!(case.name, "demo");
        assert_eq!(case.param("acceleration"), 0.03);
        assert_eq!(case.section("Input"), &[Some(1.5), None]);
        assert_eq!(case.section("Output"), &[None, Some(2.25)]);
        assert!(case.values("Input")[1].is_nan());
    }

    #[test]
    fn test_parse_fixture_multiple_cases() {
        let text = "=== a ===\nOutput:\n0: 1.0\n=== b ===\nOutput:\n0: 2.0\n1: 3.0\n";
        let cases = parse_fixture(text);
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[1].name, "b");
        assert_eq!(cases[1].section("Output").len(), 2);
    }
}
