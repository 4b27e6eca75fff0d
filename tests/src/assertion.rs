//! Assertion types and builders for verifying step results.

use tether_session::ExecuteResult;

use crate::error::{HarnessError, HarnessResult};

/// A complete assertion for one step's result.
#[derive(Default)]
pub struct Assertion {
    // Success assertions
    pub text: Option<String>,
    pub text_contains: Vec<String>,

    // Table payload assertions
    pub table: Option<serde_json::Value>,
    pub headers: Option<Vec<(String, String)>>,
    pub data_rows: Option<usize>,
    pub no_table: bool,

    // Outcome-class assertions
    pub incomplete: bool,
    pub error_name: Option<String>,
    pub error_contains: Option<String>,
    pub error_pattern: Option<String>,

    // Custom assertion function
    #[allow(clippy::type_complexity)]
    pub custom: Option<Box<dyn Fn(&ExecuteResult) -> bool + Send + Sync>>,
}

impl std::fmt::Debug for Assertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assertion")
            .field("text", &self.text)
            .field("text_contains", &self.text_contains)
            .field("table", &self.table)
            .field("headers", &self.headers)
            .field("data_rows", &self.data_rows)
            .field("no_table", &self.no_table)
            .field("incomplete", &self.incomplete)
            .field("error_name", &self.error_name)
            .field("error_contains", &self.error_contains)
            .field("error_pattern", &self.error_pattern)
            .field("custom", &self.custom.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Assertion {
    /// Create a new empty assertion.
    pub fn new() -> Self {
        Self::default()
    }

    fn expects_error(&self) -> bool {
        self.error_name.is_some() || self.error_contains.is_some() || self.error_pattern.is_some()
    }

    /// Verify the assertion against a result.
    pub fn verify(&self, step: &str, result: &ExecuteResult) -> HarnessResult<()> {
        // Check outcome-class expectations first
        if self.incomplete {
            return if result.is_incomplete() {
                Ok(())
            } else {
                Err(HarnessError::assertion_failed(
                    step,
                    format!("expected Incomplete, got {:?}", result),
                ))
            };
        }

        if self.expects_error() {
            let ExecuteResult::Error {
                name,
                message,
                trace,
            } = result
            else {
                return Err(HarnessError::assertion_failed(
                    step,
                    format!("expected an error, got {:?}", result),
                ));
            };

            if let Some(ref expected) = self.error_name {
                if name != expected {
                    return Err(HarnessError::assertion_failed(
                        step,
                        format!("expected error '{}', got '{}': {}", expected, name, message),
                    ));
                }
            }

            if let Some(ref needle) = self.error_contains {
                let in_message = message.contains(needle.as_str());
                let in_trace = trace.iter().any(|line| line.contains(needle.as_str()));
                if !in_message && !in_trace {
                    return Err(HarnessError::assertion_failed(
                        step,
                        format!(
                            "expected error containing '{}', got '{}: {}'",
                            needle, name, message
                        ),
                    ));
                }
            }

            if let Some(ref pattern) = self.error_pattern {
                let re = regex_lite::Regex::new(pattern).map_err(|e| {
                    HarnessError::assertion_failed(step, format!("invalid regex pattern: {}", e))
                })?;
                if !re.is_match(message) {
                    return Err(HarnessError::assertion_failed(
                        step,
                        format!("expected error matching '{}', got: {}", pattern, message),
                    ));
                }
            }

            return Ok(());
        }

        // From here on the step must have succeeded
        match result {
            ExecuteResult::Error { name, message, .. } => {
                return Err(HarnessError::assertion_failed(
                    step,
                    format!("step failed with {}: {}", name, message),
                ));
            }
            ExecuteResult::Incomplete => {
                return Err(HarnessError::assertion_failed(
                    step,
                    "step was unexpectedly incomplete",
                ));
            }
            ExecuteResult::Success { .. } => {}
        }

        // Run custom assertion if present
        if let Some(ref custom) = self.custom {
            if !custom(result) {
                return Err(HarnessError::assertion_failed(
                    step,
                    "custom assertion failed",
                ));
            }
        }

        if let Some(ref expected) = self.text {
            let actual = result.text().unwrap_or_default();
            if actual != expected {
                return Err(HarnessError::assertion_failed(
                    step,
                    format!(
                        "text mismatch:\n  expected: {:?}\n  actual:   {:?}",
                        expected, actual
                    ),
                ));
            }
        }

        for needle in &self.text_contains {
            let actual = result.text().unwrap_or_default();
            if !actual.contains(needle.as_str()) {
                return Err(HarnessError::assertion_failed(
                    step,
                    format!("expected text containing {:?}, got {:?}", needle, actual),
                ));
            }
        }

        if let Some(ref expected) = self.table {
            match result.table() {
                Some(actual) if actual == expected => {}
                Some(actual) => {
                    return Err(HarnessError::assertion_failed(
                        step,
                        format!(
                            "table mismatch:\n  expected: {}\n  actual:   {}",
                            expected, actual
                        ),
                    ));
                }
                None => {
                    return Err(HarnessError::assertion_failed(
                        step,
                        "expected a table payload, got none",
                    ));
                }
            }
        }

        if let Some(ref expected) = self.headers {
            let actual = self.header_pairs(step, result)?;
            if actual != *expected {
                return Err(HarnessError::assertion_failed(
                    step,
                    format!(
                        "header mismatch:\n  expected: {:?}\n  actual:   {:?}",
                        expected, actual
                    ),
                ));
            }
        }

        if let Some(expected) = self.data_rows {
            let table = result.table().ok_or_else(|| {
                HarnessError::assertion_failed(step, "expected a table payload, got none")
            })?;
            let actual = table["data"].as_array().map(Vec::len).unwrap_or(0);
            if actual != expected {
                return Err(HarnessError::assertion_failed(
                    step,
                    format!("expected {} data rows, got {}", expected, actual),
                ));
            }
        }

        if self.no_table && result.table().is_some() {
            return Err(HarnessError::assertion_failed(
                step,
                "expected no table payload, but one is present",
            ));
        }

        Ok(())
    }

    fn header_pairs(
        &self,
        step: &str,
        result: &ExecuteResult,
    ) -> HarnessResult<Vec<(String, String)>> {
        let table = result.table().ok_or_else(|| {
            HarnessError::assertion_failed(step, "expected a table payload, got none")
        })?;
        let headers = table["headers"].as_array().ok_or_else(|| {
            HarnessError::assertion_failed(step, "table payload has no headers array")
        })?;
        Ok(headers
            .iter()
            .map(|h| {
                (
                    h["name"].as_str().unwrap_or_default().to_string(),
                    h["type"].as_str().unwrap_or_default().to_string(),
                )
            })
            .collect())
    }
}

/// Builder for fluent assertion construction.
pub struct AssertionBuilder {
    assertion: Assertion,
}

impl AssertionBuilder {
    /// Create a new assertion builder.
    pub fn new() -> Self {
        Self {
            assertion: Assertion::new(),
        }
    }

    /// Build the assertion.
    pub fn build(self) -> Assertion {
        self.assertion
    }

    // ========== Success assertions ==========

    /// Assert that the `text/plain` payload is exactly this string.
    ///
    /// # Example
    /// ```ignore
    /// .step("add", "1 + 2", |a| a.text("val res0: Int = 3"))
    /// ```
    pub fn text(mut self, expected: impl Into<String>) -> Self {
        self.assertion.text = Some(expected.into());
        self
    }

    /// Assert that the `text/plain` payload contains this substring.
    pub fn text_contains(mut self, needle: impl Into<String>) -> Self {
        self.assertion.text_contains.push(needle.into());
        self
    }

    /// Assert success with an empty `text/plain` payload.
    pub fn renders_nothing(self) -> Self {
        self.text("")
    }

    // ========== Table payload assertions ==========

    /// Assert that the table payload equals this JSON value exactly.
    pub fn table(mut self, expected: serde_json::Value) -> Self {
        self.assertion.table = Some(expected);
        self
    }

    /// Assert the table headers as (name, type) pairs, in order.
    ///
    /// # Example
    /// ```ignore
    /// .step("show", "%table rows", |a| a.headers(&[("0", "integer")]))
    /// ```
    pub fn headers(mut self, pairs: &[(&str, &str)]) -> Self {
        self.assertion.headers = Some(
            pairs
                .iter()
                .map(|(name, kind)| (name.to_string(), kind.to_string()))
                .collect(),
        );
        self
    }

    /// Assert the number of data rows in the table payload.
    pub fn data_rows(mut self, n: usize) -> Self {
        self.assertion.data_rows = Some(n);
        self
    }

    /// Assert that the result carries no table payload.
    pub fn no_table(mut self) -> Self {
        self.assertion.no_table = true;
        self
    }

    // ========== Outcome-class assertions ==========

    /// Assert that the step is classified incomplete.
    pub fn incomplete(mut self) -> Self {
        self.assertion.incomplete = true;
        self
    }

    /// Assert that the step fails with an error of this name.
    pub fn error(mut self, name: impl Into<String>) -> Self {
        self.assertion.error_name = Some(name.into());
        self
    }

    /// Assert that the error message or trace contains this substring.
    pub fn error_contains(mut self, needle: impl Into<String>) -> Self {
        self.assertion.error_contains = Some(needle.into());
        self
    }

    /// Assert that the error message matches this regex.
    pub fn error_matches(mut self, pattern: impl Into<String>) -> Self {
        self.assertion.error_pattern = Some(pattern.into());
        self
    }

    // ========== Advanced ==========

    /// Custom assertion function.
    pub fn assert_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&ExecuteResult) -> bool + Send + Sync + 'static,
    {
        self.assertion.custom = Some(Box::new(f));
        self
    }
}

impl Default for AssertionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_exact_text() {
        let assertion = AssertionBuilder::new().text("val x: Int = 1").build();
        let good = ExecuteResult::success_text("val x: Int = 1");
        let bad = ExecuteResult::success_text("val x: Int = 2");

        assert!(assertion.verify("step", &good).is_ok());
        assert!(assertion.verify("step", &bad).is_err());
    }

    #[test]
    fn error_assertions_check_name_and_trace() {
        let result = ExecuteResult::error(
            "NameError",
            "not found: value ghost",
            vec!["NameError: not found: value ghost".to_string()],
        );

        let by_name = AssertionBuilder::new().error("NameError").build();
        assert!(by_name.verify("step", &result).is_ok());

        let by_trace = AssertionBuilder::new()
            .error_contains("value ghost")
            .build();
        assert!(by_trace.verify("step", &result).is_ok());

        let by_pattern = AssertionBuilder::new()
            .error_matches(r"not found: value \w+")
            .build();
        assert!(by_pattern.verify("step", &result).is_ok());

        let wrong_name = AssertionBuilder::new().error("TypeError").build();
        assert!(wrong_name.verify("step", &result).is_err());
    }

    #[test]
    fn unexpected_outcomes_fail_with_step_context() {
        let assertion = AssertionBuilder::new().text("anything").build();
        let err = assertion
            .verify("my_step", &ExecuteResult::Incomplete)
            .unwrap_err();

        assert!(err.to_string().contains("my_step"));
        assert!(err.to_string().contains("incomplete"));
    }
}
