//! Scenario builder: a named script of execute steps with assertions.

use crate::assertion::{Assertion, AssertionBuilder};
use crate::error::HarnessResult;
use crate::runner::Runner;

/// One named step: a block of code and the assertion on its result.
pub struct Step {
    pub name: String,
    pub code: String,
    pub assertion: Assertion,
}

/// A scripted session: loadable modules plus an ordered list of steps,
/// all run against one fresh session.
pub struct Scenario {
    name: String,
    modules: Vec<(String, String)>,
    steps: Vec<Step>,
}

impl Scenario {
    /// Create a new named scenario.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modules: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Provide a module source that `load("<name>")` can resolve. The
    /// runner writes it to a classpath entry before the session starts.
    pub fn module(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.modules.push((name.into(), source.into()));
        self
    }

    /// Add a step: execute `code` and verify the built assertion.
    ///
    /// # Example
    /// ```ignore
    /// Scenario::new("arithmetic")
    ///     .step("add", "1 + 2", |a| a.text("val res0: Int = 3"))
    ///     .run()
    ///     .unwrap();
    /// ```
    pub fn step<F>(mut self, name: &str, code: &str, build: F) -> Self
    where
        F: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        self.steps.push(Step {
            name: name.to_string(),
            code: code.to_string(),
            assertion: build(AssertionBuilder::new()).build(),
        });
        self
    }

    /// The scenario name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The steps in execution order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub(crate) fn modules(&self) -> &[(String, String)] {
        &self.modules
    }

    /// Run the scenario against a fresh session.
    pub fn run(&self) -> HarnessResult<()> {
        Runner::new(self)?.run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_steps_in_order() {
        let scenario = Scenario::new("ordering")
            .step("first", "val a = 1", |a| a.text("val a: Int = 1"))
            .step("second", "a + 1", |a| a.text("val res0: Int = 2"));

        assert_eq!(scenario.name(), "ordering");
        assert_eq!(scenario.steps().len(), 2);
        assert_eq!(scenario.steps()[0].name, "first");
        assert_eq!(scenario.steps()[1].code, "a + 1");
    }
}
