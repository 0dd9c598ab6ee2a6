// Validation rule sets

use crate::{ValidationContext, Violation, Violations};
use std::fmt;
use std::sync::Arc;

type RuleFn<T> = Arc<dyn Fn(&T, &ValidationContext) -> Option<Violation> + Send + Sync>;

/// A named check over a whole record
pub struct Rule<T> {
    pub name: &'static str,
    check: RuleFn<T>,
}

impl<T> Rule<T> {
    pub fn new<F>(name: &'static str, check: F) -> Self
    where
        F: Fn(&T, &ValidationContext) -> Option<Violation> + Send + Sync + 'static,
    {
        Self {
            name,
            check: Arc::new(check),
        }
    }

    /// Run the check
    pub fn evaluate(&self, record: &T, ctx: &ValidationContext) -> Option<Violation> {
        (self.check)(record, ctx)
    }
}

impl<T> Clone for Rule<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            check: self.check.clone(),
        }
    }
}

impl<T> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// Ordered list of rules for one record type.
///
/// Every rule runs on every evaluation; violations come back in rule order.
pub struct RuleSet<T> {
    rules: Vec<Rule<T>>,
}

impl<T> RuleSet<T> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule
    pub fn rule<F>(mut self, name: &'static str, check: F) -> Self
    where
        F: Fn(&T, &ValidationContext) -> Option<Violation> + Send + Sync + 'static,
    {
        self.rules.push(Rule::new(name, check));
        self
    }

    /// Collect the violations of every rule
    pub fn evaluate(&self, record: &T, ctx: &ValidationContext) -> Violations {
        self.rules
            .iter()
            .filter_map(|rule| rule.evaluate(record, ctx))
            .collect()
    }

    /// `Ok(())` when no rule fires
    pub fn validate(&self, record: &T, ctx: &ValidationContext) -> Result<(), Violations> {
        self.evaluate(record, ctx).into_result()
    }

    /// Rule names in evaluation order
    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<T> Default for RuleSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for RuleSet<T> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
        }
    }
}

impl<T> fmt::Debug for RuleSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
