//! Query criteria and repository result envelope

use serde::{Deserialize, Serialize};

use crate::models::BusinessObject;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionOperation {
    Equal,
    NotEqual,
    Contains,
}

impl ConditionOperation {
    pub fn as_str(&self) -> &str {
        match self {
            ConditionOperation::Equal => "=",
            ConditionOperation::NotEqual => "!=",
            ConditionOperation::Contains => "~",
        }
    }
}

/// A single filter condition (field, operator, value)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub operation: ConditionOperation,
    pub value: String,
}

impl Condition {
    pub fn new(field: &str, operation: ConditionOperation, value: &str) -> Self {
        Self {
            field: field.to_string(),
            operation,
            value: value.to_string(),
        }
    }

    /// Parse a condition from its CLI form: `field=value`, `field!=value`
    /// or `field~value`
    pub fn parse(input: &str) -> Result<Self, anyhow::Error> {
        for op in [
            ConditionOperation::NotEqual,
            ConditionOperation::Contains,
            ConditionOperation::Equal,
        ] {
            if let Some((field, value)) = input.split_once(op.as_str()) {
                if field.is_empty() {
                    break;
                }
                return Ok(Condition::new(field.trim(), op, value.trim()));
            }
        }
        Err(anyhow::anyhow!(
            "Invalid filter condition: '{}'. Expected field=value, field!=value or field~value",
            input
        ))
    }

    fn holds(&self, actual: &str) -> bool {
        match self.operation {
            ConditionOperation::Equal => actual == self.value,
            ConditionOperation::NotEqual => actual != self.value,
            ConditionOperation::Contains => actual
                .to_lowercase()
                .contains(&self.value.to_lowercase()),
        }
    }
}

/// An ordered set of filter conditions, combined with AND semantics.
/// Built ad hoc per operation; carries no persistent identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    pub conditions: Vec<Condition>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Evaluate all conditions against a record. A condition naming an
    /// unknown field never matches.
    pub fn matches<T: BusinessObject>(&self, record: &T) -> bool {
        self.conditions.iter().all(|condition| {
            record
                .field_value(&condition.field)
                .map(|actual| condition.holds(&actual))
                .unwrap_or(false)
        })
    }
}

/// Outcome envelope of a repository call: a result code (0 = success),
/// an optional message and zero or more result records. Consumed once
/// by the initiating controller.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResult<T> {
    pub result_code: i32,
    pub message: String,
    pub results: Vec<T>,
}

impl<T> OperationResult<T> {
    pub fn success(results: Vec<T>) -> Self {
        Self {
            result_code: 0,
            message: String::new(),
            results,
        }
    }

    pub fn failure(result_code: i32, message: &str) -> Self {
        Self {
            result_code,
            message: message.to_string(),
            results: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result_code == 0
    }

    pub fn first(&self) -> Option<&T> {
        self.results.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{fields, Customer};

    fn customer(code: &str, name: &str) -> Customer {
        let mut c = Customer::with_code(code);
        c.name = name.to_string();
        c
    }

    #[test]
    fn test_matches_equal_and_not_equal() {
        let c = customer("C1", "Acme");
        let eq = Criteria::new().with(Condition::new(
            fields::CODE,
            ConditionOperation::Equal,
            "C1",
        ));
        assert!(eq.matches(&c));

        let ne = Criteria::new().with(Condition::new(
            fields::CODE,
            ConditionOperation::NotEqual,
            "C1",
        ));
        assert!(!ne.matches(&c));
    }

    #[test]
    fn test_matches_is_conjunctive() {
        let c = customer("C1", "Acme");
        let criteria = Criteria::new()
            .with(Condition::new(fields::CODE, ConditionOperation::Equal, "C1"))
            .with(Condition::new(
                fields::NAME,
                ConditionOperation::Equal,
                "Other",
            ));
        assert!(!criteria.matches(&c));
    }

    #[test]
    fn test_matches_contains_case_insensitive() {
        let c = customer("C1", "Acme Industries");
        let criteria = Criteria::new().with(Condition::new(
            fields::NAME,
            ConditionOperation::Contains,
            "acme",
        ));
        assert!(criteria.matches(&c));
    }

    #[test]
    fn test_unknown_field_never_matches() {
        let c = customer("C1", "Acme");
        let criteria = Criteria::new().with(Condition::new(
            "no_such_field",
            ConditionOperation::Equal,
            "x",
        ));
        assert!(!criteria.matches(&c));
    }

    #[test]
    fn test_parse_condition() {
        let eq = Condition::parse("code=C1").unwrap();
        assert_eq!(eq.operation, ConditionOperation::Equal);
        assert_eq!(eq.field, "code");
        assert_eq!(eq.value, "C1");

        let ne = Condition::parse("code!=C1").unwrap();
        assert_eq!(ne.operation, ConditionOperation::NotEqual);

        let like = Condition::parse("name~acme").unwrap();
        assert_eq!(like.operation, ConditionOperation::Contains);

        assert!(Condition::parse("garbage").is_err());
    }

    #[test]
    fn test_operation_result() {
        let ok: OperationResult<Customer> = OperationResult::success(vec![]);
        assert!(ok.is_success());
        assert!(ok.first().is_none());

        let failed: OperationResult<Customer> = OperationResult::failure(-1, "boom");
        assert!(!failed.is_success());
        assert_eq!(failed.message, "boom");
    }
}
