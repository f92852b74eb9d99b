//! Declarative conditional-validation rules.
//!
//! A rule ties a boolean controlling field to a set of dependent fields and
//! states what happens to the dependents when the controller is true or false.
//! [`evaluate`] is pure; [`apply`] additionally clears the dependents the
//! evaluation marks as cleared.

use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldRule {
    /// Dependents must hold a value.
    Required,
    /// Dependents are emptied and not validated.
    Cleared,
    /// Dependents are left alone.
    Optional,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConditionalRule {
    pub controlling: &'static str,
    pub dependents: &'static [&'static str],
    pub when_true: FieldRule,
    pub when_false: FieldRule,
}

/// Named access to form fields used by the rule table.
pub trait FormFields {
    /// Value of a boolean controlling field.
    fn flag(&self, _field: &str) -> Option<bool> {
        None
    }

    /// Whether a dependent field currently holds no value.
    fn is_blank(&self, _field: &str) -> bool {
        false
    }

    /// Empties a dependent field.
    fn clear(&mut self, _field: &str) {}
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Evaluation {
    pub required: BTreeSet<&'static str>,
    pub cleared: BTreeSet<&'static str>,
}

impl Evaluation {
    pub fn is_required(&self, field: &str) -> bool {
        self.required.contains(field)
    }

    /// Required fields that are still blank on `form`.
    pub fn missing<F: FormFields + ?Sized>(&self, form: &F) -> Vec<&'static str> {
        self.required
            .iter()
            .copied()
            .filter(|field| form.is_blank(field))
            .collect()
    }
}

/// Computes which dependents are required and which must be cleared.
///
/// A field cleared by any rule is never required.
pub fn evaluate<F: FormFields + ?Sized>(rules: &[ConditionalRule], form: &F) -> Evaluation {
    let mut evaluation = Evaluation::default();

    for rule in rules {
        let action = if form.flag(rule.controlling).unwrap_or(false) {
            rule.when_true
        } else {
            rule.when_false
        };

        for &field in rule.dependents {
            match action {
                FieldRule::Required => {
                    evaluation.required.insert(field);
                }
                FieldRule::Cleared => {
                    evaluation.cleared.insert(field);
                }
                FieldRule::Optional => {}
            }
        }
    }

    let cleared = evaluation.cleared.clone();
    evaluation.required.retain(|field| !cleared.contains(field));

    evaluation
}

/// Evaluates `rules` and clears the dependents marked as cleared.
pub fn apply<F: FormFields + ?Sized>(rules: &[ConditionalRule], form: &mut F) -> Evaluation {
    let evaluation = evaluate(rules, form);
    for field in &evaluation.cleared {
        form.clear(field);
    }
    evaluation
}
