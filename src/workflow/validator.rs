//! Workflow Validation
//!
//! Structural checks run on a prototype workflow before it is expanded:
//! - Step ids are present and unique
//! - `needs` only references steps that appear earlier
//! - The `download`, `import` and `index` steps exist

use std::collections::HashSet;

use log::{debug, info};

use super::model::{Step, Workflow};
use super::template::EXPECTED_STEPS;
use crate::error::{Error, Result};

/// Validation error types for user-friendly error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyWorkflow,
    EmptyStepId,
    DuplicateStepId(String),
    InvalidReference { step: String, reference: String },
    ForwardReference { step: String, reference: String },
    MissingStep(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyWorkflow => write!(f, "Workflow has no steps"),
            Self::EmptyStepId => write!(f, "Step has empty or whitespace-only ID"),
            Self::DuplicateStepId(id) => write!(f, "Duplicate step ID: '{}'", id),
            Self::InvalidReference { step, reference } => {
                write!(f, "Step '{}' references unknown step '{}'", step, reference)
            }
            Self::ForwardReference { step, reference } => {
                write!(
                    f,
                    "Step '{}' needs '{}', which does not come before it",
                    step, reference
                )
            }
            Self::MissingStep(id) => write!(f, "Template has no '{}' step", id),
        }
    }
}

/// Checks the `needs` edges of one step against the ids seen so far.
fn validate_needs(step: &Step, earlier: &HashSet<&str>, all: &HashSet<&str>) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for reference in &step.needs {
        if earlier.contains(reference.as_str()) {
            continue;
        }

        let error = if all.contains(reference.as_str()) {
            ValidationError::ForwardReference {
                step: step.id.clone(),
                reference: reference.clone(),
            }
        } else {
            ValidationError::InvalidReference {
                step: step.id.clone(),
                reference: reference.clone(),
            }
        };
        errors.push(error);
    }

    if step.needs.is_empty() {
        debug!("Step '{}' is a root step (no dependencies)", step.id);
    }

    errors
}

/// Collects every structural problem in a workflow.
pub fn check_workflow(workflow: &Workflow) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if workflow.steps.is_empty() {
        errors.push(ValidationError::EmptyWorkflow);
        return errors;
    }

    let all: HashSet<&str> = workflow.steps.iter().map(|s| s.id.as_str()).collect();
    let mut earlier: HashSet<&str> = HashSet::new();

    for step in &workflow.steps {
        if step.id.trim().is_empty() {
            errors.push(ValidationError::EmptyStepId);
            continue;
        }

        errors.extend(validate_needs(step, &earlier, &all));

        if !earlier.insert(step.id.as_str()) {
            errors.push(ValidationError::DuplicateStepId(step.id.clone()));
        }
    }

    for id in EXPECTED_STEPS {
        if !all.contains(id) {
            errors.push(ValidationError::MissingStep(id.to_string()));
        }
    }

    errors
}

/// Validates a prototype workflow, failing with an invalid-template error
/// listing every problem found.
pub fn validate_workflow(workflow: &Workflow) -> Result<()> {
    info!("Validating template with {} steps", workflow.steps.len());

    let errors = check_workflow(workflow);
    if !errors.is_empty() {
        let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        return Err(Error::InvalidTemplate(error_messages.join("\n")));
    }

    debug!(
        "Step order: {:?}, roots: {:?}",
        workflow.steps.iter().map(|s| &s.id).collect::<Vec<_>>(),
        workflow.root_steps().iter().map(|s| &s.id).collect::<Vec<_>>()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::template::PROTOTYPE;

    fn skeleton() -> Vec<Step> {
        vec![
            Step::new("download"),
            Step::new("import").depends_on("download"),
            Step::new("index").depends_on("import"),
        ]
    }

    #[test]
    fn test_prototype_is_valid() {
        assert!(validate_workflow(&PROTOTYPE).is_ok());
    }

    #[test]
    fn test_empty_workflow() {
        let errors = check_workflow(&Workflow::new());
        assert_eq!(errors, vec![ValidationError::EmptyWorkflow]);
    }

    #[test]
    fn test_duplicate_ids() {
        let mut steps = skeleton();
        steps.push(Step::new("index"));

        let errors = check_workflow(&Workflow::from_steps(steps));
        assert!(errors.contains(&ValidationError::DuplicateStepId("index".to_string())));
    }

    #[test]
    fn test_unknown_reference() {
        let mut steps = skeleton();
        steps[2] = Step::new("index").depends_on("ghost");

        let result = validate_workflow(&Workflow::from_steps(steps));
        assert!(result.unwrap_err().to_string().contains("unknown step 'ghost'"));
    }

    #[test]
    fn test_forward_reference() {
        let mut steps = skeleton();
        steps[0] = Step::new("download").depends_on("index");

        let errors = check_workflow(&Workflow::from_steps(steps));
        assert_eq!(
            errors,
            vec![ValidationError::ForwardReference {
                step: "download".to_string(),
                reference: "index".to_string(),
            }]
        );
    }

    #[test]
    fn test_self_reference_is_forward() {
        let mut steps = skeleton();
        steps[1] = Step::new("import").depends_on("import");

        let errors = check_workflow(&Workflow::from_steps(steps));
        assert!(matches!(errors[0], ValidationError::ForwardReference { .. }));
    }

    #[test]
    fn test_missing_parameterized_step() {
        let workflow = Workflow::from_steps(vec![
            Step::new("download"),
            Step::new("index").depends_on("download"),
        ]);

        let errors = check_workflow(&workflow);
        assert_eq!(errors, vec![ValidationError::MissingStep("import".to_string())]);
    }

    #[test]
    fn test_missing_index_step_rejected() {
        let workflow = Workflow::from_steps(PROTOTYPE.steps[..2].to_vec());

        let errors = check_workflow(&workflow);
        assert_eq!(errors, vec![ValidationError::MissingStep("index".to_string())]);
        assert!(validate_workflow(&workflow).is_err());
    }

    #[test]
    fn test_empty_step_id() {
        let mut steps = skeleton();
        steps.push(Step::new("   "));

        let errors = check_workflow(&Workflow::from_steps(steps));
        assert!(errors.contains(&ValidationError::EmptyStepId));
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::EmptyWorkflow;
        assert_eq!(err.to_string(), "Workflow has no steps");

        let err = ValidationError::DuplicateStepId("test".to_string());
        assert!(err.to_string().contains("test"));

        let err = ValidationError::MissingStep("import".to_string());
        assert!(err.to_string().contains("'import'"));
    }
}
