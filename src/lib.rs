//! Conditional field containers for admin-panel forms.
//!
//! A [`DependencyContainer`] groups child fields and reveals and requires them
//! only while its dependency rules on sibling field values hold. This crate
//! provides the rule model, satisfaction evaluation against a loaded resource
//! (display mode) or a submitted request (request mode), and the situational
//! validation rule sets (base, creation, update) derived from it:
//!
//! ```text
//! parse(yaml) → FormSchema → validate(schema) → ValidationResult
//!                          → normalize(schema) → FormSchema → build_fields → Vec<Field>
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use dependency_container::{DependencyContainer, InputField};
//! use serde_json::json;
//!
//! let container = DependencyContainer::new(vec![
//!     InputField::new("title").rules("required|max:255").into(),
//! ])
//! .depends_on("type", "post");
//!
//! let request = json!({"type": "post", "title": "Hello"});
//! let rules = container.get_creation_rules(&request);
//! assert_eq!(rules["title"].len(), 2);
//!
//! let request = json!({"type": "page"});
//! assert!(container.get_creation_rules(&request)[""].is_empty());
//! ```

pub mod action;
pub mod build;
pub mod container;
pub mod enums;
pub mod error;
pub mod evaluate;
pub mod field;
pub mod normalize;
pub mod parse;
pub mod primitives;
pub mod resource;
pub mod rules;
pub mod serialize;
pub mod types;
pub mod validate;

pub use error::*;
pub use types::*;

pub use action::Action;
pub use container::DependencyContainer;
pub use enums::{PredicateKind, ResourceKind, RuleSituation};
pub use field::{Field, InputField, MediaCollectionField, RuleSource};
pub use resource::{Model, RequestValues, Resource};
pub use rules::RuleSetBuilder;

// Re-export entry-point functions at the crate root for convenience.
pub use build::build_fields;
pub use normalize::normalize;
pub use parse::parse;
pub use serialize::serialize;
pub use validate::validate;

/// Result of the [`load`] convenience entry point.
pub struct LoadResult {
    /// The normalized schema.
    pub schema: FormSchema,
    /// Runtime fields built from the normalized schema.
    pub fields: Vec<Field>,
    /// Non-fatal warnings produced during validation.
    pub warnings: Vec<Diagnostic>,
}

/// Convenience entry point composing parse → validate → normalize → build.
///
/// # Errors
///
/// Returns `Err(Vec<ContainerError>)` if parsing fails or validation finds errors.
///
/// # Example
///
/// ```rust
/// let yaml = r#"
/// fields:
///   - input:
///       attribute: type
///       rules: required
///   - container:
///       attribute: post_details
///       dependencies:
///         - field: type
///           value: post
///       fields:
///         - input:
///             attribute: title
///             rules: required|max:255
/// "#;
///
/// match dependency_container::load(yaml) {
///     Ok(result) => println!("Loaded {} fields", result.fields.len()),
///     Err(errors) => eprintln!("{} errors", errors.len()),
/// }
/// ```
pub fn load(input: &str) -> Result<LoadResult, Vec<ContainerError>> {
    let schema = parse::parse(input).map_err(|e| vec![ContainerError::Parse(e)])?;

    let result = validate::validate(&schema);
    if !result.errors.is_empty() {
        return Err(result
            .errors
            .into_iter()
            .map(ContainerError::Validation)
            .collect());
    }

    let normalized = normalize::normalize(schema);
    let fields = build::build_fields(&normalized);

    Ok(LoadResult {
        schema: normalized,
        fields,
        warnings: result.warnings,
    })
}
