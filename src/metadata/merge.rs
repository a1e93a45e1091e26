//! Field-level merge of structural and documentation metadata.
//!
//! Documentation wins for prose, request body and responses; the structural annotation
//! wins for parameter shape. Tags are unioned.

use super::{ParameterDescriptor, Response, RouteMetadata};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Merges structural metadata (attached to a handler) with documentation metadata
/// (parsed from comments).
///
/// # Returns
///
/// - `None` when both inputs are absent
/// - the present input, unchanged, when only one is present
/// - a field-by-field merge when both are present
pub fn merge_metadata(
    structural: Option<RouteMetadata>,
    documentation: Option<RouteMetadata>,
) -> Option<RouteMetadata> {
    match (structural, documentation) {
        (None, None) => None,
        (Some(only), None) | (None, Some(only)) => Some(only),
        (Some(structural), Some(documentation)) => Some(RouteMetadata {
            summary: documentation.summary.or(structural.summary),
            description: documentation.description.or(structural.description),
            tags: merge_tags(structural.tags, documentation.tags),
            parameters: merge_parameters(structural.parameters, documentation.parameters),
            request_body: documentation.request_body.or(structural.request_body),
            responses: merge_responses(structural.responses, documentation.responses),
        }),
    }
}

/// Union of both tag sets.
pub fn merge_tags(
    structural: Option<BTreeSet<String>>,
    documentation: Option<BTreeSet<String>>,
) -> Option<BTreeSet<String>> {
    match (structural, documentation) {
        (None, None) => None,
        (Some(only), None) | (None, Some(only)) => Some(only),
        (Some(mut structural), Some(documentation)) => {
            structural.extend(documentation);
            Some(structural)
        }
    }
}

/// Parameters keyed by `(name, in)`: structural entries win on collision, documentation-only
/// keys are appended in their original order.
pub fn merge_parameters(
    structural: Option<Vec<ParameterDescriptor>>,
    documentation: Option<Vec<ParameterDescriptor>>,
) -> Option<Vec<ParameterDescriptor>> {
    if structural.is_none() && documentation.is_none() {
        return None;
    }

    let mut merged: Vec<ParameterDescriptor> = Vec::new();
    let mut seen = HashSet::new();

    for param in structural.into_iter().flatten().chain(documentation.into_iter().flatten()) {
        if seen.insert((param.name.clone(), param.location)) {
            merged.push(param);
        }
    }

    Some(merged)
}

/// Shallow merge of response maps; documentation overrides on the same status code.
pub fn merge_responses(
    structural: Option<BTreeMap<String, Response>>,
    documentation: Option<BTreeMap<String, Response>>,
) -> Option<BTreeMap<String, Response>> {
    match (structural, documentation) {
        (None, None) => None,
        (Some(only), None) | (None, Some(only)) => Some(only),
        (Some(mut structural), Some(documentation)) => {
            structural.extend(documentation);
            Some(structural)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{MediaType, ParameterLocation, RequestBody};
    use pretty_assertions::assert_eq;

    fn param(name: &str, location: ParameterLocation, description: &str) -> ParameterDescriptor {
        let mut p = ParameterDescriptor::new(name, location, location == ParameterLocation::Path);
        p.description = Some(description.to_string());
        p
    }

    fn tags(values: &[&str]) -> Option<BTreeSet<String>> {
        Some(values.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_both_absent_is_absent() {
        assert_eq!(merge_metadata(None, None), None);
    }

    #[test]
    fn test_single_side_passes_through() {
        let structural = RouteMetadata {
            summary: Some("From handler".to_string()),
            ..Default::default()
        };
        assert_eq!(
            merge_metadata(Some(structural.clone()), None),
            Some(structural.clone())
        );
        assert_eq!(merge_metadata(None, Some(structural.clone())), Some(structural));
    }

    #[test]
    fn test_documentation_wins_for_prose() {
        let structural = RouteMetadata {
            summary: Some("Decorator summary".to_string()),
            description: Some("Decorator description".to_string()),
            ..Default::default()
        };
        let documentation = RouteMetadata {
            summary: Some("Doc summary".to_string()),
            ..Default::default()
        };

        let merged = merge_metadata(Some(structural), Some(documentation)).unwrap();

        assert_eq!(merged.summary.as_deref(), Some("Doc summary"));
        assert_eq!(merged.description.as_deref(), Some("Decorator description"));
    }

    #[test]
    fn test_structural_parameter_wins_on_key_collision() {
        let structural = RouteMetadata {
            parameters: Some(vec![param("id", ParameterLocation::Path, "Decorator")]),
            ..Default::default()
        };
        let documentation = RouteMetadata {
            parameters: Some(vec![param("id", ParameterLocation::Path, "Doc")]),
            ..Default::default()
        };

        let merged = merge_metadata(Some(structural), Some(documentation)).unwrap();
        let params = merged.parameters.unwrap();

        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "id");
        assert_eq!(params[0].description.as_deref(), Some("Decorator"));
    }

    #[test]
    fn test_documentation_only_parameters_are_appended() {
        let structural = Some(vec![param("id", ParameterLocation::Path, "a")]);
        let documentation = Some(vec![
            param("page", ParameterLocation::Query, "b"),
            param("id", ParameterLocation::Query, "c"),
            param("id", ParameterLocation::Path, "d"),
        ]);

        let merged = merge_parameters(structural, documentation).unwrap();
        let keys: Vec<_> = merged.iter().map(|p| p.key()).collect();

        assert_eq!(
            keys,
            vec![
                ("id", ParameterLocation::Path),
                ("page", ParameterLocation::Query),
                ("id", ParameterLocation::Query),
            ]
        );
    }

    #[test]
    fn test_documentation_response_overrides_same_status() {
        let structural = RouteMetadata {
            responses: Some(BTreeMap::from([("200".to_string(), Response::new("A"))])),
            ..Default::default()
        };
        let documentation = RouteMetadata {
            responses: Some(BTreeMap::from([
                ("200".to_string(), Response::new("B")),
                ("404".to_string(), Response::new("C")),
            ])),
            ..Default::default()
        };

        let merged = merge_metadata(Some(structural), Some(documentation)).unwrap();

        assert_eq!(
            merged.responses.unwrap(),
            BTreeMap::from([
                ("200".to_string(), Response::new("B")),
                ("404".to_string(), Response::new("C")),
            ])
        );
    }

    #[test]
    fn test_tags_are_unioned() {
        let merged = merge_tags(tags(&["a", "b"]), tags(&["b", "c"]));
        assert_eq!(merged, tags(&["a", "b", "c"]));
    }

    #[test]
    fn test_request_body_prefers_documentation() {
        let body = |description: &str| RequestBody {
            description: Some(description.to_string()),
            required: true,
            content: BTreeMap::from([("application/json".to_string(), MediaType::default())]),
        };
        let structural = RouteMetadata {
            request_body: Some(body("structural")),
            ..Default::default()
        };
        let documentation = RouteMetadata {
            request_body: Some(body("documentation")),
            ..Default::default()
        };

        let merged = merge_metadata(Some(structural.clone()), Some(documentation)).unwrap();
        assert_eq!(
            merged.request_body.unwrap().description.as_deref(),
            Some("documentation")
        );

        let merged = merge_metadata(Some(structural), Some(RouteMetadata::default())).unwrap();
        assert_eq!(
            merged.request_body.unwrap().description.as_deref(),
            Some("structural")
        );
    }
}
