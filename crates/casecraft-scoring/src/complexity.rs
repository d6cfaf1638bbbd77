// SPDX-License-Identifier: MIT OR Apache-2.0
//! Endpoint complexity scoring.
//!
//! The score is a weighted sum of surface-area signals: parameter counts,
//! request-body structural depth, method, auth, and response-status
//! fan-out. See [`score`] for the exact formula.

use casecraft_contract::endpoint::{Endpoint, Method, ParamLocation};

/// Compute an [`Endpoint`]'s complexity score.
///
/// # Examples
///
/// ```
/// use casecraft_contract::endpoint::{AuthRequirement, Endpoint, Method};
/// use casecraft_scoring::complexity::score;
/// use std::collections::BTreeMap;
///
/// let ep = Endpoint {
///     method: Method::Get,
///     path: "/users".into(),
///     tags: vec![],
///     summary: None,
///     description: None,
///     parameters: vec![],
///     request_body: None,
///     responses: BTreeMap::from([("200".into(), casecraft_contract::schema::SchemaNode::Any)]),
///     auth: AuthRequirement::default(),
/// };
/// assert_eq!(score(&ep), 0);
/// ```
#[must_use]
pub fn score(endpoint: &Endpoint) -> i32 {
    let mut total = 0i32;

    total += 2 * endpoint.param_count(ParamLocation::Path) as i32;
    total += endpoint.param_count(ParamLocation::Query) as i32;
    total += endpoint.param_count(ParamLocation::Header) as i32;

    if let Some(body) = &endpoint.request_body {
        total += body.structural_depth() as i32;
        total += 2 * body.array_of_object_count() as i32;
        let required = body.required_field_count() as i32;
        if required > 3 {
            total += required - 3;
        }
    }

    total += match endpoint.method {
        Method::Post | Method::Put | Method::Patch => 2,
        Method::Delete => 1,
        _ => 0,
    };

    if endpoint.auth.required {
        total += 3;
    }

    if endpoint.responses.len() > 1 {
        total += (endpoint.responses.len() - 1) as i32;
    }

    total
}
