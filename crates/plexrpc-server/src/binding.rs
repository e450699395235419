//! Actual-to-formal parameter binding.

use std::collections::HashSet;

use plexrpc_protocol::RequestParams;

use crate::envelope::RequestViolation;
use crate::handler::CallArgs;
use crate::registry::ParamSpec;

/// Turn the supplied `params` into the argument list for a binding.
///
/// Absent params bind to an empty list and arrays pass through verbatim. An
/// object binds by name: for a fixed binding its key set must equal the
/// declared name set, and the values are reordered into declared order. A
/// variadic binding takes object values in map order without any check.
pub fn bind_params(
    spec: &ParamSpec,
    params: Option<RequestParams>,
) -> Result<CallArgs, RequestViolation> {
    match (spec, params) {
        (_, None) => Ok(CallArgs::default()),
        (_, Some(RequestParams::Array(values))) => Ok(CallArgs::new(values)),
        (ParamSpec::Variadic, Some(named @ RequestParams::Object(_))) => {
            Ok(CallArgs::new(named.into_values()))
        }
        (ParamSpec::Fixed(declared), Some(RequestParams::Object(supplied))) => {
            let declared_set: HashSet<&str> = declared.iter().map(String::as_str).collect();
            let supplied_set: HashSet<&str> = supplied.keys().map(String::as_str).collect();
            if declared_set != supplied_set {
                return Err(RequestViolation::NamedParamsMismatch {
                    declared: declared.clone(),
                    supplied: supplied.keys().cloned().collect(),
                });
            }

            // key sets are equal, every declared name has a value
            Ok(declared
                .iter()
                .filter_map(|name| supplied.get(name).cloned())
                .collect::<Vec<_>>()
                .into())
        }
    }
}
