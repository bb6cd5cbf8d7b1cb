//! Routing-policy section of the reference renderer.

use std::collections::HashSet;

use serde_json::{json, Value};
use tracing::debug;

use super::{applied_policies, ensure_clean_base, list_at, render_template};
use crate::capabilities::RoutingPolicyCapabilities;
use crate::error::RenderError;

pub(super) fn generate(
    caps: &dyn RoutingPolicyCapabilities,
    routing_policy: &Value,
    bgp: &Value,
    current: Option<&str>,
    env: &str,
) -> Result<String, RenderError> {
    let current = match current {
        Some(current) => current.to_string(),
        None => caps.current_config()?,
    };
    ensure_clean_base(&current)?;

    let nos = caps.grain("nos")?;
    let mut out = String::new();

    for prefix_set in list_at(caps, routing_policy, "defined-sets.prefix-sets.prefix-set") {
        let name = prefix_set
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| RenderError::InvalidData("prefix-set without name".to_string()))?;
        let name = caps.format_route_policy_name(name);

        for (index, prefix) in list_at(caps, prefix_set, "prefixes.prefix").iter().enumerate() {
            let ip_prefix = prefix
                .get("ip-prefix")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    RenderError::InvalidData(format!("prefix-set {} has a prefix without ip-prefix", name))
                })?;
            let range = prefix
                .get("masklength-range")
                .and_then(Value::as_str)
                .unwrap_or("exact");

            out.push_str(&render_template(
                caps,
                env,
                "prefix_list.tmpl",
                &json!({
                    "name": name,
                    "seq": (index + 1) * 10,
                    "prefix": ip_prefix,
                    "range": masklength_suffix(&nos, ip_prefix, range)?,
                }),
            )?);
        }
    }

    let in_use = referenced_policies(caps, bgp);
    let mut rendered = 0usize;

    for policy in list_at(caps, routing_policy, "policy-definitions.policy-definition") {
        let raw_name = policy
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| RenderError::InvalidData("policy-definition without name".to_string()))?;

        if !in_use.contains(raw_name) {
            debug!("Skipping unreferenced policy {}", raw_name);
            continue;
        }
        let name = caps.format_route_policy_name(raw_name);

        for (index, statement) in list_at(caps, policy, "statements.statement").iter().enumerate() {
            let seq = (index + 1) * 10;
            let term = statement
                .get("name")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| seq.to_string());

            let result = caps
                .deep_get(statement, "actions.config.policy-result")
                .and_then(Value::as_str)
                .unwrap_or_default();
            let action = policy_action(&nos, result).ok_or_else(|| {
                RenderError::InvalidData(format!(
                    "policy {} term {}: unsupported policy-result '{}'",
                    name, term, result
                ))
            })?;

            let prefix_set = caps
                .deep_get(statement, "conditions.match-prefix-set.config.prefix-set")
                .and_then(Value::as_str)
                .map(|set| caps.format_route_policy_name(set));
            let local_pref = caps
                .deep_get(statement, "actions.bgp-actions.config.set-local-pref")
                .and_then(Value::as_u64);
            let communities = list_at(
                caps,
                statement,
                "actions.bgp-actions.set-community.inline.config.communities",
            )
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>();
            let communities = (!communities.is_empty()).then(|| communities.join(" "));

            out.push_str(&render_template(
                caps,
                env,
                "policy_statement.tmpl",
                &json!({
                    "policy": name,
                    "seq": seq,
                    "term": term,
                    "action": action,
                    "prefix_set": prefix_set,
                    "local_pref": local_pref,
                    "communities": communities,
                }),
            )?);
        }
        rendered += 1;
    }

    debug!(nos = %nos, policies = rendered, "Rendered routing policies");

    Ok(out.trim_end_matches('\n').to_string())
}

/// Policy names applied by any BGP neighbor
fn referenced_policies<'a>(caps: &dyn RoutingPolicyCapabilities, bgp: &'a Value) -> HashSet<&'a str> {
    list_at(caps, bgp, "neighbors.neighbor")
        .iter()
        .flat_map(|neighbor| {
            let mut names = applied_policies(caps, neighbor, "import-policy");
            names.extend(applied_policies(caps, neighbor, "export-policy"));
            names
        })
        .collect()
}

fn policy_action(nos: &str, policy_result: &str) -> Option<&'static str> {
    let accept = match policy_result {
        "ACCEPT_ROUTE" => true,
        "REJECT_ROUTE" => false,
        _ => return None,
    };
    Some(match (nos, accept) {
        ("junos", true) => "accept",
        ("junos", false) => "reject",
        (_, true) => "permit",
        (_, false) => "deny",
    })
}

/// Prefix-list suffix for an openconfig masklength range (`exact` or `lo..hi`)
///
/// Junos route-filter lists always carry a match type; the other OSes use
/// `ge`/`le` and leave exact matches bare.
fn masklength_suffix(nos: &str, ip_prefix: &str, range: &str) -> Result<String, RenderError> {
    let invalid = || RenderError::InvalidData(format!("invalid masklength-range '{}' for {}", range, ip_prefix));
    let length: u8 = ip_prefix
        .rsplit_once('/')
        .and_then(|(_, len)| len.parse().ok())
        .ok_or_else(invalid)?;

    let (lo, hi) = if range == "exact" {
        (length, length)
    } else {
        let (lo, hi) = range.split_once("..").ok_or_else(invalid)?;
        let lo: u8 = lo.parse().map_err(|_| invalid())?;
        let hi: u8 = hi.parse().map_err(|_| invalid())?;
        if lo > hi || lo < length {
            return Err(invalid());
        }
        (lo, hi)
    };

    let suffix = match (nos == "junos", lo == length, hi == length) {
        (true, true, true) => " exact".to_string(),
        (true, true, false) => format!(" upto /{}", hi),
        (true, false, _) => format!(" prefix-length-range /{}-/{}", lo, hi),
        (false, true, true) => String::new(),
        (false, true, false) => format!(" le {}", hi),
        (false, false, _) => format!(" ge {} le {}", lo, hi),
    };
    Ok(suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::DEFAULT_GLOBAL_ASN;
    use crate::files::FileStore;
    use crate::fixtures;
    use crate::mock::MockEnvironment;
    use std::sync::Arc;

    fn render(os: &str, doc: &Value) -> Result<String, RenderError> {
        let env = MockEnvironment::new(os, "", DEFAULT_GLOBAL_ASN, Arc::new(FileStore::embedded()))
            .unwrap();
        generate(&env, &doc["routing-policy"], &doc["bgp"], None, "base")
    }

    #[test]
    fn test_eos_routing_policy_output() {
        let doc = fixtures::selftest_openconfig().unwrap();
        let out = render("eos", &doc).unwrap();

        let expected = "\
ip prefix-list LOOPBACKS seq 10 permit 10.0.0.0/8 ge 32 le 32
ip prefix-list DEFAULT seq 10 permit 0.0.0.0/0
route-map SPINE-IN permit 10
   match ip address prefix-list LOOPBACKS
   set local-preference 200
!
route-map SPINE-IN deny 20
!
route-map SPINE-OUT permit 10
   match ip address prefix-list LOOPBACKS
!
route-map TRANSIT-IN permit 10
   match ip address prefix-list DEFAULT
   set local-preference 50
   set community 65000:100 65000:200 additive
!
route-map TRANSIT-OUT permit 10
   match ip address prefix-list LOOPBACKS
!";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_unreferenced_policies_are_skipped() {
        let doc = fixtures::selftest_openconfig().unwrap();
        let out = render("sonic", &doc).unwrap();
        assert!(!out.contains("UNUSED"));
        assert!(out.contains("route-map SPINE-IN deny 20\n"));
    }

    #[test]
    fn test_junos_actions() {
        let doc = fixtures::selftest_openconfig().unwrap();
        let out = render("junos", &doc).unwrap();
        assert!(out.contains(
            "policy-options route-filter-list LOOPBACKS 10.0.0.0/8 prefix-length-range /32-/32;\n"
        ));
        assert!(out.contains("policy-options route-filter-list DEFAULT 0.0.0.0/0 exact;\n"));
        assert!(out.contains("            from route-filter-list LOOPBACKS;"));
        assert!(out.contains("            then accept;"));
        assert!(out.contains("            then reject;"));
        assert!(out.contains("then community add [ 65000:100 65000:200 ];"));
    }

    #[test]
    fn test_unsupported_policy_result() {
        let doc = json!({
            "bgp": {"neighbors": {"neighbor": [{
                "neighbor-address": "192.0.2.1",
                "apply-policy": {"config": {"import-policy": ["p"]}}
            }]}},
            "routing-policy": {"policy-definitions": {"policy-definition": [{
                "name": "p",
                "statements": {"statement": [{"name": "1", "actions": {"config": {"policy-result": "NEXT_STATEMENT"}}}]}
            }]}}
        });
        let err = render("eos", &doc).unwrap_err();
        assert!(matches!(err, RenderError::InvalidData(ref msg) if msg.contains("NEXT_STATEMENT")));
    }

    #[test]
    fn test_empty_document_renders_empty() {
        let doc = json!({"bgp": {}, "routing-policy": {}});
        assert_eq!(render("eos", &doc).unwrap(), "");
    }

    #[test]
    fn test_masklength_suffix() {
        assert_eq!(masklength_suffix("eos", "10.0.0.0/8", "exact").unwrap(), "");
        assert_eq!(masklength_suffix("eos", "10.0.0.0/8", "8..24").unwrap(), " le 24");
        assert_eq!(masklength_suffix("eos", "10.0.0.0/8", "16..24").unwrap(), " ge 16 le 24");
        assert_eq!(masklength_suffix("eos", "10.0.0.0/8", "8..8").unwrap(), "");
        assert!(masklength_suffix("eos", "10.0.0.0/8", "4..8").is_err());
        assert!(masklength_suffix("eos", "10.0.0.0/8", "bogus").is_err());
    }

    #[test]
    fn test_junos_masklength_suffix() {
        assert_eq!(masklength_suffix("junos", "10.0.0.0/8", "exact").unwrap(), " exact");
        assert_eq!(masklength_suffix("junos", "10.0.0.0/8", "8..8").unwrap(), " exact");
        assert_eq!(masklength_suffix("junos", "10.0.0.0/8", "8..24").unwrap(), " upto /24");
        assert_eq!(
            masklength_suffix("junos", "10.0.0.0/8", "32..32").unwrap(),
            " prefix-length-range /32-/32"
        );
        assert!(masklength_suffix("junos", "10.0.0.0/8", "4..8").is_err());
    }
}
