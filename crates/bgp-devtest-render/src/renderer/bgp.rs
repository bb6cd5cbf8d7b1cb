//! BGP section of the reference renderer.

use std::collections::HashMap;

use serde_json::{json, Value};
use tracing::debug;

use super::{applied_policies, comment_prefix, ensure_clean_base, list_at, render_template, RenderFlags};
use crate::capabilities::BgpCapabilities;
use crate::error::RenderError;
use crate::facts::version_at_least;

/// First EOS release using the `peer group` keyword
const EOS_PEER_GROUP_KEYWORD_SINCE: &str = "4.23";

pub(super) fn generate(
    caps: &dyn BgpCapabilities,
    bgp: &Value,
    flags: RenderFlags,
    current: Option<&str>,
    env: &str,
) -> Result<String, RenderError> {
    if let Some(current) = current {
        ensure_clean_base(current)?;
    }

    let nos = caps.grain("nos")?;
    let version = caps.grain("version")?;

    let asn = caps
        .deep_get(bgp, "global.config.as")
        .and_then(Value::as_u64)
        .unwrap_or_else(|| u64::from(caps.global_as()));
    let router_id = caps
        .deep_get(bgp, "global.config.router-id")
        .cloned()
        .unwrap_or(Value::Null);

    let hostnames = inventory_hostnames(caps)?;
    let peer_group_keyword = if version_at_least(&version, EOS_PEER_GROUP_KEYWORD_SINCE) {
        "peer group"
    } else {
        "peer-group"
    };

    let mut out = String::new();
    if flags.test {
        out.push_str(comment_prefix(&nos));
        out.push_str(" test mode\n");
    }

    out.push_str(&render_template(
        caps,
        env,
        "bgp_header.tmpl",
        &json!({ "asn": asn, "router_id": router_id }),
    )?);

    let neighbors = list_at(caps, bgp, "neighbors.neighbor");
    for neighbor in neighbors {
        let mut params = neighbor_params(caps, neighbor, &hostnames)?;
        params["peer_group_keyword"] = json!(peer_group_keyword);
        out.push_str(&render_template(caps, env, "bgp_neighbor.tmpl", &params)?);
    }

    out.push_str(&render_template(caps, env, "bgp_footer.tmpl", &json!({}))?);

    debug!(
        nos = %nos,
        neighbors = neighbors.len(),
        "Rendered BGP configuration"
    );

    Ok(out.trim_end_matches('\n').to_string())
}

/// Neighbor address to hostname, from the neighbor inventory
fn inventory_hostnames(caps: &dyn BgpCapabilities) -> Result<HashMap<String, String>, RenderError> {
    let inventory = caps.neighbors()?;
    Ok(inventory
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or(&[])
        .iter()
        .filter_map(|entry| {
            let address = entry.get("address")?.as_str()?;
            let hostname = entry.get("hostname")?.as_str()?;
            Some((address.to_string(), hostname.to_string()))
        })
        .collect())
}

fn neighbor_params(
    caps: &dyn BgpCapabilities,
    neighbor: &Value,
    hostnames: &HashMap<String, String>,
) -> Result<Value, RenderError> {
    let address = caps
        .deep_get(neighbor, "neighbor-address")
        .or_else(|| caps.deep_get(neighbor, "config.neighbor-address"))
        .and_then(Value::as_str)
        .ok_or_else(|| RenderError::InvalidData("neighbor without neighbor-address".to_string()))?;

    let peer_as = caps
        .deep_get(neighbor, "config.peer-as")
        .and_then(Value::as_u64)
        .ok_or_else(|| RenderError::InvalidData(format!("neighbor {} has no peer-as", address)))?;

    let description = caps
        .deep_get(neighbor, "config.description")
        .and_then(Value::as_str)
        .or_else(|| hostnames.get(address).map(String::as_str));

    let peer_group = caps
        .deep_get(neighbor, "config.peer-group")
        .and_then(Value::as_str);

    let group = peer_group
        .map(str::to_string)
        .unwrap_or_else(|| format!("AS{}", peer_as));

    let password = password_for(caps, peer_group, address)?;

    let import_policy = single_policy(caps, neighbor, address, "import-policy")?;
    let export_policy = single_policy(caps, neighbor, address, "export-policy")?;

    Ok(json!({
        "address": address,
        "peer_as": peer_as,
        "description": description,
        "peer_group": peer_group,
        "group": group,
        "password": password,
        "import_policy": import_policy,
        "export_policy": export_policy,
    }))
}

/// Session password from pillar, by peer group first then by address
fn password_for(
    caps: &dyn BgpCapabilities,
    peer_group: Option<&str>,
    address: &str,
) -> Result<Option<String>, RenderError> {
    for key in peer_group.into_iter().chain(std::iter::once(address)) {
        let value = caps.pillar(&format!("bgp:passwords:{}", key))?;
        if let Some(password) = value.as_str() {
            return Ok(Some(password.to_string()));
        }
    }
    Ok(None)
}

fn single_policy(
    caps: &dyn BgpCapabilities,
    neighbor: &Value,
    address: &str,
    direction: &str,
) -> Result<Option<String>, RenderError> {
    match applied_policies(caps, neighbor, direction).as_slice() {
        [] => Ok(None),
        [name] => Ok(Some(caps.format_route_policy_name(name))),
        many => Err(RenderError::InvalidData(format!(
            "neighbor {} chains {} {}s, only one is supported",
            address,
            many.len(),
            direction
        ))),
    }
}
