// SPDX-FileCopyrightText: 2026 Sanity Resolver Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Role resolution over a flattened plugin sequence.
//!
//! Both passes walk the sequence from last to first. The provider seen first
//! in that walk (the last in flatten order) owns a role; earlier providers of
//! the same role must agree on multiplicity. For single-fulfiller roles the
//! first fulfillment seen in the walk wins and the rest are ignored; for
//! multiple-fulfiller roles every fulfillment is appended in walk order.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::path::Path;

use sanity_core::{
    ConflictParty, FulfillerDescriptor, Fulfillment, PluginNode, ProviderDescriptor,
    ResolutionResult, ResolveError, Result, join_under,
};
use tracing::trace;

/// Compute the provided and fulfilled role maps for `plugins`, given in flatten order.
pub fn resolve_plugin_roles<P: Borrow<PluginNode>>(plugins: &[P]) -> Result<ResolutionResult> {
    let provided = collect_providers(plugins)?;
    let fulfilled = collect_fulfillers(plugins, &provided);
    Ok(ResolutionResult {
        provided,
        fulfilled,
    })
}

fn collect_providers<P: Borrow<PluginNode>>(
    plugins: &[P],
) -> Result<BTreeMap<String, ProviderDescriptor>> {
    let mut provided: BTreeMap<String, ProviderDescriptor> = BTreeMap::new();

    for plugin in plugins.iter().rev() {
        let plugin: &PluginNode = plugin.borrow();
        for provision in &plugin.manifest.provides {
            match provided.get(&provision.role) {
                None => {
                    provided.insert(
                        provision.role.clone(),
                        ProviderDescriptor {
                            plugin_name: plugin.name.clone(),
                            install_path: plugin.install_path.clone(),
                            multiple: provision.multiple,
                        },
                    );
                }
                Some(existing) if existing.multiple != provision.multiple => {
                    return Err(ResolveError::RoleConflict {
                        role: provision.role.clone(),
                        existing: ConflictParty {
                            plugin_name: existing.plugin_name.clone(),
                            install_path: existing.install_path.clone(),
                            multiple: existing.multiple,
                        },
                        incoming: ConflictParty {
                            plugin_name: plugin.name.clone(),
                            install_path: plugin.install_path.clone(),
                            multiple: provision.multiple,
                        },
                    });
                }
                Some(_) => {}
            }
        }
    }

    Ok(provided)
}

fn collect_fulfillers<P: Borrow<PluginNode>>(
    plugins: &[P],
    provided: &BTreeMap<String, ProviderDescriptor>,
) -> BTreeMap<String, Fulfillment> {
    let mut singles: BTreeMap<String, FulfillerDescriptor> = BTreeMap::new();
    let mut multiples: BTreeMap<String, Vec<FulfillerDescriptor>> = BTreeMap::new();

    for plugin in plugins.iter().rev() {
        let plugin: &PluginNode = plugin.borrow();
        for fulfillment in &plugin.manifest.fulfills {
            let Some(provider) = provided.get(&fulfillment.role) else {
                trace!(
                    plugin = %plugin.name,
                    role = %fulfillment.role,
                    "fulfillment has no provider, ignoring"
                );
                continue;
            };

            let descriptor = FulfillerDescriptor {
                plugin_name: plugin.name.clone(),
                resolved_path: join_under(&plugin.install_path, Path::new(&fulfillment.path)),
            };

            if provider.multiple {
                multiples
                    .entry(fulfillment.role.clone())
                    .or_default()
                    .push(descriptor);
            } else {
                singles.entry(fulfillment.role.clone()).or_insert(descriptor);
            }
        }
    }

    // A role's provider fixes its multiplicity, so the two maps never share a key.
    singles
        .into_iter()
        .map(|(role, descriptor)| (role, Fulfillment::Single(descriptor)))
        .chain(
            multiples
                .into_iter()
                .map(|(role, descriptors)| (role, Fulfillment::Multiple(descriptors))),
        )
        .collect()
}
