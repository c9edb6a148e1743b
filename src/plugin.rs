//! Process-wide plugin identity.
//!
//! The host delivers a manifest to the plugin's "on create" hook; the first
//! (and only meaningful) call to [`init_plugin_context`] pins the identity
//! for the life of the process. Plugin-scoped configuration and the HTTP
//! client read it, never write it.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::warn;

static PLUGIN_ID: OnceCell<String> = OnceCell::new();

pub const FALLBACK_PLUGIN_ID: &str = "unknown-plugin";

/// The subset of the host's plugin manifest the core consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginManifest {
	#[serde(default)]
	pub id: Option<String>,
	#[serde(default)]
	pub name: Option<String>,
}

/// Establish the process-wide plugin identity from a manifest: `id`, falling
/// back to `name`, falling back to [`FALLBACK_PLUGIN_ID`]. Call once, before
/// any config or HTTP operation; repeated calls keep the first identity.
pub fn init_plugin_context(manifest: &PluginManifest) {
	let resolved = resolve_plugin_id(manifest);

	if PLUGIN_ID.set(resolved).is_err() {
		warn!("plugin context initialized more than once; keeping the first identity");
	}
}

/// The established identity, or `None` before initialization.
pub fn plugin_id() -> Option<&'static str> {
	PLUGIN_ID.get().map(String::as_str)
}

fn resolve_plugin_id(manifest: &PluginManifest) -> String {
	manifest
		.id
		.clone()
		.filter(|id| !id.is_empty())
		.or_else(|| manifest.name.clone().filter(|name| !name.is_empty()))
		.unwrap_or_else(|| FALLBACK_PLUGIN_ID.to_owned())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn identity_resolution_falls_back_in_order() {
		let full = PluginManifest {
			id: Some("com.example.plugin".into()),
			name: Some("Example".into()),
		};
		assert_eq!(resolve_plugin_id(&full), "com.example.plugin");

		let name_only = PluginManifest {
			id: None,
			name: Some("Example".into()),
		};
		assert_eq!(resolve_plugin_id(&name_only), "Example");

		assert_eq!(
			resolve_plugin_id(&PluginManifest::default()),
			FALLBACK_PLUGIN_ID
		);
	}
}
