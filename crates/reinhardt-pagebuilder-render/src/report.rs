//! Per-instance render states and the report produced by a render pass.

use reinhardt_pagebuilder_registry::RenderError;
use reinhardt_pagebuilder_schema::ValidationIssue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// State of one component instance during a render pass.
///
/// Every instance starts in `Loading`. `Resolved` and `Error` are reached
/// after invoking a registered component, `Unknown` after a lookup miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceState {
	/// Not rendered yet.
	Loading,
	/// Rendered successfully.
	Resolved,
	/// The render failed; the failure is isolated to this instance.
	Error,
	/// The type is not registered.
	Unknown,
}

impl InstanceState {
	/// Whether a transition from `self` to `next` is allowed.
	pub fn can_transition_to(&self, next: InstanceState) -> bool {
		matches!(
			(self, next),
			(Self::Loading, Self::Resolved)
				| (Self::Loading, Self::Error)
				| (Self::Loading, Self::Unknown)
				| (Self::Resolved, Self::Error)
				| (Self::Error, Self::Loading)
				| (Self::Unknown, Self::Loading)
				| (Self::Resolved, Self::Loading)
		)
	}
}

impl fmt::Display for InstanceState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Loading => "loading",
			Self::Resolved => "resolved",
			Self::Error => "error",
			Self::Unknown => "unknown",
		};
		f.write_str(name)
	}
}

/// Outcome of rendering one instance.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceReport {
	/// Instance id.
	pub id: String,
	/// Type name as stored on the instance.
	pub type_name: String,
	/// Sort key.
	pub order: i64,
	/// Nesting depth (top level is 0).
	pub depth: usize,
	/// Whether the instance is visible to viewers.
	pub visible: bool,
	/// Final state.
	pub state: InstanceState,
	/// Every state the instance went through, starting with `Loading`.
	pub transitions: Vec<InstanceState>,
	/// The failure, in the `Error` state.
	pub error: Option<RenderError>,
	/// Dev-time prop validation issues.
	pub warnings: Vec<ValidationIssue>,
	/// HTML emitted for this instance, including its children.
	pub html: String,
}

impl InstanceReport {
	pub(crate) fn loading(id: &str, type_name: &str, order: i64, depth: usize, visible: bool) -> Self {
		Self {
			id: id.to_string(),
			type_name: type_name.to_string(),
			order,
			depth,
			visible,
			state: InstanceState::Loading,
			transitions: vec![InstanceState::Loading],
			error: None,
			warnings: Vec::new(),
			html: String::new(),
		}
	}

	pub(crate) fn transition(&mut self, next: InstanceState) {
		debug_assert!(
			self.state.can_transition_to(next),
			"invalid transition {} -> {}",
			self.state,
			next
		);
		self.state = next;
		self.transitions.push(next);
	}
}

/// Result of rendering a page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderReport {
	/// Page HTML.
	pub html: String,
	/// Reports for every rendered instance, parents before their children.
	pub instances: Vec<InstanceReport>,
}

impl RenderReport {
	/// Report for an instance id.
	pub fn instance(&self, id: &str) -> Option<&InstanceReport> {
		self.instances.iter().find(|r| r.id == id)
	}

	/// Instances that ended in the given state.
	pub fn in_state(&self, state: InstanceState) -> impl Iterator<Item = &InstanceReport> {
		self.instances.iter().filter(move |r| r.state == state)
	}

	/// Instances that ended in `Error`.
	pub fn errors(&self) -> impl Iterator<Item = &InstanceReport> {
		self.in_state(InstanceState::Error)
	}

	/// All validation warnings, with their instance id.
	pub fn warnings(&self) -> impl Iterator<Item = (&str, &ValidationIssue)> {
		self.instances
			.iter()
			.flat_map(|r| r.warnings.iter().map(move |w| (r.id.as_str(), w)))
	}

	/// Ids in render order.
	pub fn rendered_ids(&self) -> Vec<&str> {
		self.instances.iter().map(|r| r.id.as_str()).collect()
	}

	/// Replaces the reports of a re-rendered subtree.
	///
	/// Entries whose ids appear in `replacement` are updated in place; the
	/// page HTML is left untouched.
	pub fn merge(&mut self, replacement: Vec<InstanceReport>) {
		for report in replacement {
			match self.instances.iter_mut().find(|r| r.id == report.id) {
				Some(existing) => *existing = report,
				None => self.instances.push(report),
			}
		}
	}
}
