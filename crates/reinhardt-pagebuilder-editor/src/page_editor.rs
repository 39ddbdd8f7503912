//! Page tree mutations: insert, remove, reorder, toggle visibility, replace.
//!
//! Every mutation that changes a sibling list renumbers its `order` values to
//! `0..n` in display order, so persisted pages never carry gaps or ties.

use crate::error::{EditorError, EditorResult};
use crate::property::PropertyEditor;
use crate::value::EditValue;
use reinhardt_pagebuilder_render::{ComponentInstance, Page, PageConfig};

/// Mutable view over a page's component tree.
///
/// Instances are addressed by id at any nesting depth.
#[derive(Debug)]
pub struct PageEditor<'a> {
	components: &'a mut Vec<ComponentInstance>,
}

impl<'a> PageEditor<'a> {
	/// Edits a raw component list.
	pub fn new(components: &'a mut Vec<ComponentInstance>) -> Self {
		Self { components }
	}

	/// Edits a page aggregate.
	pub fn for_page(page: &'a mut Page) -> Self {
		Self::new(&mut page.components)
	}

	/// Edits a page configuration.
	pub fn for_config(config: &'a mut PageConfig) -> Self {
		Self::new(&mut config.components)
	}

	/// Finds an instance by id.
	pub fn find(&self, id: &str) -> Option<&ComponentInstance> {
		self.components.iter().find_map(|instance| instance.find(id))
	}

	/// Inserts a top-level instance at `position` (clamped) in display order.
	///
	/// Returns the new instance's id.
	pub fn insert(&mut self, instance: ComponentInstance, position: usize) -> String {
		insert_into(self.components, instance, position)
	}

	/// Inserts a child under `parent_id` at `position` (clamped).
	///
	/// # Errors
	///
	/// Returns [`EditorError::InstanceNotFound`] if the parent does not exist.
	pub fn insert_child(
		&mut self,
		parent_id: &str,
		instance: ComponentInstance,
		position: usize,
	) -> EditorResult<String> {
		let parent = find_mut(self.components, parent_id)
			.ok_or_else(|| EditorError::InstanceNotFound(parent_id.to_string()))?;
		let children = parent.children.get_or_insert_with(Vec::new);
		Ok(insert_into(children, instance, position))
	}

	/// Removes an instance (with its children).
	///
	/// # Errors
	///
	/// Returns [`EditorError::InstanceNotFound`] if no instance has the id.
	pub fn remove(&mut self, id: &str) -> EditorResult<ComponentInstance> {
		let (siblings, index) = locate(self.components, id)
			.ok_or_else(|| EditorError::InstanceNotFound(id.to_string()))?;
		let removed = siblings.remove(index);
		renumber(siblings);
		tracing::debug!(instance_id = id, component = %removed.type_name, "component removed");
		Ok(removed)
	}

	/// Moves an instance to `new_index` (clamped) among its siblings.
	///
	/// # Errors
	///
	/// Returns [`EditorError::InstanceNotFound`] if no instance has the id.
	pub fn move_to(&mut self, id: &str, new_index: usize) -> EditorResult<()> {
		let (siblings, _) = locate(self.components, id)
			.ok_or_else(|| EditorError::InstanceNotFound(id.to_string()))?;
		renumber(siblings);
		let Some(current) = siblings.iter().position(|i| i.id == id) else {
			return Err(EditorError::InstanceNotFound(id.to_string()));
		};
		let instance = siblings.remove(current);
		let target = new_index.min(siblings.len());
		siblings.insert(target, instance);
		renumber(siblings);
		Ok(())
	}

	/// Sets the visibility flag of an instance.
	///
	/// # Errors
	///
	/// Returns [`EditorError::InstanceNotFound`] if no instance has the id.
	pub fn set_visibility(&mut self, id: &str, visible: bool) -> EditorResult<()> {
		let instance = find_mut(self.components, id)
			.ok_or_else(|| EditorError::InstanceNotFound(id.to_string()))?;
		instance.is_visible = Some(visible);
		Ok(())
	}

	/// Replaces the instance with the same id, returning the previous one.
	///
	/// # Errors
	///
	/// Returns [`EditorError::InstanceNotFound`] if no instance has the id.
	pub fn replace(&mut self, instance: ComponentInstance) -> EditorResult<ComponentInstance> {
		let slot = find_mut(self.components, &instance.id)
			.ok_or_else(|| EditorError::InstanceNotFound(instance.id.clone()))?;
		Ok(std::mem::replace(slot, instance))
	}

	/// Applies property edits to an instance in place.
	///
	/// # Errors
	///
	/// Returns [`EditorError::InstanceNotFound`] or the editor's error; on
	/// error the page is unchanged.
	pub fn edit_props<I, K>(
		&mut self,
		editor: &PropertyEditor,
		id: &str,
		edits: I,
	) -> EditorResult<()>
	where
		I: IntoIterator<Item = (K, EditValue)>,
		K: AsRef<str>,
	{
		let current = self
			.find(id)
			.ok_or_else(|| EditorError::InstanceNotFound(id.to_string()))?;
		let updated = editor.apply_edits(current, edits)?;
		self.replace(updated)?;
		Ok(())
	}
}

fn insert_into(
	siblings: &mut Vec<ComponentInstance>,
	instance: ComponentInstance,
	position: usize,
) -> String {
	renumber(siblings);
	let id = instance.id.clone();
	let target = position.min(siblings.len());
	tracing::debug!(instance_id = %id, component = %instance.type_name, position = target, "component inserted");
	siblings.insert(target, instance);
	renumber(siblings);
	id
}

/// Sorts siblings by `order` (stable) and rewrites orders to `0..n`.
pub fn renumber(siblings: &mut [ComponentInstance]) {
	siblings.sort_by_key(|instance| instance.order);
	for (index, instance) in siblings.iter_mut().enumerate() {
		instance.order = index as i64;
	}
}

fn locate<'v>(
	list: &'v mut Vec<ComponentInstance>,
	id: &str,
) -> Option<(&'v mut Vec<ComponentInstance>, usize)> {
	if let Some(index) = list.iter().position(|instance| instance.id == id) {
		return Some((list, index));
	}
	for instance in list.iter_mut() {
		if let Some(children) = instance.children.as_mut()
			&& let Some(found) = locate(children, id)
		{
			return Some(found);
		}
	}
	None
}

fn find_mut<'v>(list: &'v mut [ComponentInstance], id: &str) -> Option<&'v mut ComponentInstance> {
	for instance in list.iter_mut() {
		if instance.id == id {
			return Some(instance);
		}
		if let Some(children) = instance.children.as_mut()
			&& let Some(found) = find_mut(children, id)
		{
			return Some(found);
		}
	}
	None
}
