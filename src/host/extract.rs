use crate::domain::{FolderSnapshot, ItemSnapshot};

use super::{FolderRecord, HostError, ItemRecord};

/// Project a live item record into a plain snapshot.
///
/// Every field is read through its accessor by name; accessor failure
/// propagates unchanged. This is the only way item data crosses from the
/// host into the rest of the crate.
pub fn extract_item(record: &dyn ItemRecord) -> Result<ItemSnapshot, HostError> {
	Ok(ItemSnapshot {
		id: record.id()?,
		name: record.name()?,
		ext: record.ext()?,
		url: record.url()?,
		annotation: record.annotation()?,
		width: record.width()?,
		height: record.height()?,
		size: record.size()?,
		star: record.star()?,
		imported_at: record.imported_at()?,
		modified_at: record.modified_at()?,
		tags: record.tags()?,
		folders: record.folders()?,
		is_deleted: record.is_deleted()?,
	})
}

/// Project a live folder record into a plain snapshot.
///
/// Children are projected shallowly, as a sequence of child ids; deep
/// extraction is the caller's responsibility via `Host::folder_by_id`.
pub fn extract_folder(record: &dyn FolderRecord) -> Result<FolderSnapshot, HostError> {
	let children = record
		.children()?
		.into_iter()
		.map(|child| child.id())
		.collect::<Result<Vec<_>, _>>()?;

	Ok(FolderSnapshot {
		id: record.id()?,
		name: record.name()?,
		description: record.description()?,
		icon: record.icon()?,
		icon_color: record.icon_color()?,
		created_at: record.created_at()?,
		parent: record.parent()?,
		children,
	})
}
