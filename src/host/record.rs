use std::sync::Arc;

use crate::domain::ItemSnapshot;

use super::HostError;

/// A live host item. Every field is an accessor that can fail once the
/// underlying handle dies; none of the data lives in enumerable slots.
pub trait ItemRecord: Send + Sync {
	fn id(&self) -> Result<String, HostError>;
	fn name(&self) -> Result<String, HostError>;
	fn ext(&self) -> Result<String, HostError>;
	fn url(&self) -> Result<String, HostError>;
	fn annotation(&self) -> Result<String, HostError>;
	fn width(&self) -> Result<i64, HostError>;
	fn height(&self) -> Result<i64, HostError>;
	fn size(&self) -> Result<i64, HostError>;
	fn star(&self) -> Result<Option<u8>, HostError>;
	fn imported_at(&self) -> Result<i64, HostError>;
	fn modified_at(&self) -> Result<i64, HostError>;
	fn tags(&self) -> Result<Vec<String>, HostError>;
	fn folders(&self) -> Result<Vec<String>, HostError>;
	fn is_deleted(&self) -> Result<bool, HostError>;
}

/// A live host folder. `children` yields live child handles, one level deep.
pub trait FolderRecord: Send + Sync {
	fn id(&self) -> Result<String, HostError>;
	fn name(&self) -> Result<String, HostError>;
	fn description(&self) -> Result<String, HostError>;
	fn icon(&self) -> Result<Option<String>, HostError>;
	fn icon_color(&self) -> Result<Option<String>, HostError>;
	fn created_at(&self) -> Result<i64, HostError>;
	fn parent(&self) -> Result<Option<String>, HostError>;
	fn children(&self) -> Result<Vec<Arc<dyn FolderRecord>>, HostError>;
}

// A snapshot answers the same accessors as the record it came from, so
// extracting it again is a no-op.
impl ItemRecord for ItemSnapshot {
	fn id(&self) -> Result<String, HostError> {
		Ok(self.id.clone())
	}

	fn name(&self) -> Result<String, HostError> {
		Ok(self.name.clone())
	}

	fn ext(&self) -> Result<String, HostError> {
		Ok(self.ext.clone())
	}

	fn url(&self) -> Result<String, HostError> {
		Ok(self.url.clone())
	}

	fn annotation(&self) -> Result<String, HostError> {
		Ok(self.annotation.clone())
	}

	fn width(&self) -> Result<i64, HostError> {
		Ok(self.width)
	}

	fn height(&self) -> Result<i64, HostError> {
		Ok(self.height)
	}

	fn size(&self) -> Result<i64, HostError> {
		Ok(self.size)
	}

	fn star(&self) -> Result<Option<u8>, HostError> {
		Ok(self.star)
	}

	fn imported_at(&self) -> Result<i64, HostError> {
		Ok(self.imported_at)
	}

	fn modified_at(&self) -> Result<i64, HostError> {
		Ok(self.modified_at)
	}

	fn tags(&self) -> Result<Vec<String>, HostError> {
		Ok(self.tags.clone())
	}

	fn folders(&self) -> Result<Vec<String>, HostError> {
		Ok(self.folders.clone())
	}

	fn is_deleted(&self) -> Result<bool, HostError> {
		Ok(self.is_deleted)
	}
}
