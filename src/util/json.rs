//! Shared JSON file discipline: UTF-8, 2-space indent, errors carrying the
//! offending path.

use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tokio::fs;

use super::error::FileIOError;

#[derive(Debug, Error)]
pub(crate) enum JsonFileError {
	#[error(transparent)]
	Io(#[from] FileIOError),
	#[error(transparent)]
	Serde(#[from] serde_json::Error),
}

pub(crate) async fn read_file<T>(path: impl AsRef<Path>) -> Result<T, JsonFileError>
where
	T: DeserializeOwned,
{
	let path = path.as_ref();
	let bytes = fs::read(path)
		.await
		.map_err(|e| FileIOError::from((path, e)))?;

	Ok(serde_json::from_slice(&bytes)?)
}

/// Missing or malformed files read as the default value. Reserved for the
/// optional documents (config files, derived indexes on the write path).
pub(crate) async fn read_file_or_default<T>(path: impl AsRef<Path>) -> T
where
	T: DeserializeOwned + Default,
{
	match fs::read(path.as_ref()).await {
		Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
		Err(_) => T::default(),
	}
}

pub(crate) async fn write_file_pretty<T>(
	path: impl AsRef<Path>,
	value: &T,
) -> Result<(), JsonFileError>
where
	T: Serialize,
{
	let path = path.as_ref();
	let bytes = serde_json::to_vec_pretty(value)?;

	fs::write(path, bytes)
		.await
		.map_err(|e| FileIOError::from((path, e)))?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeMap;

	use super::*;

	#[tokio::test]
	async fn missing_file_reads_as_default() {
		let map: BTreeMap<String, i64> = read_file_or_default("/definitely/not/here.json").await;
		assert!(map.is_empty());
	}

	#[tokio::test]
	async fn malformed_file_reads_as_default() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("broken.json");
		fs::write(&path, b"{not json").await.unwrap();

		let map: BTreeMap<String, i64> = read_file_or_default(&path).await;
		assert!(map.is_empty());
	}

	#[tokio::test]
	async fn write_uses_two_space_indent() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("doc.json");

		let mut map = BTreeMap::new();
		map.insert("key".to_string(), 1i64);
		write_file_pretty(&path, &map).await.unwrap();

		let text = fs::read_to_string(&path).await.unwrap();
		assert!(text.contains("\n  \"key\": 1"));
	}
}
