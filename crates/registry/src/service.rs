//! Introspection service: the per-type handler map and the mounted path tree.

use std::any::{Any, TypeId};

use indexmap::IndexMap;
use rustc_hash::FxHashMap as HashMap;

use crate::handler::{ErasedTypeHandler, TypeHandler};
use crate::location::Location;

/// Owns one [`TypeHandler`] per introspectable type and a set of named roots.
///
/// Handlers are created on first request through [`ViewVariables::handler`].
/// Lookups route by the runtime type of a location's current value, so a
/// location declared as one type but currently holding another resolves
/// against the handler of the value it actually holds.
///
/// Absolute paths have the form `/<mount>/<segment>/<segment>...`. Each
/// segment after the mount is resolved relative to the previous location.
#[derive(Default)]
pub struct ViewVariables {
	handlers: HashMap<TypeId, Box<dyn ErasedTypeHandler>>,
	mounts: IndexMap<String, Location>,
}

impl ViewVariables {
	pub fn new() -> Self {
		Self::default()
	}

	/// Handler for `T`, created empty on first use.
	pub fn handler<T: Any + Send + Sync>(&mut self) -> &mut TypeHandler<T> {
		self.handlers
			.entry(TypeId::of::<T>())
			.or_insert_with(|| {
				tracing::trace!(type_name = std::any::type_name::<T>(), "vv.handler.create");
				Box::new(TypeHandler::<T>::new())
			})
			.as_any_mut()
			.downcast_mut::<TypeHandler<T>>()
			.expect("handler map is keyed by TypeId")
	}

	pub fn has_handler<T: Any>(&self) -> bool {
		self.handlers.contains_key(&TypeId::of::<T>())
	}

	/// Resolves one relative segment against `loc`.
	pub fn resolve(&self, loc: &Location, relative: &str) -> Option<Location> {
		let ty = loc.runtime_type()?;
		self.handlers.get(&ty.id())?.resolve(loc, relative)
	}

	/// Relative names currently valid for `loc`, duplicates included.
	pub fn list(&self, loc: &Location) -> Vec<String> {
		let Some(ty) = loc.runtime_type() else {
			return Vec::new();
		};
		self.handlers
			.get(&ty.id())
			.map(|handler| handler.list(loc))
			.unwrap_or_default()
	}

	/// Registers a named root, returning the one it replaced.
	pub fn mount(&mut self, name: impl Into<String>, loc: Location) -> Option<Location> {
		self.mounts.insert(name.into(), loc)
	}

	pub fn unmount(&mut self, name: &str) -> Option<Location> {
		self.mounts.shift_remove(name)
	}

	pub fn mounts(&self) -> impl Iterator<Item = &str> {
		self.mounts.keys().map(String::as_str)
	}

	/// Walks an absolute path from its mount.
	pub fn resolve_path(&self, path: &str) -> Option<Location> {
		let mut segments = path.split('/').filter(|s| !s.is_empty());
		let root = segments.next()?;
		let mut loc = self.mounts.get(root)?.clone();
		for segment in segments {
			match self.resolve(&loc, segment) {
				Some(next) => loc = next,
				None => {
					tracing::trace!(path, segment, "vv.path.unresolved");
					return None;
				}
			}
		}
		Some(loc)
	}

	/// Absolute completion candidates for a partially typed path.
	///
	/// The input is split at its last `/`: everything before it must resolve,
	/// and every listed name starting with the remainder is returned joined to
	/// that parent. An empty parent lists the mounts.
	pub fn list_path(&self, partial: &str) -> Vec<String> {
		let (parent, stem) = match partial.rfind('/') {
			Some(i) => (&partial[..i], &partial[i + 1..]),
			None => ("", partial),
		};

		if parent.trim_matches('/').is_empty() {
			return self
				.mounts
				.keys()
				.filter(|name| name.starts_with(stem))
				.map(|name| format!("/{name}"))
				.collect();
		}

		let Some(loc) = self.resolve_path(parent) else {
			return Vec::new();
		};
		let parent = parent.trim_end_matches('/');
		self.list(&loc)
			.into_iter()
			.filter(|name| name.starts_with(stem))
			.map(|name| format!("{parent}/{name}"))
			.collect()
	}
}
