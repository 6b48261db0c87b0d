//! Per-type path handler registry.
//!
//! A [`TypeHandler<T>`] answers "what does the relative path `name` mean for a
//! value of type `T`?". Two kinds of rules compete:
//!
//! 1. Dynamic handlers, tried in registration order. The first one returning
//!    `Some` wins.
//! 2. Static paths, looked up by exact name when no dynamic handler answered.
//!
//! Registration takes `&mut self` and is meant to happen while the owning
//! module initializes. Resolution and listing take `&self`.

use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::adapters::{
	self, ListFn, PathHandler, PropertyGetter, PropertySetter, ResolveFn, TypedListFn,
	TypedResolveFn,
};
use crate::error::{RegistryError, SetError};
use crate::location::{EntityUid, Inspect, Location};

/// Compares the data pointers of two `Arc`s, ignoring vtables.
fn same_arc<A: ?Sized, B: ?Sized>(a: &Arc<A>, b: &Arc<B>) -> bool {
	std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// The pair a caller originally registered, kept for removal by identity.
enum Origin<T> {
	Raw,
	Typed {
		resolve: TypedResolveFn<T>,
		list: TypedListFn<T>,
	},
}

struct DynamicEntry<T> {
	resolve: ResolveFn,
	list: ListFn,
	origin: Origin<T>,
}

impl<T> DynamicEntry<T> {
	fn is_raw(&self, resolve: &ResolveFn, list: &ListFn) -> bool {
		matches!(self.origin, Origin::Raw) && same_arc(&self.resolve, resolve) && same_arc(&self.list, list)
	}

	fn is_typed(&self, resolve: &TypedResolveFn<T>, list: &TypedListFn<T>) -> bool {
		match &self.origin {
			Origin::Typed { resolve: r, list: l } => same_arc(r, resolve) && same_arc(l, list),
			Origin::Raw => false,
		}
	}
}

/// Path handlers registered for values of type `T`.
pub struct TypeHandler<T> {
	dynamic: Vec<DynamicEntry<T>>,
	paths: IndexMap<String, PathHandler>,
	_marker: PhantomData<fn() -> T>,
}

impl<T> Default for TypeHandler<T> {
	fn default() -> Self {
		Self {
			dynamic: Vec::new(),
			paths: IndexMap::new(),
			_marker: PhantomData,
		}
	}
}

impl<T: Any + Send + Sync> TypeHandler<T> {
	pub fn new() -> Self {
		Self::default()
	}

	fn type_name() -> &'static str {
		std::any::type_name::<T>()
	}

	/// Adds a dynamic handler over the unwrapped value.
	///
	/// Keep clones of `resolve` and `list` to remove the pair later with
	/// [`TypeHandler::remove_handler`].
	pub fn add_handler(&mut self, resolve: TypedResolveFn<T>, list: TypedListFn<T>) -> &mut Self {
		self.dynamic.push(DynamicEntry {
			resolve: adapters::typed_resolve(resolve.clone()),
			list: adapters::typed_list(list.clone()),
			origin: Origin::Typed { resolve, list },
		});
		self
	}

	/// Adds a dynamic handler over the raw location.
	pub fn add_raw_handler(&mut self, resolve: ResolveFn, list: ListFn) -> &mut Self {
		self.dynamic.push(DynamicEntry {
			resolve,
			list,
			origin: Origin::Raw,
		});
		self
	}

	/// Removes the first dynamic handler registered with exactly this pair.
	pub fn remove_handler(
		&mut self,
		resolve: &TypedResolveFn<T>,
		list: &TypedListFn<T>,
	) -> Result<&mut Self, RegistryError> {
		let pos = self.dynamic.iter().position(|e| e.is_typed(resolve, list));
		self.remove_dynamic_at(pos)
	}

	/// Raw counterpart of [`TypeHandler::remove_handler`].
	pub fn remove_raw_handler(&mut self, resolve: &ResolveFn, list: &ListFn) -> Result<&mut Self, RegistryError> {
		let pos = self.dynamic.iter().position(|e| e.is_raw(resolve, list));
		self.remove_dynamic_at(pos)
	}

	fn remove_dynamic_at(&mut self, pos: Option<usize>) -> Result<&mut Self, RegistryError> {
		let pos = pos.ok_or(RegistryError::HandlerNotFound {
			type_name: Self::type_name(),
		})?;
		self.dynamic.remove(pos);
		Ok(self)
	}

	/// Registers a handler for one exact relative path.
	pub fn add_path(&mut self, name: impl Into<String>, handler: PathHandler) -> Result<&mut Self, RegistryError> {
		let name = name.into();
		if self.paths.contains_key(&name) {
			return Err(RegistryError::DuplicatePath {
				type_name: Self::type_name(),
				path: name,
			});
		}
		self.paths.insert(name, handler);
		Ok(self)
	}

	/// Static path over a present `T`.
	pub fn add_value_path<F>(&mut self, name: impl Into<String>, handler: F) -> Result<&mut Self, RegistryError>
	where
		F: Fn(Arc<T>) -> Option<Location> + Send + Sync + 'static,
	{
		self.add_path(name, adapters::value_path::<T, _>(handler))
	}

	/// Static path receiving `None` when the location holds no value.
	pub fn add_nullable_path<F>(&mut self, name: impl Into<String>, handler: F) -> Result<&mut Self, RegistryError>
	where
		F: Fn(Option<Arc<T>>) -> Option<Location> + Send + Sync + 'static,
	{
		self.add_path(name, adapters::nullable_path::<T, _>(handler))
	}

	/// Static path only applicable to component locations.
	pub fn add_component_path<F>(&mut self, name: impl Into<String>, handler: F) -> Result<&mut Self, RegistryError>
	where
		F: Fn(EntityUid, Arc<T>) -> Option<Location> + Send + Sync + 'static,
	{
		self.add_path(name, adapters::component_path::<T, _>(handler))
	}

	/// Read-only component property.
	pub fn add_property<V, G>(&mut self, name: impl Into<String>, getter: G) -> Result<&mut Self, RegistryError>
	where
		V: Inspect + Clone,
		G: Fn(EntityUid, &T) -> V + Send + Sync + 'static,
	{
		let name = name.into();
		let getter: PropertyGetter<T, V> = Arc::new(getter);
		let handler = adapters::property_path::<T, V>(&name, getter, None);
		self.add_path(name, handler)
	}

	/// Read/write component property.
	pub fn add_property_with_setter<V, G, S>(
		&mut self,
		name: impl Into<String>,
		getter: G,
		setter: S,
	) -> Result<&mut Self, RegistryError>
	where
		V: Inspect + Clone,
		G: Fn(EntityUid, &T) -> V + Send + Sync + 'static,
		S: Fn(EntityUid, V, &T) -> Result<(), SetError> + Send + Sync + 'static,
	{
		let name = name.into();
		let getter: PropertyGetter<T, V> = Arc::new(getter);
		let setter: PropertySetter<T, V> = Arc::new(setter);
		let handler = adapters::property_path::<T, V>(&name, getter, Some(setter));
		self.add_path(name, handler)
	}

	/// Removes a static path. Absent names are ignored.
	pub fn remove_path(&mut self, name: &str) -> &mut Self {
		self.paths.shift_remove(name);
		self
	}

	/// Resolves `relative` against `loc`.
	///
	/// Dynamic handlers take precedence, in registration order. `None` from the
	/// static lookup means either an unknown name or a known one that does not
	/// apply right now.
	pub fn resolve(&self, loc: &Location, relative: &str) -> Option<Location> {
		self.dynamic
			.iter()
			.find_map(|entry| (entry.resolve)(loc, relative))
			.or_else(|| self.paths.get(relative).and_then(|handler| handler(loc)))
	}

	/// Every name currently valid for `loc`.
	///
	/// Dynamic names come first, then static names whose handler applies.
	/// Names are not de-duplicated.
	pub fn list<'a>(&'a self, loc: &'a Location) -> impl Iterator<Item = String> + 'a {
		let dynamic = self.dynamic.iter().flat_map(move |entry| (entry.list)(loc));
		let fixed = self
			.paths
			.iter()
			.filter(move |(_, handler)| handler(loc).is_some())
			.map(|(name, _)| name.clone());
		dynamic.chain(fixed)
	}

	pub fn handler_count(&self) -> usize {
		self.dynamic.len()
	}

	/// Registered static path names, in registration order.
	pub fn path_names(&self) -> impl Iterator<Item = &str> {
		self.paths.keys().map(String::as_str)
	}
}

/// Object-safe view of a [`TypeHandler`] used by the service's type map.
pub(crate) trait ErasedTypeHandler: Send + Sync {
	fn resolve(&self, loc: &Location, relative: &str) -> Option<Location>;
	fn list(&self, loc: &Location) -> Vec<String>;
	fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any + Send + Sync> ErasedTypeHandler for TypeHandler<T> {
	fn resolve(&self, loc: &Location, relative: &str) -> Option<Location> {
		TypeHandler::resolve(self, loc, relative)
	}

	fn list(&self, loc: &Location) -> Vec<String> {
		TypeHandler::list(self, loc).collect()
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}

#[cfg(test)]
mod tests;
