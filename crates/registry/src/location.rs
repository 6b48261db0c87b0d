//! Addressable locations over live values.
//!
//! A [`Location`] is a cheap, clonable handle that reads a value on demand and
//! optionally writes one back. Locations never cache: every [`Location::get`]
//! calls the getter again, so a location created at the start of a debugging
//! session keeps tracking the live object.
//!
//! Two shapes exist:
//!
//! * [`Location::Value`] - any value, produced by a getter.
//! * [`Location::Component`] - a component instance attached to an owning
//!   [`EntityUid`]. Component-typed path handlers only apply to this shape.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::error::SetError;

/// A type-erased value read from a location.
pub type Value = Arc<dyn Inspect>;

type Getter = Arc<dyn Fn() -> Option<Value> + Send + Sync>;
type Setter = Arc<dyn Fn(Value) -> Result<(), SetError> + Send + Sync>;

/// Stable identifier of a Rust type, with its name kept for diagnostics.
#[derive(Clone, Copy)]
pub struct TypeTag {
	id: TypeId,
	name: &'static str,
}

impl TypeTag {
	pub fn of<T: Any + ?Sized>() -> Self {
		Self {
			id: TypeId::of::<T>(),
			name: std::any::type_name::<T>(),
		}
	}

	pub const fn id(&self) -> TypeId {
		self.id
	}

	pub const fn name(&self) -> &'static str {
		self.name
	}
}

impl PartialEq for TypeTag {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for TypeTag {}

impl fmt::Debug for TypeTag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name)
	}
}

/// Values that can be exposed through a location.
///
/// Implemented for every `Debug + Send + Sync + 'static` type. Call the
/// methods through a dereferenced [`Value`] (`(*value).value_type()`), since
/// `Arc<dyn Inspect>` is itself `Inspect`.
pub trait Inspect: Any + fmt::Debug + Send + Sync {
	/// Runtime type of the concrete value.
	fn value_type(&self) -> TypeTag;

	fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + fmt::Debug + Send + Sync> Inspect for T {
	fn value_type(&self) -> TypeTag {
		TypeTag::of::<T>()
	}

	fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
		self
	}
}

/// Boxes `value` as a [`Value`], passing an already erased `Value` through.
fn erase<V: Inspect>(value: V) -> Value {
	match (&value as &dyn Any).downcast_ref::<Value>() {
		Some(inner) => inner.clone(),
		None => Arc::new(value),
	}
}

/// Downcasts a value to `T`, or `None` if the runtime type differs.
pub fn downcast_value<T: Any + Send + Sync>(value: Value) -> Option<Arc<T>> {
	if (*value).value_type().id() != TypeId::of::<T>() {
		return None;
	}
	value.into_any().downcast::<T>().ok()
}

/// Identifier of the entity owning a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityUid(pub u64);

impl fmt::Display for EntityUid {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Getter/setter pair plus the declared type of what they address.
#[derive(Clone)]
pub struct ValuePath {
	getter: Getter,
	setter: Option<Setter>,
	declared: TypeTag,
}

impl ValuePath {
	fn get(&self) -> Option<Value> {
		(self.getter)()
	}
}

/// A component instance attached to an owning entity.
#[derive(Clone)]
pub struct ComponentPath {
	owner: EntityUid,
	path: ValuePath,
}

impl ComponentPath {
	pub const fn owner(&self) -> EntityUid {
		self.owner
	}

	/// The component, or `None` once it has been removed from its owner.
	pub fn get(&self) -> Option<Value> {
		self.path.get()
	}
}

/// Handle over a live value.
#[derive(Clone)]
pub enum Location {
	Value(ValuePath),
	Component(ComponentPath),
}

impl Location {
	/// A read-only location over a fixed value.
	///
	/// A [`Value`] is exposed as the concrete value it holds.
	pub fn constant<V: Inspect>(value: V) -> Self {
		Self::from_value(erase(value))
	}

	/// A read-only location over an already shared value.
	pub fn shared<V: Inspect>(value: Arc<V>) -> Self {
		if let Some(inner) = (&*value as &dyn Any).downcast_ref::<Value>() {
			return Self::from_value(inner.clone());
		}
		let value: Value = value;
		Self::from_value(value)
	}

	/// A read-only location over a type-erased value, declared as its runtime
	/// type.
	pub fn from_value(value: Value) -> Self {
		let declared = (*value).value_type();
		Self::from_getter(move || Some(value.clone()), declared)
	}

	/// A read-only location calling `getter` on every read.
	pub fn from_getter<F>(getter: F, declared: TypeTag) -> Self
	where
		F: Fn() -> Option<Value> + Send + Sync + 'static,
	{
		Self::Value(ValuePath {
			getter: Arc::new(getter),
			setter: None,
			declared,
		})
	}

	/// Like [`Location::from_getter`] for a getter that always produces a `V`.
	pub fn from_typed_getter<V, F>(getter: F) -> Self
	where
		V: Inspect,
		F: Fn() -> V + Send + Sync + 'static,
	{
		Self::from_getter(move || Some(erase(getter())), TypeTag::of::<V>())
	}

	/// A location addressing component `C` owned by `owner`.
	///
	/// `getter` returns `None` once the component is gone.
	pub fn component<C, F>(owner: EntityUid, getter: F) -> Self
	where
		C: Inspect,
		F: Fn() -> Option<Arc<C>> + Send + Sync + 'static,
	{
		Self::Component(ComponentPath {
			owner,
			path: ValuePath {
				getter: Arc::new(move || getter().map(|c| c as Value)),
				setter: None,
				declared: TypeTag::of::<C>(),
			},
		})
	}

	/// Attaches a write capability, replacing any previous setter.
	pub fn with_setter<F>(mut self, setter: F) -> Self
	where
		F: Fn(Value) -> Result<(), SetError> + Send + Sync + 'static,
	{
		self.path_mut().setter = Some(Arc::new(setter));
		self
	}

	/// Reads the current value.
	pub fn get(&self) -> Option<Value> {
		self.path().get()
	}

	/// Reads the current value as a `T`, or `None` if absent or of another type.
	pub fn get_as<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
		downcast_value(self.get()?)
	}

	/// Writes `value` through the attached setter.
	pub fn set(&self, value: Value) -> Result<(), SetError> {
		let path = self.path();
		match &path.setter {
			Some(setter) => setter(value),
			None => Err(SetError::ReadOnly { type_name: path.declared.name() }),
		}
	}

	/// Like [`Location::set`] for an unboxed value.
	pub fn set_value<V: Inspect>(&self, value: V) -> Result<(), SetError> {
		self.set(erase(value))
	}

	pub fn is_writable(&self) -> bool {
		self.path().setter.is_some()
	}

	/// Type this location was declared with.
	pub fn declared_type(&self) -> TypeTag {
		self.path().declared
	}

	/// Runtime type of the current value, if any.
	pub fn runtime_type(&self) -> Option<TypeTag> {
		self.get().map(|v| (*v).value_type())
	}

	pub fn as_component(&self) -> Option<&ComponentPath> {
		match self {
			Self::Component(c) => Some(c),
			Self::Value(_) => None,
		}
	}

	fn path(&self) -> &ValuePath {
		match self {
			Self::Value(p) => p,
			Self::Component(c) => &c.path,
		}
	}

	fn path_mut(&mut self) -> &mut ValuePath {
		match self {
			Self::Value(p) => p,
			Self::Component(c) => &mut c.path,
		}
	}
}

impl fmt::Debug for Location {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let path = self.path();
		let mut s = match self {
			Self::Value(_) => f.debug_struct("Location::Value"),
			Self::Component(c) => {
				let mut s = f.debug_struct("Location::Component");
				s.field("owner", &c.owner);
				s
			}
		};
		s.field("declared", &path.declared)
			.field("writable", &path.setter.is_some())
			.finish()
	}
}
