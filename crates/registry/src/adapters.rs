//! Binding adapters.
//!
//! Each constructor lifts a narrower handler shape into one of the two shapes a
//! [`TypeHandler`](crate::TypeHandler) stores:
//!
//! * [`ResolveFn`] / [`ListFn`] for dynamic handlers.
//! * [`PathHandler`] for static named paths.
//!
//! Every adapter performs exactly one typed unwrap. A value of the wrong
//! runtime type makes the adapter decline (`None`, or no names) rather than
//! fail.

use std::any::Any;
use std::sync::Arc;

use crate::error::SetError;
use crate::location::{EntityUid, Inspect, Location, downcast_value};

/// Dynamic resolve rule over a raw location.
pub type ResolveFn = Arc<dyn Fn(&Location, &str) -> Option<Location> + Send + Sync>;
/// Names a dynamic rule can currently answer for.
pub type ListFn = Arc<dyn Fn(&Location) -> Vec<String> + Send + Sync>;
/// Dynamic resolve rule over the unwrapped value (`None` when absent).
pub type TypedResolveFn<T> = Arc<dyn Fn(Option<Arc<T>>, &str) -> Option<Location> + Send + Sync>;
/// Typed counterpart of [`ListFn`].
pub type TypedListFn<T> = Arc<dyn Fn(Option<Arc<T>>) -> Vec<String> + Send + Sync>;
/// Static path handler. `None` means "not applicable right now".
pub type PathHandler = Arc<dyn Fn(&Location) -> Option<Location> + Send + Sync>;
/// Reads a property off a component.
pub type PropertyGetter<T, V> = Arc<dyn Fn(EntityUid, &T) -> V + Send + Sync>;
/// Writes a property into a component.
pub type PropertySetter<T, V> = Arc<dyn Fn(EntityUid, V, &T) -> Result<(), SetError> + Send + Sync>;

/// Outer `None` when the value is present but not a `T`.
fn unwrap_nullable<T: Any + Send + Sync>(loc: &Location) -> Option<Option<Arc<T>>> {
	match loc.get() {
		None => Some(None),
		Some(value) => downcast_value::<T>(value).map(Some),
	}
}

/// Owner and typed component, if `loc` addresses a live `T` component.
fn unwrap_component<T: Any + Send + Sync>(loc: &Location) -> Option<(EntityUid, Arc<T>)> {
	let pc = loc.as_component()?;
	let comp = downcast_value::<T>(pc.get()?)?;
	Some((pc.owner(), comp))
}

pub fn typed_resolve<T: Any + Send + Sync>(handle: TypedResolveFn<T>) -> ResolveFn {
	Arc::new(move |loc: &Location, relative: &str| handle(unwrap_nullable::<T>(loc)?, relative))
}

pub fn typed_list<T: Any + Send + Sync>(list: TypedListFn<T>) -> ListFn {
	Arc::new(move |loc: &Location| match unwrap_nullable::<T>(loc) {
		Some(value) => list(value),
		None => Vec::new(),
	})
}

/// Static path over a present `T`. Declines when the value is absent.
pub fn value_path<T, F>(handler: F) -> PathHandler
where
	T: Any + Send + Sync,
	F: Fn(Arc<T>) -> Option<Location> + Send + Sync + 'static,
{
	nullable_path::<T, _>(move |value| value.and_then(&handler))
}

/// Static path over an optional `T`.
pub fn nullable_path<T, F>(handler: F) -> PathHandler
where
	T: Any + Send + Sync,
	F: Fn(Option<Arc<T>>) -> Option<Location> + Send + Sync + 'static,
{
	Arc::new(move |loc: &Location| handler(unwrap_nullable::<T>(loc)?))
}

/// Static path over a component `T` and its owner.
///
/// Declines for non-component locations and for removed components.
pub fn component_path<T, F>(handler: F) -> PathHandler
where
	T: Any + Send + Sync,
	F: Fn(EntityUid, Arc<T>) -> Option<Location> + Send + Sync + 'static,
{
	Arc::new(move |loc: &Location| {
		let (owner, comp) = unwrap_component::<T>(loc)?;
		handler(owner, comp)
	})
}

/// Static path synthesizing a property location from a getter and optional
/// setter.
///
/// The produced location re-reads through `getter` on every access. A setter
/// returning [`SetError::TargetUnavailable`] is logged and reported as
/// success; every other error reaches the caller.
pub fn property_path<T, V>(
	name: &str,
	getter: PropertyGetter<T, V>,
	setter: Option<PropertySetter<T, V>>,
) -> PathHandler
where
	T: Any + Send + Sync,
	V: Inspect + Clone,
{
	let name: Arc<str> = Arc::from(name);
	Arc::new(move |loc: &Location| {
		let (owner, comp) = unwrap_component::<T>(loc)?;

		let read_comp = comp.clone();
		let getter = getter.clone();
		let path = Location::from_typed_getter(move || getter(owner, &*read_comp));

		let Some(setter) = setter.clone() else {
			return Some(path);
		};

		let name = name.clone();
		Some(path.with_setter(move |value| {
			let found = (*value).value_type().name();
			let value = downcast_value::<V>(value).ok_or(SetError::TypeMismatch {
				expected: std::any::type_name::<V>(),
				found,
			})?;
			match setter(owner, Arc::unwrap_or_clone(value), &*comp) {
				Err(SetError::TargetUnavailable { reason }) => {
					tracing::error!(
						path = %name,
						type_name = std::any::type_name::<T>(),
						%owner,
						%reason,
						"setter target unavailable; write dropped",
					);
					Ok(())
				}
				other => other,
			}
		}))
	})
}
