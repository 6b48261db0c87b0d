//! Named-path introspection over live object state.
//!
//! Host code registers, per type, how relative path names map onto
//! sub-locations of a value. A debugging console then walks absolute paths
//! such as `/player/health/current` without knowing any concrete types.
//!
//! # Modules
//!
//! - [`location`] - addressable locations (`get`/`set` over live values)
//! - [`handler`] - the per-type registry of dynamic handlers and static paths
//! - [`adapters`] - typed wrappers producing the registry's handler shapes
//! - [`service`] - the type to handler map and the mounted path tree
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use lens_registry::{EntityUid, Location, ViewVariables};
//!
//! #[derive(Debug)]
//! struct Battery {
//! 	charge: u32,
//! }
//!
//! let mut vv = ViewVariables::new();
//! vv.handler::<Battery>()
//! 	.add_property("charge", |_: EntityUid, b: &Battery| b.charge)
//! 	.unwrap();
//!
//! let battery = Arc::new(Battery { charge: 7 });
//! vv.mount("battery", Location::component(EntityUid(1), move || Some(battery.clone())));
//!
//! let charge = vv.resolve_path("/battery/charge").unwrap();
//! assert_eq!(charge.get_as::<u32>().as_deref(), Some(&7));
//! ```

pub mod adapters;
pub mod error;
pub mod handler;
pub mod location;
pub mod service;

pub use adapters::{
	ListFn, PathHandler, PropertyGetter, PropertySetter, ResolveFn, TypedListFn, TypedResolveFn,
};
pub use error::{RegistryError, SetError};
pub use handler::TypeHandler;
pub use location::{
	ComponentPath, EntityUid, Inspect, Location, TypeTag, Value, ValuePath, downcast_value,
};
pub use service::ViewVariables;
