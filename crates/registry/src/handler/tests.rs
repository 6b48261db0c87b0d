use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};

use pretty_assertions::assert_eq;

use super::*;

#[derive(Debug)]
struct Inventory {
	items: Vec<String>,
}

#[derive(Debug)]
struct Battery {
	power: AtomicI64,
	attached: AtomicBool,
}

impl Battery {
	fn new(power: i64) -> Arc<Self> {
		Arc::new(Self {
			power: AtomicI64::new(power),
			attached: AtomicBool::new(true),
		})
	}
}

fn inventory(items: &[&str]) -> Location {
	Location::constant(Inventory {
		items: items.iter().map(|s| s.to_string()).collect(),
	})
}

fn battery_location(owner: u64, battery: &Arc<Battery>) -> Location {
	let battery = battery.clone();
	Location::component(EntityUid(owner), move || Some(battery.clone()))
}

fn tagged(tag: &'static str) -> Location {
	Location::constant(tag)
}

fn tag_of(loc: Option<Location>) -> Option<&'static str> {
	loc?.get_as::<&'static str>().map(|s| *s)
}

/// Dynamic handler answering `item<N>` with the N-th inventory item.
fn indexed_items() -> (TypedResolveFn<Inventory>, TypedListFn<Inventory>) {
	let resolve: TypedResolveFn<Inventory> = Arc::new(|inv: Option<Arc<Inventory>>, relative: &str| {
		let inv = inv?;
		let index: usize = relative.strip_prefix("item")?.parse().ok()?;
		let item = inv.items.get(index)?.clone();
		Some(Location::constant(item))
	});
	let list: TypedListFn<Inventory> = Arc::new(|inv: Option<Arc<Inventory>>| {
		inv.map(|inv| (0..inv.items.len()).map(|i| format!("item{i}")).collect())
			.unwrap_or_default()
	});
	(resolve, list)
}

fn constant_raw(tag: &'static str, names: &'static [&'static str]) -> (ResolveFn, ListFn) {
	let resolve: ResolveFn = Arc::new(move |_: &Location, relative: &str| {
		names.iter().any(|n| *n == relative).then(|| tagged(tag))
	});
	let list: ListFn = Arc::new(move |_: &Location| names.iter().map(|s| s.to_string()).collect());
	(resolve, list)
}

#[test]
fn first_registered_dynamic_handler_wins() {
	let mut handler = TypeHandler::<Inventory>::new();
	let (r1, l1) = constant_raw("first", &["x"]);
	let (r2, l2) = constant_raw("second", &["x"]);
	handler.add_raw_handler(r1, l1).add_raw_handler(r2, l2);

	assert_eq!(tag_of(handler.resolve(&inventory(&[]), "x")), Some("first"));
}

#[test]
fn later_handler_answers_when_earlier_declines() {
	let mut handler = TypeHandler::<Inventory>::new();
	let (r1, l1) = constant_raw("first", &["x"]);
	let (r2, l2) = constant_raw("second", &["x", "y"]);
	handler.add_raw_handler(r1, l1).add_raw_handler(r2, l2);

	assert_eq!(tag_of(handler.resolve(&inventory(&[]), "y")), Some("second"));
}

#[test]
fn dynamic_handlers_shadow_static_paths() {
	let mut handler = TypeHandler::<Inventory>::new();
	handler
		.add_path("x", Arc::new(|_: &Location| Some(tagged("static"))))
		.unwrap();
	let (r, l) = constant_raw("dynamic", &["x"]);
	handler.add_raw_handler(r, l);

	assert_eq!(tag_of(handler.resolve(&inventory(&[]), "x")), Some("dynamic"));
}

#[test]
fn typed_handler_resolves_indexed_items() {
	let mut handler = TypeHandler::<Inventory>::new();
	let (r, l) = indexed_items();
	handler.add_handler(r, l);

	let loc = inventory(&["sword", "shield"]);
	let item = handler.resolve(&loc, "item1").unwrap();
	assert_eq!(item.get_as::<String>().as_deref().map(String::as_str), Some("shield"));
	assert!(handler.resolve(&loc, "item2").is_none());
	assert!(handler.resolve(&loc, "other").is_none());
}

#[test]
fn typed_handler_declines_mismatched_value_without_calling() {
	let called = Arc::new(AtomicBool::new(false));
	let (c1, c2) = (called.clone(), called.clone());
	let resolve: TypedResolveFn<Inventory> = Arc::new(move |_: Option<Arc<Inventory>>, _: &str| {
		c1.store(true, Ordering::SeqCst);
		None
	});
	let list: TypedListFn<Inventory> = Arc::new(move |_: Option<Arc<Inventory>>| {
		c2.store(true, Ordering::SeqCst);
		vec!["never".to_string()]
	});

	let mut handler = TypeHandler::<Inventory>::new();
	handler.add_handler(resolve, list);

	let wrong = Location::constant(7_u32);
	assert!(handler.resolve(&wrong, "anything").is_none());
	assert!(handler.list(&wrong).next().is_none());
	assert!(!called.load(Ordering::SeqCst));
}

#[test]
fn typed_handler_receives_none_for_absent_value() {
	let seen_none = Arc::new(AtomicBool::new(false));
	let flag = seen_none.clone();
	let resolve: TypedResolveFn<Inventory> = Arc::new(move |inv: Option<Arc<Inventory>>, _: &str| {
		flag.store(inv.is_none(), Ordering::SeqCst);
		None
	});
	let list: TypedListFn<Inventory> = Arc::new(|_: Option<Arc<Inventory>>| Vec::new());

	let mut handler = TypeHandler::<Inventory>::new();
	handler.add_handler(resolve, list);

	let empty = Location::from_getter(|| None, crate::TypeTag::of::<Inventory>());
	assert!(handler.resolve(&empty, "x").is_none());
	assert!(seen_none.load(Ordering::SeqCst));
}

#[test]
fn remove_handler_by_identity_keeps_others_in_order() {
	let mut handler = TypeHandler::<Inventory>::new();
	let (r1, l1) = constant_raw("first", &["x"]);
	let (r2, l2) = constant_raw("second", &["x"]);
	let (r3, l3) = constant_raw("third", &["x", "z"]);
	handler
		.add_raw_handler(r1.clone(), l1.clone())
		.add_raw_handler(r2, l2)
		.add_raw_handler(r3, l3);

	handler.remove_raw_handler(&r1, &l1).unwrap();

	assert_eq!(handler.handler_count(), 2);
	let loc = inventory(&[]);
	assert_eq!(tag_of(handler.resolve(&loc, "x")), Some("second"));
	assert_eq!(handler.list(&loc).collect::<Vec<_>>(), vec!["x", "x", "z"]);
}

#[test]
fn remove_typed_handler_by_identity() {
	let mut handler = TypeHandler::<Inventory>::new();
	let (r, l) = indexed_items();
	handler.add_handler(r.clone(), l.clone());

	handler.remove_handler(&r, &l).unwrap();
	assert_eq!(handler.handler_count(), 0);
	assert!(handler.resolve(&inventory(&["a"]), "item0").is_none());
}

#[test]
fn remove_unregistered_handler_fails() {
	let mut handler = TypeHandler::<Inventory>::new();
	let (r, l) = constant_raw("a", &["a"]);
	handler.add_raw_handler(r.clone(), l);

	let (_, other_list) = constant_raw("a", &["a"]);
	let err = handler.remove_raw_handler(&r, &other_list).err();
	assert!(matches!(err, Some(RegistryError::HandlerNotFound { .. })));
	assert_eq!(handler.handler_count(), 1);

	let (tr, tl) = indexed_items();
	let err = handler.remove_handler(&tr, &tl).err();
	assert!(matches!(err, Some(RegistryError::HandlerNotFound { .. })));
}

#[test]
fn structurally_equal_handlers_are_distinct() {
	let mut handler = TypeHandler::<Inventory>::new();
	let (r1, l1) = indexed_items();
	let (r2, l2) = indexed_items();
	handler.add_handler(r1, l1);

	assert!(handler.remove_handler(&r2, &l2).is_err());
}

#[test]
fn duplicate_path_is_rejected() {
	let mut handler = TypeHandler::<Inventory>::new();
	handler
		.add_path("count", Arc::new(|_: &Location| Some(tagged("one"))))
		.unwrap();

	let err = handler
		.add_path("count", Arc::new(|_: &Location| Some(tagged("two"))))
		.err();
	assert_eq!(
		err,
		Some(RegistryError::DuplicatePath {
			type_name: std::any::type_name::<Inventory>(),
			path: "count".to_string(),
		})
	);
	assert_eq!(tag_of(handler.resolve(&inventory(&[]), "count")), Some("one"));
}

#[test]
fn value_path_reads_from_value() {
	let mut handler = TypeHandler::<Inventory>::new();
	handler
		.add_value_path("count", |inv: Arc<Inventory>| Some(Location::constant(inv.items.len())))
		.unwrap();

	let count = handler.resolve(&inventory(&["a", "b"]), "count").unwrap();
	assert_eq!(count.get_as::<usize>().as_deref(), Some(&2));
}

#[test]
fn remove_path_is_idempotent() {
	let mut handler = TypeHandler::<Inventory>::new();
	handler
		.add_value_path("a", |_: Arc<Inventory>| Some(tagged("a")))
		.unwrap()
		.add_value_path("b", |_: Arc<Inventory>| Some(tagged("b")))
		.unwrap()
		.add_value_path("c", |_: Arc<Inventory>| Some(tagged("c")))
		.unwrap();

	handler.remove_path("b").remove_path("missing").remove_path("b");

	assert_eq!(handler.path_names().collect::<Vec<_>>(), vec!["a", "c"]);
	assert!(handler.resolve(&inventory(&[]), "b").is_none());
}

#[test]
fn list_concatenates_dynamic_then_applicable_static() {
	let mut handler = TypeHandler::<Inventory>::new();
	let (r, l) = indexed_items();
	let (r2, l2) = constant_raw("extra", &["item0", "misc"]);
	handler.add_handler(r, l).add_raw_handler(r2, l2);
	handler
		.add_value_path("count", |inv: Arc<Inventory>| Some(Location::constant(inv.items.len())))
		.unwrap()
		.add_value_path("first", |inv: Arc<Inventory>| {
			inv.items.first().cloned().map(Location::constant)
		})
		.unwrap()
		.add_nullable_path("never", |_: Option<Arc<Inventory>>| None)
		.unwrap();

	let names: Vec<String> = handler.list(&inventory(&["a", "b"])).collect();
	assert_eq!(names, vec!["item0", "item1", "item0", "misc", "count", "first"]);

	let names: Vec<String> = handler.list(&inventory(&[])).collect();
	assert_eq!(names, vec!["item0", "misc", "count"]);
}

#[test]
fn list_is_lazy() {
	let calls = Arc::new(AtomicUsize::new(0));
	let counter = calls.clone();
	let mut handler = TypeHandler::<Inventory>::new();
	handler
		.add_nullable_path("a", |_: Option<Arc<Inventory>>| Some(tagged("a")))
		.unwrap()
		.add_nullable_path("b", move |_: Option<Arc<Inventory>>| {
			counter.fetch_add(1, Ordering::SeqCst);
			Some(tagged("b"))
		})
		.unwrap();

	let loc = inventory(&[]);
	let mut names = handler.list(&loc);
	assert_eq!(names.next().as_deref(), Some("a"));
	assert_eq!(calls.load(Ordering::SeqCst), 0);
	assert_eq!(names.next().as_deref(), Some("b"));
	assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn component_path_declines_plain_location() {
	let mut handler = TypeHandler::<Battery>::new();
	handler
		.add_component_path("owner", |uid: EntityUid, _: Arc<Battery>| Some(Location::constant(uid)))
		.unwrap();

	let battery = Battery::new(10);
	let plain = Location::shared(battery.clone());
	assert!(handler.resolve(&plain, "owner").is_none());
	assert!(handler.list(&plain).next().is_none());

	let owned = battery_location(4, &battery);
	let owner = handler.resolve(&owned, "owner").unwrap();
	assert_eq!(owner.get_as::<EntityUid>().as_deref(), Some(&EntityUid(4)));
}

#[test]
fn component_path_declines_removed_component() {
	let mut handler = TypeHandler::<Battery>::new();
	handler
		.add_component_path("owner", |uid: EntityUid, _: Arc<Battery>| Some(Location::constant(uid)))
		.unwrap();

	let gone = Location::component::<Battery, _>(EntityUid(1), || None);
	assert!(handler.resolve(&gone, "owner").is_none());
}

fn battery_handler() -> TypeHandler<Battery> {
	let mut handler = TypeHandler::<Battery>::new();
	handler
		.add_property_with_setter(
			"power",
			|_: EntityUid, b: &Battery| b.power.load(Ordering::SeqCst),
			|_: EntityUid, value: i64, b: &Battery| {
				if !b.attached.load(Ordering::SeqCst) {
					return Err(SetError::unavailable("battery detached"));
				}
				if value < 0 {
					return Err(SetError::failed("negative power"));
				}
				b.power.store(value, Ordering::SeqCst);
				Ok(())
			},
		)
		.unwrap()
		.add_property("attached", |_: EntityUid, b: &Battery| b.attached.load(Ordering::SeqCst))
		.unwrap();
	handler
}

#[test]
fn property_get_matches_getter() {
	let handler = battery_handler();
	let battery = Battery::new(250);
	let loc = battery_location(9, &battery);

	let power = handler.resolve(&loc, "power").unwrap();
	assert_eq!(power.get_as::<i64>().as_deref(), Some(&battery.power.load(Ordering::SeqCst)));
	assert_eq!(power.declared_type(), crate::TypeTag::of::<i64>());

	battery.power.store(12, Ordering::SeqCst);
	assert_eq!(power.get_as::<i64>().as_deref(), Some(&12));
}

#[test]
fn property_setter_writes_through() {
	let handler = battery_handler();
	let battery = Battery::new(1);
	let power = handler.resolve(&battery_location(1, &battery), "power").unwrap();

	assert!(power.is_writable());
	power.set_value(80_i64).unwrap();
	assert_eq!(battery.power.load(Ordering::SeqCst), 80);
}

#[test]
fn property_setter_suppresses_unavailable_target() {
	let handler = battery_handler();
	let battery = Battery::new(5);
	let power = handler.resolve(&battery_location(1, &battery), "power").unwrap();

	battery.attached.store(false, Ordering::SeqCst);
	assert!(power.set_value(99_i64).is_ok());
	assert_eq!(battery.power.load(Ordering::SeqCst), 5);
}

#[test]
fn property_setter_propagates_other_failures() {
	let handler = battery_handler();
	let battery = Battery::new(5);
	let power = handler.resolve(&battery_location(1, &battery), "power").unwrap();

	assert!(matches!(power.set_value(-1_i64), Err(SetError::Failed(_))));
	assert!(matches!(power.set_value("ten"), Err(SetError::TypeMismatch { .. })));
	assert_eq!(battery.power.load(Ordering::SeqCst), 5);
}

#[test]
fn property_without_setter_is_read_only() {
	let handler = battery_handler();
	let attached = handler
		.resolve(&battery_location(1, &Battery::new(0)), "attached")
		.unwrap();

	assert!(!attached.is_writable());
	assert!(matches!(attached.set_value(false), Err(SetError::ReadOnly { .. })));
}
