//! Name-keyed service registry with compile-time key typing.
//!
//! Storage is a single map from key string to an erased instance. Each [`ServiceKey<T>`] pairs a
//! key string with the type stored under it, so call sites get `Arc<T>` back without naming the
//! type again. Two keys sharing a name but not a type will overwrite each other; lookups through
//! the mismatched key then fail with [`RegistryError::TypeMismatch`].

// std
use std::{any::Any, marker::PhantomData};
// self
use crate::{_prelude::*, error::RegistryError};

type Entry = Box<dyn Any + Send + Sync>;

/// Typed handle for a registry slot.
pub struct ServiceKey<T>
where
	T: ?Sized,
{
	name: &'static str,
	_marker: PhantomData<fn() -> Arc<T>>,
}
impl<T> ServiceKey<T>
where
	T: ?Sized,
{
	/// Declares a key. Intended for `const` items.
	pub const fn new(name: &'static str) -> Self {
		Self { name, _marker: PhantomData }
	}

	/// Key string used for storage.
	pub const fn name(&self) -> &'static str {
		self.name
	}
}
impl<T> Clone for ServiceKey<T>
where
	T: ?Sized,
{
	fn clone(&self) -> Self {
		*self
	}
}
impl<T> Copy for ServiceKey<T> where T: ?Sized {}
impl<T> AsRef<str> for ServiceKey<T>
where
	T: ?Sized,
{
	fn as_ref(&self) -> &str {
		self.name
	}
}
impl<T> Debug for ServiceKey<T>
where
	T: ?Sized,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "ServiceKey({})", self.name)
	}
}
impl<T> Display for ServiceKey<T>
where
	T: ?Sized,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.name)
	}
}

/// Store of pre-built service instances resolved by key.
///
/// Instances are supplied eagerly; the registry never constructs anything itself.
#[derive(Default)]
pub struct ServiceRegistry(RwLock<HashMap<String, Entry>>);
impl ServiceRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores `instance` under `key`, replacing any previous entry.
	pub fn register<T>(&self, key: ServiceKey<T>, instance: Arc<T>)
	where
		T: 'static + ?Sized + Send + Sync,
	{
		self.0.write().insert(key.name.to_owned(), Box::new(instance));
	}

	/// Returns the instance stored under `key`.
	pub fn get<T>(&self, key: ServiceKey<T>) -> Result<Arc<T>, RegistryError>
	where
		T: 'static + ?Sized + Send + Sync,
	{
		let entries = self.0.read();
		let entry = entries
			.get(key.name)
			.ok_or_else(|| RegistryError::NotRegistered { key: key.name.to_owned() })?;

		entry.downcast_ref::<Arc<T>>().cloned().ok_or_else(|| RegistryError::TypeMismatch {
			key: key.name.to_owned(),
			expected: std::any::type_name::<T>(),
		})
	}

	/// Returns `true` if anything is stored under `key`.
	pub fn has(&self, key: impl AsRef<str>) -> bool {
		self.0.read().contains_key(key.as_ref())
	}

	/// Removes every entry.
	pub fn clear(&self) {
		self.0.write().clear();
	}

	/// Number of registered entries.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns `true` if nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}

	/// Registered key strings in lexical order.
	pub fn keys(&self) -> Vec<String> {
		let mut keys = self.0.read().keys().cloned().collect::<Vec<_>>();

		keys.sort_unstable();

		keys
	}
}
impl Debug for ServiceRegistry {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ServiceRegistry").field(&self.keys()).finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	trait Greeter
	where
		Self: Send + Sync,
	{
		fn greet(&self) -> String;
	}

	struct English;
	impl Greeter for English {
		fn greet(&self) -> String {
			"hello".into()
		}
	}

	const GREETER: ServiceKey<dyn Greeter> = ServiceKey::new("greeter");
	const COUNTER: ServiceKey<u32> = ServiceKey::new("counter");
	const COUNTER_AS_TEXT: ServiceKey<String> = ServiceKey::new("counter");

	#[test]
	fn register_then_get_returns_same_instance() {
		let registry = ServiceRegistry::new();
		let greeter: Arc<dyn Greeter> = Arc::new(English);

		registry.register(GREETER, greeter.clone());

		let resolved = registry.get(GREETER).expect("Registered service should resolve.");

		assert!(registry.has(GREETER));
		assert!(registry.has("greeter"));
		assert!(Arc::ptr_eq(&resolved, &greeter));
		assert_eq!(resolved.greet(), "hello");
	}

	#[test]
	fn re_registration_replaces_entry() {
		let registry = ServiceRegistry::new();
		let second = Arc::new(2);

		registry.register(COUNTER, Arc::new(1));
		registry.register(COUNTER, second.clone());

		let resolved = registry.get(COUNTER).expect("Replaced service should resolve.");

		assert!(Arc::ptr_eq(&resolved, &second));
		assert_eq!(registry.len(), 1);
	}

	#[test]
	fn missing_key_names_the_key() {
		let registry = ServiceRegistry::new();
		let Err(err) = registry.get(GREETER) else {
			panic!("Unregistered key should fail.");
		};

		assert_eq!(err, RegistryError::NotRegistered { key: "greeter".into() });
		assert!(err.to_string().contains("greeter"));
		assert!(!registry.has("greeter"));
	}

	#[test]
	fn clear_removes_every_entry() {
		let registry = ServiceRegistry::new();

		registry.register(GREETER, Arc::new(English) as Arc<dyn Greeter>);
		registry.register(COUNTER, Arc::new(7));
		registry.clear();

		assert!(!registry.has(GREETER));
		assert!(!registry.has(COUNTER));
		assert!(registry.is_empty());
		assert!(matches!(registry.get(COUNTER), Err(RegistryError::NotRegistered { .. })));
	}

	#[test]
	fn mismatched_key_type_is_reported() {
		let registry = ServiceRegistry::new();

		registry.register(COUNTER, Arc::new(7));

		let err = registry.get(COUNTER_AS_TEXT).expect_err("Lookup with another type should fail.");

		assert!(matches!(err, RegistryError::TypeMismatch { ref key, .. } if key == "counter"));
	}

	#[test]
	fn keys_are_sorted() {
		let registry = ServiceRegistry::new();

		registry.register(GREETER, Arc::new(English) as Arc<dyn Greeter>);
		registry.register(COUNTER, Arc::new(7));

		assert_eq!(registry.keys(), vec!["counter".to_owned(), "greeter".to_owned()]);
	}
}
