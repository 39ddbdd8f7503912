//! Link-time component discovery.
//!
//! Crates declare components with [`register_component!`](crate::register_component),
//! which submits a [`StaticComponent`] to an `inventory` collection. Nothing
//! is registered until [`ComponentRegistryBuilder::with_registered_components`](crate::ComponentRegistryBuilder::with_registered_components)
//! runs the factories, so the result never depends on link or import order.

use crate::registration::Registration;

/// A component factory submitted at link time.
pub struct StaticComponent {
	factory: fn() -> Registration,
}

impl StaticComponent {
	/// Wraps a registration factory.
	pub const fn new(factory: fn() -> Registration) -> Self {
		Self { factory }
	}

	/// Runs the factory.
	pub fn registration(&self) -> Registration {
		(self.factory)()
	}
}

inventory::collect!(StaticComponent);

/// Runs every submitted factory.
///
/// Registrations are sorted by normalized type name so that the result is
/// independent of link order.
pub fn registered_components() -> Vec<Registration> {
	let mut registrations: Vec<Registration> = inventory::iter::<StaticComponent>
		.into_iter()
		.map(StaticComponent::registration)
		.collect();
	registrations.sort_by_cached_key(|registration| registration.name().trim().to_lowercase());
	registrations
}

/// Registers a component factory for link-time discovery.
///
/// The argument is a `fn() -> Registration`.
///
/// # Example
///
/// ```rust,ignore
/// use reinhardt_pagebuilder_registry::{Registration, register_component};
///
/// fn hero() -> Registration {
///     Registration::from_fn("HeroSection", |input| {
///         Ok(format!("<section class=\"hero\">{}</section>", input.escaped("title")))
///     })
/// }
///
/// register_component!(hero);
/// ```
#[macro_export]
macro_rules! register_component {
	($factory:expr) => {
		$crate::inventory::submit! {
			$crate::StaticComponent::new($factory)
		}
	};
}
