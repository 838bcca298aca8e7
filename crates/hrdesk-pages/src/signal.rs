//! Signal - observable single-threaded state
//!
//! `Signal<T>` holds a value behind `Rc<RefCell<T>>` and notifies subscribers
//! after every `set` or `update`. It is `!Send`: all reads and writes happen on
//! the UI thread.
//!
//! ## Example
//!
//! ```
//! use hrdesk_pages::signal::Signal;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let count = Signal::new(0);
//! let seen = Rc::new(Cell::new(0));
//!
//! let _subscription = count.subscribe({
//!     let seen = seen.clone();
//!     move |value: &i32| seen.set(*value)
//! });
//!
//! count.update(|n| *n += 1);
//! assert_eq!(count.get(), 1);
//! assert_eq!(seen.get(), 1);
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;

struct Observers<T> {
	next_id: Cell<u64>,
	callbacks: RefCell<Vec<(u64, Callback<T>)>>,
}

struct Inner<T> {
	value: RefCell<T>,
	observers: Rc<Observers<T>>,
}

/// Observable value shared between clones
pub struct Signal<T: 'static> {
	inner: Rc<Inner<T>>,
}

impl<T: 'static> Clone for Signal<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<T: 'static> Signal<T> {
	pub fn new(value: T) -> Self {
		Self {
			inner: Rc::new(Inner {
				value: RefCell::new(value),
				observers: Rc::new(Observers {
					next_id: Cell::new(0),
					callbacks: RefCell::new(Vec::new()),
				}),
			}),
		}
	}

	pub fn get(&self) -> T
	where
		T: Clone,
	{
		self.inner.value.borrow().clone()
	}

	/// Read the value without cloning it
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		f(&self.inner.value.borrow())
	}

	pub fn set(&self, value: T)
	where
		T: Clone,
	{
		*self.inner.value.borrow_mut() = value;
		self.notify();
	}

	pub fn update<F>(&self, f: F)
	where
		F: FnOnce(&mut T),
		T: Clone,
	{
		f(&mut self.inner.value.borrow_mut());
		self.notify();
	}

	/// Register `callback`, called with the new value after every change
	///
	/// The callback stays registered until the returned [`Subscription`] is
	/// dropped.
	pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
		let observers = &self.inner.observers;
		let id = observers.next_id.get();
		observers.next_id.set(id + 1);
		observers
			.callbacks
			.borrow_mut()
			.push((id, Rc::new(callback)));

		let weak: Weak<Observers<T>> = Rc::downgrade(observers);
		Subscription {
			unsubscribe: Some(Box::new(move || {
				if let Some(observers) = weak.upgrade() {
					observers.callbacks.borrow_mut().retain(|(i, _)| *i != id);
				}
			})),
		}
	}

	pub fn subscriber_count(&self) -> usize {
		self.inner.observers.callbacks.borrow().len()
	}

	pub fn downgrade(&self) -> WeakSignal<T> {
		WeakSignal {
			inner: Rc::downgrade(&self.inner),
		}
	}

	fn notify(&self)
	where
		T: Clone,
	{
		// Callbacks get a copy so they may write to the signal themselves
		let value = self.get();
		let callbacks: Vec<Callback<T>> = self
			.inner
			.observers
			.callbacks
			.borrow()
			.iter()
			.map(|(_, cb)| Rc::clone(cb))
			.collect();
		for callback in callbacks {
			callback(&value);
		}
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("value", &*self.inner.value.borrow())
			.field("subscribers", &self.inner.observers.callbacks.borrow().len())
			.finish()
	}
}

/// Non-owning handle to a [`Signal`]
pub struct WeakSignal<T: 'static> {
	inner: Weak<Inner<T>>,
}

impl<T: 'static> Clone for WeakSignal<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Weak::clone(&self.inner),
		}
	}
}

impl<T: 'static> WeakSignal<T> {
	/// The signal, unless every strong handle has been dropped
	pub fn upgrade(&self) -> Option<Signal<T>> {
		self.inner.upgrade().map(|inner| Signal { inner })
	}
}

impl<T: 'static> fmt::Debug for WeakSignal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("WeakSignal")
			.field("alive", &(self.inner.strong_count() > 0))
			.finish()
	}
}

/// Keeps a [`Signal::subscribe`] callback registered while alive
#[must_use = "dropping a Subscription unregisters its callback"]
pub struct Subscription {
	unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(unsubscribe) = self.unsubscribe.take() {
			unsubscribe();
		}
	}
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription").finish_non_exhaustive()
	}
}
