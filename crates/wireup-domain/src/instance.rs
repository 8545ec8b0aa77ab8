//! Type-erased instances
//!
//! Providers produce values of arbitrary concrete types; the resolver only
//! ever moves them around behind [`Instance`]. Consumers recover the
//! concrete type at the edges via `downcast_rc`/`downcast_ref`.
//!
//! Instances are reference-counted but not thread-safe: the resolver is a
//! single-threaded, synchronous component (one scope per executing thread).

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use downcast_rs::{Downcast, impl_downcast};

/// Marker trait for values that can live in the object graph.
///
/// Blanket-implemented for every `'static` type, so providers never need to
/// opt in explicitly:
///
/// ```
/// use std::rc::Rc;
/// use wireup_domain::{Injectable, Instance};
///
/// struct HttpClient {
///     base_url: String,
/// }
///
/// let instance: Instance = Rc::new(HttpClient { base_url: "http://localhost".into() });
/// let client = instance.downcast_rc::<HttpClient>().ok().unwrap();
/// assert_eq!(client.base_url, "http://localhost");
/// ```
pub trait Injectable: Downcast {}
impl_downcast!(Injectable);

impl<T: Any> Injectable for T {}

impl fmt::Debug for dyn Injectable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Injectable")
    }
}

/// A type-erased, shared instance produced by a provider
pub type Instance = Rc<dyn Injectable>;
