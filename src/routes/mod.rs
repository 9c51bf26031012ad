// Client-side routing
pub mod location;
pub mod router;
pub mod store;

pub use location::{HashChangeListener, Location, MemoryLocation};
pub use router::{path_from_hash, PathRouter};
pub use store::{Subscription, WeakWritable, Writable};
