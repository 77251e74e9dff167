mod condition;
mod defaults;
mod location;
mod meadow;
mod record_id;
mod tree;

pub use condition::{ParseConditionError, TreeCondition};
pub use defaults::{default_meadows, default_trees};
pub use location::{GeoPoint, TreeLocation, DEFAULT_LATITUDE, DEFAULT_LONGITUDE};
pub use meadow::{Meadow, DEFAULT_ICON, FRESH_CHECK_LABEL};
pub use record_id::mint_id;
pub use tree::Tree;

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::snapshot::Collection;

/// A row of one of the two synchronized collections.
pub trait CollectionRecord: Clone + Serialize + DeserializeOwned + Send + Sync {
    /// Collection this record type lives in.
    const COLLECTION: Collection;

    /// Record identifier (immutable once assigned).
    fn id(&self) -> &str;

    /// Owner stamped by the remote store on write.
    fn owner(&self) -> Option<Uuid>;
}
