///! Data types shared by the feeds, the merge step and the renderers
pub mod asset;
pub mod flag;
pub mod status_update;

pub use asset::{Asset, AssetSetting, CurrencyMeta};
pub use flag::Flag;
pub use status_update::{ComponentStatus, StatusUpdate};
