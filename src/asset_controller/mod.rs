//! Asset controller program client: mint lifecycle, issuance, transfers and
//! enforcement actions.

pub mod data;
pub mod instructions;

pub use data::{fetch_asset_controller_account, AssetControllerAccount};
pub use instructions::*;
