//! Deal input structures and intake loading

mod data;
pub mod loader;

pub use data::{
    funding_percentages_balanced, Deal, EarnoutKind, EarnoutOption, FundingSource, SourceType,
};
pub use loader::{load_deal, load_deal_from_reader, load_yearly_sde, LoadError};
