pub mod dataset;
pub mod error;
pub mod indicators;
pub mod replay;
pub mod row;


pub use dataset::ReplayDataset;
pub use error::MarketDataError;
pub use replay::ReplayCursor;
pub use row::PriceRow;
