//! Core reporting logic
//!
//! Report views turn query parameters into template view-models. They talk
//! to the outside world only through [`DataSource`] (report data) and
//! [`StorageReader`] (file bytes), both injected by the embedding
//! application.

pub mod assets;
pub mod datasource;
pub mod error;
pub mod filter;
pub mod fixtures;
pub mod period;
pub mod reports;
pub mod storage;
pub mod table;
pub mod types;

pub use assets::{copy_assets, AssetError, AssetSource, CopyReport};
pub use datasource::{
    DataSource, DataSourceError, ExpenseRecord, GrossProfitReport, GrossProfitRequest, RevenueRecord,
};
pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails};
pub use filter::{FilterSheetData, FilterState, QueryParams};
pub use fixtures::FixtureDataSource;
pub use period::{PeriodPreset, PeriodRange};
pub use reports::{ReportDeps, ReportView, ViewContext, ViewModel, ViewResult};
pub use storage::{FsStorageReader, ServeError, ServedObject, StorageReader, StorageService};
