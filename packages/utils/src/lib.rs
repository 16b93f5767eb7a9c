pub mod decimals;
pub mod feed;
pub mod module;
pub mod oracle;
pub mod pair;
pub mod ratio;
pub mod token;
pub mod twap;
