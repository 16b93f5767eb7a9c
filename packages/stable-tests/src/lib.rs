pub mod builder;
pub mod mock_feed;
pub mod mock_module;
pub mod mock_oracle;
pub mod mock_pair;
pub mod mock_token;
