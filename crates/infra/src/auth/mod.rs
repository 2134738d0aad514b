//! Token exchange against the cluster authentication endpoint

pub mod token_exchange;

pub use token_exchange::HttpTokenExchanger;
