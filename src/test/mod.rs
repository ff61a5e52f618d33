mod ledger;
mod mock;
mod store;
