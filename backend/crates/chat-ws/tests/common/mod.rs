#![allow(unused_imports)]

pub(crate) mod fakes;
pub(crate) mod jwt_helper;
pub(crate) mod test_client;
pub(crate) mod test_server;

pub use fakes::*;
pub use jwt_helper::*;
pub use test_client::*;
pub use test_server::*;
