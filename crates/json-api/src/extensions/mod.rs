//! Extension traits

mod depot;
mod result;

pub(crate) use depot::{DepotExt as _, REQUEST_ID_KEY};
pub(crate) use result::ResultExt as _;
