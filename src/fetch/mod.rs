// Request lifecycle state shared by the console pages and the CLI.
mod sequence;

pub mod handle;
pub mod state;
pub mod vm_list;

pub use handle::FetchHandle;
pub use state::FetchState;
pub use vm_list::{Pagination, StatusCounts, VmList, VmListState};
